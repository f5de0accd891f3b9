//! 맵 렌더러 상태 기계.
//!
//! 수명 주기는 `Empty → BaseRendered → Finalized` 한 방향이다. 베이스 맵은
//! 정확히 한 번만 그릴 수 있고, 오버레이는 베이스 위에 몇 번이든 얹을 수
//! 있으며, `finalize` 이후에는 어떤 변경도 받지 않는다. 렌더러는 자신의
//! 표면을 단독 소유한다. 동시 사용이 필요하면 호출자마다 별도 인스턴스를 둔다.

use super::style;
use super::surface::{DrawSurface, PanelId};
use crate::map::{MapKind, ScaledMap};
use crate::overlay::{DesignPoint, OperatingCurve, OverlayData, ShapeMismatchError};

/// 렌더러 오류.
#[derive(Debug)]
pub enum RenderError {
    /// 같은 인스턴스에 베이스 맵을 두 번 그리려 함.
    /// 그리기 전에 거부되므로 부분 상태 오염은 없다.
    AlreadyRendered,
    /// 베이스 맵 없이 오버레이/마무리를 시도함
    BaseNotRendered,
    /// 마무리된 렌더러에 대한 추가 변경 시도
    Finalized,
    /// 오버레이 배열 길이 불일치. 해당 호출만 중단된다.
    ShapeMismatch(ShapeMismatchError),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::AlreadyRendered => {
                write!(f, "베이스 맵이 이미 그려진 렌더러입니다")
            }
            RenderError::BaseNotRendered => {
                write!(f, "베이스 맵을 먼저 그려야 합니다")
            }
            RenderError::Finalized => write!(f, "마무리된 렌더러는 변경할 수 없습니다"),
            RenderError::ShapeMismatch(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ShapeMismatchError> for RenderError {
    fn from(value: ShapeMismatchError) -> Self {
        RenderError::ShapeMismatch(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderState {
    Empty,
    BaseRendered { scaled: bool },
    Finalized,
}

/// 두 패널짜리 맵 그림을 조립하는 렌더러.
/// 패널 A는 유량-효율, 패널 B는 유량-압력비이며 유량 축을 공유한다.
pub struct MapRenderer<S: DrawSurface> {
    surface: S,
    kind: MapKind,
    state: RenderState,
}

impl<S: DrawSurface> MapRenderer<S> {
    pub fn new(surface: S, kind: MapKind) -> Self {
        Self {
            surface,
            kind,
            state: RenderState::Empty,
        }
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    /// 베이스 맵: 속도선마다 두 패널에 곡선 하나씩.
    ///
    /// 곡선은 테이블의 행 순서 그대로 그린다. 값 기준으로 재정렬하지 않아야
    /// 팩터를 바꿔 다시 그려도 곡선의 정체성과 범례가 유지된다.
    /// 서지 라인이 있으면 압력비 패널에 함께 그린다.
    pub fn render_base(&mut self, map: &ScaledMap) -> Result<(), RenderError> {
        match self.state {
            RenderState::Empty => {}
            RenderState::BaseRendered { .. } => return Err(RenderError::AlreadyRendered),
            RenderState::Finalized => return Err(RenderError::Finalized),
        }

        let line_style = style::speed_line_style();
        for (index, line) in map.lines().iter().enumerate() {
            let label = style::speed_line_label(index, line.nc);
            let eta_points: Vec<[f64; 2]> = line
                .wc
                .iter()
                .zip(line.eta.iter())
                .map(|(&wc, &eta)| [wc, eta])
                .collect();
            let pr_points: Vec<[f64; 2]> = line
                .wc
                .iter()
                .zip(line.pr.iter())
                .map(|(&wc, &pr)| [wc, pr])
                .collect();
            self.surface
                .poly_line(PanelId::Efficiency, &eta_points, &line_style, Some(&label));
            self.surface
                .poly_line(PanelId::PressureRatio, &pr_points, &line_style, Some(&label));
        }

        if let Some(surge) = map.surge_line() {
            let points: Vec<[f64; 2]> = surge
                .wc()
                .iter()
                .zip(surge.pr().iter())
                .map(|(&wc, &pr)| [wc, pr])
                .collect();
            self.surface.poly_line(
                PanelId::PressureRatio,
                &points,
                &style::surge_line_style(),
                Some("Surge line"),
            );
        }

        self.state = RenderState::BaseRendered {
            scaled: map.is_scaled(),
        };
        Ok(())
    }

    /// 운전선: 전달된 순서 그대로의 연결 경로를 두 패널에 그린다.
    /// 길이 불일치는 그리기 전에 거부되어 이 호출만 중단된다.
    pub fn render_operating_curve(&mut self, curve: &OperatingCurve) -> Result<(), RenderError> {
        self.require_base()?;
        curve.validate()?;

        let curve_style = style::operating_curve_style();
        let eta_points: Vec<[f64; 2]> = curve
            .wc
            .iter()
            .zip(curve.eta.iter())
            .map(|(&wc, &eta)| [wc, eta])
            .collect();
        let pr_points: Vec<[f64; 2]> = curve
            .wc
            .iter()
            .zip(curve.pr.iter())
            .map(|(&wc, &pr)| [wc, pr])
            .collect();
        self.surface.poly_line(
            PanelId::Efficiency,
            &eta_points,
            &curve_style,
            Some("Operating line"),
        );
        self.surface.poly_line(
            PanelId::PressureRatio,
            &pr_points,
            &curve_style,
            Some("Operating line"),
        );
        Ok(())
    }

    /// 설계점: 두 패널에 마커 하나씩.
    pub fn render_design_point(&mut self, point: &DesignPoint) -> Result<(), RenderError> {
        self.require_base()?;
        let marker_style = style::design_point_style();
        self.surface
            .marker(PanelId::Efficiency, [point.wc, point.eta], &marker_style);
        self.surface
            .marker(PanelId::PressureRatio, [point.wc, point.pr], &marker_style);
        Ok(())
    }

    /// 오버레이 묶음을 한 번에 얹는다. 설계점 먼저, 운전선 다음.
    pub fn render_overlay(&mut self, overlay: &OverlayData) -> Result<(), RenderError> {
        if let Some(point) = &overlay.design_point {
            self.render_design_point(point)?;
        }
        if let Some(curve) = &overlay.operating_curve {
            self.render_operating_curve(curve)?;
        }
        Ok(())
    }

    /// 타이틀/축 라벨을 확정하고 표면을 표시 상태로 넘긴다.
    /// 타이틀에는 스케일 적용 여부가 반드시 표기된다.
    /// 이후의 모든 변경 호출은 거부된다.
    pub fn finalize(&mut self, title: &str) -> Result<(), RenderError> {
        let scaled = match self.state {
            RenderState::Empty => return Err(RenderError::BaseNotRendered),
            RenderState::BaseRendered { scaled } => scaled,
            RenderState::Finalized => return Err(RenderError::Finalized),
        };

        self.surface.set_title(&style::compose_title(title, scaled));
        for panel in [PanelId::Efficiency, PanelId::PressureRatio] {
            let (x_label, y_label) = style::axis_labels(self.kind, panel);
            self.surface.set_axis_labels(panel, x_label, y_label);
        }
        self.surface.present();
        self.state = RenderState::Finalized;
        Ok(())
    }

    /// 명시적 리셋: 표면을 비우고 수명 주기를 처음으로 되돌린다.
    pub fn reset(&mut self) {
        self.surface.clear();
        self.state = RenderState::Empty;
    }

    /// 지금까지의 표면 상태를 들여다본다.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// 렌더러를 해체하고 표면을 돌려받는다.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn require_base(&self) -> Result<(), RenderError> {
        match self.state {
            RenderState::Empty => Err(RenderError::BaseNotRendered),
            RenderState::BaseRendered { .. } => Ok(()),
            RenderState::Finalized => Err(RenderError::Finalized),
        }
    }
}
