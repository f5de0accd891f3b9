//! 그리기 표면 추상화.
//!
//! 렌더러는 표면을 유량 축을 공유하는 두 패널짜리 불투명한 캔버스로만 다룬다.
//! GUI는 egui_plot 기반 표면을, CLI와 테스트는 명령 기록 표면을 쓴다.

use super::style::{CurveStyle, MarkerStyle};

/// 두 패널의 식별자. 패널 A는 유량-효율, 패널 B는 유량-압력비.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelId {
    Efficiency,
    PressureRatio,
}

/// 프레젠테이션 협력자 인터페이스. 모든 호출은 누적되며 암묵적 초기화는 없다.
pub trait DrawSurface {
    /// 연결된 경로 하나를 주어진 순서 그대로 그린다.
    fn poly_line(
        &mut self,
        panel: PanelId,
        points: &[[f64; 2]],
        style: &CurveStyle,
        label: Option<&str>,
    );

    /// 단일 마커를 그린다.
    fn marker(&mut self, panel: PanelId, point: [f64; 2], style: &MarkerStyle);

    /// 전체 타이틀을 정한다.
    fn set_title(&mut self, title: &str);

    /// 패널의 축 라벨을 정한다.
    fn set_axis_labels(&mut self, panel: PanelId, x_label: &str, y_label: &str);

    /// 표시/내보내기 트리거.
    fn present(&mut self);

    /// 누적된 상태를 모두 비운다. 명시적 리셋 전용이다.
    fn clear(&mut self);
}

/// 기록된 그리기 명령 하나.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    PolyLine {
        panel: PanelId,
        points: Vec<[f64; 2]>,
        style: CurveStyle,
        label: Option<String>,
    },
    Marker {
        panel: PanelId,
        point: [f64; 2],
        style: MarkerStyle,
    },
    Title(String),
    AxisLabels {
        panel: PanelId,
        x_label: String,
        y_label: String,
    },
    Present,
}

/// 명령을 호출 순서 그대로 기록하는 표면.
/// CLI 미리보기 출력과, 그리기 순서를 검증하는 테스트에 쓴다.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기록된 명령 전체, 발행 순서 그대로.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl DrawSurface for RecordingSurface {
    fn poly_line(
        &mut self,
        panel: PanelId,
        points: &[[f64; 2]],
        style: &CurveStyle,
        label: Option<&str>,
    ) {
        self.commands.push(DrawCommand::PolyLine {
            panel,
            points: points.to_vec(),
            style: *style,
            label: label.map(str::to_string),
        });
    }

    fn marker(&mut self, panel: PanelId, point: [f64; 2], style: &MarkerStyle) {
        self.commands.push(DrawCommand::Marker {
            panel,
            point,
            style: *style,
        });
    }

    fn set_title(&mut self, title: &str) {
        self.commands.push(DrawCommand::Title(title.to_string()));
    }

    fn set_axis_labels(&mut self, panel: PanelId, x_label: &str, y_label: &str) {
        self.commands.push(DrawCommand::AxisLabels {
            panel,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
        });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }

    fn clear(&mut self) {
        self.commands.clear();
    }
}
