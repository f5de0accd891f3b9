use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::map::{
    InvalidScaleFactorError, MalformedMapError, MapFile, MapFileError, ScaleFactors,
};
use crate::overlay::{OverlayData, PerformanceDataError};
use crate::render::RenderError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 맵 파일 읽기/파싱 오류
    MapFile(MapFileError),
    /// 맵 테이블 검증 오류
    Map(MalformedMapError),
    /// 스케일 팩터 검증 오류
    Scale(InvalidScaleFactorError),
    /// 성능 데이터 CSV 오류
    Performance(PerformanceDataError),
    /// 렌더러 상태/오버레이 오류
    Render(RenderError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::MapFile(e) => write!(f, "맵 파일 오류: {e}"),
            AppError::Map(e) => write!(f, "맵 데이터 오류: {e}"),
            AppError::Scale(e) => write!(f, "스케일 팩터 오류: {e}"),
            AppError::Performance(e) => write!(f, "성능 데이터 오류: {e}"),
            AppError::Render(e) => write!(f, "렌더 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<MapFileError> for AppError {
    fn from(value: MapFileError) -> Self {
        AppError::MapFile(value)
    }
}

impl From<MalformedMapError> for AppError {
    fn from(value: MalformedMapError) -> Self {
        AppError::Map(value)
    }
}

impl From<InvalidScaleFactorError> for AppError {
    fn from(value: InvalidScaleFactorError) -> Self {
        AppError::Scale(value)
    }
}

impl From<PerformanceDataError> for AppError {
    fn from(value: PerformanceDataError) -> Self {
        AppError::Performance(value)
    }
}

impl From<RenderError> for AppError {
    fn from(value: RenderError) -> Self {
        AppError::Render(value)
    }
}

/// CLI 한 세션의 작업 상태. 맵, 현재 팩터, 오버레이를 함께 들고 다닌다.
/// 팩터는 항상 명시적 identity에서 출발한다. 숨은 기본값으로 스케일이
/// 걸린 채 시작하는 일을 막는다.
#[derive(Debug)]
pub struct Session {
    pub map: Option<MapFile>,
    pub factors: ScaleFactors,
    pub overlay: Option<OverlayData>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            map: None,
            factors: ScaleFactors::identity(),
            overlay: None,
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator, session: &mut Session) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::LoadMap => ui_cli::handle_load_map(tr, config, session)?,
            MenuChoice::ScaleFactors => ui_cli::handle_scale_factors(tr, session)?,
            MenuChoice::Overlay => ui_cli::handle_overlay(tr, config, session)?,
            MenuChoice::Preview => ui_cli::handle_preview(tr, config, session)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
