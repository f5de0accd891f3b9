//! 맵 렌더링 모듈 모음.
//! 그리기 표면 추상화, 스타일 상수, 렌더러 상태 기계로 구성한다.

pub mod renderer;
pub mod style;
pub mod surface;

pub use renderer::{MapRenderer, RenderError};
pub use style::{compose_title, Color, CurveStyle, LineKind, MarkerShape, MarkerStyle};
pub use surface::{DrawCommand, DrawSurface, PanelId, RecordingSurface};
