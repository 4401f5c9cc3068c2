pub mod callbacks;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod render;
pub mod selection;

pub use callbacks::HighlightCallbacks;
pub use config::{EndCallbackPolicy, Geometry, HighlightConfig};
pub use convert::ConversionOptions;
pub use engine::{GestureMode, HighlightControl, HighlightEngine};
pub use error::HighlightError;
pub use geometry::{PixelRect, MIN_SELECTION_SIZE};
pub use render::{HighlightRenderPlan, RectPlan};
pub use selection::{HighlightArea, Selection};
