pub mod array;
pub mod axis;
pub mod band;
pub mod error;
pub mod numeric;
pub mod temporal;

pub use axis::{Axis, AxisScale, ScaleAdapter, ScaleKind, StaticScales};
pub use error::ScaleError;
