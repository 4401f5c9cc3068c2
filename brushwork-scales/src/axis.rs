use std::fmt::Display;

use crate::band::BandScale;
use crate::error::ScaleError;
use crate::numeric::linear::LinearNumericScale;
use crate::numeric::ContinuousNumericScale;
use crate::temporal::TimeScale;

/// Positional chart axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    Linear,
    Time,
    Band,
}

impl ScaleKind {
    pub fn is_continuous(&self) -> bool {
        matches!(self, ScaleKind::Linear | ScaleKind::Time)
    }
}

impl Display for ScaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleKind::Linear => write!(f, "linear"),
            ScaleKind::Time => write!(f, "time"),
            ScaleKind::Band => write!(f, "band"),
        }
    }
}

/// A positional scale mapping data values to pixel offsets.
///
/// Data values are plain `f64`s: numbers for linear scales, epoch
/// milliseconds for time scales and category indices for band scales.
#[derive(Debug, Clone)]
pub enum AxisScale {
    Linear(LinearNumericScale),
    Time(TimeScale),
    Band(BandScale),
}

impl AxisScale {
    pub fn kind(&self) -> ScaleKind {
        match self {
            AxisScale::Linear(_) => ScaleKind::Linear,
            AxisScale::Time(_) => ScaleKind::Time,
            AxisScale::Band(_) => ScaleKind::Band,
        }
    }

    pub fn is_invertible(&self) -> bool {
        self.kind().is_continuous()
    }

    /// Forward mapping: data value to pixel offset
    pub fn scale(&self, value: f64) -> f64 {
        match self {
            AxisScale::Linear(scale) => scale.scale(value),
            AxisScale::Time(scale) => scale.scale(value),
            AxisScale::Band(scale) => {
                if value.is_finite() && value >= 0.0 {
                    scale.scale_index(value as usize)
                } else {
                    f64::NAN
                }
            }
        }
    }

    /// Inverse mapping: pixel offset to data value. Only continuous scales invert.
    pub fn invert(&self, value: f64) -> Result<f64, ScaleError> {
        match self {
            AxisScale::Linear(scale) => Ok(scale.invert(value)),
            AxisScale::Time(scale) => Ok(scale.invert(value)),
            AxisScale::Band(_) => Err(ScaleError::NotInvertible(ScaleKind::Band)),
        }
    }

    pub fn range(&self) -> (f64, f64) {
        match self {
            AxisScale::Linear(scale) => scale.range(),
            AxisScale::Time(scale) => scale.range(),
            AxisScale::Band(scale) => scale.get_range(),
        }
    }
}

impl From<LinearNumericScale> for AxisScale {
    fn from(scale: LinearNumericScale) -> Self {
        AxisScale::Linear(scale)
    }
}

impl From<TimeScale> for AxisScale {
    fn from(scale: TimeScale) -> Self {
        AxisScale::Time(scale)
    }
}

impl From<BandScale> for AxisScale {
    fn from(scale: BandScale) -> Self {
        AxisScale::Band(scale)
    }
}

/// Supplies the chart's current positional scales.
///
/// Scales are requested fresh for every conversion, so implementations should
/// reflect the chart configuration at call time.
pub trait ScaleAdapter {
    fn scale_for(&self, axis: Axis) -> Option<AxisScale>;
}

/// A fixed pair of scales
#[derive(Debug, Clone, Default)]
pub struct StaticScales {
    pub x: Option<AxisScale>,
    pub y: Option<AxisScale>,
}

impl StaticScales {
    pub fn new(x: impl Into<AxisScale>, y: impl Into<AxisScale>) -> Self {
        Self {
            x: Some(x.into()),
            y: Some(y.into()),
        }
    }
}

impl ScaleAdapter for StaticScales {
    fn scale_for(&self, axis: Axis) -> Option<AxisScale> {
        match axis {
            Axis::X => self.x.clone(),
            Axis::Y => self.y.clone(),
        }
    }
}
