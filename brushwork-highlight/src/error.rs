use brushwork_scales::{Axis, ScaleError, ScaleKind};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HighlightError {
    #[error("Cannot convert pixel offsets through the {kind} scale on the {axis} axis: only continuous scales are invertible")]
    UnsupportedScaleKind { axis: Axis, kind: ScaleKind },

    #[error("Invalid geometry: {field} must be a finite, non-negative number (got {value})")]
    InvalidGeometry { field: &'static str, value: f64 },

    #[error("No scale available for enabled {0} axis")]
    MissingScaleAdapter(Axis),

    #[error("Invalid color: `{0}`")]
    InvalidColor(String),

    #[error("Invalid opacity {0}: must be between 0 and 1")]
    InvalidOpacity(f64),

    #[error("Highlight engine has been dropped")]
    EngineDropped,

    #[error("Scale error: {0}")]
    ScaleError(#[from] ScaleError),
}
