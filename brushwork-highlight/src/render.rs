use brushwork_scales::{Axis, ScaleAdapter};
use palette::Srgba;
use serde::Serialize;

use crate::config::HighlightConfig;
use crate::error::HighlightError;
use crate::geometry::PixelRect;

pub const CONTAINER_CLASS: &str = "rv-highlight-container";
pub const MOUSE_TARGET_CLASS: &str = "rv-mouse-target";
pub const HIGHLIGHT_CLASS: &str = "rv-highlight";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RectPlan {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// What the host draws for the overlay: a transparent hit target that
/// receives pointer events and the visible highlight rectangle, both inside
/// a group translated by `group_offset`
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightRenderPlan {
    pub group_offset: [f64; 2],
    pub class_name: String,
    pub hit_target: RectPlan,
    pub highlight: RectPlan,
    pub fill: Srgba,
    pub opacity: f64,
}

impl HighlightRenderPlan {
    pub fn try_new(
        config: &HighlightConfig,
        scales: &dyn ScaleAdapter,
        current: &PixelRect,
    ) -> Result<Self, HighlightError> {
        let offset = |value: Option<f64>, axis: Axis| -> Result<f64, HighlightError> {
            match value {
                Some(value) if value != 0.0 => Ok(scales
                    .scale_for(axis)
                    .ok_or(HighlightError::MissingScaleAdapter(axis))?
                    .scale(value)),
                _ => Ok(0.0),
            }
        };

        let touch_width = config.touch_width();
        let touch_height = config.touch_height();

        let class_name = if config.class_name.is_empty() {
            CONTAINER_CLASS.to_string()
        } else {
            format!("{} {CONTAINER_CLASS}", config.class_name)
        };

        Ok(Self {
            group_offset: [
                offset(config.highlight_x, Axis::X)?,
                offset(config.highlight_y, Axis::Y)?,
            ],
            class_name,
            hit_target: RectPlan {
                x: 0.0,
                y: 0.0,
                width: touch_width.max(0.0),
                height: touch_height.max(0.0),
            },
            highlight: RectPlan {
                x: current.left,
                y: current.top,
                width: current.width().max(0.0).min(touch_width),
                height: current.height().max(0.0).min(touch_height),
            },
            fill: config.fill()?,
            opacity: config.opacity,
        })
    }
}
