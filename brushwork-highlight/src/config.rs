use css_color_parser::Color;
use palette::Srgba;
use serde::{Deserialize, Serialize};

use crate::error::HighlightError;

pub const DEFAULT_COLOR: &str = "rgb(77, 182, 172)";
pub const DEFAULT_OPACITY: f64 = 0.3;

/// Layout of the host chart: inner plot size plus the four margins, in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Geometry {
    pub inner_width: f64,
    pub inner_height: f64,
    pub margin_left: f64,
    pub margin_right: f64,
    pub margin_top: f64,
    pub margin_bottom: f64,
}

impl Geometry {
    pub fn new(inner_width: f64, inner_height: f64) -> Self {
        Self {
            inner_width,
            inner_height,
            ..Default::default()
        }
    }

    pub fn with_margins(mut self, left: f64, right: f64, top: f64, bottom: f64) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self.margin_top = top;
        self.margin_bottom = bottom;
        self
    }

    pub fn plot_width(&self) -> f64 {
        self.inner_width + self.margin_left + self.margin_right
    }

    pub fn plot_height(&self) -> f64 {
        self.inner_height + self.margin_top + self.margin_bottom
    }

    pub fn validate(&self) -> Result<(), HighlightError> {
        let fields = [
            ("innerWidth", self.inner_width),
            ("innerHeight", self.inner_height),
            ("marginLeft", self.margin_left),
            ("marginRight", self.margin_right),
            ("marginTop", self.margin_top),
            ("marginBottom", self.margin_bottom),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(HighlightError::InvalidGeometry { field, value });
            }
        }
        Ok(())
    }
}

/// Which end callbacks fire when a gesture finishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndCallbackPolicy {
    /// `on_brush_end` after a brush, `on_drag_end` after a drag
    #[default]
    ActiveGesture,
    /// `on_brush_end` after a brush, and `on_drag_end` after any gesture
    /// whenever dragging is enabled, so a brush may report through both
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightConfig {
    #[serde(flatten)]
    pub geometry: Geometry,
    pub enable_x: bool,
    pub enable_y: bool,
    pub drag: bool,
    /// Hit target width, in place of the full plot width
    pub highlight_width: Option<f64>,
    pub highlight_height: Option<f64>,
    /// Data-space offset of the overlay group along x
    pub highlight_x: Option<f64>,
    pub highlight_y: Option<f64>,
    pub color: String,
    pub opacity: f64,
    pub class_name: String,
    pub end_callbacks: EndCallbackPolicy,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            geometry: Geometry::default(),
            enable_x: true,
            enable_y: true,
            drag: false,
            highlight_width: None,
            highlight_height: None,
            highlight_x: None,
            highlight_y: None,
            color: DEFAULT_COLOR.to_string(),
            opacity: DEFAULT_OPACITY,
            class_name: String::new(),
            end_callbacks: EndCallbackPolicy::default(),
        }
    }
}

impl HighlightConfig {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Default::default()
        }
    }

    pub fn with_axes(mut self, enable_x: bool, enable_y: bool) -> Self {
        self.enable_x = enable_x;
        self.enable_y = enable_y;
        self
    }

    pub fn with_drag(mut self, drag: bool) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_end_callbacks(mut self, policy: EndCallbackPolicy) -> Self {
        self.end_callbacks = policy;
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn validate(&self) -> Result<(), HighlightError> {
        self.geometry.validate()?;
        for (field, value) in [
            ("highlightWidth", self.highlight_width),
            ("highlightHeight", self.highlight_height),
        ] {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(HighlightError::InvalidGeometry { field, value });
                }
            }
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(HighlightError::InvalidOpacity(self.opacity));
        }
        self.fill()?;
        Ok(())
    }

    /// Width of the hit target. An unset or zero override falls back to the
    /// full plot width.
    pub fn touch_width(&self) -> f64 {
        self.highlight_width
            .filter(|width| *width != 0.0)
            .unwrap_or_else(|| self.geometry.plot_width())
    }

    pub fn touch_height(&self) -> f64 {
        self.highlight_height
            .filter(|height| *height != 0.0)
            .unwrap_or_else(|| self.geometry.plot_height())
    }

    /// Highlight fill color
    pub fn fill(&self) -> Result<Srgba, HighlightError> {
        let color = self
            .color
            .parse::<Color>()
            .map_err(|_| HighlightError::InvalidColor(self.color.clone()))?;
        Ok(Srgba::new(
            color.r as f32 / 255.0,
            color.g as f32 / 255.0,
            color.b as f32 / 255.0,
            color.a,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_defaults() {
        let config = HighlightConfig::default();
        assert!(config.enable_x && config.enable_y);
        assert!(!config.drag);
        assert_eq!(config.color, "rgb(77, 182, 172)");
        assert_eq!(config.end_callbacks, EndCallbackPolicy::ActiveGesture);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_camel_case_json() {
        let config = HighlightConfig::from_json(
            r#"{
                "innerWidth": 750, "innerHeight": 100,
                "marginLeft": 40, "marginRight": 10, "marginTop": 10, "marginBottom": 40,
                "enableY": false, "drag": true, "highlightHeight": 120,
                "endCallbacks": "legacy"
            }"#,
        )
        .unwrap();
        assert_eq!(
            config.geometry,
            Geometry::new(750.0, 100.0).with_margins(40.0, 10.0, 10.0, 40.0)
        );
        assert!(config.enable_x);
        assert!(!config.enable_y);
        assert!(config.drag);
        assert_eq!(config.end_callbacks, EndCallbackPolicy::Legacy);
        assert_approx_eq!(f64, config.touch_width(), 800.0);
        assert_approx_eq!(f64, config.touch_height(), 120.0);
    }

    #[test]
    fn test_zero_override_falls_back_to_plot_size() {
        let config = HighlightConfig {
            highlight_width: Some(0.0),
            ..HighlightConfig::new(Geometry::new(100.0, 50.0).with_margins(5.0, 5.0, 0.0, 0.0))
        };
        assert_approx_eq!(f64, config.touch_width(), 110.0);
    }

    #[test]
    fn test_validate_rejects_negative_margin() {
        let config =
            HighlightConfig::new(Geometry::new(100.0, 50.0).with_margins(-1.0, 0.0, 0.0, 0.0));
        assert_eq!(
            config.validate(),
            Err(HighlightError::InvalidGeometry {
                field: "marginLeft",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_color_and_opacity() {
        let config = HighlightConfig {
            color: "not-a-color".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(HighlightError::InvalidColor("not-a-color".to_string()))
        );

        let config = HighlightConfig {
            opacity: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(HighlightError::InvalidOpacity(1.5)));
    }

    #[test]
    fn test_fill() {
        let fill = HighlightConfig::default().fill().unwrap();
        assert_approx_eq!(f32, fill.red, 77.0 / 255.0);
        assert_approx_eq!(f32, fill.green, 182.0 / 255.0);
        assert_approx_eq!(f32, fill.blue, 172.0 / 255.0);
        assert_approx_eq!(f32, fill.alpha, 1.0);
    }
}
