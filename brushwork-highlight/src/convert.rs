//! Mapping between the overlay's pixel rectangles and data-space selections

use brushwork_scales::{Axis, AxisScale, ScaleAdapter};

use crate::config::HighlightConfig;
use crate::error::HighlightError;
use crate::geometry::PixelRect;
use crate::selection::{HighlightArea, Selection};

/// Offset policy for pixel to data conversion.
///
/// Pointer gestures invert the y edges of a two-axis rectangle
/// without removing the top margin, while programmatic areas are placed with
/// it. Each call site states which convention its rectangle uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionOptions {
    /// Subtract `margin_top` from the top and bottom edges before inverting
    /// when both axes are enabled. Y-only selections always subtract it.
    pub apply_top_margin_to_bottom: bool,
}

impl ConversionOptions {
    pub const GESTURE: ConversionOptions = ConversionOptions {
        apply_top_margin_to_bottom: false,
    };

    pub const PROGRAMMATIC: ConversionOptions = ConversionOptions {
        apply_top_margin_to_bottom: true,
    };
}

fn scale_for(scales: &dyn ScaleAdapter, axis: Axis) -> Result<AxisScale, HighlightError> {
    scales
        .scale_for(axis)
        .ok_or(HighlightError::MissingScaleAdapter(axis))
}

fn invertible_scale_for(scales: &dyn ScaleAdapter, axis: Axis) -> Result<AxisScale, HighlightError> {
    let scale = scale_for(scales, axis)?;
    if !scale.is_invertible() {
        return Err(HighlightError::UnsupportedScaleKind {
            axis,
            kind: scale.kind(),
        });
    }
    Ok(scale)
}

/// Check that every enabled axis has a scale
pub fn check_scales(config: &HighlightConfig, scales: &dyn ScaleAdapter) -> Result<(), HighlightError> {
    if config.enable_x {
        scale_for(scales, Axis::X)?;
    }
    if config.enable_y {
        scale_for(scales, Axis::Y)?;
    }
    Ok(())
}

/// Invert a pixel rectangle into a data-space selection holding the edges of
/// the enabled axes only
pub fn rect_to_selection(
    rect: &PixelRect,
    config: &HighlightConfig,
    scales: &dyn ScaleAdapter,
    options: ConversionOptions,
) -> Result<Selection, HighlightError> {
    let margin_left = config.geometry.margin_left;
    let margin_top = config.geometry.margin_top;

    match (config.enable_x, config.enable_y) {
        (true, true) => {
            let x_scale = invertible_scale_for(scales, Axis::X)?;
            let y_scale = invertible_scale_for(scales, Axis::Y)?;
            let y_offset = if options.apply_top_margin_to_bottom {
                margin_top
            } else {
                0.0
            };
            Ok(Selection {
                top: Some(y_scale.invert(rect.top - y_offset)?),
                right: Some(x_scale.invert(rect.right - margin_left)?),
                bottom: Some(y_scale.invert(rect.bottom - y_offset)?),
                left: Some(x_scale.invert(rect.left - margin_left)?),
            })
        }
        (false, true) => {
            let y_scale = invertible_scale_for(scales, Axis::Y)?;
            Ok(Selection {
                top: Some(y_scale.invert(rect.top - margin_top)?),
                bottom: Some(y_scale.invert(rect.bottom - margin_top)?),
                ..Default::default()
            })
        }
        (true, false) => {
            let x_scale = invertible_scale_for(scales, Axis::X)?;
            Ok(Selection {
                right: Some(x_scale.invert(rect.right - margin_left)?),
                left: Some(x_scale.invert(rect.left - margin_left)?),
                ..Default::default()
            })
        }
        (false, false) => Ok(Selection::default()),
    }
}

/// Place a data-space area in pixel space. Absent edges extend to the full
/// overlay extent on their side.
pub fn area_to_rect(
    area: &HighlightArea,
    config: &HighlightConfig,
    scales: &dyn ScaleAdapter,
) -> Result<PixelRect, HighlightError> {
    let margin_left = config.geometry.margin_left;
    let margin_top = config.geometry.margin_top;

    let x_scale = if area.left.is_some() || area.right.is_some() {
        Some(scale_for(scales, Axis::X)?)
    } else {
        None
    };
    let y_scale = if area.top.is_some() || area.bottom.is_some() {
        Some(scale_for(scales, Axis::Y)?)
    } else {
        None
    };

    let x_pos = |value: Option<f64>, default: f64| match (value, &x_scale) {
        (Some(value), Some(scale)) => scale.scale(value) + margin_left,
        _ => default,
    };
    let y_pos = |value: Option<f64>, default: f64| match (value, &y_scale) {
        (Some(value), Some(scale)) => scale.scale(value) + margin_top,
        _ => default,
    };

    Ok(PixelRect {
        top: y_pos(area.top, 0.0),
        right: x_pos(area.right, config.touch_width()),
        bottom: y_pos(area.bottom, config.touch_height()),
        left: x_pos(area.left, margin_left),
    })
}

/// Rectangle covering the whole plot
pub fn full_extent_rect(config: &HighlightConfig) -> PixelRect {
    let geometry = &config.geometry;
    PixelRect {
        top: 0.0,
        right: geometry.inner_width + geometry.margin_left - geometry.margin_right,
        bottom: config.touch_height(),
        left: geometry.margin_left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Geometry;
    use brushwork_scales::band::BandScale;
    use brushwork_scales::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
    use brushwork_scales::{ScaleKind, StaticScales};
    use float_cmp::assert_approx_eq;

    fn linear(domain: (f64, f64), range: (f64, f64)) -> AxisScale {
        LinearNumericScale::new(&LinearNumericScaleConfig {
            domain,
            range,
            ..Default::default()
        })
        .into()
    }

    fn scales() -> StaticScales {
        StaticScales {
            x: Some(linear((0.0, 100.0), (0.0, 200.0))),
            y: Some(linear((0.0, 10.0), (100.0, 0.0))),
        }
    }

    fn config() -> HighlightConfig {
        HighlightConfig::new(Geometry::new(200.0, 100.0).with_margins(20.0, 10.0, 5.0, 15.0))
    }

    #[test]
    fn test_x_only_conversion_omits_y_edges() {
        let config = config().with_axes(true, false);
        let rect = PixelRect::new(0.0, 120.0, 120.0, 40.0);
        let selection =
            rect_to_selection(&rect, &config, &scales(), ConversionOptions::GESTURE).unwrap();
        assert_eq!(selection.top, None);
        assert_eq!(selection.bottom, None);
        assert_approx_eq!(f64, selection.left.unwrap(), 10.0);
        assert_approx_eq!(f64, selection.right.unwrap(), 50.0);
    }

    #[test]
    fn test_y_only_conversion_always_removes_top_margin() {
        let config = config().with_axes(false, true);
        let rect = PixelRect::new(15.0, 0.0, 55.0, 0.0);
        for options in [ConversionOptions::GESTURE, ConversionOptions::PROGRAMMATIC] {
            let selection = rect_to_selection(&rect, &config, &scales(), options).unwrap();
            assert_approx_eq!(f64, selection.top.unwrap(), 9.0);
            assert_approx_eq!(f64, selection.bottom.unwrap(), 5.0);
            assert_eq!(selection.left, None);
        }
    }

    #[test]
    fn test_two_axis_top_margin_policy() {
        let config = config();
        let rect = PixelRect::new(15.0, 120.0, 55.0, 40.0);

        let gesture =
            rect_to_selection(&rect, &config, &scales(), ConversionOptions::GESTURE).unwrap();
        assert_approx_eq!(f64, gesture.top.unwrap(), 8.5);
        assert_approx_eq!(f64, gesture.bottom.unwrap(), 4.5);

        let programmatic =
            rect_to_selection(&rect, &config, &scales(), ConversionOptions::PROGRAMMATIC).unwrap();
        assert_approx_eq!(f64, programmatic.top.unwrap(), 9.0);
        assert_approx_eq!(f64, programmatic.bottom.unwrap(), 5.0);
    }

    #[test]
    fn test_no_enabled_axis_yields_empty_selection() {
        let config = config().with_axes(false, false);
        let selection = rect_to_selection(
            &PixelRect::new(0.0, 50.0, 50.0, 0.0),
            &config,
            &StaticScales::default(),
            ConversionOptions::GESTURE,
        )
        .unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn test_band_scale_is_unsupported() {
        let config = config().with_axes(true, false);
        let band = BandScale::try_new(["a", "b", "c"]).unwrap().range((0.0, 200.0));
        let scales = StaticScales {
            x: Some(band.into()),
            y: None,
        };
        assert_eq!(
            rect_to_selection(&PixelRect::ZERO, &config, &scales, ConversionOptions::GESTURE),
            Err(HighlightError::UnsupportedScaleKind {
                axis: Axis::X,
                kind: ScaleKind::Band
            })
        );
    }

    #[test]
    fn test_area_to_rect_defaults_to_full_extent() {
        let config = config();
        let rect = area_to_rect(&HighlightArea::x(10.0, 50.0), &config, &scales()).unwrap();
        assert_approx_eq!(f64, rect.left, 40.0);
        assert_approx_eq!(f64, rect.right, 120.0);
        assert_approx_eq!(f64, rect.top, 0.0);
        assert_approx_eq!(f64, rect.bottom, 120.0);

        let rect = area_to_rect(&HighlightArea::default(), &config, &StaticScales::default()).unwrap();
        assert_eq!(rect, PixelRect::new(0.0, 230.0, 120.0, 20.0));
    }

    #[test]
    fn test_area_edge_without_scale_fails() {
        let scales = StaticScales {
            x: None,
            y: Some(linear((0.0, 1.0), (0.0, 1.0))),
        };
        assert_eq!(
            area_to_rect(&HighlightArea::x(0.0, 1.0), &config(), &scales),
            Err(HighlightError::MissingScaleAdapter(Axis::X))
        );
    }

    #[test]
    fn test_full_extent_rect() {
        let config = HighlightConfig::new(Geometry::new(780.0, 100.0).with_margins(20.0, 0.0, 0.0, 0.0));
        assert_eq!(full_extent_rect(&config), PixelRect::new(0.0, 800.0, 100.0, 20.0));
    }
}
