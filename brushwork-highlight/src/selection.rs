use serde::{Deserialize, Serialize};

/// A selection in data space.
///
/// Only the edges of enabled axes are present. Values are the scale's data
/// values (numbers, or epoch milliseconds for time scales).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.right.is_none() && self.bottom.is_none() && self.left.is_none()
    }

    /// Horizontal extent as `(left, right)` when both edges are present
    pub fn x_extent(&self) -> Option<(f64, f64)> {
        Some((self.left?, self.right?))
    }
}

/// A data-space area requested by the host. Absent edges extend to the full
/// extent of the overlay on that side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HighlightArea {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
}

impl HighlightArea {
    pub fn x(left: f64, right: f64) -> Self {
        Self {
            left: Some(left),
            right: Some(right),
            ..Default::default()
        }
    }

    pub fn y(bottom: f64, top: f64) -> Self {
        Self {
            bottom: Some(bottom),
            top: Some(top),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_edges_are_omitted() {
        let selection = Selection {
            left: Some(10.0),
            right: Some(100.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&selection).unwrap();
        assert_eq!(json, r#"{"right":100.0,"left":10.0}"#);
        assert_eq!(serde_json::to_string(&Selection::default()).unwrap(), "{}");
    }

    #[test]
    fn test_deserialize_partial_area() {
        let area: HighlightArea = serde_json::from_str(r#"{"bottom": 2, "top": 5}"#).unwrap();
        assert_eq!(area, HighlightArea::y(2.0, 5.0));
    }
}
