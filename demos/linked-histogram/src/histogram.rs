use std::collections::BTreeMap;

use brushwork_highlight::Selection;

use crate::data::RawPoint;

/// Selection edges this close to a month boundary, in milliseconds, count as
/// lying on it
pub const BOUNDARY_TOLERANCE_MS: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub x: f64,
    /// Share of the total, in percent
    pub y: f64,
}

/// Whether the span `[start, end]` lies inside the selection's x extent
pub fn span_selected(selection: &Selection, start: f64, end: f64) -> bool {
    match selection.x_extent() {
        Some((left, right)) => {
            left <= start + BOUNDARY_TOLERANCE_MS && end <= right + BOUNDARY_TOLERANCE_MS
        }
        None => false,
    }
}

/// Sum the raw samples of every month fully inside `area` (every month when
/// there is no area) per x value and normalize the sums to percentages
pub fn generate_histogram(
    raw_data: &[Vec<RawPoint>],
    area: Option<&Selection>,
    times: &[f64],
) -> Vec<HistogramBin> {
    let mut sums: BTreeMap<i64, (f64, f64)> = BTreeMap::new();

    for (month, samples) in raw_data.iter().enumerate() {
        let included = match (area, times.get(month), times.get(month + 1)) {
            (None, _, _) => true,
            (Some(area), Some(start), Some(end)) => span_selected(area, *start, *end),
            _ => false,
        };
        if !included {
            continue;
        }
        for point in samples {
            let entry = sums.entry(point.x.round() as i64).or_insert((point.x, 0.0));
            entry.1 += point.y;
        }
    }

    let total: f64 = sums.values().map(|(_, y)| y).sum();
    sums.into_values()
        .map(|(x, y)| HistogramBin {
            x,
            y: if total > 0.0 { y / total * 100.0 } else { 0.0 },
        })
        .collect()
}
