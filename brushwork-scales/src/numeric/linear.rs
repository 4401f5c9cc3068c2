use crate::array;

use super::ContinuousNumericScale;

#[derive(Clone, Debug)]
pub struct LinearNumericScaleConfig {
    pub domain: (f64, f64),
    pub range: (f64, f64),
    pub clamp: bool,
    pub range_offset: Option<f64>,
    pub nice: Option<usize>,
    pub round: bool,
}

impl Default for LinearNumericScaleConfig {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
            clamp: false,
            range_offset: None,
            nice: None,
            round: false,
        }
    }
}

/// A linear scale that maps numeric input values from a domain to a range.
/// Supports clamping, domain niceing, and tick generation.
#[derive(Clone, Debug)]
pub struct LinearNumericScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
    clamp: bool,
    range_offset: Option<f64>,
    round: bool,
}

impl LinearNumericScale {
    pub fn new(config: &LinearNumericScaleConfig) -> Self {
        let mut this = Self {
            domain_start: config.domain.0,
            domain_end: config.domain.1,
            range_start: config.range.0,
            range_end: config.range.1,
            clamp: config.clamp,
            range_offset: config.range_offset,
            round: config.round,
        };

        if let Some(nice) = config.nice {
            this = this.nice(Some(nice));
        }

        this
    }

    /// Identity mapping over the given extent, handy for pixel-space axes
    pub fn identity(extent: (f64, f64)) -> Self {
        Self::new(&LinearNumericScaleConfig {
            domain: extent,
            range: extent,
            ..Default::default()
        })
    }

    /// Extends the domain to nice round numbers for better tick selection
    pub fn nice(mut self, count: Option<usize>) -> Self {
        if self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
        {
            return self;
        }

        let ascending = self.domain_start <= self.domain_end;
        let (mut start, mut stop) = if ascending {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };

        let mut prestep = 0.0;
        let mut max_iter = 10;
        let count = count.unwrap_or(10) as f64;
        while max_iter > 0 {
            let step = array::tick_increment(start, stop, count);
            if step == prestep {
                break;
            } else if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else if step < 0.0 {
                start = (start * step).ceil() / step;
                stop = (stop * step).floor() / step;
            } else {
                break;
            }

            prestep = step;
            max_iter -= 1;
        }

        if ascending {
            self.domain_start = start;
            self.domain_end = stop;
        } else {
            self.domain_start = stop;
            self.domain_end = start;
        }

        self
    }

    pub fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f64, f64)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    pub fn with_range_offset(mut self, range_offset: Option<f64>) -> Self {
        self.range_offset = range_offset;
        self
    }

    pub fn with_round(mut self, round: bool) -> Self {
        self.round = round;
        self
    }

    fn is_degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.range_start == self.range_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }

    fn range_extent(&self) -> (f64, f64) {
        if self.range_start <= self.range_end {
            (self.range_start, self.range_end)
        } else {
            (self.range_end, self.range_start)
        }
    }
}

impl ContinuousNumericScale for LinearNumericScale {
    fn domain(&self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    fn clamp(&self) -> bool {
        self.clamp
    }

    fn scale(&self, value: f64) -> f64 {
        // Matches d3: a degenerate scale maps everything to the range start
        if self.is_degenerate() {
            return self.range_start;
        }

        let scale = (self.range_end - self.range_start) / (self.domain_end - self.domain_start);
        let offset =
            self.range_start - scale * self.domain_start + self.range_offset.unwrap_or(0.0);

        let mut result = scale * value + offset;
        if self.clamp {
            let (range_min, range_max) = self.range_extent();
            result = result.clamp(range_min, range_max);
        }
        if self.round {
            result = result.round();
        }
        result
    }

    fn invert(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return self.domain_start;
        }

        let scale = (self.domain_end - self.domain_start) / (self.range_end - self.range_start);
        let offset = self.domain_start - scale * self.range_start;

        let mut value = value - self.range_offset.unwrap_or(0.0);
        if self.clamp {
            let (range_min, range_max) = self.range_extent();
            value = value.clamp(range_min, range_max);
        }
        scale * value + offset
    }

    fn ticks(&self, count: Option<f64>) -> Vec<f64> {
        array::ticks(self.domain_start, self.domain_end, count.unwrap_or(10.0))
    }

    fn set_domain(&mut self, domain: (f64, f64)) {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
    }

    fn set_range(&mut self, range: (f64, f64)) {
        self.range_start = range.0;
        self.range_end = range.1;
    }

    fn set_clamp(&mut self, clamp: bool) {
        self.clamp = clamp;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn test_defaults() {
        let scale = LinearNumericScale::new(&Default::default());
        assert_eq!(scale.domain(), (0.0, 1.0));
        assert_eq!(scale.range(), (0.0, 1.0));
        assert!(!scale.clamp());
    }

    #[test]
    fn test_scale() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            clamp: true,
            ..Default::default()
        });

        assert_approx_eq!(f64, scale.scale(0.0), 0.0); // clamped
        assert_approx_eq!(f64, scale.scale(10.0), 0.0);
        assert_approx_eq!(f64, scale.scale(15.0), 25.0);
        assert_approx_eq!(f64, scale.scale(25.0), 75.0);
        assert_approx_eq!(f64, scale.scale(30.0), 100.0);
        assert_approx_eq!(f64, scale.scale(40.0), 100.0); // clamped
    }

    #[test]
    fn test_scale_with_range_offset() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            range_offset: Some(3.0),
            clamp: true,
            ..Default::default()
        });

        assert_approx_eq!(f64, scale.scale(10.0), 3.0);
        assert_approx_eq!(f64, scale.scale(20.0), 53.0);
        assert_approx_eq!(f64, scale.scale(30.0), 100.0); // clamped
    }

    #[test]
    fn test_degenerate_cases() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        });
        assert_approx_eq!(f64, scale.scale(20.0), 0.0);
        assert_approx_eq!(f64, scale.invert(50.0), 10.0);
    }

    #[test]
    fn test_invert_clamped() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            clamp: true,
            ..Default::default()
        });

        assert_approx_eq!(f64, scale.invert(-25.0), 10.0); // clamped below
        assert_approx_eq!(f64, scale.invert(50.0), 20.0);
        assert_approx_eq!(f64, scale.invert(125.0), 30.0); // clamped above
    }

    #[test]
    fn test_invert_unclamped() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (10.0, 30.0),
            range: (0.0, 100.0),
            ..Default::default()
        });

        assert_approx_eq!(f64, scale.invert(-25.0), 5.0);
        assert_approx_eq!(f64, scale.invert(125.0), 35.0);
    }

    #[test]
    fn test_invert_reversed_range() {
        // Typical y axis: larger values towards the top of the plot
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (0.0, 10.0),
            range: (100.0, 0.0),
            ..Default::default()
        });

        assert_approx_eq!(f64, scale.scale(2.5), 75.0);
        assert_approx_eq!(f64, scale.invert(75.0), 2.5);
        assert_approx_eq!(f64, scale.invert(0.0), 10.0);
    }

    #[test]
    fn test_round_does_not_affect_invert() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (0.0, 3.0),
            range: (0.0, 10.0),
            round: true,
            ..Default::default()
        });
        assert_eq!(scale.scale(1.0), 3.0);
        assert_approx_eq!(f64, scale.invert(5.0), 1.5);
    }

    #[test]
    fn test_nice() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (1.1, 10.9),
            nice: Some(10),
            ..Default::default()
        });
        assert_eq!(scale.domain(), (1.0, 11.0));

        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (-1.1, -10.9),
            ..Default::default()
        })
        .nice(Some(10));
        assert_eq!(scale.domain(), (-1.0, -11.0));
    }

    #[test]
    fn test_ticks() {
        let scale = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (0.0, 10.0),
            range: (0.0, 100.0),
            ..Default::default()
        });

        assert_eq!(scale.ticks(Some(5.0)), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        assert_eq!(scale.ticks(Some(2.0)), vec![0.0, 5.0, 10.0]);
    }
}
