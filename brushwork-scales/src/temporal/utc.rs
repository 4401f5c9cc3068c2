use chrono::{DateTime, Utc};

use crate::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
use crate::numeric::ContinuousNumericScale;

use super::{from_millis, to_millis, TimestampInterval};

#[derive(Debug, Clone)]
pub struct TimeScaleConfig {
    pub domain: (DateTime<Utc>, DateTime<Utc>),
    pub range: (f64, f64),
    pub clamp: bool,
    pub range_offset: Option<f64>,
}

/// A continuous scale over UTC timestamps.
///
/// Timestamps are mapped linearly through their epoch milliseconds, so the
/// numeric values flowing in and out of `scale`/`invert` are epoch millis.
#[derive(Debug, Clone)]
pub struct TimeScale {
    numeric: LinearNumericScale,
}

impl TimeScale {
    pub fn new(config: &TimeScaleConfig) -> Self {
        let numeric = LinearNumericScale::new(&LinearNumericScaleConfig {
            domain: (to_millis(&config.domain.0), to_millis(&config.domain.1)),
            range: config.range,
            clamp: config.clamp,
            range_offset: config.range_offset,
            ..Default::default()
        });
        Self { numeric }
    }

    pub fn scale_datetime(&self, date: &DateTime<Utc>) -> f64 {
        self.numeric.scale(to_millis(date))
    }

    pub fn invert_datetime(&self, value: f64) -> Option<DateTime<Utc>> {
        from_millis(self.numeric.invert(value))
    }

    pub fn datetime_domain(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let (start, end) = self.numeric.domain();
        Some((from_millis(start)?, from_millis(end)?))
    }

    /// Calendar-aligned ticks stepping by `every` intervals across the domain
    pub fn interval_ticks(&self, interval: &dyn TimestampInterval, every: i64) -> Vec<DateTime<Utc>> {
        let Some((start, end)) = self.datetime_domain() else {
            return vec![];
        };
        let (start, end) = if end < start { (end, start) } else { (start, end) };
        let every = every.max(1);

        let mut ticks = Vec::new();
        let mut tick = interval.ceil(&start);
        while tick <= end {
            ticks.push(tick);
            tick = interval.offset(tick, every);
        }
        ticks
    }
}

impl ContinuousNumericScale for TimeScale {
    fn domain(&self) -> (f64, f64) {
        self.numeric.domain()
    }

    fn range(&self) -> (f64, f64) {
        self.numeric.range()
    }

    fn clamp(&self) -> bool {
        self.numeric.clamp()
    }

    fn scale(&self, value: f64) -> f64 {
        self.numeric.scale(value)
    }

    fn invert(&self, value: f64) -> f64 {
        self.numeric.invert(value)
    }

    fn ticks(&self, count: Option<f64>) -> Vec<f64> {
        self.numeric.ticks(count)
    }

    fn set_domain(&mut self, domain: (f64, f64)) {
        self.numeric.set_domain(domain);
    }

    fn set_range(&mut self, range: (f64, f64)) {
        self.numeric.set_range(range);
    }

    fn set_clamp(&mut self, clamp: bool) {
        self.numeric.set_clamp(clamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::temporal::interval;
    use chrono::TimeZone;
    use float_cmp::assert_approx_eq;

    fn year_2018() -> TimeScale {
        TimeScale::new(&TimeScaleConfig {
            domain: (
                Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap(),
            ),
            range: (0.0, 365.0),
            clamp: false,
            range_offset: None,
        })
    }

    #[test]
    fn test_scale_and_invert_datetime() {
        let scale = year_2018();
        let feb = Utc.with_ymd_and_hms(2018, 2, 1, 0, 0, 0).unwrap();
        assert_approx_eq!(f64, scale.scale_datetime(&feb), 31.0, epsilon = 1e-9);
        assert_eq!(scale.invert_datetime(31.0), Some(feb));
    }

    #[test]
    fn test_month_ticks() {
        let scale = year_2018();
        let ticks = scale.interval_ticks(interval::month().as_ref(), 3);
        let months: Vec<_> = ticks.iter().map(|t| t.format("%Y-%m").to_string()).collect();
        assert_eq!(months, vec!["2018-01", "2018-04", "2018-07", "2018-10", "2019-01"]);
    }
}
