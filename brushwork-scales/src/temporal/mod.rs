pub mod utc;

pub use utc::{TimeScale, TimeScaleConfig};

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};

/// Calendar intervals used to floor timestamps and step between them
pub trait TimestampInterval: Send + Sync + std::fmt::Debug {
    fn floor(&self, date: &DateTime<Utc>) -> DateTime<Utc>;
    fn offset(&self, date: DateTime<Utc>, step: i64) -> DateTime<Utc>;

    fn ceil(&self, date: &DateTime<Utc>) -> DateTime<Utc> {
        let floored = self.floor(date);
        if &floored == date {
            *date
        } else {
            self.offset(floored, 1)
        }
    }
}

pub mod interval {
    use super::*;

    #[derive(Debug, Clone)]
    pub struct DayInterval;
    #[derive(Debug, Clone)]
    pub struct MonthInterval;
    #[derive(Debug, Clone)]
    pub struct YearInterval;

    fn midnight(date: NaiveDate) -> DateTime<Utc> {
        Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    impl TimestampInterval for DayInterval {
        fn floor(&self, date: &DateTime<Utc>) -> DateTime<Utc> {
            midnight(date.date_naive())
        }

        fn offset(&self, date: DateTime<Utc>, step: i64) -> DateTime<Utc> {
            date + Duration::days(step)
        }
    }

    impl TimestampInterval for MonthInterval {
        fn floor(&self, date: &DateTime<Utc>) -> DateTime<Utc> {
            let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
                .unwrap_or(NaiveDate::MIN);
            midnight(first)
        }

        fn offset(&self, date: DateTime<Utc>, step: i64) -> DateTime<Utc> {
            let total_months = date.year() as i64 * 12 + date.month0() as i64 + step;
            let year = total_months.div_euclid(12) as i32;
            let month = total_months.rem_euclid(12) as u32 + 1;
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MAX);
            midnight(first)
        }
    }

    impl TimestampInterval for YearInterval {
        fn floor(&self, date: &DateTime<Utc>) -> DateTime<Utc> {
            midnight(NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(NaiveDate::MIN))
        }

        fn offset(&self, date: DateTime<Utc>, step: i64) -> DateTime<Utc> {
            let year = date.year() as i64 + step;
            midnight(NaiveDate::from_ymd_opt(year as i32, 1, 1).unwrap_or(NaiveDate::MAX))
        }
    }

    pub fn day() -> Box<dyn TimestampInterval> {
        Box::new(DayInterval)
    }

    pub fn month() -> Box<dyn TimestampInterval> {
        Box::new(MonthInterval)
    }

    pub fn year() -> Box<dyn TimestampInterval> {
        Box::new(YearInterval)
    }
}

/// Milliseconds since the unix epoch, the numeric representation used for time domains
pub fn to_millis(date: &DateTime<Utc>) -> f64 {
    date.timestamp_millis() as f64
}

pub fn from_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(millis.round() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_month_floor_and_offset() {
        let month = interval::month();
        let date = Utc.with_ymd_and_hms(2018, 3, 17, 13, 5, 1).unwrap();
        assert_eq!(month.floor(&date), utc(2018, 3, 1));
        assert_eq!(month.ceil(&date), utc(2018, 4, 1));
        assert_eq!(month.offset(utc(2018, 11, 1), 2), utc(2019, 1, 1));
        assert_eq!(month.offset(utc(2018, 1, 1), -1), utc(2017, 12, 1));
    }

    #[test]
    fn test_day_and_year() {
        let date = Utc.with_ymd_and_hms(2018, 3, 17, 13, 5, 1).unwrap();
        assert_eq!(interval::day().floor(&date), utc(2018, 3, 17));
        assert_eq!(interval::year().ceil(&date), utc(2019, 1, 1));
        assert_eq!(interval::year().ceil(&utc(2019, 1, 1)), utc(2019, 1, 1));
    }

    #[test]
    fn test_millis_round_trip() {
        let date = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 1).unwrap();
        assert_eq!(to_millis(&date), 1514764801000.0);
        assert_eq!(from_millis(1514764801000.0), Some(date));
        assert_eq!(from_millis(f64::NAN), None);
    }
}
