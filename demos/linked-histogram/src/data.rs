use anyhow::Context;
use chrono::{DateTime, Months, TimeZone, Utc};
use rand::Rng;

use brushwork_scales::temporal::to_millis;

pub const NUM_MONTHS: usize = 12;
pub const HISTOGRAM_SIZE: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPoint {
    pub x: f64,
    pub y: f64,
}

/// One monthly bar spanning `[x0, x]`, in epoch milliseconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeBar {
    pub x0: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone)]
pub struct DemoData {
    /// Month boundaries, one more than the number of months
    pub times: Vec<f64>,
    pub time_data: Vec<TimeBar>,
    /// Per-month raw samples feeding the histogram
    pub raw_data: Vec<Vec<RawPoint>>,
}

/// Start of each month of 2018 plus the start of 2019, one second past midnight
pub fn month_boundaries() -> anyhow::Result<Vec<DateTime<Utc>>> {
    let start = Utc
        .with_ymd_and_hms(2018, 1, 1, 0, 0, 1)
        .single()
        .context("Invalid start date")?;
    (0..=NUM_MONTHS as u32)
        .map(|i| {
            start
                .checked_add_months(Months::new(i))
                .with_context(|| format!("Month {i} out of range"))
        })
        .collect()
}

impl DemoData {
    pub fn generate<R: Rng>(rng: &mut R) -> anyhow::Result<Self> {
        let times = month_boundaries()?.iter().map(to_millis).collect::<Vec<_>>();

        let raw_data = (0..NUM_MONTHS)
            .map(|_| {
                (0..HISTOGRAM_SIZE)
                    .map(|i| RawPoint {
                        x: (i * 10) as f64,
                        y: rng.gen::<f64>() * 1000.0,
                    })
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let time_data = times
            .windows(2)
            .map(|bounds| TimeBar {
                x0: bounds[0],
                x: bounds[1],
                y: (rng.gen::<f64>() * 10.0).ceil(),
            })
            .collect();

        Ok(Self {
            times,
            time_data,
            raw_data,
        })
    }

    pub fn max_bar_height(&self) -> f64 {
        self.time_data.iter().map(|bar| bar.y).fold(0.0, f64::max)
    }
}
