use brushwork_scales::numeric::linear::{LinearNumericScale, LinearNumericScaleConfig};
use brushwork_scales::temporal::{TimeScale, TimeScaleConfig};
use brushwork_scales::AxisScale;
use chrono::{TimeZone, Utc};
use float_cmp::assert_approx_eq;
use rstest::rstest;

fn linear(domain: (f64, f64), range: (f64, f64)) -> AxisScale {
    LinearNumericScale::new(&LinearNumericScaleConfig {
        domain,
        range,
        ..Default::default()
    })
    .into()
}

#[rstest]
#[case((0.0, 100.0), (0.0, 780.0), 42.5)]
#[case((0.0, 10.0), (100.0, 0.0), 7.25)]
#[case((-50.0, 50.0), (0.0, 400.0), -12.0)]
#[case((1.0, 2.0), (0.0, 1.0), 5.0)]
fn test_linear_invert_scale_round_trip(
    #[case] domain: (f64, f64),
    #[case] range: (f64, f64),
    #[case] value: f64,
) {
    let scale = linear(domain, range);
    let round_trip = scale.invert(scale.scale(value)).unwrap();
    assert_approx_eq!(f64, round_trip, value, epsilon = 1e-9);
}

#[test]
fn test_time_invert_scale_round_trip() {
    let start = Utc.with_ymd_and_hms(2018, 1, 1, 0, 0, 1).unwrap();
    let end = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 1).unwrap();
    let scale: AxisScale = TimeScale::new(&TimeScaleConfig {
        domain: (start, end),
        range: (0.0, 750.0),
        clamp: false,
        range_offset: None,
    })
    .into();

    for month in 1..=12 {
        let date = Utc.with_ymd_and_hms(2018, month, 1, 0, 0, 1).unwrap();
        let millis = date.timestamp_millis() as f64;
        let round_trip = scale.invert(scale.scale(millis)).unwrap();
        // Sub-millisecond error over a one year domain
        assert!((round_trip - millis).abs() < 1.0, "month {month}: {round_trip} != {millis}");
    }
}
