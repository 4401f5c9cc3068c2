/// Generate approximately count ticks within the given range
pub fn ticks(start: f64, stop: f64, count: f64) -> Vec<f64> {
    if count <= 0.0 || count.is_nan() || start.is_nan() || stop.is_nan() {
        return vec![];
    }

    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    if !(i2 >= i1) {
        return vec![];
    }

    let n = (i2 - i1 + 1.0) as usize;
    let value_at = |i: usize| {
        let k = if reverse { i2 - i as f64 } else { i1 + i as f64 };
        if inc < 0.0 {
            k / -inc
        } else {
            k * inc
        }
    };

    (0..n).map(value_at).collect()
}

/// Returns (i1, i2, inc), where ticks are i * inc for i in i1..=i2.
/// A negative inc means the ticks are i / -inc, which keeps fractional steps exact.
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);
    let factor = step_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let temp_inc = 10.0_f64.powf(-power) / factor;
        i1 = (start * temp_inc).round();
        i2 = (stop * temp_inc).round();
        if i1 / temp_inc < start {
            i1 += 1.0;
        }
        if i2 / temp_inc > stop {
            i2 -= 1.0;
        }
        inc = -temp_inc;
    } else {
        inc = 10.0_f64.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

/// Calculate the tick increment for the given range and count
pub fn tick_increment(start: f64, stop: f64, count: f64) -> f64 {
    if !(count > 0.0) {
        return f64::NAN;
    }

    if start == stop {
        return f64::NEG_INFINITY;
    }

    let step = (stop - start) / count;
    if step == 0.0 {
        return f64::NAN;
    }

    let power = step.log10().floor();
    let error = step / 10.0_f64.powf(power);
    10.0_f64.powf(power) * step_factor(error)
}

// Thresholds are sqrt(50), sqrt(10) and sqrt(2)
fn step_factor(error: f64) -> f64 {
    if error >= 7.071067811865476 {
        10.0
    } else if error >= 3.162277660168379 {
        5.0
    } else if error >= 1.4142135623730951 {
        2.0
    } else {
        1.0
    }
}
