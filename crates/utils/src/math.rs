//! Shared math functions used by the numeric function family.

/// Round half away from zero to `places` decimal places (negative places
/// round to the left of the decimal point).
pub fn round(n: f64, places: i32) -> f64 {
    if n.is_nan() || n.is_infinite() {
        return f64::NAN;
    }
    scale(n, places, f64::round)
}

/// Round away from zero.
pub fn round_up(n: f64, places: i32) -> f64 {
    if n.is_nan() || n.is_infinite() {
        return f64::NAN;
    }
    scale(n, places, |x| {
        // shave representation noise so 0.1 * 10 does not round up to 2
        let snapped = (x * 1e9).round() / 1e9;
        let x = if (snapped - x).abs() < 1e-9 { snapped } else { x };
        if x < 0.0 {
            x.floor()
        } else {
            x.ceil()
        }
    })
}

/// Round toward zero.
pub fn round_down(n: f64, places: i32) -> f64 {
    if n.is_nan() || n.is_infinite() {
        return f64::NAN;
    }
    scale(n, places, |x| {
        let snapped = (x * 1e9).round() / 1e9;
        let x = if (snapped - x).abs() < 1e-9 { snapped } else { x };
        x.trunc()
    })
}

fn scale(n: f64, places: i32, f: impl Fn(f64) -> f64) -> f64 {
    if places >= 0 {
        let factor = 10f64.powi(places);
        f(n * factor) / factor
    } else {
        let factor = 10f64.powi(-places);
        f(n / factor) * factor
    }
}

/// Next even integer away from zero (`even(0) == 0`).
pub fn even(n: f64) -> f64 {
    if n.is_nan() || n.is_infinite() {
        return f64::NAN;
    }
    let magnitude = n.abs().ceil();
    let result = if magnitude % 2.0 == 0.0 {
        magnitude
    } else {
        magnitude + 1.0
    };
    if n < 0.0 {
        -result
    } else {
        result
    }
}

/// Next odd integer away from zero (`odd(0) == 1`).
pub fn odd(n: f64) -> f64 {
    if n.is_nan() || n.is_infinite() {
        return f64::NAN;
    }
    let magnitude = n.abs().ceil();
    let result = if magnitude % 2.0 == 1.0 {
        magnitude
    } else {
        magnitude + 1.0
    };
    if n < 0.0 {
        -result
    } else {
        result
    }
}

/// -1, 0 or 1.
pub fn sign(n: f64) -> f64 {
    if n.is_nan() {
        f64::NAN
    } else if n > 0.0 {
        1.0
    } else if n < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Remainder carrying the sign of the divisor. `NaN` when `d == 0`.
pub fn modulo(n: f64, d: f64) -> f64 {
    if d == 0.0 {
        return f64::NAN;
    }
    let r = n - d * (n / d).floor();
    // floor can land one step off for huge quotients
    if r != 0.0 && r.signum() != d.signum() {
        r + d
    } else {
        r
    }
}

/// `n!` for the integer part of `n`; `NaN` for negatives, infinite once the
/// result overflows.
pub fn factorial(n: f64) -> f64 {
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    let n = n.trunc();
    if n > 170.0 {
        return f64::INFINITY;
    }
    (1..=n as u32).fold(1.0, |acc, k| acc * f64::from(k))
}

pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

pub fn sumsq(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum()
}

/// Product of all values; 0 for no values.
pub fn product(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().product()
}

/// Largest value; 0 for no values.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Smallest value; 0 for no values.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(0.0)
}

/// Arithmetic mean; `NaN` for no values.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    sum(values) / values.len() as f64
}
