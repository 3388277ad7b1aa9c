//! Math functions

/// Largest argument accepted by FACT
pub const MAX_FACTORIAL: i64 = 33;

/// ABS(x)
pub fn fn_abs(x: f64) -> Option<f64> {
    Some(x.abs())
}

/// SQRT(x), x >= 0
pub fn fn_sqrt(x: f64) -> Option<f64> {
    (x >= 0.0).then(|| x.sqrt())
}

/// SQR(x) - square
pub fn fn_sqr(x: f64) -> Option<f64> {
    Some(x * x)
}

pub fn fn_sin(x: f64) -> Option<f64> {
    Some(x.sin())
}

pub fn fn_cos(x: f64) -> Option<f64> {
    Some(x.cos())
}

pub fn fn_arctan(x: f64) -> Option<f64> {
    Some(x.atan())
}

/// LN(x) - natural logarithm, x > 0
pub fn fn_ln(x: f64) -> Option<f64> {
    (x > 0.0).then(|| x.ln())
}

/// LOG(x) - base-10 logarithm, x > 0
pub fn fn_log(x: f64) -> Option<f64> {
    (x > 0.0).then(|| x.log10())
}

pub fn fn_exp(x: f64) -> Option<f64> {
    Some(x.exp())
}

/// FACT(x) - factorial of the truncated argument, 0..=33
pub fn fn_fact(x: f64) -> Option<f64> {
    if !x.is_finite() {
        return None;
    }
    let n = x.trunc() as i64;
    if !(0..=MAX_FACTORIAL).contains(&n) {
        return None;
    }

    let mut result = 1.0;
    for i in 2..=n {
        result *= i as f64;
    }
    Some(result)
}
