//! Numeric helpers exposed to the evaluator next to the math vocabulary.

use std::f64::consts::LN_10;

/// Factorial of the floor of `n`.
///
/// NaN for non-finite or negative input. There is no overflow guard: from
/// 171 upwards the product is infinite.
pub fn fact(n: f64) -> f64 {
    let n = n.floor();
    if !n.is_finite() || n < 0.0 {
        return f64::NAN;
    }
    if n == 0.0 || n == 1.0 {
        return 1.0;
    }

    let mut product = 1.0;
    let mut i = 2.0;
    while i <= n {
        product *= i;
        // Once infinite the product cannot change.
        if product.is_infinite() {
            break;
        }
        i += 1.0;
    }
    product
}

/// Base-10 logarithm as `ln(x) / ln(10)`.
pub fn log10(x: f64) -> f64 {
    x.ln() / LN_10
}
