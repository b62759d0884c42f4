//! Formatting of evaluation results for display.

use super::evaluation::Value;

/// Display text for any non-finite result, NaN included.
pub const NON_FINITE: &str = "Infinity";

/// Magnitude from which results are shown in exponential notation.
const EXPONENTIAL_THRESHOLD: f64 = 1e9;

/// Fractional digits of the exponential notation.
const EXPONENTIAL_DIGITS: usize = 6;

/// Decimal places kept for non-integer results.
const DECIMAL_PLACES: usize = 8;

/// Digits requested from `fmt` before rounding by hand. Every f64 whose
/// rounding can hit a tie is printed exactly at this precision.
const EXACT_DIGITS: usize = 400;

/// Format an evaluation result for display.
pub fn format_result(value: &Value) -> String {
    match value {
        Value::Number(n) => format_number(*n),
        Value::Bool(b) => b.to_string(),
    }
}

/// Format a number for display.
///
/// - NaN and ±∞ → `"Infinity"`
/// - |x| ≥ 1e9 → exponential with 6 fractional digits (`1.000000e+9`)
/// - integers → no decimal point
/// - anything else → rounded to 8 decimals, trailing zeros dropped
///
/// Ties round away from zero in both notations.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return NON_FINITE.to_string();
    }
    if value.abs() >= EXPONENTIAL_THRESHOLD {
        return to_exponential(value, EXPONENTIAL_DIGITS);
    }
    if value.fract() == 0.0 {
        return shortest(value);
    }

    let fixed = to_fixed(value, DECIMAL_PLACES);
    let rounded = fixed.parse::<f64>().unwrap_or(value);
    shortest(rounded)
}

/// Fixed notation with `places` decimals, ties rounded away from zero.
fn to_fixed(value: f64, places: usize) -> String {
    let exact = format!("{:.prec$}", value.abs(), prec = EXACT_DIGITS);
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let rounded = round_half_up(&format!("{int_part}{frac_part}"), int_part.len() + places);
    let (int_part, frac_part) = rounded.split_at(rounded.len() - places);

    let sign = if value.is_sign_negative() { "-" } else { "" };
    if places == 0 {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// Exponential notation with `digits` fractional digits and an explicit
/// exponent sign, ties rounded away from zero.
fn to_exponential(value: f64, digits: usize) -> String {
    let exact = format!("{:.prec$e}", value.abs(), prec = EXACT_DIGITS);
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);

    let mut significand = round_half_up(&mantissa.replace('.', ""), digits + 1);
    if significand.len() > digits + 1 {
        // 9.9999995 → 10.000000
        significand.truncate(digits + 1);
        exponent += 1;
    }
    let (lead, rest) = significand.split_at(1);

    let sign = if value.is_sign_negative() { "-" } else { "" };
    let formatted = if rest.is_empty() {
        format!("{sign}{lead}e{exponent}")
    } else {
        format!("{sign}{lead}.{rest}e{exponent}")
    };
    signed_exponent(&formatted)
}

/// Keep the first `keep` digits of an exact digit string, rounding up when
/// the next digit is 5 or more. A carry out of the first digit makes the
/// result one digit longer.
fn round_half_up(digits: &str, keep: usize) -> String {
    let mut kept: Vec<u8> = digits.bytes().take(keep).collect();
    if digits.as_bytes().get(keep).is_some_and(|&next| next >= b'5') {
        let carried = kept.iter_mut().rev().all(|digit| {
            if *digit == b'9' {
                *digit = b'0';
                true
            } else {
                *digit += 1;
                false
            }
        });
        if carried {
            kept.insert(0, b'1');
        }
    }
    kept.into_iter().map(char::from).collect()
}

/// Shortest text that reads back as `value`; very small or very large
/// magnitudes switch to exponential notation.
fn shortest(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let magnitude = value.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        return signed_exponent(&format!("{value:e}"));
    }
    value.to_string()
}

/// `1.5e9` → `1.5e+9`; negative exponents are left alone.
fn signed_exponent(formatted: &str) -> String {
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted.to_string(),
    }
}
