//! Expression transformer.
//!
//! Rewrites calculator notation (π, ×, `50%`, `5!`, `log`, degree trig...)
//! into the canonical `Math.`-qualified form understood by the evaluator.
//! The passes run in a fixed order; later passes rely on the output of
//! earlier ones. The transformer never fails: malformed input passes through
//! and is rejected at evaluation time.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::trace;

/// Function names rewritten onto the math vocabulary, in rewrite order.
const FUNCTION_NAMES: &[(&str, &str)] = &[
    ("sqrt", "Math.sqrt"),
    ("abs", "Math.abs"),
    ("ln", "Math.log"),
    ("log", "Math.log10"),
    ("exp", "Math.exp"),
    ("pow", "Math.pow"),
];

lazy_static! {
    static ref PI_WORD: Regex = Regex::new(r"(?i)\bpi\b").unwrap();

    /// A bare numeral directly followed by `%`.
    static ref PERCENT: Regex = Regex::new(r"(\d+(?:\.\d+)?)%").unwrap();

    static ref PI_PLACEHOLDER: Regex = Regex::new(r"\bPI\b").unwrap();
    static ref E_CONSTANT: Regex = Regex::new(r"\be\b").unwrap();

    static ref GROUP_FACTORIAL: Regex = Regex::new(r"(\([^)]+\))!").unwrap();
    static ref NUMBER_FACTORIAL: Regex = Regex::new(r"(\d+(?:\.\d+)?)!").unwrap();

    static ref FUNCTIONS: Vec<(Regex, &'static str)> = FUNCTION_NAMES
        .iter()
        .map(|(name, target)| (Regex::new(&format!(r"\b{name}\s*\(")).unwrap(), *target))
        .collect();

    static ref TRIG: Regex = Regex::new(r"\b(sin|cos|tan|asin|acos|atan)\s*\(").unwrap();

    /// `Math.sin(arg)`, or an already converted `Math.sin((arg) * Math.PI / 180)`.
    /// The argument stops at the first `)`, so a converted argument may hold
    /// an unclosed `(` as in `Math.sin((Math.sqrt(4) * Math.PI / 180))`.
    static ref DEGREE_ARGUMENT: Regex = Regex::new(
        r"Math\.(sin|cos|tan)\((?:(\([^)]*\) \* Math\.PI / 180)|\s*([^)]*?)\s*)\)"
    )
    .unwrap();

    /// `Math.asin(arg)`, or an already converted `(Math.asin(arg) * 180 / Math.PI)`.
    static ref DEGREE_RESULT: Regex = Regex::new(
        r"\(Math\.(?:asin|acos|atan)\([^)]*\) \* 180 / Math\.PI\)|Math\.(asin|acos|atan)\(\s*([^)]*?)\s*\)"
    )
    .unwrap();

    static ref LOG10_CALL: Regex = Regex::new(r"Math\.log10\(").unwrap();
}

/// Rewrite `raw` into a canonical expression.
///
/// With `use_degrees`, the arguments of `sin`/`cos`/`tan` are converted from
/// degrees and the results of `asin`/`acos`/`atan` are converted to degrees.
/// Running the transformer on its own output with the same flag is a no-op.
pub fn transform(raw: &str, use_degrees: bool) -> String {
    let mut expr = raw.trim().to_string();

    expr = replace_pi(&expr);
    expr = normalize_glyphs(&expr);
    expr = expand_percent(&expr);
    expr = expr.replace('^', "**");
    expr = expand_constants(&expr);
    expr = expand_factorials(&expr);
    expr = map_functions(&expr);
    expr = map_trig(&expr);
    if use_degrees {
        expr = convert_degrees(&expr);
    }
    expr = LOG10_CALL.replace_all(&expr, "log10(").into_owned();

    trace!(raw, canonical = %expr, use_degrees, "transformed expression");
    expr
}

/// Replace each match of `pattern` unless it is already qualified by a
/// preceding `.` (as in `Math.PI` or `Math.log(`).
fn replace_unqualified<F>(expr: &str, pattern: &Regex, replacement: F) -> String
where
    F: Fn(&Captures) -> String,
{
    pattern
        .replace_all(expr, |caps: &Captures| {
            let start = caps.get(0).map_or(0, |m| m.start());
            if expr[..start].ends_with('.') {
                caps[0].to_string()
            } else {
                replacement(caps)
            }
        })
        .into_owned()
}

fn replace_pi(expr: &str) -> String {
    replace_unqualified(expr, &PI_WORD, |_| "PI".to_string()).replace('π', "PI")
}

fn normalize_glyphs(expr: &str) -> String {
    expr.replace('×', "*").replace('÷', "/")
}

fn expand_percent(expr: &str) -> String {
    PERCENT.replace_all(expr, "($1/100)").into_owned()
}

fn expand_constants(expr: &str) -> String {
    let expr = replace_unqualified(expr, &PI_PLACEHOLDER, |_| "Math.PI".to_string());
    replace_unqualified(&expr, &E_CONSTANT, |_| "Math.E".to_string())
}

fn expand_factorials(expr: &str) -> String {
    let expr = GROUP_FACTORIAL.replace_all(expr, "fact($1)");
    NUMBER_FACTORIAL.replace_all(&expr, "fact($1)").into_owned()
}

fn map_functions(expr: &str) -> String {
    FUNCTIONS
        .iter()
        .fold(expr.to_string(), |acc, (pattern, target)| {
            replace_unqualified(&acc, pattern, |_| format!("{target}("))
        })
}

fn map_trig(expr: &str) -> String {
    replace_unqualified(expr, &TRIG, |caps| format!("Math.{}(", &caps[1]))
}

fn convert_degrees(expr: &str) -> String {
    let expr = DEGREE_ARGUMENT.replace_all(expr, |caps: &Captures| match caps.get(3) {
        Some(arg) => format!("Math.{}(({}) * Math.PI / 180)", &caps[1], arg.as_str()),
        None => caps[0].to_string(),
    });

    DEGREE_RESULT
        .replace_all(&expr, |caps: &Captures| match (caps.get(1), caps.get(2)) {
            (Some(function), Some(arg)) => format!(
                "(Math.{}({}) * 180 / Math.PI)",
                function.as_str(),
                arg.as_str()
            ),
            _ => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(transform("  1 + 2  ", false), "1 + 2");
    }

    #[test]
    fn test_pi_spellings() {
        assert_eq!(transform("pi", false), "Math.PI");
        assert_eq!(transform("Pi*2", false), "Math.PI*2");
        assert_eq!(transform("PI", false), "Math.PI");
        assert_eq!(transform("2*π", false), "2*Math.PI");
        // no implicit multiplication
        assert_eq!(transform("2π", false), "2PI");
        // not a standalone word
        assert_eq!(transform("pin", false), "pin");
    }

    #[test]
    fn test_e_constant() {
        assert_eq!(transform("e", false), "Math.E");
        assert_eq!(transform("2*e", false), "2*Math.E");
        assert_eq!(transform("1e5", false), "1e5");
        assert_eq!(transform("exp(1)", false), "Math.exp(1)");
    }

    #[test]
    fn test_display_glyphs() {
        assert_eq!(transform("6 × 7 ÷ 2", false), "6 * 7 / 2");
    }

    #[test]
    fn test_percent() {
        assert_eq!(transform("50%", false), "(50/100)");
        assert_eq!(transform("12.5%", false), "(12.5/100)");
        assert_eq!(transform("200*15%", false), "200*(15/100)");
    }

    #[test]
    fn test_percent_after_group_is_left_alone() {
        assert_eq!(transform("(20+5)%", false), "(20+5)%");
    }

    #[test]
    fn test_power() {
        assert_eq!(transform("2^10", false), "2**10");
        assert_eq!(transform("50%^2", false), "(50/100)**2");
        assert_eq!(transform("2^e", false), "2**Math.E");
    }

    #[test]
    fn test_factorials() {
        assert_eq!(transform("5!", false), "fact(5)");
        assert_eq!(transform("(2+3)!", false), "fact((2+3))");
        assert_eq!(transform("3! + 4!", false), "fact(3) + fact(4)");
        // chained factorials are not supported
        assert_eq!(transform("5!!", false), "fact(5)!");
    }

    #[test]
    fn test_function_names() {
        assert_eq!(transform("sqrt(16)", false), "Math.sqrt(16)");
        assert_eq!(transform("abs(-2)", false), "Math.abs(-2)");
        assert_eq!(transform("ln(5)", false), "Math.log(5)");
        assert_eq!(transform("log(100)", false), "log10(100)");
        assert_eq!(transform("exp(2)", false), "Math.exp(2)");
        assert_eq!(transform("pow(2, 3)", false), "Math.pow(2, 3)");
        assert_eq!(transform("sqrt (9)", false), "Math.sqrt(9)");
    }

    #[test]
    fn test_ln_is_not_recaptured_by_log() {
        assert_eq!(transform("ln(e)", false), "Math.log(Math.E)");
        assert_eq!(transform("ln(2)+log(2)", false), "Math.log(2)+log10(2)");
    }

    #[test]
    fn test_trig_radians() {
        assert_eq!(transform("sin(0)", false), "Math.sin(0)");
        assert_eq!(transform("cos(pi)", false), "Math.cos(Math.PI)");
        assert_eq!(transform("asin(1)", false), "Math.asin(1)");
        assert_eq!(transform("atan(1)+tan(1)", false), "Math.atan(1)+Math.tan(1)");
    }

    #[test]
    fn test_trig_degrees() {
        assert_eq!(transform("sin(30)", true), "Math.sin((30) * Math.PI / 180)");
        assert_eq!(transform("cos( 60 )", true), "Math.cos((60) * Math.PI / 180)");
        assert_eq!(transform("asin(0.5)", true), "(Math.asin(0.5) * 180 / Math.PI)");
        assert_eq!(
            transform("sin(90) + acos(0)", true),
            "Math.sin((90) * Math.PI / 180) + (Math.acos(0) * 180 / Math.PI)"
        );
    }

    #[test]
    fn test_degree_argument_stops_at_first_paren() {
        assert_eq!(
            transform("sin((1+2)*10)", true),
            "Math.sin(((1+2) * Math.PI / 180)*10)"
        );
    }

    #[test]
    fn test_idempotent() {
        for raw in ["sin(30) + asin(0.5)", "5! * 50% + ln(e)", "log(100)^2", "tan(pi)"] {
            for degrees in [false, true] {
                let once = transform(raw, degrees);
                assert_eq!(transform(&once, degrees), once, "raw={raw:?} degrees={degrees}");
            }
        }
    }

    #[test]
    fn test_degree_arguments_holding_calls_convert_once() {
        assert_eq!(transform("tan(5!)", true), "Math.tan((fact(5) * Math.PI / 180))");
        assert_eq!(
            transform("sin(sqrt(4))", true),
            "Math.sin((Math.sqrt(4) * Math.PI / 180))"
        );
        assert_eq!(
            transform("asin(abs(1))", true),
            "(Math.asin(Math.abs(1) * 180 / Math.PI))"
        );
        for raw in ["tan(5!)", "sin(sqrt(4))", "cos(abs(-60))", "atan(sqrt(3))"] {
            let once = transform(raw, true);
            assert_eq!(transform(&once, true), once, "raw={raw:?}");
        }
    }

    #[test]
    fn test_garbage_passes_through() {
        assert_eq!(transform("2 + ; foo", false), "2 + ; foo");
    }
}
