//! The fixed set of names an expression may reference.
//!
//! Nothing outside this table is reachable from an expression.

use std::f64::consts;

use super::helpers;

/// Name of the factorial helper produced by the transformer.
pub const FACTORIAL: &str = "fact";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
    Ln2,
    Ln10,
    Log2E,
    Log10E,
    Sqrt2,
    Infinity,
    NaN,
}

impl Constant {
    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => consts::PI,
            Constant::E => consts::E,
            Constant::Ln2 => consts::LN_2,
            Constant::Ln10 => consts::LN_10,
            Constant::Log2E => consts::LOG2_E,
            Constant::Log10E => consts::LOG10_E,
            Constant::Sqrt2 => consts::SQRT_2,
            Constant::Infinity => f64::INFINITY,
            Constant::NaN => f64::NAN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "Math.PI",
            Constant::E => "Math.E",
            Constant::Ln2 => "Math.LN2",
            Constant::Ln10 => "Math.LN10",
            Constant::Log2E => "Math.LOG2E",
            Constant::Log10E => "Math.LOG10E",
            Constant::Sqrt2 => "Math.SQRT2",
            Constant::Infinity => "Infinity",
            Constant::NaN => "NaN",
        }
    }
}

/// How many arguments a function takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Variadic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Round,
    Trunc,
    Ln,
    Log10,
    Log2,
    Log1p,
    Exp,
    Expm1,
    Pow,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Hypot,
    Min,
    Max,
}

impl Function {
    pub fn name(self) -> &'static str {
        match self {
            Function::Sqrt => "Math.sqrt",
            Function::Cbrt => "Math.cbrt",
            Function::Abs => "Math.abs",
            Function::Sign => "Math.sign",
            Function::Floor => "Math.floor",
            Function::Ceil => "Math.ceil",
            Function::Round => "Math.round",
            Function::Trunc => "Math.trunc",
            Function::Ln => "Math.log",
            Function::Log10 => "log10",
            Function::Log2 => "Math.log2",
            Function::Log1p => "Math.log1p",
            Function::Exp => "Math.exp",
            Function::Expm1 => "Math.expm1",
            Function::Pow => "Math.pow",
            Function::Sin => "Math.sin",
            Function::Cos => "Math.cos",
            Function::Tan => "Math.tan",
            Function::Asin => "Math.asin",
            Function::Acos => "Math.acos",
            Function::Atan => "Math.atan",
            Function::Atan2 => "Math.atan2",
            Function::Sinh => "Math.sinh",
            Function::Cosh => "Math.cosh",
            Function::Tanh => "Math.tanh",
            Function::Asinh => "Math.asinh",
            Function::Acosh => "Math.acosh",
            Function::Atanh => "Math.atanh",
            Function::Hypot => "Math.hypot",
            Function::Min => "Math.min",
            Function::Max => "Math.max",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Function::Pow | Function::Atan2 => Arity::Exact(2),
            Function::Hypot | Function::Min | Function::Max => Arity::Variadic,
            _ => Arity::Exact(1),
        }
    }

    /// Apply the function. `args` must satisfy [`Function::arity`].
    pub fn apply(self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let y = args.get(1).copied().unwrap_or(f64::NAN);

        match self {
            Function::Sqrt => x.sqrt(),
            Function::Cbrt => x.cbrt(),
            Function::Abs => x.abs(),
            Function::Sign => sign(x),
            Function::Floor => x.floor(),
            Function::Ceil => x.ceil(),
            Function::Round => round_half_up(x),
            Function::Trunc => x.trunc(),
            Function::Ln => x.ln(),
            Function::Log10 => helpers::log10(x),
            Function::Log2 => x.log2(),
            Function::Log1p => x.ln_1p(),
            Function::Exp => x.exp(),
            Function::Expm1 => x.exp_m1(),
            Function::Pow => pow(x, y),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Atan2 => x.atan2(y),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Asinh => x.asinh(),
            Function::Acosh => x.acosh(),
            Function::Atanh => x.atanh(),
            Function::Hypot => hypot(args),
            Function::Min => fold_extreme(args, f64::INFINITY, |a, b| b < a),
            Function::Max => fold_extreme(args, f64::NEG_INFINITY, |a, b| b > a),
        }
    }
}

/// What a name in an expression refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Name {
    Constant(Constant),
    Function(Function),
    Factorial,
}

const CONSTANTS: &[Constant] = &[
    Constant::Pi,
    Constant::E,
    Constant::Ln2,
    Constant::Ln10,
    Constant::Log2E,
    Constant::Log10E,
    Constant::Sqrt2,
    Constant::Infinity,
    Constant::NaN,
];

const FUNCTIONS: &[Function] = &[
    Function::Sqrt,
    Function::Cbrt,
    Function::Abs,
    Function::Sign,
    Function::Floor,
    Function::Ceil,
    Function::Round,
    Function::Trunc,
    Function::Ln,
    Function::Log10,
    Function::Log2,
    Function::Log1p,
    Function::Exp,
    Function::Expm1,
    Function::Pow,
    Function::Sin,
    Function::Cos,
    Function::Tan,
    Function::Asin,
    Function::Acos,
    Function::Atan,
    Function::Atan2,
    Function::Sinh,
    Function::Cosh,
    Function::Tanh,
    Function::Asinh,
    Function::Acosh,
    Function::Atanh,
    Function::Hypot,
    Function::Min,
    Function::Max,
];

/// Resolve a name. `Math.log10` is accepted as an alias of the `log10` helper.
pub fn lookup(name: &str) -> Option<Name> {
    if name == FACTORIAL {
        return Some(Name::Factorial);
    }
    if name == "Math.log10" {
        return Some(Name::Function(Function::Log10));
    }
    if let Some(c) = CONSTANTS.iter().find(|c| c.name() == name) {
        return Some(Name::Constant(*c));
    }
    FUNCTIONS
        .iter()
        .find(|f| f.name() == name)
        .map(|f| Name::Function(*f))
}

fn sign(x: f64) -> f64 {
    if x.is_nan() || x == 0.0 { x } else { x.signum() }
}

/// Rounds halves towards positive infinity (`-2.5` → `-2`).
fn round_half_up(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// `powf`, except `(±1) ** ±Infinity` and `(±1) ** NaN` are NaN.
pub(crate) fn pow(base: f64, exponent: f64) -> f64 {
    if base.abs() == 1.0 && !exponent.is_finite() {
        return f64::NAN;
    }
    base.powf(exponent)
}

fn hypot(args: &[f64]) -> f64 {
    if args.iter().any(|a| a.is_infinite()) {
        return f64::INFINITY;
    }
    args.iter().fold(0.0, |acc: f64, a| acc.hypot(*a))
}

fn fold_extreme(args: &[f64], init: f64, better: impl Fn(f64, f64) -> bool) -> f64 {
    let mut acc = init;
    for &a in args {
        if a.is_nan() {
            return f64::NAN;
        }
        if better(acc, a) {
            acc = a;
        }
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("Math.PI"), Some(Name::Constant(Constant::Pi)));
        assert_eq!(lookup("Math.sin"), Some(Name::Function(Function::Sin)));
        assert_eq!(lookup("log10"), Some(Name::Function(Function::Log10)));
        assert_eq!(lookup("Math.log10"), Some(Name::Function(Function::Log10)));
        assert_eq!(lookup("fact"), Some(Name::Factorial));
        assert_eq!(lookup("Infinity"), Some(Name::Constant(Constant::Infinity)));
        assert_eq!(lookup("sin"), None);
        assert_eq!(lookup("Math"), None);
        assert_eq!(lookup("window"), None);
    }

    #[test]
    fn test_names_round_trip() {
        for c in CONSTANTS {
            assert_eq!(lookup(c.name()), Some(Name::Constant(*c)));
        }
        for f in FUNCTIONS {
            assert_eq!(lookup(f.name()), Some(Name::Function(*f)));
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(0.49999999999999994), 0.0);
    }

    #[test]
    fn test_variadic_functions() {
        assert_eq!(Function::Max.apply(&[1.0, 5.0, 3.0]), 5.0);
        assert_eq!(Function::Min.apply(&[1.0, -5.0, 3.0]), -5.0);
        assert_eq!(Function::Max.apply(&[]), f64::NEG_INFINITY);
        assert_eq!(Function::Min.apply(&[]), f64::INFINITY);
        assert!(Function::Max.apply(&[1.0, f64::NAN]).is_nan());
        assert_eq!(Function::Hypot.apply(&[3.0, 4.0]), 5.0);
        assert_eq!(Function::Hypot.apply(&[]), 0.0);
    }

    #[test]
    fn test_pow_edge_cases() {
        assert_eq!(Function::Pow.apply(&[2.0, 10.0]), 1024.0);
        assert!(Function::Pow.apply(&[1.0, f64::INFINITY]).is_nan());
        assert_eq!(Function::Pow.apply(&[0.0, -1.0]), f64::INFINITY);
    }
}
