//! The fixed math library formulas may call: functions and constants,
//! reachable both as `Math.name` and as bare `name`.

use std::f64::consts;

/// Whitelisted math functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFunction {
    Abs,
    Min,
    Max,
    Pow,
    Sqrt,
    Cbrt,
    Exp,
    Log,
    Log10,
    Log2,
    Log1p,
    Floor,
    Ceil,
    Round,
    Trunc,
    Sign,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Hypot,
}

/// How many arguments a function takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exactly(n) => count == n,
            Self::AtLeast(n) => count >= n,
        }
    }

    pub fn describe(self) -> String {
        match self {
            Self::Exactly(n) => n.to_string(),
            Self::AtLeast(n) => format!("at least {n}"),
        }
    }
}

impl MathFunction {
    pub fn lookup(name: &str) -> Option<Self> {
        let function = match name {
            "abs" => Self::Abs,
            "min" => Self::Min,
            "max" => Self::Max,
            "pow" => Self::Pow,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "exp" => Self::Exp,
            "log" => Self::Log,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "log1p" => Self::Log1p,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "trunc" => Self::Trunc,
            "sign" => Self::Sign,
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "atan2" => Self::Atan2,
            "hypot" => Self::Hypot,
            _ => return None,
        };
        Some(function)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Abs => "abs",
            Self::Min => "min",
            Self::Max => "max",
            Self::Pow => "pow",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Log1p => "log1p",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Trunc => "trunc",
            Self::Sign => "sign",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Atan2 => "atan2",
            Self::Hypot => "hypot",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Self::Min | Self::Max | Self::Hypot => Arity::AtLeast(1),
            Self::Pow | Self::Atan2 => Arity::Exactly(2),
            _ => Arity::Exactly(1),
        }
    }

    /// Apply to already-evaluated arguments. Arity was checked at parse time.
    pub fn apply(self, args: &[f64]) -> f64 {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let y = args.get(1).copied().unwrap_or(f64::NAN);
        match self {
            Self::Abs => x.abs(),
            Self::Min => args.iter().copied().fold(f64::INFINITY, nan_min),
            Self::Max => args.iter().copied().fold(f64::NEG_INFINITY, nan_max),
            Self::Pow => x.powf(y),
            Self::Sqrt => x.sqrt(),
            Self::Cbrt => x.cbrt(),
            Self::Exp => x.exp(),
            Self::Log => x.ln(),
            Self::Log10 => x.log10(),
            Self::Log2 => x.log2(),
            Self::Log1p => x.ln_1p(),
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
            // Halves round toward +∞, so round(-2.5) is -2.
            Self::Round => (x + 0.5).floor(),
            Self::Trunc => x.trunc(),
            Self::Sign => {
                if x > 0.0 {
                    1.0
                } else if x < 0.0 {
                    -1.0
                } else {
                    x
                }
            }
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Atan2 => x.atan2(y),
            Self::Hypot => args.iter().map(|a| a * a).sum::<f64>().sqrt(),
        }
    }
}

// NaN-propagating min/max; f64::min would silently drop the NaN.
fn nan_min(acc: f64, x: f64) -> f64 {
    if acc.is_nan() || x.is_nan() {
        f64::NAN
    } else {
        acc.min(x)
    }
}

fn nan_max(acc: f64, x: f64) -> f64 {
    if acc.is_nan() || x.is_nan() {
        f64::NAN
    } else {
        acc.max(x)
    }
}

/// Named math constants.
pub fn constant(name: &str) -> Option<f64> {
    let value = match name {
        "PI" => consts::PI,
        "E" => consts::E,
        "LN2" => consts::LN_2,
        "LN10" => consts::LN_10,
        "LOG2E" => consts::LOG2_E,
        "LOG10E" => consts::LOG10_E,
        "SQRT2" => consts::SQRT_2,
        "SQRT1_2" => consts::FRAC_1_SQRT_2,
        _ => return None,
    };
    Some(value)
}

pub fn is_constant(name: &str) -> bool {
    constant(name).is_some()
}
