//! AST evaluation against a named-value environment.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use foresight_core::errors::EvaluationError;

use crate::ast::{BinaryOp, Expr, LogicalOp, UnaryOp};
use crate::builtins;

/// Read-only lookup of identifier values.
pub trait Environment {
    fn lookup(&self, name: &str) -> Option<f64>;
}

impl<S: BuildHasher> Environment for HashMap<String, f64, S> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl Environment for BTreeMap<String, f64> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.get(name).copied()
    }
}

impl<E: Environment + ?Sized> Environment for &E {
    fn lookup(&self, name: &str) -> Option<f64> {
        (**self).lookup(name)
    }
}

/// Two environments stacked: `primary` shadows `fallback`.
pub struct Layered<'a, P: ?Sized, F: ?Sized> {
    pub primary: &'a P,
    pub fallback: &'a F,
}

impl<'a, P: ?Sized, F: ?Sized> Layered<'a, P, F> {
    pub fn new(primary: &'a P, fallback: &'a F) -> Self {
        Self { primary, fallback }
    }
}

impl<P: Environment + ?Sized, F: Environment + ?Sized> Environment for Layered<'_, P, F> {
    fn lookup(&self, name: &str) -> Option<f64> {
        self.primary
            .lookup(name)
            .or_else(|| self.fallback.lookup(name))
    }
}

/// Intermediate value. Text only ever comes from literals.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Value<'a> {
    Number(f64),
    Text(&'a str),
}

impl<'a> Value<'a> {
    fn number(self, operation: &str) -> Result<f64, EvaluationError> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(_) => Err(EvaluationError::TypeMismatch {
                operation: operation.to_string(),
            }),
        }
    }

    fn truthy(self) -> bool {
        match self {
            Self::Number(n) => n != 0.0 && !n.is_nan(),
            Self::Text(t) => !t.is_empty(),
        }
    }

    fn strict_eq(self, other: Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// Evaluate an expression to a finite number.
///
/// Identifiers resolve through `env` first and then the math constants.
/// Infinite or NaN intermediates are allowed; only the final value must be finite.
pub fn evaluate_expr<E: Environment + ?Sized>(expr: &Expr, env: &E) -> Result<f64, EvaluationError> {
    let value = eval(expr, env)?.number("result")?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::NonFinite { value })
    }
}

fn eval<'a, E: Environment + ?Sized>(expr: &'a Expr, env: &E) -> Result<Value<'a>, EvaluationError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Text(t) => Ok(Value::Text(t)),
        Expr::Ident(name) => env
            .lookup(name)
            .or_else(|| builtins::constant(name))
            .map(Value::Number)
            .ok_or_else(|| EvaluationError::UnknownIdentifier { name: name.clone() }),
        Expr::Unary { op, operand } => {
            let value = eval(operand, env)?;
            Ok(Value::Number(match op {
                UnaryOp::Neg => -value.number("unary -")?,
                UnaryOp::Plus => value.number("unary +")?,
                UnaryOp::Not => flag(!value.truthy()),
            }))
        }
        Expr::Binary { op, lhs, rhs } => {
            let lhs = eval(lhs, env)?;
            let rhs = eval(rhs, env)?;
            binary(*op, lhs, rhs).map(Value::Number)
        }
        Expr::Logical { op, lhs, rhs } => {
            let lhs = eval(lhs, env)?;
            match (op, lhs.truthy()) {
                (LogicalOp::And, false) | (LogicalOp::Or, true) => Ok(lhs),
                _ => eval(rhs, env),
            }
        }
        Expr::Conditional {
            condition,
            then_branch,
            else_branch,
        } => {
            if eval(condition, env)?.truthy() {
                eval(then_branch, env)
            } else {
                eval(else_branch, env)
            }
        }
        Expr::Call { function, args } => {
            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(eval(arg, env)?.number(function.name())?);
            }
            Ok(Value::Number(function.apply(&values)))
        }
    }
}

fn binary(op: BinaryOp, lhs: Value<'_>, rhs: Value<'_>) -> Result<f64, EvaluationError> {
    let numeric = |apply: fn(f64, f64) -> f64| -> Result<f64, EvaluationError> {
        Ok(apply(lhs.number(op.symbol())?, rhs.number(op.symbol())?))
    };
    match op {
        BinaryOp::Eq => Ok(flag(lhs.strict_eq(rhs))),
        BinaryOp::NotEq => Ok(flag(!lhs.strict_eq(rhs))),
        BinaryOp::Add => numeric(|a, b| a + b),
        BinaryOp::Sub => numeric(|a, b| a - b),
        BinaryOp::Mul => numeric(|a, b| a * b),
        BinaryOp::Div => numeric(|a, b| a / b),
        BinaryOp::Rem => numeric(|a, b| a % b),
        BinaryOp::Pow => numeric(f64::powf),
        BinaryOp::Lt => numeric(|a, b| flag(a < b)),
        BinaryOp::Le => numeric(|a, b| flag(a <= b)),
        BinaryOp::Gt => numeric(|a, b| flag(a > b)),
        BinaryOp::Ge => numeric(|a, b| flag(a >= b)),
    }
}
