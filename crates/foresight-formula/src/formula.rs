//! Compiled formulas: validated once, evaluated many times.

use std::collections::BTreeSet;

use foresight_core::errors::{EvaluationError, FormulaError, ForesightResult};

use crate::ast::Expr;
use crate::builtins;
use crate::evaluator::{self, Environment};
use crate::parser;
use crate::validator::FormulaValidator;

/// A validated and parsed expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
    identifiers: BTreeSet<String>,
}

impl Formula {
    /// Validate and parse with the default validator.
    pub fn compile(source: &str) -> Result<Self, FormulaError> {
        Self::compile_with(source, &FormulaValidator::default())
    }

    /// Validate with `validator`, then parse.
    pub fn compile_with(source: &str, validator: &FormulaValidator) -> Result<Self, FormulaError> {
        validator.check(source)?;
        let expr = parser::parse(source)?;
        let mut identifiers = BTreeSet::new();
        expr.visit_identifiers(&mut |name| {
            if !builtins::is_constant(name) {
                identifiers.insert(name.to_string());
            }
        });
        Ok(Self {
            source: source.trim().to_string(),
            expr,
            identifiers,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn expr(&self) -> &Expr {
        &self.expr
    }

    /// Environment names the formula reads, excluding math constants.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.identifiers.iter().map(String::as_str)
    }

    pub fn references(&self, name: &str) -> bool {
        self.identifiers.contains(name)
    }

    pub fn evaluate<E: Environment + ?Sized>(&self, env: &E) -> Result<f64, EvaluationError> {
        evaluator::evaluate_expr(&self.expr, env)
    }
}

/// An edge formula of the form `target = expression`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: String,
    pub expression: Formula,
}

impl Assignment {
    pub fn compile(source: &str) -> Result<Self, FormulaError> {
        Self::compile_with(source, &FormulaValidator::default())
    }

    /// Split on the first bare `=`, check the target is a plain identifier
    /// that passes the validator, and compile the right-hand side as an
    /// ordinary formula.
    pub fn compile_with(source: &str, validator: &FormulaValidator) -> Result<Self, FormulaError> {
        let (target, expression) =
            split_assignment(source).ok_or_else(|| FormulaError::MissingAssignment {
                formula: source.to_string(),
            })?;
        if !is_identifier(target) {
            return Err(FormulaError::InvalidTarget {
                target: target.to_string(),
            });
        }
        validator.check(target)?;
        Ok(Self {
            target: target.to_string(),
            expression: Formula::compile_with(expression, validator)?,
        })
    }
}

/// Split `target = expression` at the first `=` that is not part of a
/// comparison operator (`==`, `===`, `!=`, `!==`, `<=`, `>=`).
pub fn split_assignment(source: &str) -> Option<(&str, &str)> {
    let bytes = source.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'=' {
            i += 1;
            continue;
        }
        let prev = i.checked_sub(1).map(|p| bytes[p]);
        let next = bytes.get(i + 1).copied();
        if next == Some(b'=') {
            // Skip the whole run of '='.
            while i < bytes.len() && bytes[i] == b'=' {
                i += 1;
            }
            continue;
        }
        if matches!(prev, Some(b'!' | b'<' | b'>' | b'=')) {
            i += 1;
            continue;
        }
        return Some((source[..i].trim(), source[i + 1..].trim()));
    }
    None
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Compile and evaluate in one step.
pub fn evaluate<E: Environment + ?Sized>(expression: &str, env: &E) -> ForesightResult<f64> {
    Ok(Formula::compile(expression)?.evaluate(env)?)
}
