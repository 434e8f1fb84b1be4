//! # foresight-formula
//!
//! Untrusted formula handling. A formula goes through two gates before it is
//! evaluated: the static [`validator`] (a conservative string filter) and the
//! [`parser`], which only accepts a small arithmetic grammar. Evaluation walks the
//! resulting AST against an [`Environment`] and has no access to anything else.

pub mod ast;
pub mod builtins;
pub mod evaluator;
pub mod formula;
pub mod lexer;
pub mod parser;
pub mod validator;

pub use evaluator::{Environment, Layered};
pub use formula::{evaluate, split_assignment, Assignment, Formula};
pub use validator::{validate, FormulaValidator};
