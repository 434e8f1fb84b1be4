//! Formula AST.

use crate::builtins::MathFunction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "**",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

/// Short-circuiting operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Text(String),
    /// A reference into the evaluation environment (or a bare math constant).
    Ident(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Call {
        function: MathFunction,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Visit every identifier reference in source order.
    pub fn visit_identifiers<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Self::Number(_) | Self::Text(_) => {}
            Self::Ident(name) => visit(name),
            Self::Unary { operand, .. } => operand.visit_identifiers(visit),
            Self::Binary { lhs, rhs, .. } | Self::Logical { lhs, rhs, .. } => {
                lhs.visit_identifiers(visit);
                rhs.visit_identifiers(visit);
            }
            Self::Conditional {
                condition,
                then_branch,
                else_branch,
            } => {
                condition.visit_identifiers(visit);
                then_branch.visit_identifiers(visit);
                else_branch.visit_identifiers(visit);
            }
            Self::Call { args, .. } => {
                for arg in args {
                    arg.visit_identifiers(visit);
                }
            }
        }
    }
}
