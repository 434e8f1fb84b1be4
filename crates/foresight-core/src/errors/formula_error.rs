/// Reasons a formula is refused before it is ever evaluated.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormulaError {
    #[error("formula is empty")]
    Empty,

    #[error("formula too long: {length} characters, max {max}")]
    TooLong { length: usize, max: usize },

    #[error("denied token: {token}")]
    DeniedToken { token: String },

    #[error("forbidden syntax: {found:?}")]
    ForbiddenSyntax { found: char },

    #[error("bare assignment operator in expression")]
    BareAssignment,

    #[error("disallowed character: {found:?}")]
    DisallowedCharacter { found: char },

    #[error("unrecognized input at offset {offset}: {fragment:?}")]
    Lex { offset: usize, fragment: String },

    #[error("parse error at offset {offset}: {message}")]
    Parse { offset: usize, message: String },

    #[error("unknown math builtin: {name}")]
    UnknownBuiltin { name: String },

    #[error("{function} expects {expected} argument(s), got {actual}")]
    Arity {
        function: String,
        expected: String,
        actual: usize,
    },

    #[error("nesting deeper than {max} levels")]
    TooDeep { max: usize },

    #[error("more than {max} operators in one expression")]
    TooComplex { max: usize },

    #[error("edge formula has no assignment: {formula}")]
    MissingAssignment { formula: String },

    #[error("invalid assignment target: {target:?}")]
    InvalidTarget { target: String },
}
