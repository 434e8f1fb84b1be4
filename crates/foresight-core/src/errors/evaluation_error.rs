/// Runtime failures of a formula that already passed validation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvaluationError {
    #[error("unknown identifier: {name}")]
    UnknownIdentifier { name: String },

    #[error("type mismatch: {operation} cannot take a text operand")]
    TypeMismatch { operation: String },

    #[error("non-finite result: {value}")]
    NonFinite { value: f64 },
}
