pub mod evaluation_error;
pub mod formula_error;
pub mod model_error;

pub use evaluation_error::EvaluationError;
pub use formula_error::FormulaError;
pub use model_error::ModelError;

/// Top-level error for every public Foresight operation.
#[derive(Debug, thiserror::Error)]
pub enum ForesightError {
    #[error("formula rejected: {0}")]
    FormulaRejected(#[from] FormulaError),

    #[error("evaluation failed: {0}")]
    EvaluationFailed(#[from] EvaluationError),

    #[error("invalid model: {0}")]
    Model(#[from] ModelError),

    #[error("model deserialization failed: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),
}

/// Convenience alias used across the workspace.
pub type ForesightResult<T> = Result<T, ForesightError>;
