/// Structural problems in a decision model, detected before any sampling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    /// Required fields are absent. Lists every missing field path so the
    /// authoring side can retry with a correction.
    #[error("malformed model, missing: {}", missing.join(", "))]
    Malformed { missing: Vec<String> },

    #[error("unknown variable {reference:?} referenced by {context}")]
    UnknownVariable { reference: String, context: String },

    #[error("duplicate {kind} id: {id}")]
    DuplicateId { kind: String, id: String },

    #[error("unknown scenario: {id}")]
    UnknownScenario { id: String },
}
