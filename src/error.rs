/// Failures produced by the scoring engine itself. IO and database errors
/// stay in `anyhow` at the call sites; these are the conditions the engine
/// detects on its own inputs and never retries.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("missing factor: {0}")]
    MissingFactor(&'static str),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }
}
