use thiserror::Error;

use super::context::ContextError;

/// Errors produced while turning rule data into setters.
///
/// These are fail-fast: a malformed document aborts the whole parse and no
/// setters from it are kept.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("invalid rules for stage '{stage}'")]
    InvalidStage {
        stage: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid property block '{stage}:{name}'")]
    InvalidBlock {
        stage: String,
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("masked property '{name}' has no mask pattern")]
    MissingMask { name: String },
}

/// A context write rejected at apply time.
///
/// Not caught by the manager; the first failing setter aborts the remaining
/// setters for that stage.
#[derive(Debug, Error)]
#[error("failed to set property '{property}'")]
pub struct ApplyError {
    pub property: String,
    #[source]
    pub source: ContextError,
}
