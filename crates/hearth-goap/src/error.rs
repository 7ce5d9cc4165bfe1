use hearth_core::CoreError;

/// Errors raised while authoring actions, goals, and catalogues.
#[derive(Debug, thiserror::Error)]
pub enum GoapError {
    #[error("'{owner}' lists fact '{key}' more than once")]
    DuplicateFact { owner: String, key: String },

    #[error("action '{0}' has a negative or non-finite cost")]
    InvalidCost(String),

    #[error("action '{0}' has a negative or non-finite duration")]
    InvalidDuration(String),

    #[error("'{owner}' uses a non-positive amount of '{key}'")]
    InvalidAmount { owner: String, key: String },

    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    State(#[from] CoreError),
}
