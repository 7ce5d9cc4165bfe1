/// Errors raised by world state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("state '{0}' does not exist")]
    StateNotFound(String),

    #[error("fact '{0}' is listed more than once")]
    DuplicateFact(String),
}
