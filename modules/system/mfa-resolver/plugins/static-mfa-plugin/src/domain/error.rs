use thiserror::Error;

/// Errors raised while loading the static configuration.
#[derive(Debug, Error)]
pub enum StaticPluginError {
    #[error("identifier '{0}' is configured more than once")]
    DuplicateId(String),

    #[error("identifier must not be blank")]
    BlankId,

    #[error("provider group '{0}' has no members")]
    EmptyGroup(String),

    #[error("registered service {id} is configured more than once")]
    DuplicateService { id: i64 },

    #[error("registered service {id} has an invalid service pattern: {reason}")]
    InvalidServicePattern { id: i64, reason: String },
}
