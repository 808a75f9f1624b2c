#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("rate limit exceeded")]
    Throttled,
    #[error("credentials expired")]
    CredentialsExpired,
    #[error("request to cloudformation did not complete: {0}")]
    Transport(String),
    #[error("cloudformation error {code}: {message}")]
    Service { code: String, message: String },
    #[error("stack {0} disappeared while waiting for it")]
    StackVanished(String),
    #[error("stack still {0} when the wait ran out")]
    Timeout(crate::stack_status::StackStatus),
}

impl Error {
    /// Errors worth polling through rather than giving up on.
    pub(crate) fn is_transient(&self) -> bool {
        matches!(self, Self::Throttled | Self::Transport(_))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub(crate) enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}
