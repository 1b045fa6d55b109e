use thiserror::Error;

/// Errors raised at the fallible edges of the wizard engine.
///
/// Navigation itself never fails: rejected or impossible transitions are
/// reported as `NavigationOutcome` values. These errors cover loading
/// configuration, parsing navigation targets and replaying session scripts.

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration from {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration from {path}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TargetParseError {
    #[error("Empty navigation target")]
    Empty,

    #[error("Unknown navigation target: {0} (expected \"next\", \"prev\" or a step number)")]
    Unknown(String),
}

#[derive(Error, Debug)]
pub enum ScriptError {
    #[error("Failed to read session script from {path}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse session script from {path}")]
    ParseFailed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session script is empty")]
    Empty,
}

/// Type alias for application Results using anyhow for context chaining
pub type AppResult<T> = anyhow::Result<T>;
