use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the naming engine, the configuration store and the
/// version-control collaborator.
#[derive(Debug, Error)]
pub enum HelperError {
    /// No abbreviation has been configured yet
    #[error("no configuration found. Please run 'git-helper config' to set your two-letter abbreviation")]
    ConfigurationMissing,

    /// A ticket id, description or abbreviation failed its pattern or length rule
    #[error("{0}")]
    Format(String),

    /// The working tree is not in a state the command can act on
    #[error("{0}")]
    PreconditionFailed(String),

    /// The git binary exited unsuccessfully
    #[error("`{command}` failed{}", .code.map(|c| format!(" with exit code {c}")).unwrap_or_default())]
    ExternalTool { command: String, code: Option<i32> },

    /// The configuration file could not be read or written
    #[error("failed to access configuration at {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but is not valid TOML
    #[error("invalid configuration file {}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The user pressed Escape or Ctrl-C at a prompt
    #[error("operation cancelled")]
    Cancelled,
}

impl HelperError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        Self::Format(message.into())
    }
}

/// Returns true when the error chain bottoms out in a user cancellation.
#[must_use]
pub fn is_cancellation(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<HelperError>(),
            Some(HelperError::Cancelled)
        )
    })
}
