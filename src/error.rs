use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the orchestrator before or while launching the engine.
///
/// A nonzero engine exit code is not an error; it is reported through
/// [`crate::model::ExecutionResult::exit_code`].
#[derive(Debug, Error)]
pub enum RunError {
    #[error("missing Amanzi configuration: {variable} is not set")]
    Configuration { variable: &'static str },

    #[error("missing Amanzi installation: no executable at {}", .executable.display())]
    Installation { executable: PathBuf },

    #[error("failed to {action} {}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RunError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RunError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Configuration and installation problems are the caller's environment,
    /// not a runtime failure.
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            RunError::Configuration { .. } | RunError::Installation { .. }
        )
    }
}
