//! Build failures.

use thiserror::Error;

/// A fatal build failure.  Any of these unwinds the whole dispatch; a stale
/// artifact with no builder is not an error (see work::ensure_current).
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required external tool is not on the search path.
    #[error("{0}: not found on PATH")]
    MissingTool(String),

    /// An external command ran but did not exit successfully.
    #[error("command failed: {command}: {message}")]
    Failed { command: String, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
