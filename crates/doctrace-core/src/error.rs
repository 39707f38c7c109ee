//! Error types for the validation pipeline
//!
//! Only filesystem-level failures are errors here. Malformed artifacts,
//! broken references, and incomplete chains are reported as issue data by
//! the rule engine, never raised.

use std::path::PathBuf;

/// Top-level validation failure
///
/// These short-circuit before the rule engine runs and map to their own
/// exit code at the CLI boundary, distinct from the three issue severities.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// The root specs directory does not exist or is not a directory
    #[error("specs path not found: {path}")]
    SpecsPathNotFound {
        /// The root path that was requested
        path: PathBuf,
    },

    /// A filesystem read failed mid-scan
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl TraceError {
    /// Wrap an I/O error with the path it occurred on
    #[inline]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
