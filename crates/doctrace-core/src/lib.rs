//! DocTrace Core - Traceability Validation Pipeline
//!
//! The reference-graph engine behind documentation hygiene checks:
//! - Loads requirement, design, and task artifacts from a specs directory
//! - Builds bidirectional reference indices between them
//! - Evaluates five consistency rules (orphans, broken references,
//!   incomplete chains, status drift)
//! - Assembles a severity-tiered, renderable validation result
//!
//! # Example
//!
//! ```rust,ignore
//! use doctrace_core::{ReportFormat, TraceValidator};
//!
//! let validator = TraceValidator::new().with_strict(true);
//! let result = validator.validate_dir("specs".as_ref())?;
//! println!("{}", result.render(ReportFormat::Console));
//! std::process::exit(result.exit_code);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod engine;
pub mod error;
pub mod loader;
pub mod report;
pub mod types;
pub mod validator;

// Re-exports for convenience
pub use engine::{RuleEngine, RuleOutcome};
pub use error::TraceError;
pub use loader::ArtifactLoader;
pub use report::{ReportFormat, ValidationResult};
pub use types::{Outcome, TraceIssue, TraceRule, ValidationStats};
pub use validator::TraceValidator;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with DocTrace Core
    pub use crate::{
        Outcome, ReportFormat, TraceError, TraceIssue, TraceRule, TraceValidator, ValidationResult,
    };
    pub use doctrace_artifact::{ArtifactCollection, ArtifactKind, ArtifactRecord};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
