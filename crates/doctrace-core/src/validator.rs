//! Validator entry points
//!
//! [`TraceValidator`] ties the pipeline together: loader → rule engine →
//! result assembler. Construct one explicitly and pass it around; there is
//! no global instance and no cross-run state.

use crate::engine::RuleEngine;
use crate::error::TraceError;
use crate::loader::ArtifactLoader;
use crate::report::ValidationResult;
use doctrace_artifact::ArtifactCollection;
use std::path::Path;

/// Runs traceability validation over a specs directory or an in-memory
/// collection
///
/// Each run is a pure function of its input: nothing is cached or persisted
/// between calls, so independent runs may be parallelized freely by the
/// caller.
#[derive(Debug, Clone, Default)]
pub struct TraceValidator {
    loader: ArtifactLoader,
    strict: bool,
}

impl TraceValidator {
    /// Create a validator in non-strict mode
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            loader: ArtifactLoader::new(),
            strict: false,
        }
    }

    /// With strict mode (warnings alone fail the run)
    #[inline]
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Validate the artifacts under a specs root directory
    ///
    /// # Errors
    /// Returns `TraceError` for filesystem-level failures (missing root,
    /// unreadable files). All documentation inconsistencies are reported in
    /// the result, never as errors here.
    pub fn validate_dir(&self, root: &Path) -> Result<ValidationResult, TraceError> {
        tracing::info!(root = %root.display(), strict = self.strict, "validating specs directory");
        let collection = self.loader.load(root)?;
        let rules = RuleEngine::new().evaluate(&collection);
        Ok(ValidationResult::assemble(
            Some(root),
            self.strict,
            &collection,
            rules,
        ))
    }

    /// Validate an in-memory collection, bypassing the filesystem
    ///
    /// Re-enters the pipeline at the rule engine; used for embedding the
    /// validator where no directory exists and for deterministic tests.
    #[must_use]
    pub fn validate_collection(&self, collection: &ArtifactCollection) -> ValidationResult {
        let rules = RuleEngine::new().evaluate(collection);
        ValidationResult::assemble(None, self.strict, collection, rules)
    }
}
