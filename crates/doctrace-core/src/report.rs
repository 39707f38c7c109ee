//! Validation result assembly and rendering
//!
//! Combines load statistics and rule-engine output into a single
//! [`ValidationResult`], computes the three-way verdict, and renders the
//! result in one of three representations:
//! - structured JSON (direct field mapping)
//! - a tabular report with per-severity sections
//! - a terse console report

use crate::engine::RuleOutcome;
use crate::types::{Outcome, TraceIssue, ValidationStats};
use doctrace_artifact::ArtifactCollection;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;

/// Output representation for a validation result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Structured JSON
    Json,
    /// Summary table plus bulleted per-severity sections
    Table,
    /// Terse labelled console report
    Console,
}

impl ReportFormat {
    /// Resolve a format by name; unrecognized names fall back to console
    #[inline]
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            "table" => Self::Table,
            _ => Self::Console,
        }
    }
}

/// The aggregate outcome of one validation run
///
/// Immutable after construction; serializes to the language-agnostic result
/// shape (`specsPath`, `strict`, `stats`, issue lists, `exitCode`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Root directory validated; absent for in-memory runs
    pub specs_path: Option<String>,
    /// Whether warnings alone fail the run
    pub strict: bool,
    /// Load statistics and valid-chain count
    pub stats: ValidationStats,
    /// Blocking issues
    pub errors: Vec<TraceIssue>,
    /// Tolerable issues
    pub warnings: Vec<TraceIssue>,
    /// Advisory issues
    pub info: Vec<TraceIssue>,
    /// Process-exit-style code for the verdict
    pub exit_code: i32,
    #[serde(skip)]
    outcome: Outcome,
}

impl ValidationResult {
    /// Assemble a result from the collection and rule-engine output
    #[must_use]
    pub fn assemble(
        specs_path: Option<&Path>,
        strict: bool,
        collection: &ArtifactCollection,
        rules: RuleOutcome,
    ) -> Self {
        let outcome = if !rules.errors.is_empty() {
            Outcome::ErrorsPresent
        } else if strict && !rules.warnings.is_empty() {
            Outcome::StrictWarnings
        } else {
            Outcome::Clean
        };

        Self {
            specs_path: specs_path.map(|p| p.display().to_string()),
            strict,
            stats: ValidationStats {
                requirements: collection.requirements().len(),
                designs: collection.designs().len(),
                tasks: collection.tasks().len(),
                valid_chains: rules.valid_chains,
            },
            errors: rules.errors,
            warnings: rules.warnings,
            info: rules.info,
            exit_code: outcome.exit_code(),
            outcome,
        }
    }

    /// The three-way verdict
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Whether the run passed
    #[inline]
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome.passed()
    }

    /// One-line verdict, cosmetically noting tolerated warnings
    #[must_use]
    pub fn verdict_line(&self) -> String {
        match self.outcome {
            Outcome::ErrorsPresent => {
                format!("Validation failed: {} error(s)", self.errors.len())
            }
            Outcome::StrictWarnings => format!(
                "Validation failed: {} warning(s) present (strict)",
                self.warnings.len()
            ),
            Outcome::Clean if !self.warnings.is_empty() => format!(
                "Validation passed with {} warning(s)",
                self.warnings.len()
            ),
            Outcome::Clean => "Validation passed".to_string(),
        }
    }

    /// Render the result in the requested format
    #[must_use]
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Json => {
                // The result shape contains only string-keyed fields, so
                // serialization cannot fail.
                serde_json::to_string_pretty(self)
                    .unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"))
            }
            ReportFormat::Table => self.render_table(),
            ReportFormat::Console => self.render_console(),
        }
    }

    fn render_table(&self) -> String {
        let mut out = String::new();
        out.push_str("# Traceability Report\n\n");
        if let Some(path) = &self.specs_path {
            let _ = writeln!(out, "Specs: {path}\n");
        }
        out.push_str("| Metric | Count |\n");
        out.push_str("| --- | --- |\n");
        let _ = writeln!(out, "| Requirements | {} |", self.stats.requirements);
        let _ = writeln!(out, "| Designs | {} |", self.stats.designs);
        let _ = writeln!(out, "| Tasks | {} |", self.stats.tasks);
        let _ = writeln!(out, "| Valid chains | {} |", self.stats.valid_chains);
        let _ = writeln!(out, "| Errors | {} |", self.errors.len());
        let _ = writeln!(out, "| Warnings | {} |", self.warnings.len());
        let _ = writeln!(out, "| Info | {} |", self.info.len());

        for (title, issues) in [
            ("Errors", &self.errors),
            ("Warnings", &self.warnings),
            ("Info", &self.info),
        ] {
            if issues.is_empty() {
                continue;
            }
            let _ = write!(out, "\n## {title}\n\n");
            for issue in issues {
                let _ = writeln!(out, "- [{}] {}", issue.rule, issue.message);
            }
        }

        let _ = write!(out, "\n{}\n", self.verdict_line());
        out
    }

    fn render_console(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Requirements: {}  Designs: {}  Tasks: {}  Valid chains: {}",
            self.stats.requirements, self.stats.designs, self.stats.tasks, self.stats.valid_chains
        );

        for (label, issues) in [
            ("Errors", &self.errors),
            ("Warnings", &self.warnings),
            ("Info", &self.info),
        ] {
            if issues.is_empty() {
                continue;
            }
            let _ = writeln!(out, "{label}:");
            for issue in issues {
                let _ = writeln!(out, "  [{}] {}", issue.rule, issue.message);
            }
        }

        if self.errors.is_empty() && self.warnings.is_empty() {
            out.push_str("All traceability checks passed!\n");
        } else {
            let _ = writeln!(out, "{}", self.verdict_line());
        }
        out
    }
}
