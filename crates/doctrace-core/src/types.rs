//! Issue and verdict types
//!
//! Defines the data the rule engine emits and the three-way verdict the
//! result assembler computes:
//! - [`TraceRule`]: which of the five traceability rules fired
//! - [`TraceIssue`]: one violation instance, immutable once created
//! - [`Outcome`]: pass / errors present / warnings present under strict mode
//! - [`ValidationStats`]: per-kind load counts plus the valid-chain count

use serde::{Deserialize, Serialize};

/// The five traceability rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraceRule {
    /// Rule 1: every requirement should be cited by at least one design
    #[serde(rename = "Forward Traceability")]
    ForwardTraceability,
    /// Rule 2: every task must cite at least one design
    #[serde(rename = "Backward Traceability")]
    BackwardTraceability,
    /// Rule 3: every design should close the requirement-to-task chain
    #[serde(rename = "Complete Chain")]
    CompleteChain,
    /// Rule 4: every cross-reference must resolve to a loaded artifact
    #[serde(rename = "Reference Validity")]
    ReferenceValidity,
    /// Rule 5: a completed task should not cite an uncompleted design
    #[serde(rename = "Status Consistency")]
    StatusConsistency,
}

impl std::fmt::Display for TraceRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ForwardTraceability => "Forward Traceability",
            Self::BackwardTraceability => "Backward Traceability",
            Self::CompleteChain => "Complete Chain",
            Self::ReferenceValidity => "Reference Validity",
            Self::StatusConsistency => "Status Consistency",
        };
        write!(f, "{name}")
    }
}

/// One traceability violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceIssue {
    /// The rule that fired
    pub rule: TraceRule,
    /// Id of the artifact the violation originates from
    pub source: String,
    /// Id of the referenced artifact, when the rule involves one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Human-readable description
    pub message: String,
}

impl TraceIssue {
    /// Create an issue without a target
    #[inline]
    #[must_use]
    pub fn new(rule: TraceRule, source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            source: source.into(),
            target: None,
            message: message.into(),
        }
    }

    /// With a target artifact id
    #[inline]
    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

/// Three-way verdict for a validation run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No errors, and no warnings that matter under the requested mode
    Clean,
    /// At least one error: structurally invalid documentation
    ErrorsPresent,
    /// Warnings present and strict mode requested
    StrictWarnings,
}

impl Outcome {
    /// Process-exit-style code for this outcome
    #[inline]
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Clean => 0,
            Self::ErrorsPresent => 1,
            Self::StrictWarnings => 2,
        }
    }

    /// Whether this outcome is a pass
    #[inline]
    #[must_use]
    pub fn passed(self) -> bool {
        matches!(self, Self::Clean)
    }
}

/// Load statistics plus the valid-chain count
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationStats {
    /// Requirements loaded
    pub requirements: usize,
    /// Designs loaded
    pub designs: usize,
    /// Tasks loaded
    pub tasks: usize,
    /// Designs with both a requirement reference and an implementing task
    pub valid_chains: usize,
}
