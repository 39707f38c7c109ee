//! Reference graph builder and rule engine
//!
//! Builds two ephemeral inbound-reference indices over an artifact
//! collection, then evaluates the five traceability rules:
//!
//! 1. Forward Traceability — every requirement is cited by some design
//! 2. Backward Traceability — every task cites at least one design
//! 3. Complete Chain — every design links a requirement to at least one task
//! 4. Reference Validity — every prefixed cross-reference resolves
//! 5. Status Consistency — a completed task's designs are also completed
//!
//! The engine never raises: an empty collection yields an empty outcome, and
//! every inconsistency is reported as issue data.

use crate::types::{TraceIssue, TraceRule};
use doctrace_artifact::{ArtifactCollection, DESIGN_PREFIX, REQ_PREFIX};
use indexmap::IndexMap;

/// Inbound-reference indices, rebuilt from scratch per run
///
/// Every known requirement and design id is present from construction with
/// an empty list, so "zero inbound references" is an empty entry rather than
/// a missing one.
#[derive(Debug)]
struct ReferenceIndex {
    /// requirement id → design ids that cite it
    designs_by_requirement: IndexMap<String, Vec<String>>,
    /// design id → task ids that cite it
    tasks_by_design: IndexMap<String, Vec<String>>,
}

impl ReferenceIndex {
    fn new(collection: &ArtifactCollection) -> Self {
        Self {
            designs_by_requirement: collection
                .requirements()
                .keys()
                .map(|id| (id.clone(), Vec::new()))
                .collect(),
            tasks_by_design: collection
                .designs()
                .keys()
                .map(|id| (id.clone(), Vec::new()))
                .collect(),
        }
    }

    fn add_design_citation(&mut self, requirement_id: &str, design_id: &str) {
        if let Some(inbound) = self.designs_by_requirement.get_mut(requirement_id) {
            inbound.push(design_id.to_string());
        }
    }

    fn add_task_citation(&mut self, design_id: &str, task_id: &str) {
        if let Some(inbound) = self.tasks_by_design.get_mut(design_id) {
            inbound.push(task_id.to_string());
        }
    }

    fn designs_citing(&self, requirement_id: &str) -> &[String] {
        self.designs_by_requirement
            .get(requirement_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    fn tasks_citing(&self, design_id: &str) -> &[String] {
        self.tasks_by_design
            .get(design_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Severity-tiered rule engine output
#[derive(Debug, Clone, Default)]
pub struct RuleOutcome {
    /// Blocking issues (broken references, tasks citing no design)
    pub errors: Vec<TraceIssue>,
    /// Tolerable issues (orphaned requirements, incomplete chains)
    pub warnings: Vec<TraceIssue>,
    /// Advisory issues (status drift), never affect the verdict
    pub info: Vec<TraceIssue>,
    /// Designs with both a requirement reference and an implementing task
    pub valid_chains: usize,
}

/// Evaluates the five traceability rules over a collection
///
/// Stateless; evaluation is a pure function of the collection, so repeated
/// runs over unchanged input produce identical issue lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleEngine;

impl RuleEngine {
    /// Create a rule engine
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Evaluate all rules, producing issue lists and the valid-chain count
    #[must_use]
    pub fn evaluate(&self, collection: &ArtifactCollection) -> RuleOutcome {
        let mut index = ReferenceIndex::new(collection);
        let mut outcome = RuleOutcome::default();

        // Step 1: task → design edges. A related id counts as a design
        // reference by prefix alone; whether it resolves is Rule 4's
        // concern, so a dangling reference does not also trip Rule 2.
        for (task_id, task) in collection.tasks() {
            let mut has_design_reference = false;
            for related in &task.related {
                if !related.starts_with(DESIGN_PREFIX) {
                    continue;
                }
                has_design_reference = true;
                if collection.designs().contains_key(related) {
                    index.add_task_citation(related, task_id);
                } else {
                    outcome.errors.push(
                        TraceIssue::new(
                            TraceRule::ReferenceValidity,
                            task_id,
                            format!("task {task_id} references non-existent design {related}"),
                        )
                        .with_target(related),
                    );
                }
            }
            if !has_design_reference {
                outcome.errors.push(TraceIssue::new(
                    TraceRule::BackwardTraceability,
                    task_id,
                    format!("task {task_id} does not reference any design"),
                ));
            }
        }

        // Step 2: design → requirement edges, symmetric to step 1.
        for (design_id, design) in collection.designs() {
            for related in &design.related {
                if !related.starts_with(REQ_PREFIX) {
                    continue;
                }
                if collection.requirements().contains_key(related) {
                    index.add_design_citation(related, design_id);
                } else {
                    outcome.errors.push(
                        TraceIssue::new(
                            TraceRule::ReferenceValidity,
                            design_id,
                            format!(
                                "design {design_id} references non-existent requirement {related}"
                            ),
                        )
                        .with_target(related),
                    );
                }
            }
        }

        // Rule 1: orphaned requirements.
        for requirement_id in collection.requirements().keys() {
            if index.designs_citing(requirement_id).is_empty() {
                outcome.warnings.push(TraceIssue::new(
                    TraceRule::ForwardTraceability,
                    requirement_id,
                    format!("requirement {requirement_id} is not referenced by any design"),
                ));
            }
        }

        // Rule 3: complete chains. The requirement-reference check is
        // prefix-based and independent of resolution.
        for (design_id, design) in collection.designs() {
            let has_requirement_reference =
                design.related.iter().any(|r| r.starts_with(REQ_PREFIX));
            let has_tasks = !index.tasks_citing(design_id).is_empty();

            if !has_requirement_reference {
                outcome.warnings.push(TraceIssue::new(
                    TraceRule::CompleteChain,
                    design_id,
                    format!("design {design_id} does not reference any requirement"),
                ));
            }
            if !has_tasks {
                outcome.warnings.push(TraceIssue::new(
                    TraceRule::CompleteChain,
                    design_id,
                    format!("design {design_id} has no tasks implementing it"),
                ));
            }
            if has_requirement_reference && has_tasks {
                outcome.valid_chains += 1;
            }
        }

        // Rule 5: status drift between completed tasks and their designs.
        for (task_id, task) in collection.tasks() {
            if !task.is_completed() {
                continue;
            }
            for related in &task.related {
                if !related.starts_with(DESIGN_PREFIX) {
                    continue;
                }
                if let Some(design) = collection.designs().get(related) {
                    if !design.is_completed() {
                        outcome.info.push(
                            TraceIssue::new(
                                TraceRule::StatusConsistency,
                                task_id,
                                format!(
                                    "task {task_id} is completed but design {related} has status '{}'",
                                    design.status
                                ),
                            )
                            .with_target(related),
                        );
                    }
                }
            }
        }

        tracing::debug!(
            errors = outcome.errors.len(),
            warnings = outcome.warnings.len(),
            info = outcome.info.len(),
            valid_chains = outcome.valid_chains,
            "rule evaluation complete"
        );

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctrace_artifact::{ArtifactKind, ArtifactRecord};

    fn requirement(id: &str) -> ArtifactRecord {
        ArtifactRecord::new(ArtifactKind::Requirement, id)
    }

    fn design(id: &str, related: &[&str]) -> ArtifactRecord {
        ArtifactRecord::new(ArtifactKind::Design, id).with_related(related.iter().copied())
    }

    fn task(id: &str, related: &[&str]) -> ArtifactRecord {
        ArtifactRecord::new(ArtifactKind::Task, id).with_related(related.iter().copied())
    }

    fn evaluate(records: Vec<ArtifactRecord>) -> RuleOutcome {
        RuleEngine::new().evaluate(&ArtifactCollection::from_records(records))
    }

    #[test]
    fn empty_collection_yields_empty_outcome() {
        let outcome = evaluate(vec![]);
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
        assert!(outcome.info.is_empty());
        assert_eq!(outcome.valid_chains, 0);
    }

    #[test]
    fn orphaned_requirement_warns_once() {
        let outcome = evaluate(vec![requirement("REQ-001")]);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].rule, TraceRule::ForwardTraceability);
        assert_eq!(outcome.warnings[0].source, "REQ-001");
        assert_eq!(outcome.valid_chains, 0);
    }

    #[test]
    fn task_without_design_reference_is_an_error() {
        let outcome = evaluate(vec![task("TASK-001", &[])]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, TraceRule::BackwardTraceability);
        assert_eq!(outcome.errors[0].source, "TASK-001");
    }

    #[test]
    fn non_design_references_do_not_satisfy_backward_traceability() {
        let outcome = evaluate(vec![task("TASK-001", &["REQ-001", "OTHER-9"])]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, TraceRule::BackwardTraceability);
    }

    #[test]
    fn dangling_design_reference_is_reference_validity_only() {
        // The prefix match satisfies backward traceability even though the
        // reference fails to resolve.
        let outcome = evaluate(vec![task("TASK-001", &["DESIGN-999"])]);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, TraceRule::ReferenceValidity);
        assert_eq!(outcome.errors[0].source, "TASK-001");
        assert_eq!(outcome.errors[0].target.as_deref(), Some("DESIGN-999"));
    }

    #[test]
    fn dangling_requirement_reference_is_symmetric() {
        let outcome = evaluate(vec![design("DESIGN-001", &["REQ-404"])]);
        let rule4: Vec<_> = outcome
            .errors
            .iter()
            .filter(|i| i.rule == TraceRule::ReferenceValidity)
            .collect();
        assert_eq!(rule4.len(), 1);
        assert_eq!(rule4[0].source, "DESIGN-001");
        assert_eq!(rule4[0].target.as_deref(), Some("REQ-404"));
    }

    #[test]
    fn complete_chain_counts_once_per_design() {
        // Two tasks and two requirement references still count as one chain.
        let outcome = evaluate(vec![
            requirement("REQ-001"),
            requirement("REQ-002"),
            design("DESIGN-001", &["REQ-001", "REQ-002"]),
            task("TASK-001", &["DESIGN-001"]),
            task("TASK-002", &["DESIGN-001"]),
        ]);
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
        assert_eq!(outcome.valid_chains, 1);
    }

    #[test]
    fn design_missing_both_conditions_warns_twice() {
        let outcome = evaluate(vec![design("DESIGN-001", &[])]);
        let chain_warnings: Vec<_> = outcome
            .warnings
            .iter()
            .filter(|i| i.rule == TraceRule::CompleteChain)
            .collect();
        assert_eq!(chain_warnings.len(), 2);
        assert_eq!(outcome.valid_chains, 0);
    }

    #[test]
    fn unresolved_requirement_reference_still_counts_for_chain() {
        // Rule 3's requirement check is prefix-based; the dangling id is
        // already reported by Rule 4.
        let outcome = evaluate(vec![
            design("DESIGN-001", &["REQ-404"]),
            task("TASK-001", &["DESIGN-001"]),
        ]);
        assert_eq!(outcome.valid_chains, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].rule, TraceRule::ReferenceValidity);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn full_chain_with_completed_statuses_is_clean() {
        let outcome = evaluate(vec![
            requirement("REQ-001").with_status("complete"),
            design("DESIGN-001", &["REQ-001"]).with_status("complete"),
            task("TASK-001", &["DESIGN-001"]).with_status("complete"),
        ]);
        assert!(outcome.errors.is_empty());
        assert!(outcome.warnings.is_empty());
        assert!(outcome.info.is_empty());
        assert_eq!(outcome.valid_chains, 1);
    }

    #[test]
    fn status_drift_is_info_only() {
        // A completed task over a still-draft design.
        let outcome = evaluate(vec![
            design("DESIGN-001", &[]).with_status("draft"),
            task("TASK-001", &["DESIGN-001"]).with_status("complete"),
        ]);
        let drift: Vec<_> = outcome
            .info
            .iter()
            .filter(|i| i.rule == TraceRule::StatusConsistency)
            .collect();
        assert_eq!(drift.len(), 1);
        assert_eq!(drift[0].source, "TASK-001");
        assert_eq!(drift[0].target.as_deref(), Some("DESIGN-001"));
        // No error or warning stems from the task/design relationship itself.
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn status_synonyms_accepted_for_drift_check() {
        let outcome = evaluate(vec![
            design("DESIGN-001", &[]).with_status("Implemented"),
            task("TASK-001", &["DESIGN-001"]).with_status("DONE"),
        ]);
        assert!(outcome.info.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let collection = ArtifactCollection::from_records(vec![
            requirement("REQ-001"),
            design("DESIGN-001", &["REQ-001", "REQ-404"]),
            task("TASK-001", &["DESIGN-999"]),
            task("TASK-002", &[]),
        ]);
        let engine = RuleEngine::new();
        let first = engine.evaluate(&collection);
        let second = engine.evaluate(&collection);
        assert_eq!(first.errors, second.errors);
        assert_eq!(first.warnings, second.warnings);
        assert_eq!(first.info, second.info);
        assert_eq!(first.valid_chains, second.valid_chains);
    }
}
