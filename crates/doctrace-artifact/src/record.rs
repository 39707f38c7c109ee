//! Artifact records and collections
//!
//! Defines the typed record produced for each specification file and the
//! per-run aggregate the rule engine consumes:
//! - [`ArtifactKind`]: requirement / design / task, with directory and
//!   filename conventions
//! - [`ArtifactRecord`]: one parsed artifact
//! - [`ArtifactCollection`]: three typed tables plus a combined lookup

use crate::header::HeaderFields;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Identifier prefix for requirement cross-references
pub const REQ_PREFIX: &str = "REQ-";

/// Identifier prefix for design cross-references
pub const DESIGN_PREFIX: &str = "DESIGN-";

/// Status strings treated as "completed" (compared case-insensitively)
pub const COMPLETED_STATUSES: &[&str] = &["complete", "done", "implemented"];

/// Check whether a status string counts as completed
#[inline]
#[must_use]
pub fn is_completed_status(status: &str) -> bool {
    COMPLETED_STATUSES
        .iter()
        .any(|s| status.eq_ignore_ascii_case(s))
}

/// The three artifact kinds
///
/// A record's kind comes from the directory it was loaded from, never from
/// the header's own `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A requirement document (`requirements/REQ-*.md`)
    Requirement,
    /// A design document (`design/DESIGN-*.md`)
    Design,
    /// A task document (`tasks/TASK-*.md`)
    Task,
}

impl ArtifactKind {
    /// All kinds, in load order
    pub const ALL: [ArtifactKind; 3] = [Self::Requirement, Self::Design, Self::Task];

    /// Conventional subdirectory name for this kind
    #[inline]
    #[must_use]
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Requirement => "requirements",
            Self::Design => "design",
            Self::Task => "tasks",
        }
    }

    /// Filename prefix for artifacts of this kind
    #[inline]
    #[must_use]
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Requirement => REQ_PREFIX,
            Self::Design => DESIGN_PREFIX,
            Self::Task => "TASK-",
        }
    }
}

impl std::fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Requirement => "requirement",
            Self::Design => "design",
            Self::Task => "task",
        };
        write!(f, "{name}")
    }
}

/// One parsed specification artifact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Kind inferred from the source directory
    pub kind: ArtifactKind,
    /// Identifier unique within the combined table
    pub id: String,
    /// Free-text status string
    pub status: String,
    /// Ordered cross-reference tokens from the header
    pub related: Vec<String>,
    /// Originating file path, retained for diagnostics
    pub source_path: PathBuf,
}

impl ArtifactRecord {
    /// Create a minimal record (status and related empty)
    #[inline]
    #[must_use]
    pub fn new(kind: ArtifactKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            status: String::new(),
            related: Vec::new(),
            source_path: PathBuf::new(),
        }
    }

    /// Build a record from parsed header fields
    ///
    /// The header's own `type` field is discarded: the directory decides.
    #[must_use]
    pub fn from_header(kind: ArtifactKind, fields: HeaderFields, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            id: fields.id,
            status: fields.status,
            related: fields.related,
            source_path: path.into(),
        }
    }

    /// With status
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// With related identifiers
    #[inline]
    #[must_use]
    pub fn with_related<I, S>(mut self, related: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.related = related.into_iter().map(Into::into).collect();
        self
    }

    /// Whether this artifact's status is a completed synonym
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        is_completed_status(&self.status)
    }
}

/// The artifact set for one validation run
///
/// Three disjoint typed tables keyed by id plus a combined lookup whose key
/// set is always the union of the typed key sets. Duplicate ids are resolved
/// last-write-wins: the newer record replaces the older one, including across
/// kinds, so an id only ever lives in one typed table.
#[derive(Debug, Clone, Default)]
pub struct ArtifactCollection {
    requirements: IndexMap<String, ArtifactRecord>,
    designs: IndexMap<String, ArtifactRecord>,
    tasks: IndexMap<String, ArtifactRecord>,
    combined: IndexMap<String, ArtifactKind>,
}

impl ArtifactCollection {
    /// Create an empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records, discarding id-less ones
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = ArtifactRecord>) -> Self {
        let mut collection = Self::new();
        for record in records {
            collection.insert(record);
        }
        collection
    }

    /// Insert a record, enforcing the collection invariants
    ///
    /// Records with an empty id are discarded (an unidentifiable artifact is
    /// not traceable). A duplicate id silently replaces the earlier record;
    /// the overwrite is logged but not reported as an issue.
    pub fn insert(&mut self, record: ArtifactRecord) {
        if record.id.is_empty() {
            return;
        }
        let kind = record.kind;
        if let Some(prev_kind) = self.combined.insert(record.id.clone(), kind) {
            tracing::warn!(
                id = %record.id,
                "duplicate artifact id, keeping the later record"
            );
            self.table_mut(prev_kind).shift_remove(&record.id);
        }
        self.table_mut(kind).insert(record.id.clone(), record);
    }

    fn table_mut(&mut self, kind: ArtifactKind) -> &mut IndexMap<String, ArtifactRecord> {
        match kind {
            ArtifactKind::Requirement => &mut self.requirements,
            ArtifactKind::Design => &mut self.designs,
            ArtifactKind::Task => &mut self.tasks,
        }
    }

    /// Typed table for a kind
    #[inline]
    #[must_use]
    pub fn table(&self, kind: ArtifactKind) -> &IndexMap<String, ArtifactRecord> {
        match kind {
            ArtifactKind::Requirement => &self.requirements,
            ArtifactKind::Design => &self.designs,
            ArtifactKind::Task => &self.tasks,
        }
    }

    /// Requirements table
    #[inline]
    #[must_use]
    pub fn requirements(&self) -> &IndexMap<String, ArtifactRecord> {
        &self.requirements
    }

    /// Designs table
    #[inline]
    #[must_use]
    pub fn designs(&self) -> &IndexMap<String, ArtifactRecord> {
        &self.designs
    }

    /// Tasks table
    #[inline]
    #[must_use]
    pub fn tasks(&self) -> &IndexMap<String, ArtifactRecord> {
        &self.tasks
    }

    /// Look up any artifact by id via the combined table
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ArtifactRecord> {
        let kind = *self.combined.get(id)?;
        self.table(kind).get(id)
    }

    /// Total artifact count across all kinds
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.combined.len()
    }

    /// Whether no artifacts are loaded
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }
}
