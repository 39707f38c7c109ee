//! DocTrace Artifact System
//!
//! Typed specification artifacts with restricted metadata header parsing.
//!
//! # Core Concepts
//!
//! - [`HeaderParser`]: extracts the `---`-delimited key/value header block
//!   from the top of an artifact file
//! - [`ArtifactRecord`]: one parsed artifact (kind, id, status, related ids)
//! - [`ArtifactCollection`]: the per-run aggregate of three typed tables
//!   plus a combined lookup
//!
//! # Example
//!
//! ```rust
//! use doctrace_artifact::{ArtifactKind, ArtifactRecord, HeaderParser};
//!
//! let parser = HeaderParser::new();
//! let fields = parser
//!     .parse("---\nid: REQ-001\nstatus: draft\n---\n")
//!     .expect("header present");
//! let record = ArtifactRecord::from_header(
//!     ArtifactKind::Requirement,
//!     fields,
//!     "requirements/REQ-001.md",
//! );
//! assert_eq!(record.id, "REQ-001");
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

// Core modules
pub mod header;
pub mod record;

// Re-exports for convenience
pub use header::{HeaderFields, HeaderParser};
pub use record::{
    is_completed_status, ArtifactCollection, ArtifactKind, ArtifactRecord, COMPLETED_STATUSES,
    DESIGN_PREFIX, REQ_PREFIX,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn header_to_collection_flow() {
        let parser = HeaderParser::new();
        let content = "---\ntype: design\nid: DESIGN-001\nstatus: approved\nrelated:\n  - REQ-001\n---\n\n# Design\n";

        let fields = parser.parse(content).unwrap();
        let record =
            ArtifactRecord::from_header(ArtifactKind::Design, fields, "design/DESIGN-001.md");

        let collection = ArtifactCollection::from_records([record]);
        let loaded = collection.get("DESIGN-001").unwrap();
        assert_eq!(loaded.kind, ArtifactKind::Design);
        assert_eq!(loaded.related, vec!["REQ-001"]);
    }

    #[test]
    fn headerless_files_produce_no_record() {
        let parser = HeaderParser::new();
        assert!(parser.parse("# Just a markdown file\n").is_none());
    }
}
