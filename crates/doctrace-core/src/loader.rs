//! Artifact loader
//!
//! The single filesystem boundary of the pipeline: scans the three
//! conventional subdirectories under a root, parses each matching file's
//! metadata header, and assembles an [`ArtifactCollection`].
//!
//! A missing subdirectory is a valid empty state. Header-less and id-less
//! files are skipped silently; only an unusable root or a failed read is an
//! error.

use crate::error::TraceError;
use doctrace_artifact::{ArtifactCollection, ArtifactKind, ArtifactRecord, HeaderParser};
use std::fs;
use std::path::{Path, PathBuf};

/// Loads specification artifacts from a directory tree
#[derive(Debug, Clone, Default)]
pub struct ArtifactLoader {
    parser: HeaderParser,
}

impl ArtifactLoader {
    /// Create a loader with a fresh header parser
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: HeaderParser::new(),
        }
    }

    /// Load all artifacts under `root`
    ///
    /// # Errors
    /// - `TraceError::SpecsPathNotFound` if `root` is not a directory
    /// - `TraceError::Io` if a directory scan or file read fails
    pub fn load(&self, root: &Path) -> Result<ArtifactCollection, TraceError> {
        if !root.is_dir() {
            return Err(TraceError::SpecsPathNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut collection = ArtifactCollection::new();
        for kind in ArtifactKind::ALL {
            let dir = root.join(kind.dir_name());
            if !dir.is_dir() {
                tracing::debug!(dir = %dir.display(), "subdirectory absent, zero {kind}s");
                continue;
            }
            for path in Self::matching_files(&dir, kind)? {
                self.load_file(&path, kind, &mut collection)?;
            }
        }

        tracing::info!(
            requirements = collection.requirements().len(),
            designs = collection.designs().len(),
            tasks = collection.tasks().len(),
            "artifacts loaded from {}",
            root.display()
        );
        Ok(collection)
    }

    /// Files in `dir` matching the kind's naming convention, sorted by name
    ///
    /// Sorting keeps the load order, and therefore the issue output,
    /// independent of directory iteration order.
    fn matching_files(dir: &Path, kind: ArtifactKind) -> Result<Vec<PathBuf>, TraceError> {
        let entries = fs::read_dir(dir).map_err(|e| TraceError::io(dir, e))?;
        let mut paths: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TraceError::io(dir, e))?;
            let path = entry.path();
            if path.is_file() && Self::matches_pattern(&path, kind) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Per-kind filename pattern: `<PREFIX>*.md`
    fn matches_pattern(path: &Path, kind: ArtifactKind) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        name.starts_with(kind.file_prefix()) && name.ends_with(".md")
    }

    fn load_file(
        &self,
        path: &Path,
        kind: ArtifactKind,
        collection: &mut ArtifactCollection,
    ) -> Result<(), TraceError> {
        let content = fs::read_to_string(path).map_err(|e| TraceError::io(path, e))?;
        match self.parser.parse(&content) {
            Some(fields) if !fields.id.is_empty() => {
                collection.insert(ArtifactRecord::from_header(kind, fields, path));
            }
            Some(_) => {
                tracing::debug!(path = %path.display(), "skipping artifact without id");
            }
            None => {
                tracing::debug!(path = %path.display(), "skipping artifact without header");
            }
        }
        Ok(())
    }
}
