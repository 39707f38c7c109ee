//! Metadata header parser
//!
//! Extracts the restricted key/value header block from the top of a
//! specification artifact. This is deliberately NOT a YAML parser: it
//! understands single-level scalar keys and one block-form list key,
//! nothing else.

use regex::Regex;

/// Raw fields extracted from an artifact header
///
/// The `doc_type` field is what the header claims; the loader decides the
/// actual kind from the directory the file was found in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderFields {
    /// Declared artifact type (informational only)
    pub doc_type: String,
    /// Artifact identifier, e.g. `REQ-001`
    pub id: String,
    /// Free-text status string
    pub status: String,
    /// Cross-reference tokens from the `related:` list block
    pub related: Vec<String>,
}

/// Parser for the metadata header block
///
/// Holds its compiled list-item pattern; construct once and reuse. There is
/// intentionally no global instance.
///
/// # Header grammar
///
/// - The content must begin, from the first character, with a `---` marker
///   line; otherwise the artifact has no header.
/// - The block ends at the first subsequent line that is `---` after
///   trimming. A missing closing marker yields a default (id-less) record,
///   which callers discard.
/// - Blank lines and `#` comment lines inside the block are skipped. Lines
///   without a `:` separator are ignored rather than rejected.
/// - `related:` is followed by indented `- TOKEN` list items, where TOKEN is
///   `UPPERCASE-ALPHANUMERIC` (e.g. `DESIGN-001`, `DESIGN-ABC`).
#[derive(Debug, Clone)]
pub struct HeaderParser {
    list_item: Regex,
}

/// The header delimiter line
const MARKER: &str = "---";

impl HeaderParser {
    /// Create a parser with its list-item pattern compiled
    #[must_use]
    pub fn new() -> Self {
        // Infallible: the pattern is a literal part of this module.
        let list_item = Regex::new(r"^\s*-\s*([A-Z]+-[A-Z0-9]+)\s*$")
            .unwrap_or_else(|e| panic!("invalid list-item pattern: {e}"));
        Self { list_item }
    }

    /// Parse header fields out of raw artifact content
    ///
    /// Returns `None` when the content does not start with the marker line
    /// (no header present). Returns default fields with an empty id when the
    /// block is never closed.
    #[must_use]
    pub fn parse(&self, content: &str) -> Option<HeaderFields> {
        // CRLF-authored artifacts must parse identically to LF ones.
        let normalized = content.replace("\r\n", "\n");

        if !normalized.starts_with(MARKER) {
            return None;
        }

        let lines: Vec<&str> = normalized.lines().collect();
        if lines.first().map(|l| l.trim()) != Some(MARKER) {
            return None;
        }

        // Collect block lines up to the closing marker.
        let mut block: Vec<&str> = Vec::new();
        let mut closed = false;
        for line in &lines[1..] {
            if line.trim() == MARKER {
                closed = true;
                break;
            }
            block.push(line);
        }
        if !closed {
            // Malformed header: unidentifiable, callers drop the empty id.
            return Some(HeaderFields::default());
        }

        let mut fields = HeaderFields::default();
        let mut i = 0;
        while i < block.len() {
            let trimmed = block[i].trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                i += 1;
                continue;
            }

            // Separator-less lines are skipped, not rejected.
            if let Some((key, value)) = trimmed.split_once(':') {
                let key = key.trim();
                let value = strip_quotes(value.trim());
                match key {
                    "type" => fields.doc_type = value.to_string(),
                    "id" => fields.id = value.to_string(),
                    "status" => fields.status = value.to_string(),
                    "related" if value.is_empty() => {
                        while i + 1 < block.len() {
                            match self.list_item.captures(block[i + 1]) {
                                Some(cap) => {
                                    fields.related.push(cap[1].to_string());
                                    i += 1;
                                }
                                None => break,
                            }
                        }
                    }
                    _ => {}
                }
            }
            i += 1;
        }

        Some(fields)
    }
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip one layer of matching surrounding quotes (single or double)
fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
