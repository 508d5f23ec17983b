//! Caller-supplied acceptance rules for dropped or picked files.
//!
//! A policy is a list of MIME patterns plus an item cap. Patterns follow the
//! same conventions as the `accept` attribute of a file input:
//! - `*` (or `*/*`) accepts everything,
//! - `type/*` matches any subtype of `type`,
//! - anything else must match the full MIME type.
//!
//! Matching ignores ASCII case and MIME parameters (`; charset=...`).

use serde::{Deserialize, Serialize};

/// Something that carries a file name and a MIME type.
///
/// Implemented by the browser file handles in the front-end and by plain
/// structs in tests, so partitioning never needs a DOM.
pub trait FileHandle {
    fn name(&self) -> String;

    /// Declared MIME type. Empty when the platform could not determine it.
    fn mime_type(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptancePolicy {
    /// Accepted MIME patterns. Empty accepts everything.
    pub accepted: Vec<String>,
    /// Maximum number of accepted items handed to the caller. `0` means no cap.
    pub max_items: usize,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self::images(1)
    }
}

impl AcceptancePolicy {
    pub fn new<I, S>(accepted: I, max_items: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            accepted: accepted.into_iter().map(Into::into).collect(),
            max_items,
        }
    }

    /// Policy accepting any image type.
    pub fn images(max_items: usize) -> Self {
        Self::new(["image/*"], max_items)
    }

    /// Whether a single MIME type satisfies any accepted pattern.
    pub fn accepts(&self, mime: &str) -> bool {
        if self.accepted.is_empty() {
            return true;
        }
        let mime = essence(mime);
        self.accepted.iter().any(|pattern| pattern_matches(pattern, &mime))
    }

    pub fn accepts_file<F: FileHandle>(&self, file: &F) -> bool {
        self.accepts(&file.mime_type())
    }

    /// Cap applied to the accepted list, `None` when unbounded.
    pub fn limit(&self) -> Option<usize> {
        match self.max_items {
            0 => None,
            n => Some(n),
        }
    }

    /// Whether the picker should allow several files at once.
    pub fn allows_multiple(&self) -> bool {
        self.max_items != 1
    }

    /// Value for the `accept` attribute of a native file input.
    pub fn accept_attribute(&self) -> String {
        self.accepted.join(",")
    }

    /// Splits `files` into accepted and rejected lists, keeping the original
    /// order in both. The accepted list is truncated to [`Self::limit`].
    pub fn partition<F: FileHandle + Clone>(&self, files: &[F]) -> (Vec<F>, Vec<F>) {
        let (mut accepted, rejected): (Vec<F>, Vec<F>) =
            files.iter().cloned().partition(|f| self.accepts_file(f));
        if let Some(limit) = self.limit() {
            accepted.truncate(limit);
        }
        (accepted, rejected)
    }
}

/// Lowercased MIME type without parameters.
fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase()
}

fn pattern_matches(pattern: &str, mime: &str) -> bool {
    let pattern = essence(pattern);
    match pattern.as_str() {
        "*" | "*/*" => true,
        "" => false,
        p => match p.strip_suffix("/*") {
            Some(kind) => mime
                .split_once('/')
                .is_some_and(|(mime_kind, _)| mime_kind == kind),
            None => p == mime,
        },
    }
}
