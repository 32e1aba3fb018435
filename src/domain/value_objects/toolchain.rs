//! Toolchain identity and version ordering
//!
//! A `ToolchainId` is the stable, logical reference a settings domain keeps.
//! It is resolved against the current catalog on demand, so a catalog refresh
//! never invalidates a selection.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identifier of an installed runtime (e.g. `ruby-3.2.2`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolchainId(String);

impl ToolchainId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolchainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ToolchainId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ToolchainId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An installed runtime as discovered by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolchainVersion {
    id: ToolchainId,
    display_name: String,
    install_path: PathBuf,
    discovered_at: DateTime<Utc>,
}

impl ToolchainVersion {
    pub fn new(
        id: impl Into<ToolchainId>,
        display_name: impl Into<String>,
        install_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            install_path: install_path.into(),
            discovered_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &ToolchainId {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn install_path(&self) -> &Path {
        &self.install_path
    }

    /// Catalog order: version comparison of the id, then install path.
    pub fn catalog_cmp(&self, other: &Self) -> Ordering {
        compare_versions(self.id.as_str(), other.id.as_str())
            .then_with(|| self.install_path.cmp(&other.install_path))
    }
}

/// Result of looking up a `ToolchainId` in the current catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(ToolchainVersion),
    /// The id is not (or no longer) present in the catalog
    Unresolved(ToolchainId),
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn version(&self) -> Option<&ToolchainVersion> {
        match self {
            Resolution::Resolved(version) => Some(version),
            Resolution::Unresolved(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Digit run without leading zeros, so any length compares numerically
    Number(String),
    Text(String),
}

fn segments(s: &str) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut chars = s.chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut digits = String::new();
            while let Some(&d) = chars.peek() {
                if !d.is_ascii_digit() {
                    break;
                }
                digits.push(d);
                chars.next();
            }
            let trimmed = digits.trim_start_matches('0');
            out.push(Segment::Number(trimmed.to_string()));
        } else if c.is_alphabetic() {
            let mut word = String::new();
            while let Some(&w) = chars.peek() {
                if !w.is_alphabetic() {
                    break;
                }
                word.push(w);
                chars.next();
            }
            out.push(Segment::Text(word));
        } else {
            // separators ('.', '-', '_', ...) only delimit segments
            chars.next();
        }
    }

    out
}

fn cmp_segment(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Number(x), Segment::Number(y)) => x.len().cmp(&y.len()).then_with(|| x.cmp(y)),
        (Segment::Text(x), Segment::Text(y)) => x
            .to_lowercase()
            .cmp(&y.to_lowercase())
            .then_with(|| x.cmp(y)),
        // text < end of string < number, the same ranking the prefix rule uses
        (Segment::Number(_), Segment::Text(_)) => Ordering::Greater,
        (Segment::Text(_), Segment::Number(_)) => Ordering::Less,
    }
}

/// Compare two version strings segment by segment.
///
/// Digit runs compare numerically (`3.10.0 > 3.9.1`), letter runs compare
/// case-insensitively. When one string is a prefix of the other, a trailing
/// textual segment marks a pre-release (`3.3.0-preview1 < 3.3.0`) while a
/// trailing number marks a later release (`3.3 < 3.3.1`).
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = segments(a);
    let right = segments(b);
    let mut li = left.iter();
    let mut ri = right.iter();

    loop {
        match (li.next(), ri.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(Segment::Text(_))) => return Ordering::Greater,
            (None, Some(Segment::Number(_))) => return Ordering::Less,
            (Some(Segment::Text(_)), None) => return Ordering::Less,
            (Some(Segment::Number(_)), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match cmp_segment(x, y) {
                Ordering::Equal => continue,
                other => return other,
            },
        }
    }
}
