//! Output file name rules
//!
//! An output name names a file inside the (implicit) output directory. It is
//! never a path, and it must not collide with names the host refuses to create.

use std::fmt;

/// Names that cannot be used as an output file name (case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedNames {
    names: Vec<String>,
}

impl ReservedNames {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(|n| n.into().trim().to_uppercase())
            .filter(|n| !n.is_empty())
            .collect();
        names.sort();
        names.dedup();
        Self { names }
    }

    /// Add extra names on top of the current set.
    pub fn extended<I, S>(self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            self.names
                .into_iter()
                .chain(extra.into_iter().map(Into::into)),
        )
    }

    /// Whether `name` (or its stem before the first `.`) is reserved.
    pub fn contains(&self, name: &str) -> bool {
        let upper = name.trim().to_uppercase();
        let stem = match upper.split_once('.') {
            Some((stem, _)) if !stem.is_empty() => Some(stem),
            _ => None,
        };
        self.is_listed(&upper) || stem.is_some_and(|stem| self.is_listed(stem))
    }

    fn is_listed(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|listed| listed.as_str().cmp(name))
            .is_ok()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl Default for ReservedNames {
    fn default() -> Self {
        let mut names: Vec<String> = [".", "..", "CON", "PRN", "AUX", "NUL"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        for n in 1..=9 {
            names.push(format!("COM{}", n));
            names.push(format!("LPT{}", n));
        }
        Self::new(names)
    }
}

/// Why an output file name was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputNameViolation {
    Blank,
    ContainsSeparator(char),
    Reserved(String),
}

impl fmt::Display for OutputNameViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputNameViolation::Blank => write!(f, "output file name is blank"),
            OutputNameViolation::ContainsSeparator(c) => write!(
                f,
                "output file name must not contain '{}'; it names a file inside the output directory",
                c
            ),
            OutputNameViolation::Reserved(name) => {
                write!(f, "'{}' is a reserved file name", name)
            }
        }
    }
}

/// Check a non-empty output name. An empty name means "use the default" and
/// is always accepted.
pub fn check_output_name(name: &str, reserved: &ReservedNames) -> Result<(), OutputNameViolation> {
    if name.is_empty() {
        return Ok(());
    }
    if name.trim().is_empty() {
        return Err(OutputNameViolation::Blank);
    }
    if let Some(sep) = name.chars().find(|c| *c == '/' || *c == '\\') {
        return Err(OutputNameViolation::ContainsSeparator(sep));
    }
    if reserved.contains(name) {
        return Err(OutputNameViolation::Reserved(name.to_string()));
    }
    Ok(())
}
