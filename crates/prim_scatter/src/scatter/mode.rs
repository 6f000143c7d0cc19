//! How duplicates are materialized in the scene.
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Duplication mode chosen in the host UI.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DuplicationMode {
    /// Clone each source subtree.
    #[default]
    Copy,
    /// Reference each source subtree.
    Reference,
    /// Create one point-instancer carrying every transform.
    PointInstancer,
    /// Any other mode name. Items are skipped rather than rejected.
    Unrecognized(UnrecognizedMode),
}

/// A mode name that matched none of the known modes.
///
/// Only built by [`DuplicationMode::from`], so it never holds `Copy`, `Reference` or
/// `PointInstancer` and a round trip through `String` yields the same value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UnrecognizedMode(String);

impl UnrecognizedMode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnrecognizedMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl DuplicationMode {
    pub fn as_str(&self) -> &str {
        match self {
            DuplicationMode::Copy => "Copy",
            DuplicationMode::Reference => "Reference",
            DuplicationMode::PointInstancer => "PointInstancer",
            DuplicationMode::Unrecognized(name) => name.as_str(),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, DuplicationMode::Unrecognized(_))
    }
}

impl FromStr for DuplicationMode {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_owned()))
    }
}

impl From<String> for DuplicationMode {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Copy" => DuplicationMode::Copy,
            "Reference" => DuplicationMode::Reference,
            "PointInstancer" => DuplicationMode::PointInstancer,
            _ => DuplicationMode::Unrecognized(UnrecognizedMode(value)),
        }
    }
}

impl From<DuplicationMode> for String {
    fn from(value: DuplicationMode) -> Self {
        value.as_str().to_owned()
    }
}

impl fmt::Display for DuplicationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
