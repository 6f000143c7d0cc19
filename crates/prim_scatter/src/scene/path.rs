//! Scene-graph prim paths.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A validated prim path such as `/World/cube`, or a bare relative name such as `cube`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrimPath(String);

impl PrimPath {
    pub const ROOT: &'static str = "/";

    pub fn try_new(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        validate(&path)?;
        Ok(Self(path))
    }

    /// The absolute root path `/`.
    pub fn root() -> Self {
        Self(Self::ROOT.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_absolute(&self) -> bool {
        self.0.starts_with('/')
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    /// Last path segment; empty for the root.
    pub fn name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Parent path, or `None` for the root and for single-segment relative paths.
    pub fn parent(&self) -> Option<PrimPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(i) => Some(Self(self.0[..i].to_owned())),
            None => None,
        }
    }

    /// Appends one child segment.
    pub fn append_child(&self, name: &str) -> Result<PrimPath> {
        if name.is_empty() || name.contains('/') {
            return Err(Error::InvalidArgument(format!(
                "invalid child name '{name}' for '{self}'"
            )));
        }
        if self.is_root() {
            Ok(Self(format!("/{name}")))
        } else {
            Ok(Self(format!("{}/{name}", self.0)))
        }
    }

    /// Whether `self` equals `ancestor` or lies below it.
    pub fn has_prefix(&self, ancestor: &PrimPath) -> bool {
        if ancestor.is_root() {
            return self.is_absolute();
        }
        self.0 == ancestor.0
            || (self.0.starts_with(&ancestor.0) && self.0[ancestor.0.len()..].starts_with('/'))
    }
}

fn validate(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(Error::InvalidArgument("prim path must not be empty".into()));
    }
    if path == PrimPath::ROOT {
        return Ok(());
    }
    let body = path.strip_prefix('/').unwrap_or(path);
    if body.split('/').any(str::is_empty) {
        return Err(Error::InvalidArgument(format!(
            "prim path '{path}' has an empty segment"
        )));
    }
    Ok(())
}

impl fmt::Display for PrimPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for PrimPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::try_new(s)
    }
}

impl TryFrom<String> for PrimPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::try_new(value)
    }
}

impl From<PrimPath> for String {
    fn from(value: PrimPath) -> Self {
        value.0
    }
}

impl AsRef<str> for PrimPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> PrimPath {
        s.parse().expect("valid path")
    }

    #[test]
    fn name_is_last_segment() {
        assert_eq!(path("/World/Props/cube").name(), "cube");
        assert_eq!(path("cube").name(), "cube");
        assert_eq!(PrimPath::root().name(), "");
    }

    #[test]
    fn append_child_joins_segments() {
        assert_eq!(
            path("/World/Scatter").append_child("cube0").unwrap(),
            path("/World/Scatter/cube0")
        );
        assert_eq!(PrimPath::root().append_child("World").unwrap(), path("/World"));
        assert!(path("/World").append_child("a/b").is_err());
        assert!(path("/World").append_child("").is_err());
    }

    #[test]
    fn parent_walks_up() {
        assert_eq!(path("/World/cube").parent(), Some(path("/World")));
        assert_eq!(path("/World").parent(), Some(PrimPath::root()));
        assert_eq!(PrimPath::root().parent(), None);
        assert_eq!(path("cube").parent(), None);
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["", "/World/", "//World", "/World//cube", "cube/"] {
            assert!(
                matches!(bad.parse::<PrimPath>(), Err(Error::InvalidArgument(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn has_prefix_respects_segment_boundaries() {
        let scatter = path("/World/Scatter");
        assert!(path("/World/Scatter/cube0").has_prefix(&scatter));
        assert!(scatter.has_prefix(&scatter));
        assert!(!path("/World/Scatter2").has_prefix(&scatter));
        assert!(path("/World").has_prefix(&PrimPath::root()));
    }
}
