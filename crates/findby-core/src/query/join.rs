use serde::{Deserialize, Serialize};
use std::fmt;

///
/// JoinKind
/// Requested join strategy for one association.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum JoinKind {
    #[default]
    Inner,
    Left,
    /// Eager-fetch join (result materialization hint, still an inner join).
    Fetch,
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Inner => "inner",
            Self::Left => "left",
            Self::Fetch => "fetch",
        };
        write!(f, "{label}")
    }
}

///
/// JoinSpec
///
/// One registered association join. Joins are keyed by their dotted path;
/// a path requested twice reuses the first registration.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinSpec {
    /// Dotted association path from the root entity (terminal is the
    /// association itself, e.g. `author` or `address.country`).
    pub path: String,
    /// Target entity of the joined association.
    pub target: String,
    pub kind: JoinKind,
}

impl JoinSpec {
    #[must_use]
    pub fn new(path: impl Into<String>, target: impl Into<String>, kind: JoinKind) -> Self {
        Self {
            path: path.into(),
            target: target.into(),
            kind,
        }
    }
}
