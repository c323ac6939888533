use crate::model::PropertyPath;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// OrderDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        };
        write!(f, "{label}")
    }
}

///
/// SortKey
/// One validated ordering field with its direction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SortKey {
    pub path: PropertyPath,
    pub direction: OrderDirection,
}

impl SortKey {
    #[must_use]
    pub const fn new(path: PropertyPath, direction: OrderDirection) -> Self {
        Self { path, direction }
    }
}

///
/// OrderSpec
/// Ordered list of sort keys; key order is significant.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct OrderSpec {
    pub keys: Vec<SortKey>,
}

impl OrderSpec {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
