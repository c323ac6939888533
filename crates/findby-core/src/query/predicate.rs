use crate::model::PropertyPath;
use serde::{Deserialize, Serialize};
use std::ops::{BitAnd, BitOr};

///
/// Predicate AST
///
/// Pure representation of compiled query predicates. All property paths and
/// parameter bindings have already been validated by the time a predicate
/// node is constructed; downstream renderers consume this tree immutably.
///

///
/// ParameterBinding
/// Positional binding of a leaf argument to one declared method parameter.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParameterBinding {
    /// Zero-based index into the method's declared parameter list.
    pub index: usize,
    /// Declared parameter name (diagnostics and role registration).
    pub name: String,
}

impl ParameterBinding {
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
        }
    }
}

///
/// ComparisonLeaf
/// Shared shape of single-argument comparison predicates.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ComparisonLeaf {
    pub path: PropertyPath,
    pub binding: ParameterBinding,
    /// Case-insensitive matching (text-typed terminals only).
    pub ignore_case: bool,
}

impl ComparisonLeaf {
    #[must_use]
    pub fn new(path: PropertyPath, binding: ParameterBinding) -> Self {
        Self {
            path,
            binding,
            ignore_case: false,
        }
    }

    #[must_use]
    pub const fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

///
/// Predicate
///
/// Invariant: every leaf's bound-argument count equals its restriction's
/// declared arity; arity is checked at compile time, never at run time.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Predicate {
    Equals(ComparisonLeaf),
    NotEquals(ComparisonLeaf),
    GreaterThan(ComparisonLeaf),
    GreaterThanEquals(ComparisonLeaf),
    LessThan(ComparisonLeaf),
    LessThanEquals(ComparisonLeaf),
    Like(ComparisonLeaf),
    Contains(ComparisonLeaf),
    StartsWith(ComparisonLeaf),
    EndsWith(ComparisonLeaf),
    In(ComparisonLeaf),
    NotIn(ComparisonLeaf),
    Between {
        path: PropertyPath,
        lower: ParameterBinding,
        upper: ParameterBinding,
    },
    IsNull {
        path: PropertyPath,
    },
    IsNotNull {
        path: PropertyPath,
    },
    IsTrue {
        path: PropertyPath,
    },
    IsFalse {
        path: PropertyPath,
    },
    IsEmpty {
        path: PropertyPath,
    },
    IsNotEmpty {
        path: PropertyPath,
    },

    /// Equality against the root entity's identity (optimized downstream).
    IdEquals {
        binding: ParameterBinding,
    },

    /// Equality against the root entity's version (optimistic locking).
    VersionEquals {
        binding: ParameterBinding,
    },

    Not(Box<Self>),
    And(Vec<Self>),
    Or(Vec<Self>),

    /// A predicate whose property lives behind a to-many association and
    /// must be scoped as a sub-query/exists-join rather than a flat join.
    AssociationScoped {
        /// Dotted association prefix up to the to-many hop.
        path: String,
        inner: Box<Self>,
    },
}

impl Predicate {
    #[must_use]
    pub const fn and(preds: Vec<Self>) -> Self {
        Self::And(preds)
    }

    #[must_use]
    pub const fn or(preds: Vec<Self>) -> Self {
        Self::Or(preds)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(pred: Self) -> Self {
        Self::Not(Box::new(pred))
    }

    #[must_use]
    pub fn scoped(path: impl Into<String>, inner: Self) -> Self {
        Self::AssociationScoped {
            path: path.into(),
            inner: Box::new(inner),
        }
    }

    /// Number of method parameters bound by this subtree.
    #[must_use]
    pub fn bound_arguments(&self) -> usize {
        match self {
            Self::Equals(_)
            | Self::NotEquals(_)
            | Self::GreaterThan(_)
            | Self::GreaterThanEquals(_)
            | Self::LessThan(_)
            | Self::LessThanEquals(_)
            | Self::Like(_)
            | Self::Contains(_)
            | Self::StartsWith(_)
            | Self::EndsWith(_)
            | Self::In(_)
            | Self::NotIn(_)
            | Self::IdEquals { .. }
            | Self::VersionEquals { .. } => 1,
            Self::Between { .. } => 2,
            Self::IsNull { .. }
            | Self::IsNotNull { .. }
            | Self::IsTrue { .. }
            | Self::IsFalse { .. }
            | Self::IsEmpty { .. }
            | Self::IsNotEmpty { .. } => 0,
            Self::Not(inner) | Self::AssociationScoped { inner, .. } => inner.bound_arguments(),
            Self::And(children) | Self::Or(children) => {
                children.iter().map(Self::bound_arguments).sum()
            }
        }
    }

    /// Whether any leaf in this subtree binds the version property.
    #[must_use]
    pub fn binds_version(&self) -> bool {
        match self {
            Self::VersionEquals { .. } => true,
            Self::Not(inner) | Self::AssociationScoped { inner, .. } => inner.binds_version(),
            Self::And(children) | Self::Or(children) => {
                children.iter().any(Self::binds_version)
            }
            _ => false,
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        Self::And(vec![self, rhs])
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self::Or(vec![self, rhs])
    }
}

///
/// TESTS
///
