use serde::{Deserialize, Serialize};
use std::fmt;

///
/// ScalarKind
///
/// Reduced scalar classification used by argument-compatibility checks.
/// This is deliberately smaller than a full type system and exists only to
/// support assignability and numeric-family widening during compilation.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ScalarKind {
    Blob,
    Bool,
    Date,
    Decimal,
    Enum,
    Float,
    Int,
    Text,
    Timestamp,
    Uint,
    Uuid,
}

impl ScalarKind {
    /// Whether two scalar kinds belong to the same numeric widening family.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Decimal | Self::Float | Self::Int | Self::Uint)
    }

    #[must_use]
    pub const fn is_text(self) -> bool {
        matches!(self, Self::Text)
    }

    /// Whether a comparison restriction (`GreaterThan`, `Between`, ...) is
    /// meaningful for values of this kind.
    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        !matches!(self, Self::Blob | Self::Bool)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Blob => "blob",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::Decimal => "decimal",
            Self::Enum => "enum",
            Self::Float => "float",
            Self::Int => "int",
            Self::Text => "text",
            Self::Timestamp => "timestamp",
            Self::Uint => "uint",
            Self::Uuid => "uuid",
        };
        write!(f, "{label}")
    }
}

///
/// AssociationKind
///
/// Relationship shape of an association property. Embedded associations are
/// transparent for join purposes; to-many associations force sub-query
/// scoping of any predicate that crosses them.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum AssociationKind {
    Embedded,
    ManyToMany,
    ManyToOne,
    OneToMany,
    OneToOne,
}

impl AssociationKind {
    #[must_use]
    pub const fn is_to_many(self) -> bool {
        matches!(self, Self::ManyToMany | Self::OneToMany)
    }

    #[must_use]
    pub const fn is_embedded(self) -> bool {
        matches!(self, Self::Embedded)
    }
}

impl fmt::Display for AssociationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Embedded => "embedded",
            Self::ManyToMany => "many_to_many",
            Self::ManyToOne => "many_to_one",
            Self::OneToMany => "one_to_many",
            Self::OneToOne => "one_to_one",
        };
        write!(f, "{label}")
    }
}

///
/// PropertyKind
///
/// Runtime type shape of one entity property. Associations reference their
/// target entity by name; resolution happens through the model registry.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum PropertyKind {
    Scalar(ScalarKind),

    /// Homogeneous scalar collection (queryable via emptiness/containment).
    List(ScalarKind),

    /// Relationship to another registered entity.
    Association {
        target: String,
        kind: AssociationKind,
    },
}

impl PropertyKind {
    #[must_use]
    pub const fn is_association(&self) -> bool {
        matches!(self, Self::Association { .. })
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        match self {
            Self::List(_) => true,
            Self::Association { kind, .. } => kind.is_to_many(),
            Self::Scalar(_) => false,
        }
    }

    #[must_use]
    pub const fn scalar(&self) -> Option<ScalarKind> {
        match self {
            Self::Scalar(kind) => Some(*kind),
            Self::List(_) | Self::Association { .. } => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::List(kind) => write!(f, "list<{kind}>"),
            Self::Association { target, kind } => write!(f, "{kind}<{target}>"),
        }
    }
}

///
/// PropertyModel
/// One named property of an entity, as seen by the compiler.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PropertyModel {
    /// Property name as used in method identifiers (camelCase).
    pub name: String,
    /// Runtime type shape.
    pub kind: PropertyKind,
}

impl PropertyModel {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

///
/// TESTS
///
