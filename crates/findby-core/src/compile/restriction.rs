use crate::model::{PropertyKind, ScalarKind};
use std::fmt;

///
/// Restriction vocabulary
///
/// A clause text ends in at most one restriction suffix; no suffix means
/// `Equals`. The table is ordered longest-suffix-first so that the first
/// match is always the longest (`GreaterThanEquals` before `GreaterThan`,
/// `NotInList` before `InList` before `In`).
///

///
/// RestrictionKind
/// Canonical comparison operators; alias suffixes collapse onto these.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RestrictionKind {
    Equals,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    Like,
    Ilike,
    Contains,
    StartsWith,
    EndsWith,
    In,
    Between,
    IsNull,
    IsTrue,
    IsFalse,
    IsEmpty,
}

impl RestrictionKind {
    /// Number of method parameters the restriction consumes.
    #[must_use]
    pub const fn required_arguments(self) -> usize {
        match self {
            Self::IsNull | Self::IsTrue | Self::IsFalse | Self::IsEmpty => 0,
            Self::Between => 2,
            _ => 1,
        }
    }

    /// Whether the restriction is meaningful for a property of `kind`.
    #[must_use]
    pub fn applies_to(self, kind: &PropertyKind) -> bool {
        match self {
            Self::Equals | Self::In => !kind.is_collection(),

            Self::GreaterThan
            | Self::GreaterThanEquals
            | Self::LessThan
            | Self::LessThanEquals
            | Self::Between => kind.scalar().is_some_and(ScalarKind::supports_ordering),

            Self::Like | Self::Ilike | Self::StartsWith | Self::EndsWith => {
                kind.scalar().is_some_and(ScalarKind::is_text)
            }

            Self::Contains => {
                kind.scalar().is_some_and(ScalarKind::is_text)
                    || matches!(kind, PropertyKind::List(_))
            }

            Self::IsTrue | Self::IsFalse => kind.scalar() == Some(ScalarKind::Bool),

            Self::IsEmpty => kind.is_collection(),

            Self::IsNull => !kind.is_collection(),
        }
    }

    /// Restrictions that accept an `IgnoreCase` modifier.
    #[must_use]
    pub const fn supports_ignore_case(self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::Like
                | Self::Ilike
                | Self::Contains
                | Self::StartsWith
                | Self::EndsWith
                | Self::In
        )
    }
}

impl fmt::Display for RestrictionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Equals => "Equals",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanEquals => "GreaterThanEquals",
            Self::LessThan => "LessThan",
            Self::LessThanEquals => "LessThanEquals",
            Self::Like => "Like",
            Self::Ilike => "Ilike",
            Self::Contains => "Contains",
            Self::StartsWith => "StartsWith",
            Self::EndsWith => "EndsWith",
            Self::In => "In",
            Self::Between => "Between",
            Self::IsNull => "IsNull",
            Self::IsTrue => "IsTrue",
            Self::IsFalse => "IsFalse",
            Self::IsEmpty => "IsEmpty",
        };
        write!(f, "{label}")
    }
}

///
/// RestrictionDef
/// One suffix in the vocabulary. `negated` wraps the canonical kind.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RestrictionDef {
    pub suffix: &'static str,
    pub kind: RestrictionKind,
    pub negated: bool,
}

impl RestrictionDef {
    const fn new(suffix: &'static str, kind: RestrictionKind) -> Self {
        Self {
            suffix,
            kind,
            negated: false,
        }
    }

    const fn negating(suffix: &'static str, kind: RestrictionKind) -> Self {
        Self {
            suffix,
            kind,
            negated: true,
        }
    }
}

/// Bare clause with no suffix.
pub const IMPLICIT_EQUALS: RestrictionDef = RestrictionDef::new("", RestrictionKind::Equals);

/// Longest-first suffix table, aliases included.
pub const RESTRICTIONS: &[RestrictionDef] = &[
    RestrictionDef::new("GreaterThanEquals", RestrictionKind::GreaterThanEquals),
    RestrictionDef::new("GreaterThanEqual", RestrictionKind::GreaterThanEquals),
    RestrictionDef::new("LessThanEquals", RestrictionKind::LessThanEquals),
    RestrictionDef::negating("NotContaining", RestrictionKind::Contains),
    RestrictionDef::new("LessThanEqual", RestrictionKind::LessThanEquals),
    RestrictionDef::new("StartingWith", RestrictionKind::StartsWith),
    RestrictionDef::new("GreaterThan", RestrictionKind::GreaterThan),
    RestrictionDef::negating("NotContains", RestrictionKind::Contains),
    RestrictionDef::new("StartsWith", RestrictionKind::StartsWith),
    RestrictionDef::new("EndingWith", RestrictionKind::EndsWith),
    RestrictionDef::new("Containing", RestrictionKind::Contains),
    RestrictionDef::negating("IsNotEmpty", RestrictionKind::IsEmpty),
    RestrictionDef::negating("NotEquals", RestrictionKind::Equals),
    RestrictionDef::negating("IsNotNull", RestrictionKind::IsNull),
    RestrictionDef::negating("NotInList", RestrictionKind::In),
    RestrictionDef::new("LessThan", RestrictionKind::LessThan),
    RestrictionDef::new("EndsWith", RestrictionKind::EndsWith),
    RestrictionDef::new("Contains", RestrictionKind::Contains),
    RestrictionDef::negating("NotEqual", RestrictionKind::Equals),
    RestrictionDef::new("Between", RestrictionKind::Between),
    RestrictionDef::new("InRange", RestrictionKind::Between),
    RestrictionDef::new("IsEmpty", RestrictionKind::IsEmpty),
    RestrictionDef::new("IsFalse", RestrictionKind::IsFalse),
    RestrictionDef::negating("NotNull", RestrictionKind::IsNull),
    RestrictionDef::negating("NotLike", RestrictionKind::Like),
    RestrictionDef::new("Equals", RestrictionKind::Equals),
    RestrictionDef::new("IsNull", RestrictionKind::IsNull),
    RestrictionDef::new("IsTrue", RestrictionKind::IsTrue),
    RestrictionDef::new("InList", RestrictionKind::In),
    RestrictionDef::new("Before", RestrictionKind::LessThan),
    RestrictionDef::new("Equal", RestrictionKind::Equals),
    RestrictionDef::new("Empty", RestrictionKind::IsEmpty),
    RestrictionDef::new("False", RestrictionKind::IsFalse),
    RestrictionDef::new("After", RestrictionKind::GreaterThan),
    RestrictionDef::new("Ilike", RestrictionKind::Ilike),
    RestrictionDef::negating("NotIn", RestrictionKind::In),
    RestrictionDef::new("True", RestrictionKind::IsTrue),
    RestrictionDef::new("Like", RestrictionKind::Like),
    RestrictionDef::new("Null", RestrictionKind::IsNull),
    RestrictionDef::negating("Not", RestrictionKind::Equals),
    RestrictionDef::new("In", RestrictionKind::In),
];

/// `IgnoreCase` modifier spellings, stripped before suffix matching.
pub const IGNORE_CASE: &[&str] = &["IgnoringCase", "IgnoreCase"];

/// Strip one `IgnoreCase` spelling from the end of a clause.
#[must_use]
pub fn strip_ignore_case(clause: &str) -> (&str, bool) {
    for marker in IGNORE_CASE {
        if let Some(rest) = clause.strip_suffix(marker)
            && !rest.is_empty()
        {
            return (rest, true);
        }
    }

    (clause, false)
}

/// Match the restriction suffix of a clause.
///
/// Returns the property text and the matched definition; a clause with no
/// recognized suffix (or whose suffix would leave no property text) is an
/// implicit `Equals` on the whole clause. Callers must still fall back to
/// the whole clause when the stripped property text does not resolve, so
/// properties like `loggedIn` keep working.
#[must_use]
pub fn match_restriction(clause: &str) -> (&str, RestrictionDef) {
    for def in RESTRICTIONS {
        if let Some(rest) = clause.strip_suffix(def.suffix)
            && !rest.is_empty()
        {
            return (rest, *def);
        }
    }

    (clause, IMPLICIT_EQUALS)
}

///
/// TESTS
///
