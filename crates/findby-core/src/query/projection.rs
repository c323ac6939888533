use crate::model::{PropertyPath, ScalarKind};
use serde::{Deserialize, Serialize};

///
/// Projection
///
/// Result-shaping rule carried on the query model. The `Top`/`First`
/// result-count restriction is lowered onto the model-level `limit` rather
/// than appearing here. At most one aggregate may appear per model; the
/// aggregate changes the method's effective result element type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Projection {
    /// Select a single property instead of the whole entity.
    Property(PropertyPath),

    /// Distinct row de-duplication, optionally over one property.
    Distinct(Option<PropertyPath>),

    /// Row count, optionally over one property.
    Count(Option<PropertyPath>),

    Max(PropertyPath),
    Min(PropertyPath),
    Sum(PropertyPath),
    Avg(PropertyPath),

    /// Verbatim literal selection (no property reference).
    Literal(String),
}

impl Projection {
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Self::Count(_) | Self::Max(_) | Self::Min(_) | Self::Sum(_) | Self::Avg(_)
        )
    }

    /// The result element kind this projection forces, if any.
    ///
    /// `Count` yields an unsigned count, `Avg` a double, `Sum` widens to the
    /// projected property's numeric kind, `Max`/`Min` keep the property kind.
    #[must_use]
    pub fn result_kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Count(_) => Some(ScalarKind::Uint),
            Self::Avg(_) => Some(ScalarKind::Float),
            Self::Max(path) | Self::Min(path) | Self::Sum(path) => {
                path.terminal().kind.scalar()
            }
            Self::Property(_) | Self::Distinct(_) | Self::Literal(_) => None,
        }
    }

    /// The property path referenced by this projection, if any.
    #[must_use]
    pub fn path(&self) -> Option<&PropertyPath> {
        match self {
            Self::Property(path) | Self::Max(path) | Self::Min(path) | Self::Sum(path)
            | Self::Avg(path) => Some(path),
            Self::Distinct(path) | Self::Count(path) => path.as_ref(),
            Self::Literal(_) => None,
        }
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PathTerminal, PropertyKind, TerminalRole};

    fn path(name: &str, kind: ScalarKind) -> PropertyPath {
        PropertyPath::new(
            vec![],
            PathTerminal {
                entity: "Person".to_string(),
                name: name.to_string(),
                kind: PropertyKind::Scalar(kind),
                role: TerminalRole::Plain,
            },
        )
    }

    #[test]
    fn aggregate_result_kinds() {
        assert_eq!(Projection::Count(None).result_kind(), Some(ScalarKind::Uint));
        assert_eq!(
            Projection::Avg(path("age", ScalarKind::Uint)).result_kind(),
            Some(ScalarKind::Float)
        );
        assert_eq!(
            Projection::Sum(path("age", ScalarKind::Uint)).result_kind(),
            Some(ScalarKind::Uint)
        );
        assert_eq!(
            Projection::Property(path("age", ScalarKind::Uint)).result_kind(),
            None
        );
    }

    #[test]
    fn distinct_is_not_an_aggregate() {
        assert!(!Projection::Distinct(None).is_aggregate());
        assert!(Projection::Count(None).is_aggregate());
    }
}
