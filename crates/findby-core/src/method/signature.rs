use crate::{model::ScalarKind, query::join::JoinKind};
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// DeclaredType
///
/// Declared type of one method parameter, reduced to what argument
/// compatibility checks need. `Unknown` is the escape hatch for types the
/// caller cannot classify; it is always accepted.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum DeclaredType {
    Scalar(ScalarKind),
    Entity(String),
    Iterable(Box<Self>),
    Optional(Box<Self>),
    Unknown,
}

impl DeclaredType {
    /// Strip optionality; compatibility is decided on the inner type.
    #[must_use]
    pub fn unwrapped(&self) -> &Self {
        match self {
            Self::Optional(inner) => inner.unwrapped(),
            _ => self,
        }
    }

    /// Element type when this is an iterable, after stripping optionality.
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self.unwrapped() {
            Self::Iterable(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Entity(name) => write!(f, "{name}"),
            Self::Iterable(inner) => write!(f, "iterable<{inner}>"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

///
/// ParameterModel
/// One declared method parameter: name plus declared type.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ParameterModel {
    pub name: String,
    pub ty: DeclaredType,
}

impl ParameterModel {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: DeclaredType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

///
/// ReturnShape
///
/// Declared return shape of the method, used by the assembler to pick the
/// result element type and to reject incompatible declarations.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ReturnShape {
    Unit,
    Scalar(ScalarKind),
    Entity(String),
    Optional(Box<Self>),
    Many(Box<Self>),
    Unknown,
}

impl ReturnShape {
    /// The innermost element shape (through `Optional`/`Many` wrappers).
    #[must_use]
    pub fn element(&self) -> &Self {
        match self {
            Self::Optional(inner) | Self::Many(inner) => inner.element(),
            _ => self,
        }
    }

    #[must_use]
    pub const fn is_many(&self) -> bool {
        matches!(self, Self::Many(_))
    }
}

impl fmt::Display for ReturnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unit => write!(f, "unit"),
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Entity(name) => write!(f, "{name}"),
            Self::Optional(inner) => write!(f, "optional<{inner}>"),
            Self::Many(inner) => write!(f, "many<{inner}>"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

///
/// JoinDirective
/// Declarative join annotation attached to the method by the caller.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct JoinDirective {
    /// Dotted association path from the root entity.
    pub path: String,
    /// Requested join kind.
    pub kind: JoinKind,
}

///
/// MethodSignature
///
/// The compiler input: the method identifier plus the declared parameter
/// list, return shape, and join annotations. Immutable once constructed.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MethodSignature {
    name: String,
    parameters: Vec<ParameterModel>,
    return_shape: ReturnShape,
    joins: Vec<JoinDirective>,
}

impl MethodSignature {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            return_shape: ReturnShape::Unknown,
            joins: Vec::new(),
        }
    }

    /// Append a declared parameter (declaration order is binding order).
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, ty: DeclaredType) -> Self {
        self.parameters.push(ParameterModel::new(name, ty));
        self
    }

    /// Set the declared return shape.
    #[must_use]
    pub fn returning(mut self, shape: ReturnShape) -> Self {
        self.return_shape = shape;
        self
    }

    /// Attach a declarative join annotation.
    #[must_use]
    pub fn with_join(mut self, path: impl Into<String>, kind: JoinKind) -> Self {
        self.joins.push(JoinDirective {
            path: path.into(),
            kind,
        });
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn parameters(&self) -> &[ParameterModel] {
        &self.parameters
    }

    #[must_use]
    pub const fn return_shape(&self) -> &ReturnShape {
        &self.return_shape
    }

    #[must_use]
    pub fn joins(&self) -> &[JoinDirective] {
        &self.joins
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_unwraps_transitively() {
        let ty = DeclaredType::Optional(Box::new(DeclaredType::Optional(Box::new(
            DeclaredType::Scalar(ScalarKind::Int),
        ))));
        assert_eq!(ty.unwrapped(), &DeclaredType::Scalar(ScalarKind::Int));
    }

    #[test]
    fn iterable_element_seen_through_optional() {
        let ty = DeclaredType::Optional(Box::new(DeclaredType::Iterable(Box::new(
            DeclaredType::Scalar(ScalarKind::Text),
        ))));
        assert_eq!(ty.element(), Some(&DeclaredType::Scalar(ScalarKind::Text)));
        assert_eq!(DeclaredType::Unknown.element(), None);
    }

    #[test]
    fn return_shape_element_is_innermost() {
        let shape = ReturnShape::Many(Box::new(ReturnShape::Optional(Box::new(
            ReturnShape::Entity("Person".to_string()),
        ))));
        assert_eq!(shape.element(), &ReturnShape::Entity("Person".to_string()));
        assert!(shape.is_many());
    }
}
