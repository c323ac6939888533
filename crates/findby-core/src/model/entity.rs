use crate::model::property::{AssociationKind, PropertyKind, PropertyModel, ScalarKind};
use serde::{Deserialize, Serialize};

///
/// EntityModel
///
/// Read-only runtime model for one entity: the property graph surface the
/// compiler queries but never builds. Identity and version are pseudo-roles
/// pointing at regular properties; a composite identity disables the
/// identity short-circuit.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct EntityModel {
    /// Stable entity name used in diagnostics and association targets.
    name: String,
    /// Ordered property list (order is not significant for resolution).
    properties: Vec<PropertyModel>,
    /// Name of the identity property, if the entity has one.
    identity: Option<String>,
    /// Name of the optimistic-lock version property, if any.
    version: Option<String>,
    /// Whether the identity spans multiple columns.
    composite_identity: bool,
}

impl EntityModel {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            identity: None,
            version: None,
            composite_identity: false,
        }
    }

    /// Add a scalar property.
    #[must_use]
    pub fn with_scalar(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.properties
            .push(PropertyModel::new(name, PropertyKind::Scalar(kind)));
        self
    }

    /// Add a scalar-collection property.
    #[must_use]
    pub fn with_list(mut self, name: impl Into<String>, kind: ScalarKind) -> Self {
        self.properties
            .push(PropertyModel::new(name, PropertyKind::List(kind)));
        self
    }

    /// Add an association property targeting another registered entity.
    #[must_use]
    pub fn with_association(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        kind: AssociationKind,
    ) -> Self {
        self.properties.push(PropertyModel::new(
            name,
            PropertyKind::Association {
                target: target.into(),
                kind,
            },
        ));
        self
    }

    /// Declare an existing property as the identity.
    #[must_use]
    pub fn with_identity(mut self, name: impl Into<String>) -> Self {
        self.identity = Some(name.into());
        self
    }

    /// Declare an existing property as the optimistic-lock version.
    #[must_use]
    pub fn with_version(mut self, name: impl Into<String>) -> Self {
        self.version = Some(name.into());
        self
    }

    /// Mark the identity as composite (multi-column).
    #[must_use]
    pub const fn with_composite_identity(mut self) -> Self {
        self.composite_identity = true;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Property lookup by exact (camelCase) name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&PropertyModel> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// The identity property, if declared and present.
    #[must_use]
    pub fn identity(&self) -> Option<&PropertyModel> {
        self.identity.as_deref().and_then(|name| self.property(name))
    }

    /// The version property, if declared and present.
    #[must_use]
    pub fn version(&self) -> Option<&PropertyModel> {
        self.version.as_deref().and_then(|name| self.property(name))
    }

    /// Whether the named property plays the identity role.
    #[must_use]
    pub fn is_identity(&self, name: &str) -> bool {
        self.identity.as_deref() == Some(name)
    }

    /// Whether the named property plays the version role.
    #[must_use]
    pub fn is_version(&self, name: &str) -> bool {
        self.version.as_deref() == Some(name)
    }

    #[must_use]
    pub const fn has_composite_identity(&self) -> bool {
        self.composite_identity
    }

    #[must_use]
    pub fn properties(&self) -> &[PropertyModel] {
        &self.properties
    }
}

///
/// TESTS
///
