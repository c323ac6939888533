use crate::model::{
    entity::EntityModel,
    path::{PathHop, PathTerminal, PropertyPath, TerminalRole},
    property::PropertyKind,
};
use std::collections::BTreeMap;

///
/// ModelRegistry
///
/// Explicit compilation context holding every entity model the compiler may
/// reference. Passed into the compile entry point rather than living in
/// ambient static state, so compilation stays referentially transparent and
/// trivially parallelizable.
///

#[derive(Clone, Debug, Default)]
pub struct ModelRegistry {
    entities: BTreeMap<String, EntityModel>,
}

impl ModelRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one entity model, replacing any previous model of that name.
    pub fn register(&mut self, model: EntityModel) {
        self.entities.insert(model.name().to_string(), model);
    }

    /// Entity lookup by stable name.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&EntityModel> {
        self.entities.get(name)
    }

    /// Resolve a dotted path of exact property names against `root`.
    ///
    /// Every non-terminal segment must be an association whose target is
    /// registered. Returns `None` when any segment does not resolve; the
    /// caller owns diagnostics.
    #[must_use]
    pub fn property_path(&self, root: &EntityModel, dotted: &str) -> Option<PropertyPath> {
        let mut entity = root;
        let mut hops = Vec::new();
        let segments: Vec<&str> = dotted.split('.').collect();

        if segments.is_empty() || segments.iter().any(|s| s.is_empty()) {
            return None;
        }

        let (terminal_name, hop_names) = segments.split_last()?;

        for segment in hop_names {
            let property = entity.property(segment)?;
            let PropertyKind::Association { target, kind } = &property.kind else {
                return None;
            };
            let next = self.entity(target)?;
            hops.push(PathHop {
                entity: entity.name().to_string(),
                property: property.name.clone(),
                target: target.clone(),
                kind: *kind,
            });
            entity = next;
        }

        let property = entity.property(terminal_name)?;
        let role = if property.kind.is_association() {
            TerminalRole::ForeignKey
        } else if entity.is_identity(&property.name) {
            TerminalRole::Identity
        } else if entity.is_version(&property.name) {
            TerminalRole::Version
        } else {
            TerminalRole::Plain
        };

        Some(PropertyPath::new(
            hops,
            PathTerminal {
                entity: entity.name().to_string(),
                name: property.name.clone(),
                kind: property.kind.clone(),
                role,
            },
        ))
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::property::{AssociationKind, ScalarKind};

    fn registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(
            EntityModel::new("Author")
                .with_scalar("id", ScalarKind::Uuid)
                .with_scalar("name", ScalarKind::Text)
                .with_identity("id"),
        );
        registry.register(
            EntityModel::new("Book")
                .with_scalar("id", ScalarKind::Uuid)
                .with_scalar("title", ScalarKind::Text)
                .with_association("author", "Author", AssociationKind::ManyToOne)
                .with_identity("id"),
        );
        registry
    }

    #[test]
    fn dotted_resolution_walks_associations() {
        let registry = registry();
        let book = registry.entity("Book").unwrap();

        let path = registry.property_path(book, "author.name").unwrap();
        assert_eq!(path.dotted(), "author.name");
        assert_eq!(path.hops().len(), 1);
        assert_eq!(path.terminal().entity, "Author");
    }

    #[test]
    fn terminal_association_is_foreign_key() {
        let registry = registry();
        let book = registry.entity("Book").unwrap();

        let path = registry.property_path(book, "author").unwrap();
        assert_eq!(path.terminal().role, TerminalRole::ForeignKey);
    }

    #[test]
    fn non_association_hop_fails_closed() {
        let registry = registry();
        let book = registry.entity("Book").unwrap();

        assert!(registry.property_path(book, "title.name").is_none());
        assert!(registry.property_path(book, "missing.name").is_none());
        assert!(registry.property_path(book, "").is_none());
    }
}
