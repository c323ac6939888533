use crate::{
    error::ReferenceError,
    model::{EntityModel, ModelRegistry, PropertyKind, PropertyPath},
};
use convert_case::{Case, Casing};

///
/// Property-text resolution
///
/// Turns the camelCase property text of one clause into a resolved path.
/// Flat names always win: `AddressCity` is the property `addressCity` when
/// one exists, and only otherwise the association walk `address` then
/// `City`. Greedy walking tries the longest association prefix first and
/// backtracks through shorter prefixes on failure.
///
/// `Id` and `Version` are pseudo-names for the entity's declared identity
/// and version properties when no property carries the literal name.
///

/// Decapitalize one identifier segment to its camelCase property form.
#[must_use]
pub fn decapitalize(segment: &str) -> String {
    segment.to_case(Case::Camel)
}

/// Resolve clause property text against `root`, with diagnostics.
pub fn resolve_property(
    registry: &ModelRegistry,
    root: &EntityModel,
    text: &str,
) -> Result<PropertyPath, ReferenceError> {
    if let Some(path) = resolve(registry, root, text) {
        return Ok(path);
    }

    let candidate = decapitalize(text);
    Err(match candidate.as_str() {
        "id" if root.has_composite_identity() => ReferenceError::NoCompositeIdentityShorthand {
            entity: root.name().to_string(),
        },
        "id" => ReferenceError::NoIdentity {
            entity: root.name().to_string(),
        },
        "version" => ReferenceError::NoVersion {
            entity: root.name().to_string(),
        },
        _ => ReferenceError::NonExistentProperty {
            entity: root.name().to_string(),
            candidate,
        },
    })
}

fn resolve(
    registry: &ModelRegistry,
    entity: &EntityModel,
    text: &str,
) -> Option<PropertyPath> {
    if text.is_empty() {
        return None;
    }

    let name = decapitalize(text);

    // Flat name first.
    if entity.property(&name).is_some() {
        return registry.property_path(entity, &name);
    }

    // Identity/version pseudo-names.
    if name == "id"
        && !entity.has_composite_identity()
        && let Some(identity) = entity.identity()
    {
        return registry.property_path(entity, &identity.name);
    }
    if name == "version"
        && let Some(version) = entity.version()
    {
        return registry.property_path(entity, &version.name);
    }

    // Greedy association walk, longest head first.
    for at in boundaries(text).into_iter().rev() {
        let (head, tail) = text.split_at(at);
        let head_name = decapitalize(head);

        let Some(property) = entity.property(&head_name) else {
            continue;
        };
        let PropertyKind::Association { target, .. } = &property.kind else {
            continue;
        };
        let Some(next) = registry.entity(target) else {
            continue;
        };

        if let Some(rest) = resolve(registry, next, tail) {
            let dotted = format!("{head_name}.{}", rest.dotted());
            return registry.property_path(entity, &dotted);
        }
    }

    None
}

/// Interior camelCase split points: byte offsets of uppercase letters
/// past the first character.
fn boundaries(text: &str) -> Vec<usize> {
    text.char_indices()
        .skip(1)
        .filter(|(_, c)| c.is_ascii_uppercase())
        .map(|(at, _)| at)
        .collect()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssociationKind, ScalarKind, TerminalRole};

    fn registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(
            EntityModel::new("Country")
                .with_scalar("isoCode", ScalarKind::Text)
                .with_scalar("name", ScalarKind::Text)
                .with_identity("isoCode"),
        );
        registry.register(
            EntityModel::new("Address")
                .with_scalar("city", ScalarKind::Text)
                .with_association("country", "Country", AssociationKind::ManyToOne),
        );
        registry.register(
            EntityModel::new("Person")
                .with_scalar("ssn", ScalarKind::Text)
                .with_scalar("firstName", ScalarKind::Text)
                .with_scalar("addressCity", ScalarKind::Text)
                .with_scalar("revision", ScalarKind::Uint)
                .with_association("address", "Address", AssociationKind::Embedded)
                .with_identity("ssn")
                .with_version("revision"),
        );
        registry
    }

    #[test]
    fn flat_name_beats_the_association_walk() {
        let registry = registry();
        let person = registry.entity("Person").unwrap();

        let path = resolve_property(&registry, person, "AddressCity").unwrap();
        assert_eq!(path.dotted(), "addressCity");
        assert!(path.hops().is_empty());
    }

    #[test]
    fn association_walk_spans_multiple_hops() {
        let registry = registry();
        let person = registry.entity("Person").unwrap();

        let path = resolve_property(&registry, person, "AddressCountryName").unwrap();
        assert_eq!(path.dotted(), "address.country.name");
        assert_eq!(path.hops().len(), 2);
        assert_eq!(path.terminal().entity, "Country");
    }

    #[test]
    fn identity_pseudo_name_resolves_the_declared_identity() {
        let registry = registry();
        let person = registry.entity("Person").unwrap();

        let path = resolve_property(&registry, person, "Id").unwrap();
        assert_eq!(path.dotted(), "ssn");
        assert_eq!(path.terminal().role, TerminalRole::Identity);

        let path = resolve_property(&registry, person, "Version").unwrap();
        assert_eq!(path.dotted(), "revision");
        assert_eq!(path.terminal().role, TerminalRole::Version);
    }

    #[test]
    fn identity_shorthand_follows_associations() {
        let registry = registry();
        let person = registry.entity("Person").unwrap();

        // Country's identity is isoCode; `AddressCountryId` reaches it.
        let path = resolve_property(&registry, person, "AddressCountryId").unwrap();
        assert_eq!(path.dotted(), "address.country.isoCode");
    }

    #[test]
    fn composite_identity_blocks_the_shorthand() {
        let mut registry = ModelRegistry::new();
        registry.register(
            EntityModel::new("Enrollment")
                .with_scalar("studentId", ScalarKind::Uuid)
                .with_scalar("courseId", ScalarKind::Uuid)
                .with_composite_identity(),
        );
        let enrollment = registry.entity("Enrollment").unwrap();

        assert!(matches!(
            resolve_property(&registry, enrollment, "Id"),
            Err(ReferenceError::NoCompositeIdentityShorthand { .. })
        ));
    }

    #[test]
    fn unresolvable_text_names_the_candidate() {
        let registry = registry();
        let person = registry.entity("Person").unwrap();

        assert!(matches!(
            resolve_property(&registry, person, "MiddleName"),
            Err(ReferenceError::NonExistentProperty { candidate, .. })
                if candidate == "middleName"
        ));
    }
}
