use crate::{
    compile::{
        boolean::{split_disjunction, split_keyword},
        path::resolve_property,
        projection::parse_projection,
        restriction::{
            IMPLICIT_EQUALS, RestrictionDef, RestrictionKind, match_restriction,
            strip_ignore_case,
        },
        token::{TokenKind, TokenList},
    },
    error::{ArityError, CompileErrorKind, ReferenceError, TypeError},
    method::{DeclaredType, MethodSignature, ParameterModel},
    model::{
        EntityModel, ModelRegistry, PropertyKind, PropertyPath, ScalarKind, TerminalRole,
    },
    query::{
        ComparisonLeaf, JoinKind, JoinSpec, OrderDirection, OrderSpec, ParameterBinding,
        Predicate, QueryModel, SortKey,
    },
};

///
/// QueryBuilder
///
/// Lowers one token list into a finished `QueryModel`. Declarative join
/// directives are applied before any clause so that a directive-requested
/// kind (left, fetch) wins over the inner join a predicate path would
/// otherwise register. Parameters bind positionally: each clause consumes
/// its restriction's arity from the front of the remaining parameter list.
///

pub struct BuiltQuery {
    pub model: QueryModel,
    /// Number of leading parameters bound by predicate clauses.
    pub bound: usize,
    /// Identity-equality lookup (optionally with a version match).
    pub by_identity: bool,
    /// Predicate binds the version property.
    pub optimistic_lock: bool,
}

pub struct QueryBuilder<'a> {
    registry: &'a ModelRegistry,
    root: &'a EntityModel,
    signature: &'a MethodSignature,
    model: QueryModel,
    /// Index of the next unbound method parameter.
    cursor: usize,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(
        registry: &'a ModelRegistry,
        root: &'a EntityModel,
        signature: &'a MethodSignature,
    ) -> Self {
        Self {
            registry,
            root,
            signature,
            model: QueryModel::new(root.name()),
            cursor: 0,
        }
    }

    pub fn build(mut self, tokens: &TokenList) -> Result<BuiltQuery, CompileErrorKind> {
        self.apply_join_directives()?;
        self.apply_projection(tokens)?;
        self.apply_predicate(tokens)?;
        self.apply_order(tokens)?;

        if let Some(text) = tokens.text(TokenKind::Limit) {
            // Digit run already validated by the tokenizer.
            self.model.limit = text.parse().ok();
        }
        self.model.for_update = tokens.has(TokenKind::ForUpdate);

        let by_identity = self
            .model
            .predicate
            .as_ref()
            .is_some_and(is_identity_lookup);
        let optimistic_lock = self
            .model
            .predicate
            .as_ref()
            .is_some_and(Predicate::binds_version);

        Ok(BuiltQuery {
            model: self.model,
            bound: self.cursor,
            by_identity,
            optimistic_lock,
        })
    }

    fn apply_join_directives(&mut self) -> Result<(), CompileErrorKind> {
        for directive in self.signature.joins() {
            let Some(path) = self.registry.property_path(self.root, &directive.path) else {
                return Err(ReferenceError::JoinPathUnresolved {
                    entity: self.root.name().to_string(),
                    path: directive.path.clone(),
                }
                .into());
            };

            let PropertyKind::Association { target, .. } = &path.terminal().kind else {
                return Err(ReferenceError::JoinPathNotAssociation {
                    entity: self.root.name().to_string(),
                    path: directive.path.clone(),
                }
                .into());
            };

            // Intermediate hops first, then the directive's own association.
            let target = target.clone();
            self.register_path_joins(&path);
            self.register_join(&directive.path, &target, directive.kind);
        }

        Ok(())
    }

    fn apply_projection(&mut self, tokens: &TokenList) -> Result<(), CompileErrorKind> {
        let projections = parse_projection(
            self.registry,
            self.root,
            tokens.text(TokenKind::Projection),
            tokens.has(TokenKind::Distinct),
        )?;

        for projection in &projections {
            if let Some(path) = projection.path() {
                self.register_path_joins(path);
            }
        }
        self.model.projections = projections;

        Ok(())
    }

    fn apply_predicate(&mut self, tokens: &TokenList) -> Result<(), CompileErrorKind> {
        let Some(text) = tokens.text(TokenKind::Predicate) else {
            return Ok(());
        };

        let disjunction = split_disjunction(text)?;
        let mut branches = Vec::new();

        for clauses in disjunction.branches() {
            let mut terms = Vec::new();
            for clause in clauses {
                terms.push(self.build_clause(clause)?);
            }
            branches.push(match terms.len() {
                1 => terms.remove(0),
                _ => Predicate::and(terms),
            });
        }

        self.model.predicate = Some(match branches.len() {
            1 => branches.remove(0),
            _ => Predicate::or(branches),
        });

        Ok(())
    }

    /// One clause: optional `IgnoreCase`, optional restriction suffix,
    /// property text. The whole clause is tried as a property first, so a
    /// property that happens to end in a keyword (`loggedIn`, `deletedNot`)
    /// wins over the restriction reading.
    fn build_clause(&mut self, clause: &str) -> Result<Predicate, CompileErrorKind> {
        let (stripped, ignore_case) = strip_ignore_case(clause);

        let (path, def) = match resolve_property(self.registry, self.root, stripped) {
            Ok(path) => (path, IMPLICIT_EQUALS),
            Err(_) => {
                let (property_text, def) = match_restriction(stripped);
                (resolve_property(self.registry, self.root, property_text)?, def)
            }
        };

        let terminal = path.terminal();

        if !def.kind.applies_to(&terminal.kind) {
            return Err(TypeError::InapplicableRestriction {
                entity: terminal.entity.clone(),
                property: terminal.name.clone(),
                property_type: terminal.kind.to_string(),
                restriction: def.kind.to_string(),
            }
            .into());
        }

        if ignore_case {
            if !terminal.kind.scalar().is_some_and(ScalarKind::is_text) {
                return Err(TypeError::IgnoreCaseOnNonText {
                    entity: terminal.entity.clone(),
                    property: terminal.name.clone(),
                    property_type: terminal.kind.to_string(),
                }
                .into());
            }
            if !def.kind.supports_ignore_case() {
                return Err(TypeError::InapplicableRestriction {
                    entity: terminal.entity.clone(),
                    property: terminal.name.clone(),
                    property_type: terminal.kind.to_string(),
                    restriction: format!("{}IgnoreCase", def.kind),
                }
                .into());
            }
        }

        let bindings = self.take_parameters(&path, def.kind)?;

        // Root-level identity/version equality short-circuits.
        if path.hops().is_empty()
            && def.kind == RestrictionKind::Equals
            && !def.negated
            && !ignore_case
            && let [binding] = bindings.as_slice()
        {
            match terminal.role {
                TerminalRole::Identity => {
                    return Ok(Predicate::IdEquals {
                        binding: binding.clone(),
                    });
                }
                TerminalRole::Version => {
                    return Ok(Predicate::VersionEquals {
                        binding: binding.clone(),
                    });
                }
                _ => {}
            }
        }

        self.register_path_joins(&path);
        let scope = path.to_many_prefix();
        let predicate = make_predicate(def, path, bindings, ignore_case);

        Ok(match scope {
            Some(prefix) => Predicate::scoped(prefix, predicate),
            None => predicate,
        })
    }

    /// Consume and type-check the clause's parameters, front to back.
    fn take_parameters(
        &mut self,
        path: &PropertyPath,
        kind: RestrictionKind,
    ) -> Result<Vec<ParameterBinding>, CompileErrorKind> {
        let required = kind.required_arguments();
        let parameters = self.signature.parameters();
        let available = parameters.len().saturating_sub(self.cursor);

        if available < required {
            return Err(ArityError::InsufficientArguments {
                restriction: kind.to_string(),
                required,
                available,
            }
            .into());
        }

        let mut bindings = Vec::with_capacity(required);
        for _ in 0..required {
            let parameter = &parameters[self.cursor];
            check_assignable(parameter, path, kind)?;
            bindings.push(ParameterBinding::new(self.cursor, &parameter.name));
            self.cursor += 1;
        }

        Ok(bindings)
    }

    fn apply_order(&mut self, tokens: &TokenList) -> Result<(), CompileErrorKind> {
        let Some(text) = tokens.text(TokenKind::OrderBy) else {
            return Ok(());
        };

        let mut keys = Vec::new();
        for part in split_keyword(text, "And") {
            let (path, direction) = self.resolve_sort_key(&part)?;

            // A sort key behind a to-many association has no flat join and
            // no per-row value to order on.
            if path.crosses_to_many() {
                return Err(TypeError::OrderBehindToMany {
                    entity: self.root.name().to_string(),
                    path: path.dotted().to_string(),
                }
                .into());
            }

            if !path.terminal().kind.scalar().is_some_and(ScalarKind::supports_ordering) {
                let terminal = path.terminal();
                return Err(TypeError::InapplicableRestriction {
                    entity: terminal.entity.clone(),
                    property: terminal.name.clone(),
                    property_type: terminal.kind.to_string(),
                    restriction: "OrderBy".to_string(),
                }
                .into());
            }

            self.register_path_joins(&path);
            keys.push(SortKey::new(path, direction));
        }

        self.model.order = OrderSpec { keys };
        Ok(())
    }

    /// A sort key is property text plus an optional `Asc`/`Desc` suffix.
    /// The whole text is tried as a property first, so a property named
    /// `statusDesc` is never mistaken for a descending `status`.
    fn resolve_sort_key(
        &self,
        part: &str,
    ) -> Result<(PropertyPath, OrderDirection), CompileErrorKind> {
        let whole = match resolve_property(self.registry, self.root, part) {
            Ok(path) => return Ok((path, OrderDirection::Asc)),
            Err(err) => err,
        };

        for (suffix, direction) in [("Desc", OrderDirection::Desc), ("Asc", OrderDirection::Asc)] {
            if let Some(rest) = part.strip_suffix(suffix)
                && !rest.is_empty()
                && let Ok(path) = resolve_property(self.registry, self.root, rest)
            {
                return Ok((path, direction));
            }
        }

        Err(whole.into())
    }

    /// Register inner joins for every join-relevant hop of `path`,
    /// reusing any join already registered for the same dotted prefix.
    fn register_path_joins(&mut self, path: &PropertyPath) {
        for (prefix, hop) in path.join_hops() {
            let target = hop.target.clone();
            self.register_join(&prefix, &target, JoinKind::Inner);
        }
    }

    fn register_join(&mut self, path: &str, target: &str, kind: JoinKind) {
        if self.model.joins.iter().any(|join| join.path == path) {
            return;
        }
        self.model.joins.push(JoinSpec::new(path, target, kind));
    }
}

fn make_predicate(
    def: RestrictionDef,
    path: PropertyPath,
    mut bindings: Vec<ParameterBinding>,
    ignore_case: bool,
) -> Predicate {
    let mut binding = || bindings.remove(0);

    let positive = match def.kind {
        RestrictionKind::Equals => {
            Predicate::Equals(ComparisonLeaf::new(path, binding()).with_ignore_case(ignore_case))
        }
        RestrictionKind::GreaterThan => {
            Predicate::GreaterThan(ComparisonLeaf::new(path, binding()))
        }
        RestrictionKind::GreaterThanEquals => {
            Predicate::GreaterThanEquals(ComparisonLeaf::new(path, binding()))
        }
        RestrictionKind::LessThan => Predicate::LessThan(ComparisonLeaf::new(path, binding())),
        RestrictionKind::LessThanEquals => {
            Predicate::LessThanEquals(ComparisonLeaf::new(path, binding()))
        }
        RestrictionKind::Like => {
            Predicate::Like(ComparisonLeaf::new(path, binding()).with_ignore_case(ignore_case))
        }
        RestrictionKind::Ilike => {
            Predicate::Like(ComparisonLeaf::new(path, binding()).with_ignore_case(true))
        }
        RestrictionKind::Contains => {
            Predicate::Contains(ComparisonLeaf::new(path, binding()).with_ignore_case(ignore_case))
        }
        RestrictionKind::StartsWith => Predicate::StartsWith(
            ComparisonLeaf::new(path, binding()).with_ignore_case(ignore_case),
        ),
        RestrictionKind::EndsWith => {
            Predicate::EndsWith(ComparisonLeaf::new(path, binding()).with_ignore_case(ignore_case))
        }
        RestrictionKind::In => {
            Predicate::In(ComparisonLeaf::new(path, binding()).with_ignore_case(ignore_case))
        }
        RestrictionKind::Between => {
            let lower = binding();
            let upper = binding();
            Predicate::Between { path, lower, upper }
        }
        RestrictionKind::IsNull => Predicate::IsNull { path },
        RestrictionKind::IsTrue => Predicate::IsTrue { path },
        RestrictionKind::IsFalse => Predicate::IsFalse { path },
        RestrictionKind::IsEmpty => Predicate::IsEmpty { path },
    };

    if !def.negated {
        return positive;
    }

    // Negations with a native variant use it; the rest wrap in `Not`.
    match positive {
        Predicate::Equals(leaf) => Predicate::NotEquals(leaf),
        Predicate::In(leaf) => Predicate::NotIn(leaf),
        Predicate::IsNull { path } => Predicate::IsNotNull { path },
        Predicate::IsEmpty { path } => Predicate::IsNotEmpty { path },
        other => Predicate::not(other),
    }
}

/// Identity-equality lookup, alone or conjoined only with a version match.
fn is_identity_lookup(predicate: &Predicate) -> bool {
    match predicate {
        Predicate::IdEquals { .. } => true,
        Predicate::And(children) => {
            children
                .iter()
                .filter(|child| matches!(child, Predicate::IdEquals { .. }))
                .count()
                == 1
                && children.iter().all(|child| {
                    matches!(
                        child,
                        Predicate::IdEquals { .. } | Predicate::VersionEquals { .. }
                    )
                })
        }
        _ => false,
    }
}

/// Declared parameter type against the property the clause targets.
fn check_assignable(
    parameter: &ParameterModel,
    path: &PropertyPath,
    kind: RestrictionKind,
) -> Result<(), CompileErrorKind> {
    let declared = parameter.ty.unwrapped();
    let property = &path.terminal().kind;

    let ok = if kind == RestrictionKind::In {
        // `In` binds a collection of candidate values.
        match declared.element() {
            Some(element) => compatible(element, property),
            None => matches!(declared, DeclaredType::Unknown),
        }
    } else {
        compatible(declared, property)
    };

    if ok {
        Ok(())
    } else {
        let terminal = path.terminal();
        Err(TypeError::IncompatibleArgument {
            entity: terminal.entity.clone(),
            property: terminal.name.clone(),
            property_type: terminal.kind.to_string(),
            parameter: parameter.name.clone(),
            parameter_type: parameter.ty.to_string(),
        }
        .into())
    }
}

pub(crate) fn compatible(declared: &DeclaredType, property: &PropertyKind) -> bool {
    match (declared, property) {
        (DeclaredType::Unknown, _) => true,
        (DeclaredType::Scalar(a), PropertyKind::Scalar(b) | PropertyKind::List(b)) => {
            a == b || (a.is_numeric() && b.is_numeric())
        }
        (DeclaredType::Entity(name), PropertyKind::Association { target, .. }) => name == target,
        // Foreign keys may be compared by their key scalar.
        (DeclaredType::Scalar(_), PropertyKind::Association { .. }) => true,
        _ => false,
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        compile::tokenizer::tokenize,
        model::AssociationKind,
        query::Projection,
    };

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
                .with_scalar("pages", ScalarKind::Uint)
                .with_scalar("version", ScalarKind::Uint)
                .with_list("tags", ScalarKind::Text)
                .with_association("author", "Author", AssociationKind::ManyToOne)
                .with_association("reviews", "Review", AssociationKind::OneToMany)
                .with_identity("id")
                .with_version("version"),
        );
        registry.register(
            EntityModel::new("Review")
                .with_scalar("id", ScalarKind::Uuid)
                .with_scalar("rating", ScalarKind::Uint)
                .with_identity("id"),
        );
        registry
    }

    fn build(signature: &MethodSignature) -> Result<BuiltQuery, CompileErrorKind> {
        let registry = registry();
        let root = registry.entity("Book").unwrap().clone();
        let (_, tokens) = tokenize(signature.name()).unwrap().unwrap();
        QueryBuilder::new(&registry, &root, signature).build(&tokens)
    }

    #[test]
    fn positional_binding_follows_clause_order() {
        let signature = MethodSignature::new("findByTitleAndPagesGreaterThan")
            .with_parameter("title", DeclaredType::Scalar(ScalarKind::Text))
            .with_parameter("pages", DeclaredType::Scalar(ScalarKind::Uint));

        let built = build(&signature).unwrap();
        assert_eq!(built.bound, 2);

        let Some(Predicate::And(children)) = built.model.predicate else {
            panic!("expected a conjunction");
        };
        assert!(matches!(
            &children[0],
            Predicate::Equals(leaf) if leaf.binding.index == 0 && leaf.path.dotted() == "title"
        ));
        assert!(matches!(
            &children[1],
            Predicate::GreaterThan(leaf) if leaf.binding.index == 1
        ));
    }

    #[test]
    fn identity_equality_short_circuits() {
        let signature = MethodSignature::new("findById")
            .with_parameter("id", DeclaredType::Scalar(ScalarKind::Uuid));

        let built = build(&signature).unwrap();
        assert!(built.by_identity);
        assert!(matches!(
            built.model.predicate,
            Some(Predicate::IdEquals { binding }) if binding.index == 0
        ));
    }

    #[test]
    fn version_match_flags_optimistic_lock() {
        let signature = MethodSignature::new("findByIdAndVersion")
            .with_parameter("id", DeclaredType::Scalar(ScalarKind::Uuid))
            .with_parameter("version", DeclaredType::Scalar(ScalarKind::Uint));

        let built = build(&signature).unwrap();
        assert!(built.by_identity);
        assert!(built.optimistic_lock);
    }

    #[test]
    fn to_one_paths_register_inner_joins_once() {
        let signature = MethodSignature::new("findByAuthorNameAndAuthorNameLike")
            .with_parameter("name", DeclaredType::Scalar(ScalarKind::Text))
            .with_parameter("pattern", DeclaredType::Scalar(ScalarKind::Text));

        let built = build(&signature).unwrap();
        assert_eq!(
            built.model.joins,
            vec![JoinSpec::new("author", "Author", JoinKind::Inner)]
        );
    }

    #[test]
    fn join_directive_kind_wins_over_the_derived_inner() {
        let signature = MethodSignature::new("findByAuthorName")
            .with_parameter("name", DeclaredType::Scalar(ScalarKind::Text))
            .with_join("author", JoinKind::Left);

        let built = build(&signature).unwrap();
        assert_eq!(
            built.model.joins,
            vec![JoinSpec::new("author", "Author", JoinKind::Left)]
        );
    }

    #[test]
    fn to_many_paths_scope_instead_of_joining() {
        let signature = MethodSignature::new("findByReviewsRatingGreaterThan")
            .with_parameter("rating", DeclaredType::Scalar(ScalarKind::Uint));

        let built = build(&signature).unwrap();
        assert!(built.model.joins.is_empty());
        assert!(matches!(
            built.model.predicate,
            Some(Predicate::AssociationScoped { path, inner })
                if path == "reviews" && matches!(*inner, Predicate::GreaterThan(_))
        ));
    }

    #[test]
    fn or_branches_with_and_binding_tighter() {
        let signature = MethodSignature::new("findByTitleAndPagesGreaterThanOrTitleLike")
            .with_parameter("title", DeclaredType::Scalar(ScalarKind::Text))
            .with_parameter("pages", DeclaredType::Scalar(ScalarKind::Uint))
            .with_parameter("pattern", DeclaredType::Scalar(ScalarKind::Text));

        let built = build(&signature).unwrap();
        let Some(Predicate::Or(branches)) = built.model.predicate else {
            panic!("expected a disjunction");
        };
        assert_eq!(branches.len(), 2);
        assert!(matches!(&branches[0], Predicate::And(terms) if terms.len() == 2));
        assert!(matches!(&branches[1], Predicate::Like(_)));
    }

    #[test]
    fn between_consumes_two_parameters() {
        let signature = MethodSignature::new("findByPagesBetween")
            .with_parameter("lo", DeclaredType::Scalar(ScalarKind::Uint))
            .with_parameter("hi", DeclaredType::Scalar(ScalarKind::Uint));

        let built = build(&signature).unwrap();
        assert_eq!(built.bound, 2);
        assert!(matches!(
            built.model.predicate,
            Some(Predicate::Between { lower, upper, .. })
                if lower.index == 0 && upper.index == 1
        ));
    }

    #[test]
    fn missing_parameters_fail_arity() {
        let signature = MethodSignature::new("findByPagesBetween")
            .with_parameter("lo", DeclaredType::Scalar(ScalarKind::Uint));

        assert!(matches!(
            build(&signature),
            Err(CompileErrorKind::Arity(ArityError::InsufficientArguments {
                required: 2,
                available: 1,
                ..
            }))
        ));
    }

    #[test]
    fn incompatible_parameter_type_is_rejected() {
        let signature = MethodSignature::new("findByPages")
            .with_parameter("pages", DeclaredType::Scalar(ScalarKind::Text));

        assert!(matches!(
            build(&signature),
            Err(CompileErrorKind::Type(TypeError::IncompatibleArgument { .. }))
        ));
    }

    #[test]
    fn in_requires_an_iterable_parameter() {
        let ok = MethodSignature::new("findByTitleIn").with_parameter(
            "titles",
            DeclaredType::Iterable(Box::new(DeclaredType::Scalar(ScalarKind::Text))),
        );
        assert!(build(&ok).is_ok());

        let bad = MethodSignature::new("findByTitleIn")
            .with_parameter("titles", DeclaredType::Scalar(ScalarKind::Text));
        assert!(matches!(
            build(&bad),
            Err(CompileErrorKind::Type(TypeError::IncompatibleArgument { .. }))
        ));
    }

    #[test]
    fn ignore_case_needs_a_text_property() {
        let signature = MethodSignature::new("findByPagesIgnoreCase")
            .with_parameter("pages", DeclaredType::Scalar(ScalarKind::Uint));

        assert!(matches!(
            build(&signature),
            Err(CompileErrorKind::Type(TypeError::IgnoreCaseOnNonText { .. }))
        ));
    }

    #[test]
    fn order_clause_parses_directions_per_key() {
        let signature = MethodSignature::new("findByTitleOrderByPagesDescAndTitle")
            .with_parameter("title", DeclaredType::Scalar(ScalarKind::Text));

        let built = build(&signature).unwrap();
        let keys = &built.model.order.keys;
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].path.dotted(), "pages");
        assert_eq!(keys[0].direction, OrderDirection::Desc);
        assert_eq!(keys[1].path.dotted(), "title");
        assert_eq!(keys[1].direction, OrderDirection::Asc);
    }

    #[test]
    fn order_keys_behind_to_many_associations_are_rejected() {
        let signature = MethodSignature::new("findByTitleOrderByReviewsRating")
            .with_parameter("title", DeclaredType::Scalar(ScalarKind::Text));

        assert!(matches!(
            build(&signature),
            Err(CompileErrorKind::Type(TypeError::OrderBehindToMany { path, .. }))
                if path == "reviews.rating"
        ));
    }

    #[test]
    fn zero_argument_restrictions_bind_nothing() {
        let signature = MethodSignature::new("findByTagsEmptyAndTitleIsNotNull");
        let built = build(&signature).unwrap();
        assert_eq!(built.bound, 0);

        let Some(Predicate::And(children)) = built.model.predicate else {
            panic!("expected a conjunction");
        };
        assert!(matches!(&children[0], Predicate::IsEmpty { path } if path.dotted() == "tags"));
        assert!(matches!(&children[1], Predicate::IsNotNull { .. }));
    }

    #[test]
    fn distinct_projection_lands_on_the_model() {
        let signature = MethodSignature::new("findDistinctTitleByPagesGreaterThan")
            .with_parameter("pages", DeclaredType::Scalar(ScalarKind::Uint));

        let built = build(&signature).unwrap();
        assert!(matches!(
            built.model.projections.as_slice(),
            [Projection::Distinct(Some(path))] if path.dotted() == "title"
        ));
    }

    #[test]
    fn unconstrained_find_has_no_predicate() {
        let signature = MethodSignature::new("find");
        let built = build(&signature).unwrap();
        assert!(built.model.is_unconstrained());
    }
}
