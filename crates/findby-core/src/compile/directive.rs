use crate::{
    compile::builder::{BuiltQuery, compatible},
    error::{ArityError, CompileErrorKind, ReferenceError, ShapeError, TypeError},
    method::{DeclaredType, MethodSignature, ParameterModel, ReturnShape},
    model::{EntityModel, PropertyKind, ScalarKind},
    query::{ParameterBinding, Predicate, Projection, QueryModel},
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

///
/// Directive assembly
///
/// Final compilation phase: takes the built query, validates it against the
/// method's declared parameters and return shape, derives parameter roles
/// and update assignments, and produces the immutable directive the runtime
/// executes.
///

///
/// OperationKind
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum OperationKind {
    Query,
    Count,
    Exists,
    Delete,
    Update,
    Insert,
}

impl OperationKind {
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Delete | Self::Update | Self::Insert)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Query => "find",
            Self::Count => "count",
            Self::Exists => "exists",
            Self::Delete => "delete",
            Self::Update => "update",
            Self::Insert => "save",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

///
/// ParameterRole
///
/// Runtime role of one declared parameter that is not an ordinary
/// predicate argument.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ParameterRole {
    /// The entity instance a write operation acts on.
    Entity,
    /// An iterable of entity instances (batch write).
    Entities,
    /// Bound to the root identity (`IdEquals`).
    Id,
    /// Bound to the root version (`VersionEquals`, optimistic locking).
    VersionMatch,
}

///
/// Assignment
/// One `SET` target of an update-by-predicate method.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Assignment {
    /// Root-entity property receiving the value.
    pub property: String,
    pub binding: ParameterBinding,
}

///
/// ResultElement
/// Derived element type of one result row.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResultElement {
    Entity(String),
    Scalar(ScalarKind),
    Unit,
}

impl fmt::Display for ResultElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity(name) => write!(f, "{name}"),
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Unit => write!(f, "unit"),
        }
    }
}

///
/// CompiledDirective
///
/// Everything the runtime needs to execute one repository method. Built
/// once per method, never mutated afterwards.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CompiledDirective {
    pub operation: OperationKind,
    pub query: QueryModel,

    /// Derived element type of the result.
    pub result: ResultElement,

    /// Roles of parameters that are not plain predicate arguments,
    /// keyed by declaration index.
    pub parameter_roles: BTreeMap<usize, ParameterRole>,

    /// Update-by-predicate assignment targets, in parameter order.
    pub assignments: Vec<Assignment>,

    /// Identity-equality lookup eligible for the key fast path.
    pub by_identity: bool,

    /// Predicate (or implicit write behavior) matches the version property.
    pub optimistic_lock: bool,

    /// Write operation returns the affected entities (`Returning`).
    pub returning: bool,
}

/// Validate the built query against the signature and assemble the
/// directive for `operation`.
pub(crate) fn assemble(
    root: &EntityModel,
    signature: &MethodSignature,
    operation: OperationKind,
    returning: bool,
    built: BuiltQuery,
) -> Result<CompiledDirective, CompileErrorKind> {
    let BuiltQuery {
        model,
        bound,
        by_identity,
        optimistic_lock,
    } = built;

    let mut directive = CompiledDirective {
        operation,
        result: ResultElement::Entity(root.name().to_string()),
        parameter_roles: identity_roles(model.predicate.as_ref()),
        assignments: Vec::new(),
        by_identity,
        optimistic_lock,
        returning,
        query: model,
    };

    match operation {
        OperationKind::Query => {
            reject_unbound(signature, bound)?;
            directive.result = derived_element(&directive.query, root);
            check_query_return(&directive.result, signature.return_shape())?;
        }

        OperationKind::Count => {
            reject_order(&directive.query, operation)?;
            reject_unbound(signature, bound)?;
            directive.result = ResultElement::Scalar(ScalarKind::Uint);
            check_numeric_return(signature.return_shape())?;
        }

        OperationKind::Exists => {
            reject_order(&directive.query, operation)?;
            reject_unbound(signature, bound)?;
            directive.result = ResultElement::Scalar(ScalarKind::Bool);
            check_bool_return(signature.return_shape())?;
        }

        OperationKind::Delete => {
            if directive.query.predicate.is_none() && !signature.parameters().is_empty() {
                assign_entity_role(root, signature, operation, &mut directive)?;
            } else {
                reject_unbound(signature, bound)?;
            }
            directive.result = write_result(root, returning);
            check_write_return(root, operation, returning, signature.return_shape())?;
        }

        OperationKind::Insert => {
            assign_entity_role(root, signature, operation, &mut directive)?;
            directive.result = write_result(root, returning);
            check_write_return(root, operation, returning, signature.return_shape())?;
        }

        OperationKind::Update => {
            if directive.query.predicate.is_some() {
                // Trailing parameters become assignment targets.
                collect_assignments(root, signature, bound, &mut directive)?;
            } else {
                assign_entity_role(root, signature, operation, &mut directive)?;
                // Whole-entity update matches by identity and honors a
                // declared version property.
                directive.by_identity = true;
                directive.optimistic_lock = root.version().is_some();
            }
            directive.result = write_result(root, returning);
            check_write_return(root, operation, returning, signature.return_shape())?;
        }
    }

    Ok(directive)
}

/// Parameters bound by `IdEquals`/`VersionEquals` leaves get their roles.
fn identity_roles(predicate: Option<&Predicate>) -> BTreeMap<usize, ParameterRole> {
    let mut roles = BTreeMap::new();
    if let Some(predicate) = predicate {
        collect_identity_roles(predicate, &mut roles);
    }
    roles
}

fn collect_identity_roles(predicate: &Predicate, roles: &mut BTreeMap<usize, ParameterRole>) {
    match predicate {
        Predicate::IdEquals { binding } => {
            roles.insert(binding.index, ParameterRole::Id);
        }
        Predicate::VersionEquals { binding } => {
            roles.insert(binding.index, ParameterRole::VersionMatch);
        }
        Predicate::Not(inner) | Predicate::AssociationScoped { inner, .. } => {
            collect_identity_roles(inner, roles);
        }
        Predicate::And(children) | Predicate::Or(children) => {
            for child in children {
                collect_identity_roles(child, roles);
            }
        }
        _ => {}
    }
}

fn reject_unbound(signature: &MethodSignature, bound: usize) -> Result<(), CompileErrorKind> {
    let unbound: Vec<String> = signature.parameters()[bound.min(signature.parameters().len())..]
        .iter()
        .map(|parameter| parameter.name.clone())
        .collect();

    if unbound.is_empty() {
        Ok(())
    } else {
        Err(ArityError::UnboundParameters { names: unbound }.into())
    }
}

fn reject_order(model: &QueryModel, operation: OperationKind) -> Result<(), CompileErrorKind> {
    if model.order.is_empty() {
        Ok(())
    } else {
        Err(ShapeError::OrderNotSupported {
            operation: operation.label().to_string(),
        }
        .into())
    }
}

/// Write operations take the entity (or an iterable of entities) as their
/// single parameter.
fn assign_entity_role(
    root: &EntityModel,
    signature: &MethodSignature,
    operation: OperationKind,
    directive: &mut CompiledDirective,
) -> Result<(), CompileErrorKind> {
    let missing = || {
        CompileErrorKind::from(ShapeError::MissingEntityArgument {
            operation: operation.label().to_string(),
        })
    };

    let [parameter, rest @ ..] = signature.parameters() else {
        return Err(missing());
    };
    if let [extra, ..] = rest {
        return Err(ArityError::UnboundParameters {
            names: vec![extra.name.clone()],
        }
        .into());
    }

    let role = entity_parameter_role(root, parameter).ok_or_else(missing)?;
    directive.parameter_roles.insert(0, role);

    Ok(())
}

fn entity_parameter_role(root: &EntityModel, parameter: &ParameterModel) -> Option<ParameterRole> {
    match parameter.ty.unwrapped() {
        DeclaredType::Entity(name) if name == root.name() => Some(ParameterRole::Entity),
        DeclaredType::Unknown => Some(ParameterRole::Entity),
        DeclaredType::Iterable(element) => match element.unwrapped() {
            DeclaredType::Entity(name) if name == root.name() => Some(ParameterRole::Entities),
            DeclaredType::Unknown => Some(ParameterRole::Entities),
            _ => None,
        },
        _ => None,
    }
}

/// `updateXxxBy...` binds its leading parameters in the predicate; every
/// remaining parameter names one root property to assign.
fn collect_assignments(
    root: &EntityModel,
    signature: &MethodSignature,
    bound: usize,
    directive: &mut CompiledDirective,
) -> Result<(), CompileErrorKind> {
    for (index, parameter) in signature.parameters().iter().enumerate().skip(bound) {
        let Some(property) = root.property(&parameter.name) else {
            return Err(ReferenceError::NonExistentProperty {
                entity: root.name().to_string(),
                candidate: parameter.name.clone(),
            }
            .into());
        };

        if !compatible(parameter.ty.unwrapped(), &property.kind) {
            return Err(TypeError::IncompatibleArgument {
                entity: root.name().to_string(),
                property: property.name.clone(),
                property_type: property.kind.to_string(),
                parameter: parameter.name.clone(),
                parameter_type: parameter.ty.to_string(),
            }
            .into());
        }

        directive.assignments.push(Assignment {
            property: property.name.clone(),
            binding: ParameterBinding::new(index, &parameter.name),
        });
    }

    Ok(())
}

/// Result element the query itself implies, before return-shape checks.
fn derived_element(model: &QueryModel, root: &EntityModel) -> ResultElement {
    if let Some(kind) = model.projections.iter().find_map(Projection::result_kind) {
        return ResultElement::Scalar(kind);
    }

    // A single projected property narrows the row to that property.
    if let [projection] = model.projections.as_slice()
        && let Some(path) = projection.path()
    {
        return match &path.terminal().kind {
            PropertyKind::Scalar(kind) | PropertyKind::List(kind) => {
                ResultElement::Scalar(*kind)
            }
            PropertyKind::Association { target, .. } => ResultElement::Entity(target.clone()),
        };
    }

    ResultElement::Entity(root.name().to_string())
}

fn check_query_return(
    derived: &ResultElement,
    declared: &ReturnShape,
) -> Result<(), CompileErrorKind> {
    let element = declared.element();
    let ok = match (derived, element) {
        (_, ReturnShape::Unknown) => true,
        (ResultElement::Entity(derived), ReturnShape::Entity(found)) => derived == found,
        (ResultElement::Scalar(derived), ReturnShape::Scalar(found)) => {
            derived == found || (derived.is_numeric() && found.is_numeric())
        }
        _ => false,
    };

    if ok {
        Ok(())
    } else {
        Err(ShapeError::ProjectionMismatch {
            derived: derived.to_string(),
            found: element.to_string(),
        }
        .into())
    }
}

fn check_numeric_return(declared: &ReturnShape) -> Result<(), CompileErrorKind> {
    match declared.element() {
        ReturnShape::Unknown => Ok(()),
        ReturnShape::Scalar(kind) if kind.is_numeric() => Ok(()),
        other => Err(ShapeError::CountNotNumeric {
            found: other.to_string(),
        }
        .into()),
    }
}

fn check_bool_return(declared: &ReturnShape) -> Result<(), CompileErrorKind> {
    match declared.element() {
        ReturnShape::Unknown | ReturnShape::Scalar(ScalarKind::Bool) => Ok(()),
        other => Err(ShapeError::ExistsNotBool {
            found: other.to_string(),
        }
        .into()),
    }
}

fn write_result(root: &EntityModel, returning: bool) -> ResultElement {
    if returning {
        ResultElement::Entity(root.name().to_string())
    } else {
        ResultElement::Unit
    }
}

fn check_write_return(
    root: &EntityModel,
    operation: OperationKind,
    returning: bool,
    declared: &ReturnShape,
) -> Result<(), CompileErrorKind> {
    let element = declared.element();
    let ok = if returning {
        matches!(element, ReturnShape::Unknown)
            || matches!(element, ReturnShape::Entity(name) if name == root.name())
    } else {
        match element {
            ReturnShape::Unit | ReturnShape::Unknown => true,
            // Affected-row count.
            ReturnShape::Scalar(kind) => kind.is_numeric(),
            // `save`/`update` conventionally echo the entity even without
            // an explicit `Returning`.
            ReturnShape::Entity(name) => {
                operation != OperationKind::Delete && name == root.name()
            }
            _ => false,
        }
    };

    if ok {
        Ok(())
    } else {
        Err(ShapeError::UnsupportedReturn {
            operation: operation.label().to_string(),
            found: declared.to_string(),
        }
        .into())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_labels_are_stable() {
        assert_eq!(OperationKind::Query.label(), "find");
        assert_eq!(OperationKind::Insert.label(), "save");
        assert!(OperationKind::Delete.is_write());
        assert!(!OperationKind::Count.is_write());
    }

    #[test]
    fn identity_roles_walk_the_tree() {
        let predicate = Predicate::And(vec![
            Predicate::IdEquals {
                binding: ParameterBinding::new(0, "id"),
            },
            Predicate::VersionEquals {
                binding: ParameterBinding::new(1, "version"),
            },
        ]);

        let roles = identity_roles(Some(&predicate));
        assert_eq!(roles.get(&0), Some(&ParameterRole::Id));
        assert_eq!(roles.get(&1), Some(&ParameterRole::VersionMatch));
    }

    #[test]
    fn count_return_must_be_numeric() {
        assert!(check_numeric_return(&ReturnShape::Scalar(ScalarKind::Uint)).is_ok());
        assert!(check_numeric_return(&ReturnShape::Unknown).is_ok());
        assert!(matches!(
            check_numeric_return(&ReturnShape::Scalar(ScalarKind::Text)),
            Err(CompileErrorKind::Shape(ShapeError::CountNotNumeric { .. }))
        ));
    }

    #[test]
    fn write_return_accepts_count_and_echo() {
        let root = EntityModel::new("Person");
        let shape = ReturnShape::Scalar(ScalarKind::Uint);
        assert!(check_write_return(&root, OperationKind::Delete, false, &shape).is_ok());

        let echo = ReturnShape::Entity("Person".to_string());
        assert!(check_write_return(&root, OperationKind::Insert, false, &echo).is_ok());
        assert!(matches!(
            check_write_return(&root, OperationKind::Delete, false, &echo),
            Err(CompileErrorKind::Shape(ShapeError::UnsupportedReturn { .. }))
        ));
    }
}
