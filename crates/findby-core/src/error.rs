use thiserror::Error as ThisError;

///
/// Compile-error taxonomy
///
/// Every validation failure aborts compilation of the one offending method
/// with a descriptive, located error; the compiler never degrades to a
/// partial or best-effort query. A failed required-prefix match is *not* an
/// error (the identifier is simply not a candidate) and surfaces as
/// `Ok(None)` from the entry point instead.
///

///
/// TokenError
/// Identifier-grammar failures past the required prefix.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TokenError {
    #[error("'{operation}' methods do not support a projection clause, found '{text}'")]
    UnexpectedRemainder { operation: String, text: String },

    #[error("invalid result-count restriction '{keyword}{text}': expected digits")]
    InvalidLimit { keyword: String, text: String },

    #[error("result-count restriction '{keyword}{text}' does not fit in a u32")]
    LimitOverflow { keyword: String, text: String },
}

///
/// SplitError
/// Boolean-structure failures.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SplitError {
    #[error("predicate has {found} clauses, more than the supported maximum of {max}")]
    TooManyClauses { max: usize, found: usize },
}

///
/// ReferenceError
/// References to non-existent properties, entities, or join paths.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ReferenceError {
    #[error("join path '{path}' on entity '{entity}' does not terminate in an association")]
    JoinPathNotAssociation { entity: String, path: String },

    #[error("join path '{path}' does not resolve on entity '{entity}'")]
    JoinPathUnresolved { entity: String, path: String },

    #[error("entity '{entity}' has a composite identity; identity shorthand is not supported")]
    NoCompositeIdentityShorthand { entity: String },

    #[error("entity '{entity}' declares no identity property")]
    NoIdentity { entity: String },

    #[error("no property '{candidate}' exists on entity '{entity}'")]
    NonExistentProperty { entity: String, candidate: String },

    #[error("entity '{entity}' declares no version property")]
    NoVersion { entity: String },

    #[error("entity '{name}' is not registered")]
    UnknownEntity { name: String },
}

///
/// ArityError
/// Bound-parameter count mismatches for a restriction.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ArityError {
    #[error(
        "restriction '{restriction}' requires {required} argument(s) but only {available} parameter(s) remain"
    )]
    InsufficientArguments {
        restriction: String,
        required: usize,
        available: usize,
    },

    #[error("parameter(s) {names:?} are not bound by any clause")]
    UnboundParameters { names: Vec<String> },
}

///
/// TypeError
/// Parameter/property type incompatibilities.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum TypeError {
    #[error("IgnoreCase applies only to text properties; '{property}' on entity '{entity}' is {property_type}")]
    IgnoreCaseOnNonText {
        entity: String,
        property: String,
        property_type: String,
    },

    #[error(
        "restriction '{restriction}' is not applicable to property '{property}' of type {property_type} on entity '{entity}'"
    )]
    InapplicableRestriction {
        entity: String,
        property: String,
        property_type: String,
        restriction: String,
    },

    #[error(
        "parameter '{parameter}' of type {parameter_type} is not assignable to property '{property}' of type {property_type} on entity '{entity}'"
    )]
    IncompatibleArgument {
        entity: String,
        property: String,
        property_type: String,
        parameter: String,
        parameter_type: String,
    },

    #[error("cannot order by '{path}': the path crosses a to-many association on entity '{entity}'")]
    OrderBehindToMany { entity: String, path: String },
}

///
/// ShapeError
/// Declared return shape incompatible with the derived result.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum ShapeError {
    #[error("count methods must return a numeric scalar, found {found}")]
    CountNotNumeric { found: String },

    #[error("exists methods must return a bool, found {found}")]
    ExistsNotBool { found: String },

    #[error("'{operation}' methods require an entity parameter")]
    MissingEntityArgument { operation: String },

    #[error("'{operation}' methods do not support an ordering clause")]
    OrderNotSupported { operation: String },

    #[error("aggregate projection yields {derived} but the method returns {found}")]
    ProjectionMismatch { derived: String, found: String },

    #[error("'{operation}' methods cannot return {found}")]
    UnsupportedReturn { operation: String, found: String },
}

///
/// CompileErrorKind
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[remain::sorted]
pub enum CompileErrorKind {
    #[error(transparent)]
    Arity(#[from] ArityError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Split(#[from] SplitError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Type(#[from] TypeError),
}

///
/// CompileError
/// A located compile failure: the offending method plus the failure detail.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("method '{method}': {kind}")]
pub struct CompileError {
    pub method: String,
    pub kind: CompileErrorKind,
}

impl CompileError {
    #[must_use]
    pub fn new(method: impl Into<String>, kind: impl Into<CompileErrorKind>) -> Self {
        Self {
            method: method.into(),
            kind: kind.into(),
        }
    }
}

///
/// TESTS
///
