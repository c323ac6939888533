//! Core compiler for findby: entity models, method signatures, the
//! identifier grammar, and the query artifacts exported via the `prelude`.

// public exports are one module level down
pub mod compile;
pub mod error;
pub mod method;
pub mod model;
pub mod query;

pub use compile::{CompiledDirective, OperationKind, compile};
pub use error::CompileError;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No tokenizer internals, tables, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        compile::{
            Assignment, CompiledDirective, OperationKind, ParameterRole, ResultElement, compile,
        },
        error::CompileError,
        method::{DeclaredType, MethodSignature, ParameterModel, ReturnShape},
        model::{
            AssociationKind, EntityModel, ModelRegistry, PropertyKind, PropertyModel,
            PropertyPath, ScalarKind,
        },
        query::{
            JoinKind, JoinSpec, OrderDirection, OrderSpec, Predicate, Projection, QueryModel,
            SortKey, explain,
        },
    };
}
