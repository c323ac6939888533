//! The name-to-query compiler.
//!
//! Compilation runs in phases over one method identifier: tokenize into
//! clauses, split boolean structure, resolve property paths, bind and
//! type-check parameters, then assemble the executable directive.

pub mod boolean;
pub mod builder;
pub mod directive;
pub mod path;
pub mod projection;
pub mod restriction;
pub mod step;
pub mod token;
pub mod tokenizer;


pub use directive::{
    Assignment, CompiledDirective, OperationKind, ParameterRole, ResultElement,
};
pub use token::{MatchToken, TokenKind, TokenList};

use crate::{
    compile::builder::QueryBuilder,
    error::{CompileError, ReferenceError},
    method::MethodSignature,
    model::ModelRegistry,
};

/// Compile one repository method against the registered model of `entity`.
///
/// `Ok(None)` means the identifier does not start with any operation verb
/// and is not a query method at all. Every failure past the verb is a hard
/// error naming the method.
pub fn compile(
    registry: &ModelRegistry,
    entity: &str,
    signature: &MethodSignature,
) -> Result<Option<CompiledDirective>, CompileError> {
    let method = signature.name();

    let Some((operation, tokens)) =
        tokenizer::tokenize(method).map_err(|err| CompileError::new(method, err))?
    else {
        return Ok(None);
    };

    let root = registry.entity(entity).ok_or_else(|| {
        CompileError::new(
            method,
            ReferenceError::UnknownEntity {
                name: entity.to_string(),
            },
        )
    })?;

    let built = QueryBuilder::new(registry, root, signature)
        .build(&tokens)
        .map_err(|kind| CompileError::new(method, kind))?;

    let returning = tokens.has(TokenKind::Returning);

    directive::assemble(root, signature, operation, returning, built)
        .map(Some)
        .map_err(|kind| CompileError::new(method, kind))
}
