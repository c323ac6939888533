//! Compiled query artifacts.
//!
//! Everything in this module is produced by the compiler and consumed
//! immutably by downstream query-language renderers.

pub mod explain;
pub mod join;
pub mod model;
pub mod predicate;
pub mod projection;
pub mod sort;

pub use explain::explain;
pub use join::{JoinKind, JoinSpec};
pub use model::QueryModel;
pub use predicate::{ComparisonLeaf, ParameterBinding, Predicate};
pub use projection::Projection;
pub use sort::{OrderDirection, OrderSpec, SortKey};
