use crate::query::{join::JoinSpec, predicate::Predicate, projection::Projection, sort::OrderSpec};
use serde::{Deserialize, Serialize};

///
/// QueryModel
///
/// The compiled query artifact: predicate tree, projections, joins, sort,
/// limit, and execution flags. Owned exclusively by the compiled directive
/// and never mutated after the builder finalizes it; downstream renderers
/// (SQL/JPQL) read it immutably.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct QueryModel {
    /// Root entity name the query selects from.
    pub root_entity: String,

    /// Optional predicate tree; `None` means unconstrained.
    pub predicate: Option<Predicate>,

    /// Result-shaping projections (empty means whole-entity selection).
    pub projections: Vec<Projection>,

    /// Registered association joins, in registration order.
    pub joins: Vec<JoinSpec>,

    /// Ordering specification (empty means storage order).
    pub order: OrderSpec,

    /// Result-count restriction (`Top N` / `First N`).
    pub limit: Option<u32>,

    /// Pessimistic-lock marker (`ForUpdate`).
    pub for_update: bool,

    /// Whether the query was supplied as verbatim query text rather than
    /// derived from the identifier. Always false for derived queries; the
    /// flag exists so downstream consumers share one model shape.
    pub is_raw_query: bool,
}

impl QueryModel {
    #[must_use]
    pub fn new(root_entity: impl Into<String>) -> Self {
        Self {
            root_entity: root_entity.into(),
            predicate: None,
            projections: Vec::new(),
            joins: Vec::new(),
            order: OrderSpec::default(),
            limit: None,
            for_update: false,
            is_raw_query: false,
        }
    }

    /// Whether the model carries any row-shaping beyond the bare entity.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.predicate.is_none()
            && self.projections.is_empty()
            && self.joins.is_empty()
            && self.order.is_empty()
            && self.limit.is_none()
    }
}
