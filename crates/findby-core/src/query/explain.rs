use crate::query::{model::QueryModel, predicate::Predicate, projection::Projection};
use std::fmt::Write as _;

///
/// Explain
///
/// Stable, human-readable rendering of a compiled query model. This is the
/// diagnostics surface for the compiler: tests snapshot it, and callers can
/// log it when inspecting what a method identifier compiled into.
///

/// Render the model as an indented plan tree.
#[must_use]
pub fn explain(model: &QueryModel) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "query root={}", model.root_entity);

    for projection in &model.projections {
        let _ = writeln!(out, "  project {}", render_projection(projection));
    }
    for join in &model.joins {
        let _ = writeln!(out, "  join {} -> {} ({})", join.path, join.target, join.kind);
    }
    if let Some(predicate) = &model.predicate {
        let _ = writeln!(out, "  where {}", render_predicate(predicate));
    }
    for key in &model.order.keys {
        let _ = writeln!(out, "  order {} {}", key.path, key.direction);
    }
    if let Some(limit) = model.limit {
        let _ = writeln!(out, "  limit {limit}");
    }
    if model.for_update {
        let _ = writeln!(out, "  for_update");
    }

    out
}

fn render_projection(projection: &Projection) -> String {
    match projection {
        Projection::Property(path) => format!("property({path})"),
        Projection::Distinct(Some(path)) => format!("distinct({path})"),
        Projection::Distinct(None) => "distinct".to_string(),
        Projection::Count(Some(path)) => format!("count({path})"),
        Projection::Count(None) => "count".to_string(),
        Projection::Max(path) => format!("max({path})"),
        Projection::Min(path) => format!("min({path})"),
        Projection::Sum(path) => format!("sum({path})"),
        Projection::Avg(path) => format!("avg({path})"),
        Projection::Literal(text) => format!("literal({text})"),
    }
}

fn render_predicate(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Equals(leaf) => render_leaf("eq", &leaf.path.to_string(), leaf.ignore_case),
        Predicate::NotEquals(leaf) => render_leaf("ne", &leaf.path.to_string(), leaf.ignore_case),
        Predicate::GreaterThan(leaf) => render_leaf("gt", &leaf.path.to_string(), false),
        Predicate::GreaterThanEquals(leaf) => render_leaf("gte", &leaf.path.to_string(), false),
        Predicate::LessThan(leaf) => render_leaf("lt", &leaf.path.to_string(), false),
        Predicate::LessThanEquals(leaf) => render_leaf("lte", &leaf.path.to_string(), false),
        Predicate::Like(leaf) => render_leaf("like", &leaf.path.to_string(), leaf.ignore_case),
        Predicate::Contains(leaf) => {
            render_leaf("contains", &leaf.path.to_string(), leaf.ignore_case)
        }
        Predicate::StartsWith(leaf) => {
            render_leaf("starts_with", &leaf.path.to_string(), leaf.ignore_case)
        }
        Predicate::EndsWith(leaf) => {
            render_leaf("ends_with", &leaf.path.to_string(), leaf.ignore_case)
        }
        Predicate::In(leaf) => render_leaf("in", &leaf.path.to_string(), false),
        Predicate::NotIn(leaf) => render_leaf("not_in", &leaf.path.to_string(), false),
        Predicate::Between { path, .. } => format!("between({path})"),
        Predicate::IsNull { path } => format!("is_null({path})"),
        Predicate::IsNotNull { path } => format!("is_not_null({path})"),
        Predicate::IsTrue { path } => format!("is_true({path})"),
        Predicate::IsFalse { path } => format!("is_false({path})"),
        Predicate::IsEmpty { path } => format!("is_empty({path})"),
        Predicate::IsNotEmpty { path } => format!("is_not_empty({path})"),
        Predicate::IdEquals { .. } => "id_eq".to_string(),
        Predicate::VersionEquals { .. } => "version_eq".to_string(),
        Predicate::Not(inner) => format!("not({})", render_predicate(inner)),
        Predicate::And(children) => render_group("and", children),
        Predicate::Or(children) => render_group("or", children),
        Predicate::AssociationScoped { path, inner } => {
            format!("scoped({path}, {})", render_predicate(inner))
        }
    }
}

fn render_leaf(op: &str, path: &str, ignore_case: bool) -> String {
    if ignore_case {
        format!("{op}_ci({path})")
    } else {
        format!("{op}({path})")
    }
}

fn render_group(op: &str, children: &[Predicate]) -> String {
    let parts = children
        .iter()
        .map(render_predicate)
        .collect::<Vec<_>>()
        .join(", ");

    format!("{op}({parts})")
}

///
/// TESTS
///
