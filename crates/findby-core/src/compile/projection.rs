use crate::{
    compile::{boolean::split_keyword, path::resolve_property},
    error::{CompileErrorKind, TypeError},
    model::{EntityModel, ModelRegistry, PropertyPath, ScalarKind},
    query::Projection,
};

///
/// Projection clause
///
/// The text left of `By`. `All` is filler and projects the whole entity.
/// An aggregate prefix (`Count`, `Max`, `Min`, `Sum`, `Avg`) wraps the
/// property that follows it; multiple projections are `And`-joined. The
/// `Distinct` marker arrives separately from the tokenizer and attaches to
/// a single projected property when there is exactly one.
///

const AGGREGATES: &[&str] = &["Count", "Max", "Min", "Sum", "Avg"];

/// Parse the projection clause into the model's projection list.
pub fn parse_projection(
    registry: &ModelRegistry,
    root: &EntityModel,
    text: Option<&str>,
    distinct: bool,
) -> Result<Vec<Projection>, CompileErrorKind> {
    let mut items = match text {
        None | Some("All") => Vec::new(),
        Some(text) => parse_items(registry, root, text)?,
    };

    if distinct {
        // Distinct over exactly one plain property narrows to it.
        if let [Projection::Property(_)] = items.as_slice() {
            let Some(Projection::Property(path)) = items.pop() else {
                unreachable!()
            };
            items.push(Projection::Distinct(Some(path)));
        } else {
            items.insert(0, Projection::Distinct(None));
        }
    }

    Ok(items)
}

fn parse_items(
    registry: &ModelRegistry,
    root: &EntityModel,
    text: &str,
) -> Result<Vec<Projection>, CompileErrorKind> {
    // The whole text as one item first, so a property named `nameAndAge`
    // shadows the two-item split.
    match parse_item(registry, root, text) {
        Ok(item) => Ok(vec![item]),
        Err(single_err) => {
            let parts = split_keyword(text, "And");
            if parts.len() < 2 {
                return Err(single_err);
            }
            parts
                .iter()
                .map(|part| parse_item(registry, root, part))
                .collect()
        }
    }
}

fn parse_item(
    registry: &ModelRegistry,
    root: &EntityModel,
    text: &str,
) -> Result<Projection, CompileErrorKind> {
    for aggregate in AGGREGATES {
        let Some(rest) = text.strip_prefix(aggregate) else {
            continue;
        };
        if rest.is_empty() {
            // Bare `Count` counts rows; the other aggregates need a property.
            if *aggregate == "Count" {
                return Ok(Projection::Count(None));
            }
            continue;
        }
        if !rest.starts_with(|c: char| c.is_ascii_uppercase()) {
            continue;
        }

        let path = resolve_property(registry, root, rest)?;
        check_aggregate_operand(aggregate, &path)?;

        return Ok(match *aggregate {
            "Count" => Projection::Count(Some(path)),
            "Max" => Projection::Max(path),
            "Min" => Projection::Min(path),
            "Sum" => Projection::Sum(path),
            "Avg" => Projection::Avg(path),
            _ => unreachable!(),
        });
    }

    let path = resolve_property(registry, root, text)?;
    Ok(Projection::Property(path))
}

/// `Sum`/`Avg` need a numeric operand; `Max`/`Min` need an ordered one.
fn check_aggregate_operand(aggregate: &str, path: &PropertyPath) -> Result<(), CompileErrorKind> {
    let terminal = path.terminal();
    let ok = match aggregate {
        "Sum" | "Avg" => terminal.kind.scalar().is_some_and(ScalarKind::is_numeric),
        "Max" | "Min" => terminal
            .kind
            .scalar()
            .is_some_and(ScalarKind::supports_ordering),
        _ => true,
    };

    if ok {
        Ok(())
    } else {
        Err(TypeError::InapplicableRestriction {
            entity: terminal.entity.clone(),
            property: terminal.name.clone(),
            property_type: terminal.kind.to_string(),
            restriction: aggregate.to_string(),
        }
        .into())
    }
}

///
/// TESTS
///
