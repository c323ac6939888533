use crate::error::SplitError;

///
/// Boolean structure
///
/// The predicate clause body is a disjunction of conjunctions: `Or` splits
/// at the top level and `And` splits within each branch, so `And` binds
/// tighter. Both connectives are recognized only at camelCase boundaries,
/// so property names like `Android` or `SortOrder` never split.
///

/// Upper bound on leaf clauses in one predicate. Identifiers are written
/// by hand; anything past this is a generated or corrupted name.
const MAX_CLAUSES: usize = 32;

///
/// Disjunction
/// Or-branches of And-joined clause texts, in identifier order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Disjunction {
    branches: Vec<Vec<String>>,
}

impl Disjunction {
    #[must_use]
    pub fn branches(&self) -> &[Vec<String>] {
        &self.branches
    }

    /// True when the predicate is a single bare clause.
    #[must_use]
    pub fn is_single(&self) -> bool {
        self.branches.len() == 1 && self.branches[0].len() == 1
    }

    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.branches.iter().map(Vec::len).sum()
    }
}

/// Split a predicate clause body into its boolean structure.
pub fn split_disjunction(text: &str) -> Result<Disjunction, SplitError> {
    let branches: Vec<Vec<String>> = split_keyword(text, "Or")
        .into_iter()
        .map(|branch| split_keyword(&branch, "And"))
        .collect();

    let clauses: usize = branches.iter().map(Vec::len).sum();
    if clauses > MAX_CLAUSES {
        return Err(SplitError::TooManyClauses {
            max: MAX_CLAUSES,
            found: clauses,
        });
    }

    Ok(Disjunction { branches })
}

/// Split `text` at every boundary occurrence of `keyword`. An occurrence
/// counts only when text precedes it and an uppercase letter follows it.
pub(crate) fn split_keyword(text: &str, keyword: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut start = 0;

    for (at, _) in text.match_indices(keyword) {
        if at <= start {
            continue;
        }
        let right = &text[at + keyword.len()..];
        if !right.starts_with(|c: char| c.is_ascii_uppercase()) {
            continue;
        }
        parts.push(text[start..at].to_string());
        start = at + keyword.len();
    }

    parts.push(text[start..].to_string());
    parts
}

///
/// TESTS
///
