use crate::{
    compile::{
        directive::OperationKind,
        step::{MatchStep, SplitMissing, StepOutcome},
        token::{TokenKind, TokenList},
    },
    error::TokenError,
};

///
/// Identifier Tokenizer
///
/// Each operation kind owns one ordered chain of match steps. The first
/// grammar whose required prefix matches consumes the identifier; a
/// failed required prefix moves on to the next grammar, and no grammar
/// matching at all means the identifier is not a candidate for this
/// compiler (not an error).
///
/// Verb and keyword sets are listed longest-first so overlapping keywords
/// (`OrderBy` vs `By`, `retrieve` vs `read`) never split partially.
///

const QUERY_VERBS: &[&str] = &[
    "retrieve", "search", "stream", "query", "find", "list", "read", "get",
];
const COUNT_VERBS: &[&str] = &["count"];
const EXISTS_VERBS: &[&str] = &["exists"];
const DELETE_VERBS: &[&str] = &["delete", "remove"];
const INSERT_VERBS: &[&str] = &["persist", "insert", "store", "save"];
const UPDATE_VERBS: &[&str] = &["update"];

const LIMIT_KEYWORDS: &[&str] = &["First", "Top"];

const QUERY_STEPS: &[MatchStep] = &[
    MatchStep::RequiredPrefix {
        keywords: QUERY_VERBS,
        emits: TokenKind::Prefix,
    },
    MatchStep::OptionalSuffix {
        keywords: &["ForUpdate"],
        emits: TokenKind::ForUpdate,
    },
    MatchStep::OptionalPrefix {
        keywords: &["Distinct"],
        emits: TokenKind::Distinct,
    },
    MatchStep::OptionalLimit {
        keywords: LIMIT_KEYWORDS,
    },
    MatchStep::SplitLastEmitRight {
        keyword: "OrderBy",
        emits: TokenKind::OrderBy,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::SplitFirstEmitRight {
        keyword: "By",
        emits: TokenKind::Predicate,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::TakeRest {
        emits: TokenKind::Projection,
    },
];

const COUNT_STEPS: &[MatchStep] = &[
    MatchStep::RequiredPrefix {
        keywords: COUNT_VERBS,
        emits: TokenKind::Prefix,
    },
    MatchStep::OptionalPrefix {
        keywords: &["Distinct"],
        emits: TokenKind::Distinct,
    },
    MatchStep::SplitLastEmitRight {
        keyword: "OrderBy",
        emits: TokenKind::OrderBy,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::SplitFirstEmitRight {
        keyword: "By",
        emits: TokenKind::Predicate,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::TakeRest {
        emits: TokenKind::Projection,
    },
];

const EXISTS_STEPS: &[MatchStep] = &[
    MatchStep::RequiredPrefix {
        keywords: EXISTS_VERBS,
        emits: TokenKind::Prefix,
    },
    MatchStep::SplitLastEmitRight {
        keyword: "OrderBy",
        emits: TokenKind::OrderBy,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::SplitFirstEmitRight {
        keyword: "By",
        emits: TokenKind::Predicate,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::FailOnRest { operation: "exists" },
];

const DELETE_STEPS: &[MatchStep] = &[
    MatchStep::RequiredPrefix {
        keywords: DELETE_VERBS,
        emits: TokenKind::Prefix,
    },
    MatchStep::OptionalSuffix {
        keywords: &["Returning"],
        emits: TokenKind::Returning,
    },
    MatchStep::SplitLastEmitRight {
        keyword: "OrderBy",
        emits: TokenKind::OrderBy,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::SplitFirstEmitRight {
        keyword: "By",
        emits: TokenKind::Predicate,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::OptionalPrefix {
        keywords: &["All"],
        emits: TokenKind::Projection,
    },
    MatchStep::FailOnRest { operation: "delete" },
];

const INSERT_STEPS: &[MatchStep] = &[
    MatchStep::RequiredPrefix {
        keywords: INSERT_VERBS,
        emits: TokenKind::Prefix,
    },
    MatchStep::OptionalSuffix {
        keywords: &["Returning"],
        emits: TokenKind::Returning,
    },
    MatchStep::OptionalPrefix {
        keywords: &["All"],
        emits: TokenKind::Projection,
    },
    MatchStep::FailOnRest { operation: "save" },
];

const UPDATE_STEPS: &[MatchStep] = &[
    MatchStep::RequiredPrefix {
        keywords: UPDATE_VERBS,
        emits: TokenKind::Prefix,
    },
    MatchStep::OptionalSuffix {
        keywords: &["Returning"],
        emits: TokenKind::Returning,
    },
    MatchStep::SplitFirstEmitRight {
        keyword: "By",
        emits: TokenKind::Predicate,
        missing: SplitMissing::PassThrough,
    },
    MatchStep::OptionalPrefix {
        keywords: &["All"],
        emits: TokenKind::Projection,
    },
    MatchStep::FailOnRest { operation: "update" },
];

const GRAMMARS: &[(OperationKind, &[MatchStep])] = &[
    (OperationKind::Query, QUERY_STEPS),
    (OperationKind::Count, COUNT_STEPS),
    (OperationKind::Exists, EXISTS_STEPS),
    (OperationKind::Delete, DELETE_STEPS),
    (OperationKind::Insert, INSERT_STEPS),
    (OperationKind::Update, UPDATE_STEPS),
];

/// Tokenize one method identifier.
///
/// Returns `Ok(None)` when no operation grammar claims the identifier.
pub fn tokenize(identifier: &str) -> Result<Option<(OperationKind, TokenList)>, TokenError> {
    for (operation, steps) in GRAMMARS {
        match run_chain(identifier, steps)? {
            Some(tokens) => return Ok(Some((*operation, tokens))),
            None => continue,
        }
    }

    Ok(None)
}

fn run_chain(identifier: &str, steps: &[MatchStep]) -> Result<Option<TokenList>, TokenError> {
    let mut tokens = TokenList::new();
    let mut remainder = identifier.to_string();

    for step in steps {
        match step.apply(&remainder, &mut tokens)? {
            StepOutcome::Continue(rest) => remainder = rest,
            StepOutcome::NoMatch => return Ok(None),
        }
    }

    Ok(Some(tokens))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_for(identifier: &str) -> (OperationKind, TokenList) {
        tokenize(identifier)
            .expect("tokenize should succeed")
            .expect("identifier should be a candidate")
    }

    #[test]
    fn plain_finder_yields_prefix_and_predicate() {
        let (operation, tokens) = tokens_for("findByName");
        assert_eq!(operation, OperationKind::Query);
        assert_eq!(tokens.text(TokenKind::Prefix), Some("find"));
        assert_eq!(tokens.text(TokenKind::Predicate), Some("Name"));
        assert_eq!(tokens.text(TokenKind::Projection), None);
    }

    #[test]
    fn full_clause_stack_tokenizes_in_parse_order() {
        let (operation, tokens) =
            tokens_for("findTop3ByLastNameAndAgeGreaterThanOrderByAgeDesc");
        assert_eq!(operation, OperationKind::Query);
        assert_eq!(tokens.text(TokenKind::Limit), Some("3"));
        assert_eq!(
            tokens.text(TokenKind::Predicate),
            Some("LastNameAndAgeGreaterThan")
        );
        assert_eq!(tokens.text(TokenKind::OrderBy), Some("AgeDesc"));
    }

    #[test]
    fn distinct_marker_is_separated_from_projection() {
        let (operation, tokens) = tokens_for("countDistinctByStatus");
        assert_eq!(operation, OperationKind::Count);
        assert!(tokens.has(TokenKind::Distinct));
        assert_eq!(tokens.text(TokenKind::Predicate), Some("Status"));
    }

    #[test]
    fn for_update_is_stripped_before_clause_parsing() {
        let (_, tokens) = tokens_for("findByNameForUpdate");
        assert!(tokens.has(TokenKind::ForUpdate));
        assert_eq!(tokens.text(TokenKind::Predicate), Some("Name"));
    }

    #[test]
    fn order_by_is_recognized_before_by() {
        let (_, tokens) = tokens_for("findOrderByName");
        assert_eq!(tokens.text(TokenKind::OrderBy), Some("Name"));
        assert_eq!(tokens.text(TokenKind::Predicate), None);
    }

    #[test]
    fn projection_clause_sits_left_of_by() {
        let (_, tokens) = tokens_for("findMaxAgeByStatus");
        assert_eq!(tokens.text(TokenKind::Projection), Some("MaxAge"));
        assert_eq!(tokens.text(TokenKind::Predicate), Some("Status"));
    }

    #[test]
    fn by_inside_a_word_does_not_split() {
        let (_, tokens) = tokens_for("findBytesByName");
        assert_eq!(tokens.text(TokenKind::Projection), Some("Bytes"));
        assert_eq!(tokens.text(TokenKind::Predicate), Some("Name"));
    }

    #[test]
    fn exists_rejects_projection_clauses() {
        assert!(matches!(
            tokenize("existsDistinctByName"),
            Err(TokenError::UnexpectedRemainder { operation, .. }) if operation == "exists"
        ));
        assert!(tokenize("existsByName").unwrap().is_some());
    }

    #[test]
    fn save_family_carries_no_predicate_grammar() {
        let (operation, tokens) = tokens_for("saveAll");
        assert_eq!(operation, OperationKind::Insert);
        assert_eq!(tokens.text(TokenKind::Projection), Some("All"));

        assert!(matches!(
            tokenize("saveByName"),
            Err(TokenError::UnexpectedRemainder { .. })
        ));
    }

    #[test]
    fn non_candidates_are_not_errors() {
        assert!(tokenize("toString").unwrap().is_none());
        assert!(tokenize("finder").unwrap().is_none());
        assert!(tokenize("").unwrap().is_none());
    }
}
