use derive_more::{Deref, IntoIterator};
use std::fmt;

///
/// TokenKind
///
/// Closed set of token kinds the tokenizer may emit. Emission order is
/// parse order and encodes clause precedence: prefix, distinct, limit,
/// predicate, projection, order.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// Operation verb (`find`, `count`, ...).
    Prefix,
    /// `Distinct` marker.
    Distinct,
    /// `Top<N>` / `First<N>` result-count marker (text is the digit run).
    Limit,
    /// Projection clause body (text left of `By`).
    Projection,
    /// Predicate clause body (text right of `By`).
    Predicate,
    /// `OrderBy` clause body.
    OrderBy,
    /// Trailing `ForUpdate` marker.
    ForUpdate,
    /// Trailing `Returning` marker.
    Returning,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Prefix => "prefix",
            Self::Distinct => "distinct",
            Self::Limit => "limit",
            Self::Projection => "projection",
            Self::Predicate => "predicate",
            Self::OrderBy => "order_by",
            Self::ForUpdate => "for_update",
            Self::Returning => "returning",
        };
        write!(f, "{label}")
    }
}

///
/// MatchToken
/// One typed token produced by the tokenizer.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MatchToken {
    pub kind: TokenKind,
    pub text: String,
}

impl MatchToken {
    #[must_use]
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

///
/// TokenList
/// Tokens in parse order; consumed positionally by later phases.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct TokenList(#[into_iterator(owned, ref)] Vec<MatchToken>);

impl TokenList {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, token: MatchToken) {
        self.0.push(token);
    }

    /// Text of the first token of `kind`, if present.
    #[must_use]
    pub fn text(&self, kind: TokenKind) -> Option<&str> {
        self.0
            .iter()
            .find(|token| token.kind == kind)
            .map(|token| token.text.as_str())
    }

    #[must_use]
    pub fn has(&self, kind: TokenKind) -> bool {
        self.0.iter().any(|token| token.kind == kind)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lookup_finds_first_of_kind() {
        let mut tokens = TokenList::new();
        tokens.push(MatchToken::new(TokenKind::Prefix, "find"));
        tokens.push(MatchToken::new(TokenKind::Predicate, "Name"));

        assert_eq!(tokens.text(TokenKind::Prefix), Some("find"));
        assert_eq!(tokens.text(TokenKind::OrderBy), None);
        assert!(tokens.has(TokenKind::Predicate));
        assert!(!tokens.has(TokenKind::Distinct));
        assert_eq!(tokens.len(), 2);
    }
}
