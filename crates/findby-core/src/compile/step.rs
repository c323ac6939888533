use crate::{
    compile::token::{MatchToken, TokenKind, TokenList},
    error::TokenError,
};

///
/// Match steps
///
/// One ordered chain of match steps consumes a method identifier
/// left-to-right. Each step tries a fixed vocabulary against the current
/// remainder and either emits tokens, passes the remainder through, or
/// fails. Keyword sets that are prefixes of one another must be listed
/// longest-first so that `GreaterThanEquals` style overlaps never split
/// partially.
///

///
/// SplitMissing
/// Behavior of a split step when its keyword is absent.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SplitMissing {
    /// Remainder passes through unchanged.
    PassThrough,
    /// The whole remainder is emitted as the split token.
    EmitRemainder,
}

///
/// MatchStep
///

#[derive(Clone, Debug)]
pub enum MatchStep {
    /// Anchored verb match; failure means the identifier is not a
    /// candidate for this grammar at all.
    RequiredPrefix {
        keywords: &'static [&'static str],
        emits: TokenKind,
    },

    /// Anchored keyword match whose absence is not fatal.
    OptionalPrefix {
        keywords: &'static [&'static str],
        emits: TokenKind,
    },

    /// Trailing keyword list; first suffix match wins.
    OptionalSuffix {
        keywords: &'static [&'static str],
        emits: TokenKind,
    },

    /// `Top<N>` / `First<N>` result-count marker.
    OptionalLimit {
        keywords: &'static [&'static str],
    },

    /// Split at the last occurrence of `keyword`; the right side becomes a
    /// token of `emits`, the left side continues.
    SplitLastEmitRight {
        keyword: &'static str,
        emits: TokenKind,
        missing: SplitMissing,
    },

    /// Split at the first occurrence of `keyword`; the right side becomes a
    /// token of `emits`, the left side continues.
    SplitFirstEmitRight {
        keyword: &'static str,
        emits: TokenKind,
        missing: SplitMissing,
    },

    /// Whatever remains becomes one token verbatim (skipped when empty).
    TakeRest { emits: TokenKind },

    /// Assert nothing remains; a non-empty remainder is a hard failure.
    FailOnRest { operation: &'static str },
}

///
/// StepOutcome
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum StepOutcome {
    /// Remainder after the step (possibly unchanged).
    Continue(String),
    /// The required prefix did not match; not a candidate.
    NoMatch,
}

impl MatchStep {
    /// Apply this step to the remainder, emitting tokens into `out`.
    pub fn apply(&self, remainder: &str, out: &mut TokenList) -> Result<StepOutcome, TokenError> {
        match self {
            Self::RequiredPrefix { keywords, emits } => {
                match strip_any_prefix(remainder, keywords) {
                    Some((keyword, rest)) => {
                        out.push(MatchToken::new(*emits, keyword));
                        Ok(StepOutcome::Continue(rest.to_string()))
                    }
                    None => Ok(StepOutcome::NoMatch),
                }
            }

            Self::OptionalPrefix { keywords, emits } => {
                match strip_any_prefix(remainder, keywords) {
                    Some((keyword, rest)) => {
                        out.push(MatchToken::new(*emits, keyword));
                        Ok(StepOutcome::Continue(rest.to_string()))
                    }
                    None => Ok(StepOutcome::Continue(remainder.to_string())),
                }
            }

            Self::OptionalSuffix { keywords, emits } => {
                for keyword in *keywords {
                    if let Some(rest) = remainder.strip_suffix(keyword) {
                        out.push(MatchToken::new(*emits, *keyword));
                        return Ok(StepOutcome::Continue(rest.to_string()));
                    }
                }
                Ok(StepOutcome::Continue(remainder.to_string()))
            }

            Self::OptionalLimit { keywords } => apply_limit(remainder, keywords, out),

            Self::SplitLastEmitRight {
                keyword,
                emits,
                missing,
            } => Ok(apply_split(remainder, keyword, *emits, *missing, out, true)),

            Self::SplitFirstEmitRight {
                keyword,
                emits,
                missing,
            } => Ok(apply_split(remainder, keyword, *emits, *missing, out, false)),

            Self::TakeRest { emits } => {
                if !remainder.is_empty() {
                    out.push(MatchToken::new(*emits, remainder));
                }
                Ok(StepOutcome::Continue(String::new()))
            }

            Self::FailOnRest { operation } => {
                if remainder.is_empty() {
                    Ok(StepOutcome::Continue(String::new()))
                } else {
                    Err(TokenError::UnexpectedRemainder {
                        operation: (*operation).to_string(),
                        text: remainder.to_string(),
                    })
                }
            }
        }
    }
}

/// Strip the first matching keyword from the start of `remainder`,
/// requiring a camelCase boundary after the keyword. Keyword sets are
/// expected longest-first.
fn strip_any_prefix<'a>(
    remainder: &'a str,
    keywords: &'static [&'static str],
) -> Option<(&'static str, &'a str)> {
    for keyword in keywords {
        if let Some(rest) = remainder.strip_prefix(keyword)
            && at_boundary(rest)
        {
            return Some((keyword, rest));
        }
    }

    None
}

/// A keyword match only counts when followed by a camelCase boundary:
/// end of input, an uppercase letter, or a digit.
fn at_boundary(rest: &str) -> bool {
    rest.chars()
        .next()
        .is_none_or(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

fn apply_limit(
    remainder: &str,
    keywords: &'static [&'static str],
    out: &mut TokenList,
) -> Result<StepOutcome, TokenError> {
    for keyword in keywords {
        let Some(rest) = remainder.strip_prefix(keyword) else {
            continue;
        };

        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        let after = &rest[digits.len()..];

        if digits.is_empty() {
            // Bare `First`/`Top` means a limit of one, but only at a
            // keyword boundary (`Topics` stays a projection).
            if !after.is_empty() && !after.starts_with(|c: char| c.is_ascii_uppercase()) {
                continue;
            }
            out.push(MatchToken::new(TokenKind::Limit, "1"));
            return Ok(StepOutcome::Continue(after.to_string()));
        }

        if !after.is_empty() && !after.starts_with(|c: char| c.is_ascii_uppercase()) {
            return Err(TokenError::InvalidLimit {
                keyword: (*keyword).to_string(),
                text: rest.to_string(),
            });
        }

        if digits.parse::<u32>().is_err() {
            return Err(TokenError::LimitOverflow {
                keyword: (*keyword).to_string(),
                text: digits,
            });
        }

        out.push(MatchToken::new(TokenKind::Limit, digits));
        return Ok(StepOutcome::Continue(after.to_string()));
    }

    Ok(StepOutcome::Continue(remainder.to_string()))
}

fn apply_split(
    remainder: &str,
    keyword: &str,
    emits: TokenKind,
    missing: SplitMissing,
    out: &mut TokenList,
    last: bool,
) -> StepOutcome {
    // Only occurrences followed by an uppercase letter (or end of input)
    // count; `Bytes` must never split at its leading `By`.
    let mut positions = remainder.match_indices(keyword).map(|(at, _)| at).filter(|at| {
        let right = &remainder[at + keyword.len()..];
        right.is_empty() || right.starts_with(|c: char| c.is_ascii_uppercase())
    });

    let found = if last {
        positions.last()
    } else {
        positions.next()
    };

    match found {
        Some(at) => {
            let left = &remainder[..at];
            let right = &remainder[at + keyword.len()..];
            if !right.is_empty() {
                out.push(MatchToken::new(emits, right));
            }
            StepOutcome::Continue(left.to_string())
        }
        None => match missing {
            SplitMissing::PassThrough => StepOutcome::Continue(remainder.to_string()),
            SplitMissing::EmitRemainder => {
                if !remainder.is_empty() {
                    out.push(MatchToken::new(emits, remainder));
                }
                StepOutcome::Continue(String::new())
            }
        },
    }
}

///
/// TESTS
///
