// Casters from untyped attribute values to the typed shapes the extractors hand out.
// They only read their input; errors name the key or entry index that failed.

use std::collections::HashMap;

use crate::core::error::ConfigError;
use crate::core::types::AttributeTree;

use super::types::{MergeRule, TokenScore, Vocab};

/// Converts a number that must already be a whole, non-negative value into `u32`.
///
/// The source is `f64` because of the generic tree. Truncation toward zero is
/// only accepted when it loses nothing, so `1.5` or `-1` is an error rather
/// than a silently shifted id.
pub fn cast_id(field: &str, value: f64) -> Result<u32, ConfigError> {
    let truncated = value.trunc();
    if truncated != value || truncated < 0.0 || truncated > f64::from(u32::MAX) {
        return Err(ConfigError::mismatch(
            field,
            "non-negative integer id",
            format!("number {value}"),
        ));
    }
    Ok(truncated as u32)
}

/// Converts a non-negative number into `usize`, truncating toward zero.
pub fn cast_count(field: &str, value: f64) -> Result<usize, ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::mismatch(
            field,
            "non-negative integer",
            format!("number {value}"),
        ));
    }
    // `as` truncates toward zero and saturates above usize::MAX.
    Ok(value.trunc() as usize)
}

/// Mapping-form vocabulary: `{"token": id, ...}`.
pub fn cast_vocab(input: &HashMap<String, AttributeTree>) -> Result<Vocab, ConfigError> {
    let mut out = Vocab::with_capacity(input.len());
    for (token, value) in input {
        let id = cast_id(token, value.as_number(token)?)?;
        out.insert(token.clone(), id);
    }
    Ok(out)
}

/// Merge rules in any of the accepted shapes, normalized to `"left right"`.
///
/// `["a", "b"]` entries are joined with one space, `"a b"` strings pass through
/// unchanged once checked to have a non-empty side on each side of a space. Shapes may be mixed within one list. Output keeps input order.
pub fn cast_merges(input: &[AttributeTree]) -> Result<Vec<MergeRule>, ConfigError> {
    input
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let field = format!("merges[{i}]");
            match entry {
                AttributeTree::Text(rule) => match rule.split_once(' ') {
                    Some((left, right)) if !left.is_empty() && !right.is_empty() => Ok(rule.clone()),
                    _ => Err(ConfigError::shape(field, format!("expected \"left right\", found {rule:?}"))),
                },
                AttributeTree::List(pair) => {
                    let [left, right] = pair.as_slice() else {
                        return Err(ConfigError::shape(
                            field,
                            format!("expected a pair of strings, found {} elements", pair.len()),
                        ));
                    };
                    match (left, right) {
                        (AttributeTree::Text(l), AttributeTree::Text(r)) => Ok(format!("{l} {r}")),
                        _ => Err(ConfigError::shape(
                            field,
                            format!("expected a pair of strings, found ({}, {})", left.kind(), right.kind()),
                        )),
                    }
                }
                other => Err(ConfigError::mismatch(field, "string or pair of strings", other.kind())),
            }
        })
        .collect()
}

/// Ordered-pairs vocabulary used by unigram models: `[["token", score], ...]`.
///
/// Order and duplicates are kept as is since the index is the token id.
pub fn cast_scored_vocab(input: &[AttributeTree]) -> Result<Vec<TokenScore>, ConfigError> {
    let mut out = Vec::with_capacity(input.len());
    for (i, entry) in input.iter().enumerate() {
        let field = format!("vocab[{i}]");
        let AttributeTree::List(pair) = entry else {
            return Err(ConfigError::shape(
                field,
                format!("expected a [token, score] pair, found {}", entry.kind()),
            ));
        };
        let token_score = match pair.as_slice() {
            [AttributeTree::Text(token), AttributeTree::Number(score)] => TokenScore {
                token: token.clone(),
                score: *score,
            },
            [first, second] => {
                return Err(ConfigError::shape(
                    field,
                    format!("expected (string, number), found ({}, {})", first.kind(), second.kind()),
                ));
            }
            _ => {
                return Err(ConfigError::shape(
                    field,
                    format!("expected a [token, score] pair, found {} elements", pair.len()),
                ));
            }
        };
        out.push(token_score);
    }
    Ok(out)
}
