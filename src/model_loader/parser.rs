// Per-architecture extractors. Each one reads the fields of its table row in
// a tokenizer.json model section and returns a complete spec or the first error.

use crate::core::error::ConfigError;
use crate::core::types::AttributeTree;

use super::convert::{cast_count, cast_merges, cast_scored_vocab, cast_vocab};
use super::types::{BpeSpec, UnigramSpec, Vocab, WordLevelSpec, WordPieceSpec};

fn required_vocab(params: &AttributeTree) -> Result<Vocab, ConfigError> {
    cast_vocab(params.require("vocab")?.as_map("vocab")?)
}

/// `vocab` and `merges` are required; the four optional fields stay `None`
/// when absent.
pub fn parse_bpe(params: &AttributeTree) -> Result<BpeSpec, ConfigError> {
    let dropout = params.opt_number("dropout")?.map(|p| p as f32);
    let unk_token = params.opt_text("unk_token")?;
    let continuing_subword_prefix = params.opt_text("continuing_subword_prefix")?;
    let end_of_word_suffix = params.opt_text("end_of_word_suffix")?;

    let vocab = required_vocab(params)?;
    let merges = cast_merges(params.require("merges")?.as_list("merges")?)?;

    Ok(BpeSpec {
        vocab,
        merges,
        dropout,
        unk_token,
        continuing_subword_prefix,
        end_of_word_suffix,
    })
}

pub fn parse_wordpiece(params: &AttributeTree) -> Result<WordPieceSpec, ConfigError> {
    let unk_token = params.opt_text("unk_token")?;
    let continuing_subword_prefix = params.opt_text("continuing_subword_prefix")?;
    let max_input_chars_per_word = params
        .opt_number("max_input_chars_per_word")?
        .map(|n| cast_count("max_input_chars_per_word", n))
        .transpose()?;

    Ok(WordPieceSpec {
        vocab: required_vocab(params)?,
        unk_token,
        continuing_subword_prefix,
        max_input_chars_per_word,
    })
}

pub fn parse_wordlevel(params: &AttributeTree) -> Result<WordLevelSpec, ConfigError> {
    let unk_token = params.opt_text("unk_token")?.unwrap_or_default();

    Ok(WordLevelSpec {
        vocab: required_vocab(params)?,
        unk_token,
    })
}

/// Unigram reads the ordered `[token, score]` vocabulary. `fuse_unk` defaults
/// to `true` and `byte_fallback` to `false`.
pub fn parse_unigram(params: &AttributeTree) -> Result<UnigramSpec, ConfigError> {
    let unk_id = params
        .opt_number("unk_id")?
        .map(|n| cast_count("unk_id", n))
        .transpose()?;
    let byte_fallback = params.opt_bool("byte_fallback")?.unwrap_or(false);
    let fuse_unk = params.opt_bool("fuse_unk")?.unwrap_or(true);

    let vocab = cast_scored_vocab(params.require("vocab")?.as_list("vocab")?)?;

    Ok(UnigramSpec {
        vocab,
        unk_id,
        byte_fallback,
        fuse_unk,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model_loader::types::TokenScore;
    use serde_json::json;

    fn tree(value: serde_json::Value) -> AttributeTree {
        AttributeTree::from(value)
    }

    #[test]
    fn test_bpe_optionals_absent_stay_none() {
        let spec = parse_bpe(&tree(json!({"vocab": {"a": 0}, "merges": []}))).unwrap();
        assert_eq!(spec.dropout, None);
        assert_eq!(spec.unk_token, None);
        assert_eq!(spec.continuing_subword_prefix, None);
        assert_eq!(spec.end_of_word_suffix, None);
    }

    #[test]
    fn test_bpe_reads_every_optional() {
        let spec = parse_bpe(&tree(json!({
            "type": "BPE",
            "dropout": 0.1,
            "unk_token": "<unk>",
            "continuing_subword_prefix": "",
            "end_of_word_suffix": "</w>",
            "vocab": {"a": 0, "b": 1, "ab": 2},
            "merges": [["a", "b"]]
        })))
        .unwrap();
        assert_eq!(spec.dropout, Some(0.1));
        assert_eq!(spec.unk_token.as_deref(), Some("<unk>"));
        // empty but present
        assert_eq!(spec.continuing_subword_prefix.as_deref(), Some(""));
        assert_eq!(spec.end_of_word_suffix.as_deref(), Some("</w>"));
        assert_eq!(spec.merges, vec!["a b"]);
        assert_eq!(spec.vocab.len(), 3);
    }

    #[test]
    fn test_bpe_missing_required_fields() {
        let err = parse_bpe(&tree(json!({"merges": []}))).unwrap_err();
        assert_eq!(err, ConfigError::MissingField("vocab".into()));

        let err = parse_bpe(&tree(json!({"vocab": {}}))).unwrap_err();
        assert_eq!(err, ConfigError::MissingField("merges".into()));
    }

    #[test]
    fn test_bpe_propagates_caster_errors() {
        let err = parse_bpe(&tree(json!({"vocab": {}, "merges": [["a"]]}))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape { ref field, .. } if field == "merges[0]"));

        let err = parse_bpe(&tree(json!({"vocab": [], "merges": []}))).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "vocab"));
    }

    #[test]
    fn test_wordpiece_forwards_continuing_subword_prefix() {
        let spec = parse_wordpiece(&tree(json!({
            "unk_token": "[UNK]",
            "continuing_subword_prefix": "@@",
            "max_input_chars_per_word": 100,
            "vocab": {"[UNK]": 0, "a": 1, "@@b": 2}
        })))
        .unwrap();
        assert_eq!(spec.continuing_subword_prefix.as_deref(), Some("@@"));
        assert_eq!(spec.unk_token.as_deref(), Some("[UNK]"));
        assert_eq!(spec.max_input_chars_per_word, Some(100));
    }

    #[test]
    fn test_wordpiece_max_chars_truncates() {
        let spec = parse_wordpiece(&tree(json!({"max_input_chars_per_word": 7.9, "vocab": {}}))).unwrap();
        assert_eq!(spec.max_input_chars_per_word, Some(7));
        assert_eq!(spec.unk_token, None);
        assert_eq!(spec.continuing_subword_prefix, None);
    }

    #[test]
    fn test_wordpiece_requires_vocab() {
        let err = parse_wordpiece(&tree(json!({"unk_token": "[UNK]"}))).unwrap_err();
        assert_eq!(err, ConfigError::MissingField("vocab".into()));
    }

    #[test]
    fn test_wordlevel_unk_defaults_to_empty() {
        let spec = parse_wordlevel(&tree(json!({"vocab": {"a": 0}}))).unwrap();
        assert_eq!(spec.unk_token, "");

        let spec = parse_wordlevel(&tree(json!({"vocab": {"a": 0}, "unk_token": "<unk>"}))).unwrap();
        assert_eq!(spec.unk_token, "<unk>");
    }

    #[test]
    fn test_unigram_defaults() {
        let spec = parse_unigram(&tree(json!({"vocab": [["<unk>", 0.0]]}))).unwrap();
        assert!(spec.fuse_unk);
        assert!(!spec.byte_fallback);
        assert_eq!(spec.unk_id, None);
    }

    #[test]
    fn test_unigram_flags_are_independent() {
        let spec = parse_unigram(&tree(json!({"vocab": [], "fuse_unk": false}))).unwrap();
        assert!(!spec.fuse_unk);
        assert!(!spec.byte_fallback);

        let spec = parse_unigram(&tree(json!({"vocab": [], "byte_fallback": true}))).unwrap();
        assert!(spec.fuse_unk);
        assert!(spec.byte_fallback);
    }

    #[test]
    fn test_unigram_reads_unk_id_and_ordered_vocab() {
        let spec = parse_unigram(&tree(json!({
            "unk_id": 0,
            "vocab": [["<unk>", 0.0], ["▁a", -1.2]]
        })))
        .unwrap();
        assert_eq!(spec.unk_id, Some(0));
        assert_eq!(spec.vocab[1], TokenScore { token: "▁a".into(), score: -1.2 });
    }

    #[test]
    fn test_unigram_negative_unk_id_is_rejected() {
        let err = parse_unigram(&tree(json!({"unk_id": -1, "vocab": [["a", 0.0]]}))).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "unk_id"));

        // upper bound is left to the constructor
        let spec = parse_unigram(&tree(json!({"unk_id": 9, "vocab": [["a", 0.0]]}))).unwrap();
        assert_eq!(spec.unk_id, Some(9));
    }

    #[test]
    fn test_unigram_vocab_errors() {
        let err = parse_unigram(&tree(json!({"unk_id": 0}))).unwrap_err();
        assert_eq!(err, ConfigError::MissingField("vocab".into()));

        let err = parse_unigram(&tree(json!({"vocab": [["a"]]}))).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape { .. }));

        // mapping-form vocab is the wrong kind for unigram
        let err = parse_unigram(&tree(json!({"vocab": {"a": 0}}))).unwrap_err();
        assert!(matches!(err, ConfigError::TypeMismatch { ref field, .. } if field == "vocab"));
    }
}
