use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::error::ConfigError;

/// Token text to id.
pub type Vocab = HashMap<String, u32>;

/// Canonical `"left right"` merge rule. Position in the list is merge priority.
pub type MergeRule = String;

/// One unigram vocabulary entry. Its index in the vocabulary is the token id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenScore {
    pub token: String,
    pub score: f64,
}

/// The four supported model architectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Bpe,
    WordPiece,
    WordLevel,
    Unigram,
}

impl ModelKind {
    /// Name as written in a model section's `type` field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bpe => "BPE",
            Self::WordPiece => "WordPiece",
            Self::WordLevel => "WordLevel",
            Self::Unigram => "Unigram",
        }
    }

    /// Maps a decoder section's `type` to the model architecture it implies.
    pub fn from_decoder_type(decoder_type: &str) -> Option<Self> {
        match decoder_type {
            "ByteLevel" => Some(Self::Bpe),
            "WordPiece" => Some(Self::WordPiece),
            "WordLevel" => Some(Self::WordLevel),
            "Unigram" => Some(Self::Unigram),
            _ => None,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BPE" => Ok(Self::Bpe),
            "WordPiece" => Ok(Self::WordPiece),
            "WordLevel" => Ok(Self::WordLevel),
            "Unigram" => Ok(Self::Unigram),
            other => Err(ConfigError::UnsupportedType(other.to_owned())),
        }
    }
}

/// Validated BPE parameters. `None` means the field was absent from the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BpeSpec {
    pub vocab: Vocab,
    pub merges: Vec<MergeRule>,
    pub dropout: Option<f32>,
    pub unk_token: Option<String>,
    pub continuing_subword_prefix: Option<String>,
    pub end_of_word_suffix: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordPieceSpec {
    pub vocab: Vocab,
    pub unk_token: Option<String>,
    pub continuing_subword_prefix: Option<String>,
    pub max_input_chars_per_word: Option<usize>,
}

/// Word-level parameters. An absent `unk_token` is stored as the empty string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordLevelSpec {
    pub vocab: Vocab,
    pub unk_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnigramSpec {
    pub vocab: Vec<TokenScore>,
    /// Index into `vocab`. Negative values are rejected while reading the
    /// document; the upper bound is checked by the model constructor.
    pub unk_id: Option<usize>,
    pub byte_fallback: bool,
    pub fuse_unk: bool,
}

/// Exactly one architecture's parameters, ready for a model constructor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ModelSpec {
    #[serde(rename = "BPE")]
    Bpe(BpeSpec),
    WordPiece(WordPieceSpec),
    WordLevel(WordLevelSpec),
    Unigram(UnigramSpec),
}

impl ModelSpec {
    pub fn kind(&self) -> ModelKind {
        match self {
            Self::Bpe(_) => ModelKind::Bpe,
            Self::WordPiece(_) => ModelKind::WordPiece,
            Self::WordLevel(_) => ModelKind::WordLevel,
            Self::Unigram(_) => ModelKind::Unigram,
        }
    }

    pub fn vocab_size(&self) -> usize {
        match self {
            Self::Bpe(spec) => spec.vocab.len(),
            Self::WordPiece(spec) => spec.vocab.len(),
            Self::WordLevel(spec) => spec.vocab.len(),
            Self::Unigram(spec) => spec.vocab.len(),
        }
    }
}
