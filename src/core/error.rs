use std::path::PathBuf;

use thiserror::Error;

/// Result type used by the loading and construction layers.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failures while turning a model section into a typed parameter bundle.
///
/// Every variant names the field (or `merges[i]` / `vocab[i]` entry) it is about,
/// so a caller can point the user at the exact spot of the document to fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required field is absent.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A field is present but holds the wrong kind of value.
    #[error("field `{field}`: expected {expected}, found {actual}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: String,
    },

    /// A field has the right kind but the wrong structure (list length, element kinds).
    #[error("field `{field}` has an invalid shape: {reason}")]
    InvalidShape { field: String, reason: String },

    /// An explicit model `type` outside the four supported architectures.
    #[error("unsupported model type `{0}`, expected one of BPE, WordPiece, WordLevel, Unigram")]
    UnsupportedType(String),
}

impl ConfigError {
    pub(crate) fn mismatch(field: impl Into<String>, expected: &'static str, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            actual: actual.into(),
        }
    }

    pub(crate) fn shape(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-level error covering document loading and model construction.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("io error while reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid tokenizer json: {0}")]
    Json(#[from] serde_json::Error),

    /// Error bubbled up from the `tokenizers` model builders.
    #[error("huggingface tokenizers error: {0}")]
    Tokenizers(String),
}

impl From<tokenizers::Error> for Error {
    fn from(err: tokenizers::Error) -> Self {
        Self::Tokenizers(err.to_string())
    }
}
