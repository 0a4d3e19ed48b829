//! Resolves the `model` section of a Hugging Face style `tokenizer.json` into
//! one validated parameter bundle for BPE, WordPiece, WordLevel or Unigram.
//!
//! ```no_run
//! use tokenizer_model_config::{TokenizerDocument, build_model};
//!
//! # fn main() -> tokenizer_model_config::Result<()> {
//! let document = TokenizerDocument::from_file("tokenizer.json")?;
//! if let Some(resolution) = document.resolve_model()? {
//!     let model = build_model(&resolution.spec)?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod model_loader;
pub mod tokenizer;

pub use crate::core::error::{ConfigError, Error, Result};
pub use crate::core::types::AttributeTree;
pub use model_loader::{
    BpeSpec, KindSource, MergeRule, ModelKind, ModelSpec, Resolution, TokenScore, TokenizerDocument, UnigramSpec,
    Vocab, WordLevelSpec, WordPieceSpec, resolve_model,
};
pub use tokenizer::{build_model, build_tokenizer};
