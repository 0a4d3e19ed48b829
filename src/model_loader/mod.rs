// Document loading
pub mod file_loader;

// Typed parameter bundles
pub mod types;

// Casters, extractors, and the kind resolver
pub mod convert;
pub mod parser;
pub mod resolver;

pub use file_loader::TokenizerDocument;
pub use resolver::{KindSource, Resolution, resolve_model};
pub use types::{BpeSpec, MergeRule, ModelKind, ModelSpec, TokenScore, UnigramSpec, Vocab, WordLevelSpec, WordPieceSpec};
