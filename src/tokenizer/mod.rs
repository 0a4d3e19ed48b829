/// Model constructors for resolved specs
///
/// Turns a validated `ModelSpec` into a runtime model from the Hugging Face
/// `tokenizers` crate.
pub mod builder;

pub use builder::{build_model, build_tokenizer};
