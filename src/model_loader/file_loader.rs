use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::core::error::{ConfigError, Error, Result};
use crate::core::types::AttributeTree;

use super::resolver::{Resolution, resolve_model};

/// The two sections of a `tokenizer.json` this crate reads.
///
/// Normalizer, pre-tokenizer, post-processor and added tokens are left to
/// whoever builds the full pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenizerDocument {
    pub model: Option<AttributeTree>,
    pub decoder: Option<AttributeTree>,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    model: Value,
    #[serde(default)]
    decoder: Value,
}

fn section(value: Value) -> Option<AttributeTree> {
    match AttributeTree::from(value) {
        AttributeTree::Absent => None,
        tree => Some(tree),
    }
}

impl TokenizerDocument {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawDocument = serde_json::from_str(json)?;
        Ok(Self {
            model: section(raw.model),
            decoder: section(raw.decoder),
        })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("read {} bytes from {}", json.len(), path.display());
        let document = Self::from_json_str(&json)?;
        info!(
            "loaded {} (model section: {}, decoder section: {})",
            path.display(),
            document.model.is_some(),
            document.decoder.is_some()
        );
        Ok(document)
    }

    /// Resolves the model section, using the decoder section read-only.
    pub fn resolve_model(&self) -> std::result::Result<Option<Resolution>, ConfigError> {
        resolve_model(self.model.as_ref(), self.decoder.as_ref())
    }
}
