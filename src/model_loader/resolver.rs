use log::{debug, info};

use crate::core::error::ConfigError;
use crate::core::types::AttributeTree;

use super::parser::{parse_bpe, parse_unigram, parse_wordlevel, parse_wordpiece};
use super::types::{ModelKind, ModelSpec};

/// Where the chosen architecture came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSource {
    /// The model section's own `type` field.
    Explicit,
    /// Guessed from the sibling decoder section's `type`.
    Decoder,
    /// Nothing said otherwise, BPE was assumed.
    Default,
}

/// A resolved model section.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub spec: ModelSpec,
    pub source: KindSource,
}

impl Resolution {
    pub fn kind(&self) -> ModelKind {
        self.spec.kind()
    }

    pub fn into_spec(self) -> ModelSpec {
        self.spec
    }
}

/// One step of the kind-selection chain. `Ok(None)` passes to the next step.
type Strategy = fn(&AttributeTree, Option<&AttributeTree>) -> Result<Option<ModelKind>, ConfigError>;

/// Tried in order; the first definitive answer wins. When none answers the
/// model is assumed to be BPE.
const STRATEGIES: &[(KindSource, Strategy)] = &[
    (KindSource::Explicit, explicit_type),
    (KindSource::Decoder, decoder_type),
];

fn explicit_type(model: &AttributeTree, _decoder: Option<&AttributeTree>) -> Result<Option<ModelKind>, ConfigError> {
    model
        .opt_text("type")?
        .map(|typ| typ.parse::<ModelKind>())
        .transpose()
}

fn decoder_type(_model: &AttributeTree, decoder: Option<&AttributeTree>) -> Result<Option<ModelKind>, ConfigError> {
    let Some(decoder) = decoder else {
        return Ok(None);
    };
    let kind = match decoder.get("type") {
        AttributeTree::Text(typ) => {
            let kind = ModelKind::from_decoder_type(typ);
            if kind.is_none() {
                debug!("decoder type '{}' does not imply a model type", typ);
            }
            kind
        }
        AttributeTree::Absent => None,
        other => {
            debug!("decoder type is a {}, ignoring it", other.kind());
            None
        }
    };
    Ok(kind)
}

fn default_bpe() -> ModelKind {
    info!("there is no field 'type' in the model section, trying to create a default BPE model");
    ModelKind::Bpe
}

/// Picks the architecture for a model section, which must be a map.
pub fn resolve_kind(
    model: &AttributeTree,
    decoder: Option<&AttributeTree>,
) -> Result<(ModelKind, KindSource), ConfigError> {
    model.as_map("model")?;
    for (source, strategy) in STRATEGIES {
        if let Some(kind) = strategy(model, decoder)? {
            debug!("model type {} resolved from {:?}", kind, source);
            return Ok((kind, *source));
        }
    }
    Ok((default_bpe(), KindSource::Default))
}

/// Runs the extractor for an already known architecture.
pub fn extract(kind: ModelKind, model: &AttributeTree) -> Result<ModelSpec, ConfigError> {
    let spec = match kind {
        ModelKind::Bpe => ModelSpec::Bpe(parse_bpe(model)?),
        ModelKind::WordPiece => ModelSpec::WordPiece(parse_wordpiece(model)?),
        ModelKind::WordLevel => ModelSpec::WordLevel(parse_wordlevel(model)?),
        ModelKind::Unigram => ModelSpec::Unigram(parse_unigram(model)?),
    };
    Ok(spec)
}

/// Resolves a model section into exactly one validated spec.
///
/// An absent model section is not an error and yields `Ok(None)`. The decoder
/// section is only consulted for its `type` when the model has none.
pub fn resolve_model(
    model: Option<&AttributeTree>,
    decoder: Option<&AttributeTree>,
) -> Result<Option<Resolution>, ConfigError> {
    let Some(model) = model.filter(|m| !m.is_absent()) else {
        debug!("no model section, nothing to resolve");
        return Ok(None);
    };
    let (kind, source) = resolve_kind(model, decoder)?;
    let spec = extract(kind, model)?;
    Ok(Some(Resolution { spec, source }))
}
