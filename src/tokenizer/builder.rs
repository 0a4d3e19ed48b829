use log::{debug, warn};
use tokenizers::Tokenizer;
use tokenizers::models::ModelWrapper;
use tokenizers::models::bpe::{BPE, Vocab as HfVocab};
use tokenizers::models::unigram::Unigram;
use tokenizers::models::wordlevel::WordLevel;
use tokenizers::models::wordpiece::WordPiece;

use crate::core::error::{Error, Result};
use crate::model_loader::types::{BpeSpec, ModelSpec, UnigramSpec, Vocab, WordLevelSpec, WordPieceSpec};

fn hf_vocab(vocab: &Vocab) -> HfVocab {
    vocab.iter().map(|(token, id)| (token.clone(), *id)).collect()
}

/// Splits canonical `"left right"` rules back into pairs.
fn split_merges(merges: &[String]) -> Result<Vec<(String, String)>> {
    merges
        .iter()
        .enumerate()
        .map(|(i, rule)| match rule.split_once(' ') {
            Some((left, right)) => Ok((left.to_owned(), right.to_owned())),
            None => Err(Error::Tokenizers(format!(
                "merge rule {i} '{rule}' is not of the form 'left right'"
            ))),
        })
        .collect()
}

fn build_bpe(spec: &BpeSpec) -> Result<BPE> {
    let merges = split_merges(&spec.merges)?;
    let mut builder = BPE::builder().vocab_and_merges(hf_vocab(&spec.vocab), merges);
    if let Some(dropout) = spec.dropout {
        builder = builder.dropout(dropout);
    }
    if let Some(unk) = &spec.unk_token {
        builder = builder.unk_token(unk.clone());
    }
    if let Some(prefix) = &spec.continuing_subword_prefix {
        builder = builder.continuing_subword_prefix(prefix.clone());
    }
    if let Some(suffix) = &spec.end_of_word_suffix {
        builder = builder.end_of_word_suffix(suffix.clone());
    }
    Ok(builder.build()?)
}

fn build_wordpiece(spec: &WordPieceSpec) -> Result<WordPiece> {
    let mut builder = WordPiece::builder().vocab(hf_vocab(&spec.vocab));
    if let Some(unk) = &spec.unk_token {
        builder = builder.unk_token(unk.clone());
    }
    if let Some(prefix) = &spec.continuing_subword_prefix {
        builder = builder.continuing_subword_prefix(prefix.clone());
    }
    if let Some(max_chars) = spec.max_input_chars_per_word {
        builder = builder.max_input_chars_per_word(max_chars);
    }
    Ok(builder.build()?)
}

fn build_wordlevel(spec: &WordLevelSpec) -> Result<WordLevel> {
    Ok(WordLevel::builder()
        .vocab(hf_vocab(&spec.vocab))
        .unk_token(spec.unk_token.clone())
        .build()?)
}

fn build_unigram(spec: &UnigramSpec) -> Result<Unigram> {
    if !spec.fuse_unk {
        // The tokenizers unigram model always fuses consecutive unknowns.
        warn!("fuse_unk = false is not supported by the unigram backend, unknown pieces will be fused");
    }
    let vocab = spec
        .vocab
        .iter()
        .map(|entry| (entry.token.clone(), entry.score))
        .collect();
    Ok(Unigram::from(vocab, spec.unk_id, spec.byte_fallback)?)
}

/// Hands a validated spec to the matching `tokenizers` model constructor.
///
/// Checks that belong to the constructor (merges naming unknown tokens,
/// `unk_id` out of range, empty unigram vocabulary) surface here as
/// [`Error::Tokenizers`].
pub fn build_model(spec: &ModelSpec) -> Result<ModelWrapper> {
    debug!("building {} model with {} vocab entries", spec.kind(), spec.vocab_size());
    let model = match spec {
        ModelSpec::Bpe(bpe) => ModelWrapper::BPE(build_bpe(bpe)?),
        ModelSpec::WordPiece(wp) => ModelWrapper::WordPiece(build_wordpiece(wp)?),
        ModelSpec::WordLevel(wl) => ModelWrapper::WordLevel(build_wordlevel(wl)?),
        ModelSpec::Unigram(unigram) => ModelWrapper::Unigram(build_unigram(unigram)?),
    };
    Ok(model)
}

/// Wraps the built model in a tokenizer with no normalizer, pre-tokenizer or decoder.
pub fn build_tokenizer(spec: &ModelSpec) -> Result<Tokenizer> {
    Ok(Tokenizer::new(build_model(spec)?))
}
