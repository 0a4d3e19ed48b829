use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use tokenizer_model_config::{ModelSpec, Resolution, TokenizerDocument, build_tokenizer};

/// Inspect the model section of a tokenizer.json
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the tokenizer.json file
    path: PathBuf,

    /// Print the resolved parameters as JSON
    #[arg(long)]
    json: bool,

    /// Also build the runtime model and report its vocabulary size
    #[arg(long)]
    build: bool,
}

fn summary(resolution: &Resolution) -> String {
    let merges = match &resolution.spec {
        ModelSpec::Bpe(bpe) => format!(", {} merges", bpe.merges.len()),
        ModelSpec::WordPiece(_) | ModelSpec::WordLevel(_) | ModelSpec::Unigram(_) => String::new(),
    };
    format!(
        "{} model (type from {:?}), {} vocab entries{}",
        resolution.kind(),
        resolution.source,
        resolution.spec.vocab_size(),
        merges
    )
}

fn run(args: &Args) -> tokenizer_model_config::Result<()> {
    let document = TokenizerDocument::from_file(&args.path)?;
    let Some(resolution) = document.resolve_model()? else {
        println!("no model section");
        return Ok(());
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&resolution.spec)?);
    } else {
        println!("{}", summary(&resolution));
    }

    if args.build {
        let tokenizer = build_tokenizer(&resolution.spec)?;
        info!("runtime model built");
        println!("runtime vocab size: {}", tokenizer.get_vocab_size(false));
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}: {}", args.path.display(), err);
            ExitCode::FAILURE
        }
    }
}
