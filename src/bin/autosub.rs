use std::fs;
use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use tracing::warn;

use autosub::autosub::Autosub;
use autosub::lang::normalize_language;
use autosub::models::{self, lookup_model};
use autosub::opts::TranscribeOpts;
use autosub::plan::build_plan;
use autosub::task::Task;

#[derive(Parser, Debug)]
#[command(name = "autosub")]
#[command(about = "Transcribe videos and audio into SRT subtitles with Whisper")]
struct Args {
    /// Video or audio files (or directories containing them) to transcribe.
    #[arg(value_name = "INPUTS")]
    inputs: Vec<PathBuf>,

    /// Directory to save outputs. Defaults to the directory of each input.
    #[arg(short = 'o', long)]
    output_dir: Option<PathBuf>,

    /// Search directories recursively for media files.
    #[arg(short = 'r', long, default_value_t = false)]
    recursive: bool,

    /// Whisper model to use.
    #[arg(short = 'm', long, default_value = "small")]
    model: String,

    /// Directory holding model weights. Defaults to $AUTOSUB_WHISPER_ROOT
    /// or the user cache directory.
    #[arg(long, value_name = "DIR")]
    model_dir: Option<PathBuf>,

    /// Use the GPU for inference (requires a GPU-enabled build).
    #[arg(short = 'g', long, default_value_t = false)]
    gpu: bool,

    /// Perform X->X speech recognition or X->English translation.
    #[arg(short = 't', long, value_enum, default_value_t = Task::Transcribe)]
    task: Task,

    /// Language of the input audio (code or English name), or 'auto' to detect.
    #[arg(short = 'l', long, default_value = "auto")]
    language: String,

    /// Initial prompt for the transcription, to prime the model with names or jargon.
    #[arg(short = 'p', long)]
    initial_prompt: Option<String>,

    /// Overwrite existing subtitle and video outputs.
    #[arg(long, default_value_t = false)]
    overwrite: bool,

    /// Print progress and debug messages.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,

    /// Burn the subtitles into a copy of each video after transcribing.
    #[arg(short = 'e', long, default_value_t = false)]
    embed: bool,

    /// List available Whisper models and exit.
    #[arg(long, default_value_t = false)]
    list_models: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    autosub::logging::init(args.verbose);

    if args.list_models {
        println!("Available Whisper models:");
        for name in models::model_names() {
            println!("  {name}");
        }
        return Ok(());
    }

    let spec = lookup_model(&args.model)?;

    let mut language = normalize_language(&args.language)?;
    if models::is_english_only(&args.model) && language.as_deref() != Some("en") {
        warn!(
            model = %args.model,
            "english-only model requested; forcing language to English"
        );
        language = Some("en".to_string());
    }

    if let Some(dir) = &args.output_dir {
        fs::create_dir_all(dir)?;
    }

    let jobs = build_plan(&args.inputs, args.output_dir.as_deref(), args.recursive)?;

    let root = models::resolve_model_root(args.model_dir.as_deref());
    let model_path = models::ensure_model(spec, &root)?;

    let opts = TranscribeOpts {
        task: args.task,
        language,
        initial_prompt: args.initial_prompt.clone(),
        verbose: args.verbose,
    };

    let mut pipeline = Autosub::new(&model_path, args.gpu, opts)?;
    let summary = pipeline.run(&jobs, args.overwrite, args.embed);

    if !summary.is_clean() {
        eprintln!("{} file(s) failed:", summary.failures.len());
        for (path, err) in &summary.failures {
            eprintln!("  {}: {err}", path.display());
        }
        bail!("{} of {} file(s) failed", summary.failures.len(), jobs.len());
    }

    Ok(())
}
