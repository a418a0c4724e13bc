//! Facecrop: batch face detection and cropping.
//!
//! Facecrop walks a folder of images, runs a pretrained face detector over
//! each one, and writes cropped (optionally resized) face images to an
//! output folder. One bad image never aborts the batch; only setup errors
//! and a user interrupt do.
//!
//! # Modules
//!
//! - [`geometry`]: Bounding box and crop region types
//! - [`detect`]: The detector trait and the bundled SeetaFace backend
//! - [`pipeline`]: Confidence filter, box expansion, crop extraction
//! - [`batch`]: Sequential batch driver and structured reporting
//! - [`error`]: Error types for facecrop operations

pub mod batch;
pub mod detect;
pub mod error;
pub mod geometry;
pub mod model;
pub mod pipeline;
pub mod scan;

use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use clap::{ArgAction, Parser};
use tracing::warn;

use crate::batch::BatchOptions;
use crate::detect::RustfaceDetector;

pub use error::FacecropError;

/// The facecrop CLI application.
#[derive(Parser)]
#[command(name = "facecrop")]
#[command(version, author, about)]
struct Cli {
    /// Input folder to scan for images.
    #[arg(long)]
    input: PathBuf,

    /// Confidence threshold for keeping detections (exclusive lower bound).
    #[arg(long, default_value_t = 0.85)]
    threshold: f64,

    /// Output folder for cropped faces (created if absent).
    #[arg(long, default_value = "faces_output")]
    output: PathBuf,

    /// Side length of cropped faces (only applies with --resize).
    #[arg(long, default_value_t = 256)]
    size: u32,

    /// Resize each crop to a size x size square.
    #[arg(long)]
    resize: bool,

    /// Recurse into subdirectories when searching for images.
    #[arg(
        long,
        default_value_t = true,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    recursive: bool,

    /// Reject face boxes narrower or shorter than this many pixels.
    #[arg(long, alias = "minimum_size", default_value_t = 96)]
    minimum_size: u32,

    /// Grow each kept box by this factor of its width/height before cropping.
    #[arg(long, alias = "extend_box", default_value_t = 1.25)]
    extend_box: f64,

    /// Path to the SeetaFace detection model (downloaded there if absent).
    #[arg(long, default_value = model::DEFAULT_MODEL_PATH)]
    model: PathBuf,

    /// Batch report format ('text' or 'json').
    #[arg(long, default_value = "text")]
    report: String,
}

/// Run the facecrop CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`. Setup
/// errors (missing input folder, model download/load failure) and a user
/// interrupt return `Err`; per-image failures are reported but keep the
/// result `Ok`.
pub fn run() -> Result<(), FacecropError> {
    init_tracing();
    let cli = Cli::parse();

    if !cli.input.is_dir() {
        return Err(FacecropError::InputDirMissing { path: cli.input });
    }

    model::ensure_model(&cli.model)?;
    let detector = RustfaceDetector::from_file(&cli.model)?;

    let images = scan::find_images(&cli.input, cli.recursive)?;
    println!("Found {} image(s)", images.len());

    fs::create_dir_all(&cli.output)?;

    let interrupt = Arc::new(AtomicBool::new(false));
    {
        let flag = Arc::clone(&interrupt);
        if let Err(source) = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst)) {
            warn!(%source, "could not install interrupt handler");
        }
    }

    let opts = BatchOptions {
        threshold: cli.threshold,
        extend_box: cli.extend_box,
        minimum_size: cli.minimum_size,
        resize: cli.resize.then_some(cli.size),
        output_dir: cli.output.clone(),
    };

    let report = batch::run_batch(&detector, &images, &opts, &interrupt)?;

    match cli.report.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print!("{report}"),
    }

    Ok(())
}

/// Initialize the global tracing subscriber.
///
/// Uses the standard `RUST_LOG` environment filter; without it only errors
/// are shown, which keeps the default batch output to the progress bar and
/// the final summary.
fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
