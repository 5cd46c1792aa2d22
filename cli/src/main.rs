//! CLI for Halftone
//!
//! Drives a compiled kernel module over a raw RGBA file: load kernel,
//! validate dimensions, apply the chosen filter through either buffer
//! strategy, write the transformed bytes back out.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use halftone_runtime::KernelRuntime;
use halftone_shared::{pixel_len, Filter};

mod report;

#[derive(Parser, Debug)]
#[command(name = "halftone")]
#[command(about = "WASM image-filtering kernel driver", long_about = None)]
#[command(version)]
struct Args {
    /// Compiled kernel module (.wasm)
    #[arg(short, long)]
    kernel: PathBuf,

    /// Input image as raw interleaved RGBA bytes
    #[arg(short, long)]
    input: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: u32,

    /// Image height in pixels
    #[arg(long)]
    height: u32,

    /// Filter to apply
    #[arg(short, long, value_enum, default_value = "threshold")]
    filter: FilterArg,

    /// Luminance cutoff for the threshold filter
    #[arg(short, long, default_value_t = 0.5)]
    threshold: f32,

    /// Buffer strategy: the kernel's shared frame or a per-image allocation
    #[arg(short, long, value_enum, default_value = "frame")]
    strategy: Strategy,

    /// Output path for the transformed RGBA bytes
    #[arg(short, long)]
    output: PathBuf,

    /// Write a JSON run report
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FilterArg {
    /// Binarize by luminance
    Threshold,
    /// Integer-average grayscale
    Grayscale,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    /// Shared static frame buffer (800x500 capacity)
    Frame,
    /// Exclusively owned allocation sized to the image
    Alloc,
}

impl Strategy {
    fn label(&self) -> &'static str {
        match self {
            Strategy::Frame => "frame",
            Strategy::Alloc => "alloc",
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let expected = pixel_len(args.width, args.height).with_context(|| {
        format!(
            "{}x{} image byte size overflows",
            args.width, args.height
        )
    })?;

    let wasm = fs::read(&args.kernel)
        .with_context(|| format!("Failed to read kernel module {}", args.kernel.display()))?;
    let mut pixels = fs::read(&args.input)
        .with_context(|| format!("Failed to read input image {}", args.input.display()))?;
    if pixels.len() != expected {
        bail!(
            "{} is {} bytes, a {}x{} RGBA image requires {}",
            args.input.display(),
            pixels.len(),
            args.width,
            args.height,
            expected
        );
    }

    let filter = match args.filter {
        FilterArg::Threshold => Filter::Threshold {
            threshold: args.threshold,
        },
        FilterArg::Grayscale => Filter::Grayscale,
    };

    let runtime = KernelRuntime::new()?;
    let mut kernel = runtime.load(&wasm)?;
    info!("Loaded kernel module {}", args.kernel.display());

    let start = Instant::now();
    match args.strategy {
        Strategy::Frame => kernel.apply_in_frame(args.width, args.height, &mut pixels, filter)?,
        Strategy::Alloc => kernel.apply_allocated(args.width, args.height, &mut pixels, filter)?,
    }
    let elapsed = start.elapsed();

    fs::write(&args.output, &pixels)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    info!(
        "Processed {}x{} image ({} bytes) in {:.1?}, wrote {}",
        args.width,
        args.height,
        pixels.len(),
        elapsed,
        args.output.display()
    );

    if let Some(path) = &args.report {
        let run = report::RunReport {
            width: args.width,
            height: args.height,
            filter,
            strategy: args.strategy.label().to_string(),
            bytes: pixels.len(),
            elapsed_ms: elapsed.as_secs_f64() * 1000.0,
        };
        report::write(path, &run)?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
