use std::path::PathBuf;
use std::process;

use clap::error::ErrorKind;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use image_process::{Config, ImagePipeline, ProcessOptions, ProcessResult};

#[derive(Parser)]
#[command(
    name = "image-process",
    about = "Batch-resize and watermark a directory of images",
    version,
    after_help = "Example: image-process --inputDir=images --outputDir=result --watermark=logo.png --resize=500\n\n\
                  At least one of --watermark or --resize is required.\n\
                  Outputs are written as processed_<name> in the output directory."
)]
struct Cli {
    /// Directory of source images
    #[arg(long = "inputDir", value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Directory for processed images (created if missing)
    #[arg(long = "outputDir", value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Image composited at (20, 20) onto every output
    #[arg(long, value_name = "FILE")]
    watermark: Option<PathBuf>,

    /// Target length of the longest side, in pixels
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    resize: Option<u32>,

    /// Continue past failing files and report them at the end
    #[arg(short, long)]
    keep_going: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            eprint!("{e}");
            process::exit(1);
        }
    };

    init_logging(&cli);

    info!("Welcome to Image Process v{}", env!("CARGO_PKG_VERSION"));

    let config = match Config::new(cli.input_dir, cli.output_dir, cli.watermark, cli.resize) {
        Ok(c) => c,
        Err(e) => fail(&e),
    };

    let opts = ProcessOptions {
        keep_going: cli.keep_going,
    };

    let pipeline = match ImagePipeline::new(&config) {
        Ok(p) => p,
        Err(e) => fail(&e),
    };

    info!("Starting to process images");

    let report = match pipeline.run(&opts) {
        Ok(r) => r,
        Err(e) => fail(&e),
    };

    for r in report.results.iter().filter(|r| !r.is_success()) {
        print_failure(r);
    }

    let (total, processed, failed) = (
        report.results.len(),
        report.processed_count(),
        report.failed_count(),
    );
    if failed > 0 {
        info!("[Summary] Processed: {processed}, Failed: {failed} (Total: {total})");
    } else if total > 1 {
        info!("[Summary] Processed: {processed} (Total: {total})");
    }

    if failed > 0 {
        process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(err: &image_process::Error) -> ! {
    eprintln!("Error: {err}");
    eprintln!("Check that the arguments are correct.");
    process::exit(1);
}

fn print_failure(result: &ProcessResult) {
    let filename = result.input.file_name().map_or_else(
        || result.input.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    );
    if let Some(err) = &result.error {
        eprintln!("[FAIL] {filename}: {err}");
    }
}
