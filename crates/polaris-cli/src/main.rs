use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use polaris_core::consts::{
    DEFAULT_LENGTH_TOLERANCE, DEFAULT_MIN_LINE_LENGTH, DEFAULT_PERCENT_STARS_REQUIRED,
    DEFAULT_STAR_COUNT, DEFAULT_STAR_DIST_CUTOFF, DEFAULT_SUBSAMPLE, THRESHOLD_AUTO,
};
use polaris_core::pipeline::{run_stack, StackConfig};

#[derive(Parser)]
#[command(name = "polaris", about = "Star-aligned astrophotography stacker")]
#[command(version)]
struct Cli {
    /// Input images of the same sky region (two or more)
    #[arg(required = true, num_args = 2..)]
    images: Vec<PathBuf>,

    /// Subsample factor applied when loading frames
    #[arg(short = 's', long, default_value_t = DEFAULT_SUBSAMPLE)]
    subsample: f64,

    /// Shortest star-pair line admitted into matching, in pixels
    #[arg(short = 'l', long, default_value_t = DEFAULT_MIN_LINE_LENGTH)]
    min_line_length: f64,

    /// Percentage of stars that must match for an alignment to count
    #[arg(short = 'p', long, default_value_t = DEFAULT_PERCENT_STARS_REQUIRED)]
    percent_stars: u32,

    /// Relative length tolerance when pairing lines
    #[arg(short = 't', long, default_value_t = DEFAULT_LENGTH_TOLERANCE)]
    tolerance: f64,

    /// Maximum pixel distance at which a star counts as matched
    #[arg(short = 'd', long, default_value_t = DEFAULT_STAR_DIST_CUTOFF)]
    dist_cutoff: f64,

    /// Target star count per frame for the adaptive thresholder
    #[arg(short = 'c', long, default_value_t = DEFAULT_STAR_COUNT)]
    star_count: usize,

    /// Output file path
    #[arg(short = 'o', long, default_value = "stacked.png")]
    output: PathBuf,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

fn main() {
    // Usage errors exit with code 1, matching the load-error path.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = StackConfig {
        threshold: THRESHOLD_AUTO,
        subsample: cli.subsample,
        min_line_length: cli.min_line_length,
        relative_length_tolerance: cli.tolerance,
        percent_stars_required: cli.percent_stars,
        star_dist_cutoff: cli.dist_cutoff,
        star_count: cli.star_count,
        outfile: Some(cli.output.clone()),
    };

    let pb = ProgressBar::new(cli.images.len() as u64 - 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Aligning [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    let (_, summary) = run_stack(&cli.images, &config, |done| {
        pb.set_position(done as u64);
    })
    .with_context(|| "stacking failed")?;
    pb.finish();

    println!(
        "Stacked {} of {} frames ({} dropped, {} reference stars, threshold {})",
        summary.stacked,
        cli.images.len(),
        summary.dropped,
        summary.reference_stars,
        summary.final_threshold
    );
    println!("Saved to {}", cli.output.display());

    Ok(())
}
