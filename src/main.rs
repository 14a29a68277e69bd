use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use slitscan::SlitScanBuilder;

#[derive(Parser, Debug)]
#[command(
    name = "slitscan",
    version,
    about = "Condense a video into an image of averaged color stripes"
)]
struct Args {
    /// Input video file, or a directory of frame images
    infile: PathBuf,

    /// Output file name relative to input file, can be specified absolute
    #[arg(long, value_name = "PATH")]
    outfile: Option<PathBuf>,

    /// Height of the output slit scan image
    #[arg(long, default_value_t = 400)]
    height: u32,

    /// Number of frames to aggregate into one stripe
    #[arg(long, default_value_t = 5)]
    frame_aggr: u32,

    /// Fail on a frame decode error instead of stopping at it
    #[arg(long)]
    strict: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let builder = SlitScanBuilder::new(args.height, args.frame_aggr)?.strict(args.strict);
    let output = slitscan::render_file(&args.infile, args.outfile.as_deref(), &builder)
        .with_context(|| format!("failed to render {}", args.infile.display()))?;

    log::info!("wrote {}", output.display());
    Ok(())
}
