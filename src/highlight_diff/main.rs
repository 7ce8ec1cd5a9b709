use anyhow::{Context, Result};
use clap::Parser;
use highlight_diff::application::config::DiffConfig;
use highlight_diff::application::diff_service::DiffService;
use highlight_diff::domain::ignore_region::IgnoreRegion;
use highlight_diff::infrastructure::file_storage::LocalFileStorage;
use highlight_diff::infrastructure::image_comparer::DefaultImageComparer;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "highlight_diff")]
#[command(about = "Compares two screenshots and writes a side-by-side image with every changed region outlined")]
struct Args {
    /// Reference ("before") image
    old: PathBuf,

    /// Image compared against the reference
    new: PathBuf,

    /// JSON file with opacity, diff_folder and ignore_regions
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder the merged image is written to (default: diff)
    #[arg(short, long)]
    diff_folder: Option<PathBuf>,

    /// How strongly unchanged areas are dimmed in the blend, 0..=1 (default: 0.85)
    #[arg(long)]
    opacity: Option<f32>,

    /// Inclusive rectangle to ignore; may be repeated
    #[arg(short, long = "ignore", value_name = "X1,Y1,X2,Y2")]
    ignore: Vec<IgnoreRegion>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DiffConfig::load(&LocalFileStorage::new(), path)
            .await
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DiffConfig::default(),
    };
    let config = config.with_overrides(args.diff_folder, args.opacity, args.ignore);
    config.validate()?;

    let service = DiffService::new(Arc::new(DefaultImageComparer::new()));
    let outcome = service
        .process_image_files(&args.old, &args.new, &config)
        .await
        .with_context(|| format!("failed to compare {} and {}", args.old.display(), args.new.display()))?;

    if outcome.output_path.is_none() {
        info!("Images match outside the ignored regions");
    }
    Ok(())
}
