use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueHint};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gpui_linecharts::config::GalleryConfig;
use gpui_linecharts::gallery::{Demo, DemoKind, DemoSettings, initial_demo};
use gpui_linecharts::gpui_backend::run_gallery;

#[derive(Parser, Debug)]
#[command(author, version, about = "Interactive line-chart demo gallery", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Demo to open first, e.g. `multi-series`
    #[arg(short, long)]
    demo: Option<String>,

    /// Render the demo to an SVG file instead of opening a window
    #[arg(long, value_hint = ValueHint::FilePath)]
    export_svg: Option<PathBuf>,

    /// Export width for responsive demos
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Export height for responsive demos
    #[arg(long, default_value_t = 500.0)]
    height: f32,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("gpui_linecharts=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => GalleryConfig::load(path)?,
        None => GalleryConfig::default(),
    };
    if let Some(name) = &args.demo {
        DemoKind::from_name(name)?;
        config.initial_demo = Some(name.clone());
    }

    let Some(path) = args.export_svg else {
        run_gallery(config)?;
        return Ok(());
    };

    let seed = config.resolve_seed();
    let settings = DemoSettings::from_config(&config, seed, Local::now().date_naive());
    let kind = initial_demo(&config);
    info!(demo = kind.name(), seed, "exporting demo");
    let demo = Demo::new(kind, settings)?;
    demo.export_svg(&path, args.width, args.height)
        .with_context(|| format!("exporting {}", kind.name()))?;
    Ok(())
}
