use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing_subscriber::EnvFilter;
use xkailive_icon_gen::icon_gen;

#[derive(Debug, Parser)]
#[clap(
    name = "xkailive-icon-gen",
    version,
    about = "Generate the XKAILive app icons (standard, dark and tinted) into ./AppIcon_Generated"
)]
struct Args {}

fn main() -> Result<()> {
    let _args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    icon_gen::ensure_png_support()?;
    icon_gen::generate_icons(Path::new(icon_gen::OUTPUT_DIR))
}
