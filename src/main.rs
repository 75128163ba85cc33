use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use cgui::utils::logging;
use cgui::Config;

/// CGUI - A borderless OpenGL window shell
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Start in fullscreen mode
    #[arg(short, long)]
    fullscreen: bool,

    /// Synchronize buffer swaps with the display refresh
    #[arg(long)]
    vsync: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Window width
    #[arg(long)]
    width: Option<u32>,

    /// Window height
    #[arg(long)]
    height: Option<u32>,

    /// Configuration file to use instead of the user config
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl Args {
    /// Command line flags override every other configuration source
    fn apply(&self, config: &mut Config) {
        if self.fullscreen {
            config.window.fullscreen = true;
        }
        if self.vsync {
            config.render.vsync = true;
        }
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The logger is configured from the config, so failures here go to stderr
    let mut config = Config::load(args.config.as_deref()).inspect_err(|e| eprintln!("{}", e))?;
    args.apply(&mut config);
    config.validate().inspect_err(|e| eprintln!("{}", e))?;

    let log_path = logging::init(&config.general, args.debug);

    info!("Starting CGUI v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = log_path {
        info!("Logging to {}", path.display());
    }

    if let Err(e) = cgui::run(config) {
        error!("{}", e);
        return Err(e.into());
    }

    info!("CGUI shut down cleanly");
    Ok(())
}
