//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;

/// Tile swap - drag the tiles back into place to rebuild the picture
#[derive(Parser, Debug)]
#[command(name = "tile-swap")]
#[command(about = "Terminal image-swap puzzle", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Shuffle seed; the same seed always deals the same board.
    /// Defaults to a clock-derived seed.
    #[arg(long)]
    pub seed: Option<u32>,

    /// Where trace logs go (the terminal is busy drawing the board).
    #[arg(long, default_value = "tile-swap.log")]
    pub log_file: PathBuf,
}
