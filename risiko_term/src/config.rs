use std::path::PathBuf;

use clap::Parser;

/// Risiko, the board game of strategic conquest, played at the terminal.
#[derive(Debug, Clone, Parser)]
#[command(name = "risiko", version, about)]
pub struct Config {
    /// Directory holding saved games
    #[arg(long, env = "RISIKO_SAVES_DIR", default_value = "saves")]
    pub saves_dir: PathBuf,

    /// Directory holding game logs and the game counter
    #[arg(long, env = "RISIKO_LOGS_DIR", default_value = "logs")]
    pub logs_dir: PathBuf,

    /// Seed for new games; random when absent
    #[arg(long, env = "RISIKO_SEED")]
    pub seed: Option<u64>,

    /// Print without colors or text styles
    #[arg(long)]
    pub plain: bool,
}
