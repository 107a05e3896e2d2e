//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cardpack - open card packs and inspect their odds
#[derive(Parser, Debug)]
#[command(name = "cardpack")]
#[command(version)]
#[command(about = "Weighted card-pack draw engine", long_about = None)]
pub struct Cli {
    /// Directory holding default.toml and environment overrides
    #[arg(long = "config-dir", global = true, default_value = "./config")]
    pub config_dir: PathBuf,

    /// Pretty-print JSON output
    #[arg(long = "pretty", global = true)]
    pub pretty: bool,

    /// Write published events to stderr as JSON lines (broadcast publisher only)
    #[arg(long = "events", global = true)]
    pub events: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open one pack
    Draw {
        /// Pack key
        pack_id: String,
    },

    /// List recent draws of a pack, newest first
    ///
    /// The memory backend keeps draws only for the life of one process, so a
    /// fresh `history` run there always comes back empty. Use
    /// `database.backend = "mysql"` to see draws from earlier runs.
    History {
        /// Pack key
        pack_id: String,

        /// Number of draws to return
        #[arg(short = 'n', long = "limit")]
        limit: Option<u32>,
    },

    /// Show the drop chance of every rate in a pack
    Odds {
        /// Pack key
        pack_id: String,
    },
}

impl Command {
    /// The pack the command targets.
    #[must_use]
    pub fn pack_id(&self) -> &str {
        match self {
            Self::Draw { pack_id } | Self::History { pack_id, .. } | Self::Odds { pack_id } => {
                pack_id
            }
        }
    }
}
