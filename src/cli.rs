use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "posterctl")]
#[command(author, version, about = "Selects preferred-provider posters for Plex library items")]
pub struct Cli {
    /// Operate on a single item by its Plex rating key
    #[arg(long = "rating_key", value_name = "KEY")]
    pub rating_key: Option<u64>,

    /// Operate on every item in the named library section
    #[arg(long, value_name = "NAME")]
    pub library: Option<String>,

    /// Also process items whose poster field is locked
    #[arg(long = "include_locked")]
    pub include_locked: bool,

    /// Preview changes without applying them
    #[arg(long)]
    pub dry_run: bool,

    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
