use clap::Parser;
use std::path::PathBuf;

/// Shared application context for global flags
#[derive(Clone, Debug)]
pub struct AppContext {
    pub quiet: bool,    // global --quiet
    pub no_color: bool, // global --no-color
}

#[derive(Parser)]
#[command(name = "cfx")]
#[command(
    about = "Ask a local LLM to fix a source file, review the diff, then apply it with a backup"
)]
#[command(version, long_about = None)]
pub struct Cli {
    /// The file to analyze and fix
    pub filename: PathBuf,

    /// First line of the segment to fix (1-based, requires --end)
    #[arg(long, requires = "end", conflicts_with_all = ["error", "comments"])]
    pub start: Option<usize>,

    /// Last line of the segment to fix (1-based, requires --start)
    #[arg(long, requires = "start", conflicts_with_all = ["error", "comments"])]
    pub end: Option<usize>,

    /// Error message or failure description to guide the fix
    #[arg(long, conflicts_with = "comments")]
    pub error: Option<String>,

    /// Ask the model to add explanatory comments to the corrected code
    #[arg(long)]
    pub comments: bool,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
