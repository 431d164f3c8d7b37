//! **codefix** - CLI that asks a local LLM to fix a source file behind a
//! diff + confirmation gate
//!
//! Single-shot request/response pipeline against an OpenAI-compatible
//! inference server: build the prompt, extract the returned code, splice it
//! into the file (for range fixes), show a unified diff, then back up and
//! overwrite only after an explicit yes.

/// Command-line interface with clap integration
pub mod cli;

/// Core pipeline - prompt, completion, extraction, merge, diff, persist
pub mod core {
    /// Blocking client for the chat-completion endpoint + health probe
    pub mod client;
    pub use self::client::{CompletionBackend, LmClient};

    /// Unified diff rendering between original and candidate text
    pub mod diff;

    /// Fenced code-block extraction from model responses
    pub mod extract;
    pub use self::extract::extract_code;

    /// End-to-end fix pipeline with injectable backend and confirmation
    pub mod fix;
    pub use self::fix::{run as fix_run, run_with as fix_run_with};

    /// Splicing a corrected segment back into the original line sequence
    pub mod merge;
    pub use self::merge::splice_range;

    /// Backup-then-overwrite persistence for confirmed fixes
    pub mod persist;
    pub use self::persist::{BackupRecord, backup_and_write};

    /// Prompt construction for the four fix task modes
    pub mod prompt;
    pub use self::prompt::{ChatMessage, ChatRole, FixMode, build_messages};
}

/// Infrastructure - configuration and file I/O
pub mod infra {
    /// Configuration management with TOML file + env overrides
    pub mod config;
    pub use self::config::{Config, load_config};

    /// Target-file loading with terminator-preserving line access
    pub mod io;
    pub use self::io::SourceFile;
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli};
pub use self::core::{CompletionBackend, FixMode, LmClient, fix_run, fix_run_with};
pub use infra::{Config, SourceFile, load_config};
