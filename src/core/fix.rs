//! End-to-end fix pipeline: probe, prompt, complete, extract, merge,
//! diff, confirm, persist.
//!
//! The backend and the confirmation prompt are injected so tests can drive
//! the whole pipeline with canned responses and no console or network.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::cli::{AppContext, Cli};
use crate::core::client::{CompletionBackend, LmClient};
use crate::core::extract::extract_code;
use crate::core::merge::splice_range;
use crate::core::prompt::{FixMode, build_messages};
use crate::core::{diff, persist};
use crate::infra::config::{Config, load_config};
use crate::infra::io::SourceFile;

/// Entry point wired to the real HTTP client and console prompt.
pub fn run(args: &Cli, ctx: &AppContext) -> Result<()> {
    let config = load_config()?;
    let client = LmClient::new(&config)?;
    run_with(args, ctx, &config, &client, prompt_confirm)
}

/// Pipeline with injectable backend and confirmation capability.
///
/// `confirm` receives the rendered diff and decides whether to apply; the
/// real implementation reads a single `y`/`N` answer from stdin.
pub fn run_with<B, F>(
    args: &Cli,
    ctx: &AppContext,
    config: &Config,
    backend: &B,
    mut confirm: F,
) -> Result<()>
where
    B: CompletionBackend + ?Sized,
    F: FnMut(&str) -> bool,
{
    // Malformed ranges abort before the probe; no network call happens.
    if let (Some(s), Some(e)) = (args.start, args.end) {
        if s < 1 {
            bail!("Start line must be greater than 0.");
        }
        if s > e {
            bail!("Start line must be less than or equal to end line.");
        }
    }

    if !backend.probe() {
        bail!(
            "LM server not available. Ensure it is running at {}",
            config.base_url
        );
    }

    let source = SourceFile::load(&args.filename)?;
    let mode = FixMode::from_flags(
        args.start,
        args.end,
        args.error.clone(),
        args.comments,
        source.line_count(),
    )?;

    let messages = build_messages(&source, &mode);
    let raw = backend.complete(&messages)?;

    let extracted = extract_code(&raw);
    if extracted.is_empty() {
        println!("No fixes suggested.");
        return Ok(());
    }

    let candidate = match &mode {
        FixMode::Range { start, end } => splice_range(&source.text, &extracted, *start, *end),
        _ => extracted,
    };

    let Some(rendered) = diff::unified(&source.text, &candidate) else {
        println!("No changes detected.");
        return Ok(());
    };

    if !ctx.quiet {
        println!("\nChanges suggested by the model:");
    }
    diff::render(&rendered, ctx.no_color);

    if !confirm(&rendered) {
        println!("Operation cancelled.");
        return Ok(());
    }

    let record =
        persist::backup_and_write(&source.path, &candidate, Path::new(&config.backup_dir))?;

    if ctx.no_color {
        println!(
            "Backup saved to {}. Update successful!",
            record.backup.display()
        );
    } else {
        println!(
            "{} Backup saved to {}. Update successful!",
            "✓".green(),
            record.backup.display()
        );
    }
    Ok(())
}

/// Blocking console confirmation; only an exact (case-insensitive) `y`
/// proceeds, anything else cancels.
fn prompt_confirm(_diff: &str) -> bool {
    print!("\nApply these changes? [y/N]: ");
    let _ = std::io::stdout().flush();

    let mut answer = String::new();
    if std::io::stdin().read_line(&mut answer).is_err() {
        return false;
    }
    answer.trim().eq_ignore_ascii_case("y")
}
