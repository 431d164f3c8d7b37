//! End-to-end pipeline tests with a canned backend and confirmer.

use std::fs;
use std::path::Path;

use anyhow::{Result, bail};
use clap::Parser;
use codefix::cli::{AppContext, Cli};
use codefix::core::client::CompletionBackend;
use codefix::core::fix::run_with;
use codefix::core::prompt::ChatMessage;
use codefix::infra::config::Config;
use tempfile::TempDir;

struct CannedBackend {
    reply: String,
}

impl CompletionBackend for CannedBackend {
    fn probe(&self) -> bool {
        true
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        if messages.len() != 2 {
            bail!("expected exactly one system/user pair");
        }
        Ok(self.reply.clone())
    }
}

fn ctx() -> AppContext {
    AppContext {
        quiet: true,
        no_color: true,
    }
}

fn config_in(dir: &Path) -> Config {
    Config {
        backup_dir: dir.join("_backup").to_string_lossy().into_owned(),
        ..Config::default()
    }
}

#[test]
fn confirmed_range_fix_replaces_only_the_segment() {
    // Given: a.py with 5 lines and a fix for lines 2-3
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("a.py");
    fs::write(&target, "l1\nl2\nl3\nl4\nl5\n").unwrap();

    let backend = CannedBackend {
        reply: "```\nfixed_line2\nfixed_line3\n```".to_string(),
    };
    let args = Cli::parse_from([
        "cfx",
        target.to_str().unwrap(),
        "--start",
        "2",
        "--end",
        "3",
    ]);
    let config = config_in(tmp.path());

    // When: the user confirms
    run_with(&args, &ctx(), &config, &backend, |_| true).unwrap();

    // Then: lines 1, 4, 5 untouched; 2-3 replaced; original backed up
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "l1\nfixed_line2\nfixed_line3\nl4\nl5\n"
    );

    let backups: Vec<_> = fs::read_dir(&config.backup_dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(backups.len(), 1);
    assert_eq!(
        fs::read_to_string(&backups[0]).unwrap(),
        "l1\nl2\nl3\nl4\nl5\n"
    );

    let name = backups[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("a.py."));
    assert!(name.ends_with(".bak"));
}

#[test]
fn confirmed_whole_file_fix_replaces_everything() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("buggy.rs");
    fs::write(&target, "fn main() { println!(\"hi\") }\n").unwrap();

    let backend = CannedBackend {
        reply: "Here is the corrected code:\n```rust\nfn main() {\n    println!(\"hi\");\n}\n```"
            .to_string(),
    };
    let args = Cli::parse_from(["cfx", target.to_str().unwrap()]);
    let config = config_in(tmp.path());

    run_with(&args, &ctx(), &config, &backend, |_| true).unwrap();

    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "fn main() {\n    println!(\"hi\");\n}"
    );
}

#[test]
fn unfenced_reply_falls_back_to_the_trimmed_response() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("a.py");
    fs::write(&target, "print(1\n").unwrap();

    let backend = CannedBackend {
        reply: "  print(1)\n  ".to_string(),
    };
    let args = Cli::parse_from(["cfx", target.to_str().unwrap()]);
    let config = config_in(tmp.path());

    run_with(&args, &ctx(), &config, &backend, |_| true).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "print(1)");
}

#[test]
fn segment_with_different_line_count_still_merges() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("a.py");
    fs::write(&target, "l1\nl2\nl3\nl4\n").unwrap();

    // Two-line span, one-line replacement: warn but proceed
    let backend = CannedBackend {
        reply: "```\ncombined\n```".to_string(),
    };
    let args = Cli::parse_from([
        "cfx",
        target.to_str().unwrap(),
        "--start",
        "2",
        "--end",
        "3",
    ]);
    let config = config_in(tmp.path());

    run_with(&args, &ctx(), &config, &backend, |_| true).unwrap();
    assert_eq!(fs::read_to_string(&target).unwrap(), "l1\ncombined\nl4\n");
}

#[test]
fn range_past_end_of_file_is_rejected_before_any_call() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("a.py");
    fs::write(&target, "l1\nl2\n").unwrap();

    let backend = CannedBackend {
        reply: "```\nx\n```".to_string(),
    };
    let args = Cli::parse_from([
        "cfx",
        target.to_str().unwrap(),
        "--start",
        "1",
        "--end",
        "9",
    ]);
    let config = config_in(tmp.path());

    let err = run_with(&args, &ctx(), &config, &backend, |_| true).unwrap_err();
    assert!(err.to_string().contains("past the end"));
    assert_eq!(fs::read_to_string(&target).unwrap(), "l1\nl2\n");
}

#[test]
fn missing_file_is_a_read_failure() {
    let tmp = TempDir::new().unwrap();
    let target = tmp.path().join("nope.py");

    let backend = CannedBackend {
        reply: String::new(),
    };
    let args = Cli::parse_from(["cfx", target.to_str().unwrap()]);
    let config = config_in(tmp.path());

    let err = run_with(&args, &ctx(), &config, &backend, |_| true).unwrap_err();
    assert!(err.to_string().contains("Failed to read file"));
}
