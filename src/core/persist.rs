//! Backup-then-overwrite persistence for a confirmed fix.
//!
//! The original is moved into the backup directory under a sortable
//! to-the-second timestamp, then the candidate text is written to the
//! original path. A failure between the two steps is reported with the
//! backup location so the user can recover by hand; nothing is rolled back
//! automatically.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Local;

/// Where the original ended up after a confirmed apply.
#[derive(Debug, Clone)]
pub struct BackupRecord {
    pub original: PathBuf,
    pub backup: PathBuf,
}

/// Back up `path` into `backup_dir` and replace its contents with
/// `candidate`. Two runs completing within the same second collide on the
/// backup name; accepted risk.
pub fn backup_and_write(path: &Path, candidate: &str, backup_dir: &Path) -> Result<BackupRecord> {
    let Some(basename) = path.file_name() else {
        bail!("target path has no file name: {}", path.display());
    };

    fs::create_dir_all(backup_dir)
        .with_context(|| format!("Failed to create backup dir {}", backup_dir.display()))?;

    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let backup = backup_dir.join(format!("{}.{stamp}.bak", basename.to_string_lossy()));

    fs::rename(path, &backup).with_context(|| {
        format!(
            "Failed to move {} to backup {}",
            path.display(),
            backup.display()
        )
    })?;

    fs::write(path, candidate).with_context(|| {
        format!(
            "Failed to write fixed file {} (original preserved at {})",
            path.display(),
            backup.display()
        )
    })?;

    Ok(BackupRecord {
        original: path.to_path_buf(),
        backup,
    })
}
