use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// A target file loaded once at the start of a run.
///
/// Lines keep their original terminators so a later splice can reproduce
/// untouched regions byte-for-byte.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
    pub lang: String,
}

impl SourceFile {
    /// Read the file as UTF-8 and tag it with a language derived from the
    /// extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file {}", path.display()))?;
        let lang = lang_tag(path);

        Ok(Self {
            path: path.to_path_buf(),
            text,
            lang,
        })
    }

    /// Lines with terminators preserved (`split_inclusive`); a trailing
    /// newline does not produce a phantom empty line.
    pub fn lines(&self) -> Vec<&str> {
        self.text.split_inclusive('\n').collect()
    }

    pub fn line_count(&self) -> usize {
        self.lines().len()
    }
}

/// Map a file extension to the fence tag used in prompts.
pub fn lang_tag(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| match ext {
            "rs" => "rust",
            "py" => "python",
            "js" | "jsx" => "javascript",
            "ts" | "tsx" => "typescript",
            "go" => "go",
            "c" | "h" => "c",
            "cpp" | "cxx" | "cc" | "hpp" => "cpp",
            other => other,
        })
        .unwrap_or("txt")
        .to_string()
}
