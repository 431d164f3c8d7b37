//! Prompt construction for the four fix task modes.
//!
//! Exactly one mode is active per invocation; the CLI layer enforces mutual
//! exclusion, and [`FixMode::from_flags`] re-validates before any network
//! call happens.

use anyhow::{Result, bail};
use serde::Serialize;

use crate::infra::io::SourceFile;

/// Role of a chat message on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

/// One message of the two-message instruction pair.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Which fix task to ask of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixMode {
    /// Fix the entire file
    Whole,
    /// Fix only the 1-based inclusive [start, end] segment
    Range { start: usize, end: usize },
    /// Fix the file guided by a caller-supplied error description
    ErrorGuided(String),
    /// Fix the file and annotate the result with explanatory comments
    Annotated,
}

impl FixMode {
    /// Build a mode from the optional CLI inputs, rejecting ambiguous
    /// combinations and malformed ranges.
    pub fn from_flags(
        start: Option<usize>,
        end: Option<usize>,
        error: Option<String>,
        comments: bool,
        line_count: usize,
    ) -> Result<Self> {
        let range = match (start, end) {
            (Some(s), Some(e)) => Some((s, e)),
            (None, None) => None,
            _ => bail!("Both --start and --end must be provided together."),
        };

        // clap already forbids combining the flags; keep the gate here too so
        // library callers get the same diagnostic.
        let picked = usize::from(range.is_some())
            + usize::from(error.is_some())
            + usize::from(comments);
        if picked > 1 {
            bail!("--start/--end, --error and --comments are mutually exclusive.");
        }

        if let Some((s, e)) = range {
            if s < 1 {
                bail!("Start line must be greater than 0.");
            }
            if s > e {
                bail!("Start line must be less than or equal to end line.");
            }
            if e > line_count {
                bail!(
                    "End line {} is past the end of the file ({} lines).",
                    e,
                    line_count
                );
            }
            return Ok(Self::Range { start: s, end: e });
        }

        if let Some(desc) = error {
            return Ok(Self::ErrorGuided(desc));
        }

        if comments {
            return Ok(Self::Annotated);
        }

        Ok(Self::Whole)
    }
}

/// Produce the `[system, user]` pair for one completion call.
///
/// The file (and segment, in range mode) travel inside fenced blocks tagged
/// with the file's language so the model mirrors the fence in its reply.
pub fn build_messages(source: &SourceFile, mode: &FixMode) -> Vec<ChatMessage> {
    let lang = &source.lang;
    let code = &source.text;

    match mode {
        FixMode::Whole => {
            let system = format!(
                "You are an expert code debugging assistant. The code is in {lang}.\n\
                 Analyze the provided code, fix any errors or vulnerabilities, and optimize it. \
                 Return only the corrected code snippet without any additional commentary.\n"
            );
            let user = format!("Fix the following code:\n```{lang}\n{code}\n```");
            vec![ChatMessage::system(system), ChatMessage::user(user)]
        }
        FixMode::Range { start, end } => {
            let segment: String = source
                .lines()
                .iter()
                .skip(start - 1)
                .take(end - start + 1)
                .copied()
                .collect();
            let system = format!(
                "You are an expert code debugging assistant. The code is in {lang}.\n\
                 Analyze the provided code segment and identify errors, vulnerabilities, and \
                 opportunities for optimization. Return only the corrected code snippet without any extra commentary.\n\
                 Ensure that the corrected segment has the same number of lines as the input segment.\n\
                 Only modify the given segment; the rest of the file is provided for context.\n"
            );
            let user = format!(
                "Fix only this code segment:\n\
                 ```{lang}\n{segment}\n```\n\
                 Here is the entire file content for context (do not modify code outside the segment):\n\
                 ```{lang}\n{code}\n```"
            );
            vec![ChatMessage::system(system), ChatMessage::user(user)]
        }
        FixMode::ErrorGuided(desc) => {
            let system = format!(
                "You are an expert code debugging assistant. The code is in {lang}.\n\
                 Analyze the provided code, fix any errors or vulnerabilities, and optimize it. \
                 Return only the corrected code snippet without any additional commentary.\n"
            );
            let user = format!(
                "Fix the following code:\n```{lang}\n{code}\n```\n\
                 The code fails with this error:\n{desc}"
            );
            vec![ChatMessage::system(system), ChatMessage::user(user)]
        }
        FixMode::Annotated => {
            let system = format!(
                "You are an expert code debugging assistant. The code is in {lang}.\n\
                 Analyze the provided code, fix any errors or vulnerabilities, and optimize it. \
                 Add explanatory comments to the corrected code. \
                 Return only the corrected code snippet without any additional commentary.\n"
            );
            let user = format!("Fix the following code:\n```{lang}\n{code}\n```");
            vec![ChatMessage::system(system), ChatMessage::user(user)]
        }
    }
}
