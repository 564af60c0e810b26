//! Classification of test-command output into a [`Verdict`].
//!
//! The test tool offers no structured results, so the interpreter scrapes its
//! free-text output:
//!
//! - Non-empty stderr must carry a compiler diagnostic
//!   (`path.go:LINE:COL: message`); the first one becomes the verdict and
//!   stdout is ignored.
//! - Otherwise stdout is searched for an annotated test failure
//!   (`file_test.go:14: ~1|message~` or `Messages: ~1|message~`).
//! - Otherwise a `PASS` marker in stdout means the run passed.
//!
//! Interpretation is a pure function of the captured text.

use regex::Regex;
use thiserror::Error;

use crate::core::verdict::Verdict;

/// Literal the test tool prints when every test passed.
pub const PASS_MARKER: &str = "PASS";

const EXCERPT_CHARS: usize = 200;

/// Text captured from one test invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn from_bytes(stdout: &[u8], stderr: &[u8]) -> Self {
        Self {
            stdout: String::from_utf8_lossy(stdout).into_owned(),
            stderr: String::from_utf8_lossy(stderr).into_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    /// stderr had content that is not a recognizable compiler diagnostic.
    #[error("unrecognized diagnostic on stderr: {excerpt}")]
    UnrecognizedDiagnostic { excerpt: String },
}

/// Compiled patterns for one source-file extension.
#[derive(Debug, Clone)]
pub struct Patterns {
    diagnostic: Regex,
    failure: Regex,
}

impl Patterns {
    /// Patterns for source files ending in `.{extension}`.
    pub fn for_extension(extension: &str) -> Result<Self, regex::Error> {
        let ext = regex::escape(extension.trim_start_matches('.'));
        Ok(Self {
            diagnostic: Regex::new(&format!(r"(.*\.{ext}):(\d+):\d+:(.*)"))?,
            failure: Regex::new(&format!(r"(?:\w+\.{ext}:\d+|Messages):\s*~\d+\|(.*)~"))?,
        })
    }
}

/// Classify captured output.
///
/// Whitespace-only stderr counts as empty.
pub fn interpret(output: &ProcessOutput, patterns: &Patterns) -> Result<Verdict, InterpretError> {
    if !output.stderr.trim().is_empty() {
        return compile_error(&output.stderr, patterns);
    }

    if let Some(caps) = patterns.failure.captures(&output.stdout) {
        return Ok(Verdict::TestFailure {
            message: caps[1].to_string(),
        });
    }

    if output.stdout.contains(PASS_MARKER) {
        return Ok(Verdict::Pass);
    }

    Ok(Verdict::NoOutput)
}

fn compile_error(stderr: &str, patterns: &Patterns) -> Result<Verdict, InterpretError> {
    let unrecognized = || InterpretError::UnrecognizedDiagnostic {
        excerpt: excerpt(stderr),
    };
    let caps = patterns.diagnostic.captures(stderr).ok_or_else(unrecognized)?;
    Ok(Verdict::CompileError {
        file: caps[1].to_string(),
        line: caps[2].to_string(),
        message: caps[3].trim().to_string(),
    })
}

fn excerpt(text: &str) -> String {
    let trimmed = text.trim();
    let mut excerpt: String = trimmed.chars().take(EXCERPT_CHARS).collect();
    if trimmed.chars().count() > EXCERPT_CHARS {
        excerpt.push_str("...");
    }
    excerpt
}
