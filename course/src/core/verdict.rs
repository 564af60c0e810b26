//! Verdict produced for one test run, and its printed protocol line.
//!
//! The outer grading tool reads exactly one line ending in a [`Tag`]. A
//! [`Verdict::NoOutput`] prints nothing at all.

use std::fmt;

/// Machine-readable suffix of a verdict line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Pass,
    Fail,
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Pass => f.write_str("<pass>"),
            Tag::Fail => f.write_str("<fail>"),
        }
    }
}

/// Classification of a test run's captured output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The code did not compile; location of the first diagnostic.
    CompileError {
        file: String,
        /// Line number digits as printed by the compiler.
        line: String,
        message: String,
    },
    /// Tests ran and one reported an annotated failure.
    TestFailure { message: String },
    Pass,
    /// Neither a failure annotation nor the pass marker was found.
    NoOutput,
}

pub const PASS_MESSAGE: &str = "Well Done!";

impl Verdict {
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Verdict::CompileError { .. } | Verdict::TestFailure { .. } => Some(Tag::Fail),
            Verdict::Pass => Some(Tag::Pass),
            Verdict::NoOutput => None,
        }
    }

    /// The line to print for this verdict, if any.
    pub fn line(&self) -> Option<String> {
        let tag = self.tag()?;
        let text = match self {
            Verdict::CompileError {
                file,
                line,
                message,
            } => format!("Hmm, looks like there is an error in `{file}` on line `{line}`: {message}"),
            Verdict::TestFailure { message } => message.clone(),
            Verdict::Pass => PASS_MESSAGE.to_string(),
            Verdict::NoOutput => return None,
        };
        Some(format!("{text} {tag}"))
    }
}
