//! Course exercise harness.
//!
//! Stages a module's starter code into a working directory, runs the
//! course's test command there, and turns the tool's text output into a
//! single verdict line ending in `<pass>` or `<fail>` for an outer grader.
//!
//! - **[`core`]**: Pure logic (module ids, output interpretation, verdicts).
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (config, filesystem staging,
//!   process execution).
//!
//! Orchestration modules ([`setup`], [`grade`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod core;
pub mod exit_codes;
pub mod grade;
pub mod io;
pub mod logging;
pub mod setup;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
