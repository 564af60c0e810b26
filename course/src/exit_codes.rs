//! Stable exit codes for `course` CLI commands.
//!
//! `2` is left to clap for usage errors.

/// Command succeeded, or a verdict line (pass or fail) was printed.
pub const OK: i32 = 0;
/// Invalid module/config, staging failure, or other runtime errors.
pub const INVALID: i32 = 1;
/// Test output had neither a failure annotation nor the pass marker.
pub const NO_VERDICT: i32 = 3;
/// stderr was not a recognizable compiler diagnostic.
pub const UNRECOGNIZED_DIAGNOSTIC: i32 = 4;
