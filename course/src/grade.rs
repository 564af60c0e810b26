//! `course test` and `course interpret`: turn test output into a verdict line.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing::{info, instrument, warn};

use crate::core::interpreter::{Patterns, ProcessOutput, interpret};
use crate::core::verdict::Verdict;
use crate::exit_codes;
use crate::io::config::CourseConfig;
use crate::io::process::{command_from_argv, run_command};

pub fn patterns(cfg: &CourseConfig) -> Result<Patterns> {
    Patterns::for_extension(&cfg.source_extension)
        .with_context(|| format!("compile patterns for .{}", cfg.source_extension))
}

/// Run the configured test command in the working directory and classify its output.
///
/// The exit code of the test command is not inspected.
#[instrument(skip_all, fields(working_dir = %cfg.working_dir.display()))]
pub fn run_tests(cfg: &CourseConfig) -> Result<Verdict> {
    if !cfg.working_dir.is_dir() {
        bail!(
            "working directory {} does not exist (run setup first)",
            cfg.working_dir.display()
        );
    }

    let mut cmd = command_from_argv(&cfg.test.command).context("build test command")?;
    cmd.current_dir(&cfg.working_dir);
    let timeout = cfg.test.timeout_secs.map(Duration::from_secs);
    let output = run_command(cmd, timeout, cfg.test.output_limit_bytes)
        .with_context(|| format!("run test command {:?}", cfg.test.command))?;
    if output.timed_out {
        warn!("test command timed out, interpreting partial output");
    }
    info!(exit_code = ?output.status.code(), "test command finished");

    let verdict = interpret(&output.text(), &patterns(cfg)?)?;
    Ok(verdict)
}

/// Classify previously captured output files.
pub fn interpret_files(cfg: &CourseConfig, stdout: &Path, stderr: Option<&Path>) -> Result<Verdict> {
    let read = |path: &Path| {
        fs::read(path).with_context(|| format!("read {}", path.display()))
    };
    let stdout = read(stdout)?;
    let stderr = match stderr {
        Some(path) => read(path)?,
        None => Vec::new(),
    };
    let verdict = interpret(&ProcessOutput::from_bytes(&stdout, &stderr), &patterns(cfg)?)?;
    Ok(verdict)
}

/// Print the verdict line, if any, and return the exit code for it.
pub fn report(verdict: &Verdict) -> i32 {
    match verdict.line() {
        Some(line) => {
            println!("{line}");
            exit_codes::OK
        }
        None => {
            warn!("no failure annotation or pass marker in test output");
            exit_codes::NO_VERDICT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::interpreter::InterpretError;
    use crate::test_support::TempCourse;

    fn staged(course: &TempCourse) {
        fs::create_dir_all(course.working_dir()).expect("working dir");
    }

    #[test]
    fn pass_from_test_command() {
        let course = TempCourse::new();
        staged(&course);
        let cfg = course.config_with_test_script("echo 'ok  example.com/calc'; echo PASS");
        assert_eq!(run_tests(&cfg).expect("verdict"), Verdict::Pass);
    }

    #[test]
    fn compile_error_from_test_command() {
        let course = TempCourse::new();
        staged(&course);
        let cfg = course.config_with_test_script(
            "echo '# example.com/calc' >&2; echo './main.go:12:5: undefined: foo' >&2; exit 1",
        );
        assert_eq!(
            run_tests(&cfg).expect("verdict"),
            Verdict::CompileError {
                file: "./main.go".to_string(),
                line: "12".to_string(),
                message: "undefined: foo".to_string(),
            }
        );
    }

    #[test]
    fn test_command_runs_in_working_dir() {
        let course = TempCourse::new();
        staged(&course);
        fs::write(course.working_dir().join("marker.txt"), "PASS").expect("write");
        let cfg = course.config_with_test_script("cat marker.txt");
        assert_eq!(run_tests(&cfg).expect("verdict"), Verdict::Pass);
    }

    #[test]
    fn missing_working_dir_is_an_error() {
        let course = TempCourse::new();
        let cfg = course.config_with_test_script("echo PASS");
        let err = run_tests(&cfg).expect_err("no working dir");
        assert!(err.to_string().contains("run setup first"));
    }

    #[test]
    fn unrecognized_stderr_surfaces_interpret_error() {
        let course = TempCourse::new();
        staged(&course);
        let cfg = course.config_with_test_script("echo 'go: updates to go.mod needed' >&2");
        let err = run_tests(&cfg).expect_err("unrecognized");
        assert!(err.downcast_ref::<InterpretError>().is_some());
    }

    #[test]
    fn timed_out_run_is_still_interpreted() {
        let course = TempCourse::new();
        staged(&course);
        let mut cfg = course.config_with_test_script("echo PASS; sleep 6; echo done");
        cfg.test.timeout_secs = Some(1);
        let started = std::time::Instant::now();
        assert_eq!(run_tests(&cfg).expect("verdict"), Verdict::Pass);
        assert!(started.elapsed() < std::time::Duration::from_secs(4));
    }

    #[test]
    fn interprets_captured_files() {
        let course = TempCourse::new();
        let stdout = course.root().join("stdout.txt");
        fs::write(&stdout, "    calc_test.go:9: ~1|Add is wrong~\nFAIL\n").expect("write");
        let verdict = interpret_files(&course.config(), &stdout, None).expect("verdict");
        assert_eq!(
            verdict,
            Verdict::TestFailure {
                message: "Add is wrong".to_string(),
            }
        );
    }

    #[test]
    fn report_maps_verdicts_to_exit_codes() {
        assert_eq!(report(&Verdict::Pass), exit_codes::OK);
        assert_eq!(
            report(&Verdict::TestFailure {
                message: "boom".to_string()
            }),
            exit_codes::OK
        );
        assert_eq!(report(&Verdict::NoOutput), exit_codes::NO_VERDICT);
    }
}
