//! Course exercise harness CLI.
//!
//! `course setup -m 5` stages module `05` into the working directory;
//! `course test` runs the course tests there and prints one tagged verdict line.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use course::core::interpreter::InterpretError;
use course::exit_codes;
use course::grade::{interpret_files, report, run_tests};
use course::io::config::{CONFIG_FILE, load_config};
use course::logging;
use course::setup::run_setup;

#[derive(Parser)]
#[command(
    name = "course",
    version,
    about = "Stage course modules and grade their test runs"
)]
struct Cli {
    /// Course configuration file.
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace the working directory with a fresh copy of a module template.
    Setup {
        /// Module number (zero-padded to two digits).
        #[arg(short, long)]
        module: Option<String>,
    },
    /// Run the tests in the working directory and print the verdict line.
    Test,
    /// Print the verdict line for previously captured test output.
    Interpret {
        /// File holding the captured standard output.
        #[arg(long)]
        stdout: PathBuf,
        /// File holding the captured standard error.
        #[arg(long)]
        stderr: Option<PathBuf>,
    },
}

fn main() {
    logging::init();
    let code = match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{:#}", err);
            if err.downcast_ref::<InterpretError>().is_some() {
                exit_codes::UNRECOGNIZED_DIAGNOSTIC
            } else {
                exit_codes::INVALID
            }
        }
    };
    std::process::exit(code);
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;
    match cli.command {
        Command::Setup { module } => {
            run_setup(&cfg, module.as_deref())?;
            Ok(exit_codes::OK)
        }
        Command::Test => Ok(report(&run_tests(&cfg)?)),
        Command::Interpret { stdout, stderr } => Ok(report(&interpret_files(
            &cfg,
            &stdout,
            stderr.as_deref(),
        )?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_setup_short_flag() {
        let cli = Cli::parse_from(["course", "setup", "-m", "5"]);
        assert!(matches!(cli.command, Command::Setup { module: Some(ref m) } if m == "5"));
        assert_eq!(cli.config, PathBuf::from(CONFIG_FILE));
    }

    #[test]
    fn parse_setup_long_flag() {
        let cli = Cli::parse_from(["course", "setup", "--module", "12"]);
        assert!(matches!(cli.command, Command::Setup { module: Some(ref m) } if m == "12"));
    }

    #[test]
    fn parse_setup_without_module() {
        let cli = Cli::parse_from(["course", "setup"]);
        assert!(matches!(cli.command, Command::Setup { module: None }));
    }

    #[test]
    fn parse_test_with_config() {
        let cli = Cli::parse_from(["course", "test", "--config", "other.toml"]);
        assert!(matches!(cli.command, Command::Test));
        assert_eq!(cli.config, PathBuf::from("other.toml"));
    }

    #[test]
    fn parse_interpret() {
        let cli = Cli::parse_from(["course", "interpret", "--stdout", "out.txt"]);
        assert!(matches!(
            cli.command,
            Command::Interpret { stderr: None, .. }
        ));
    }
}
