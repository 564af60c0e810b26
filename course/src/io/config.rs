//! Course configuration stored in `course.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

/// Default config file name, resolved against the current directory.
pub const CONFIG_FILE: &str = "course.toml";

/// Course configuration (TOML).
///
/// Relative paths resolve against the directory `course` runs in. Missing
/// fields default to the layout of a Go course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CourseConfig {
    /// Directory holding one template subdirectory per module (`05`, `06`, ...).
    pub source_root: PathBuf,

    /// Working directory recreated by every `setup`.
    pub working_dir: PathBuf,

    /// Extension of the course's source files, used to spot diagnostics.
    pub source_extension: String,

    pub stage: StageConfig,

    pub test: TestConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StageConfig {
    /// Commands run in order inside the fresh working directory
    /// (e.g. `[["go","mod","tidy"]]`).
    pub prepare: Vec<Vec<String>>,

    /// Files copied into the working directory after the template.
    pub extra_files: Vec<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestConfig {
    /// Test command run inside the working directory.
    pub command: Vec<String>,

    /// Kill the test command after this many seconds. Unset means wait for it;
    /// the default command carries its own `-timeout` flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Keep at most this many bytes of stdout and of stderr.
    pub output_limit_bytes: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            prepare: vec![vec!["go".to_string(), "mod".to_string(), "tidy".to_string()]],
            extra_files: Vec::new(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            command: ["go", "test", "./...", "-timeout", "1s"]
                .into_iter()
                .map(String::from)
                .collect(),
            timeout_secs: None,
            output_limit_bytes: 1_000_000,
        }
    }
}

impl Default for CourseConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from(".course/00_Before"),
            working_dir: PathBuf::from("current"),
            source_extension: "go".to_string(),
            stage: StageConfig::default(),
            test: TestConfig::default(),
        }
    }
}

impl CourseConfig {
    pub fn validate(&self) -> Result<()> {
        if self.source_root.as_os_str().is_empty() {
            return Err(anyhow!("source_root must be non-empty"));
        }
        if self.working_dir.as_os_str().is_empty() {
            return Err(anyhow!("working_dir must be non-empty"));
        }
        if self.source_extension.trim_start_matches('.').trim().is_empty() {
            return Err(anyhow!("source_extension must be non-empty"));
        }
        for (index, command) in self.stage.prepare.iter().enumerate() {
            if is_blank_command(command) {
                return Err(anyhow!("stage.prepare[{index}] must be a non-empty array"));
            }
        }
        for (index, path) in self.stage.extra_files.iter().enumerate() {
            if path.file_name().is_none() {
                return Err(anyhow!("stage.extra_files[{index}] must name a file"));
            }
        }
        if is_blank_command(&self.test.command) {
            return Err(anyhow!("test.command must be a non-empty array"));
        }
        if self.test.timeout_secs == Some(0) {
            return Err(anyhow!("test.timeout_secs must be > 0"));
        }
        if self.test.output_limit_bytes == 0 {
            return Err(anyhow!("test.output_limit_bytes must be > 0"));
        }
        Ok(())
    }
}

fn is_blank_command(command: &[String]) -> bool {
    command.first().is_none_or(|program| program.trim().is_empty())
}

/// Read `course.toml`, falling back to the Go-course defaults when it is absent.
pub fn load_config(path: &Path) -> Result<CourseConfig> {
    let cfg = match fs::read_to_string(path) {
        Ok(contents) => toml::from_str::<CourseConfig>(&contents)
            .with_context(|| format!("parse {}", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => CourseConfig::default(),
        Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
    };
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Write `cfg` next to `path` first and rename it into place, so a reader
/// never sees a half-written config.
pub fn write_config(path: &Path, cfg: &CourseConfig) -> Result<()> {
    cfg.validate()?;
    let rendered = toml::to_string_pretty(cfg).context("serialize config toml")?;
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("create directory {}", dir.display()))?;
    let staging = path.with_extension("toml.tmp");
    fs::write(&staging, format!("{rendered}\n"))
        .with_context(|| format!("write {}", staging.display()))?;
    fs::rename(&staging, path)
        .with_context(|| format!("move {} into place", staging.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, CourseConfig::default());
        assert_eq!(cfg.stage.prepare, vec![vec!["go", "mod", "tidy"]]);
        assert_eq!(cfg.test.command, vec!["go", "test", "./...", "-timeout", "1s"]);
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("course.toml");
        let mut cfg = CourseConfig::default();
        cfg.test.timeout_secs = Some(30);
        cfg.stage.extra_files.push(PathBuf::from("runner.py"));
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn write_leaves_no_staging_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("course.toml");
        write_config(&path, &CourseConfig::default()).expect("write");
        assert!(path.exists());
        assert!(!temp.path().join("course.toml.tmp").exists());
    }

    #[test]
    fn invalid_file_names_path() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("course.toml");
        fs::write(&path, "[test]\ncommand = []\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        let rendered = format!("{err:#}");
        assert!(rendered.contains("validate"));
        assert!(rendered.contains("test.command"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("course.toml");
        fs::write(
            &path,
            r#"
working_dir = "workspace"

[stage]
prepare = [["go", "mod", "init", "example.com/course"], ["go", "mod", "tidy"]]
"#,
        )
        .expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.working_dir, PathBuf::from("workspace"));
        assert_eq!(cfg.source_root, PathBuf::from(".course/00_Before"));
        assert_eq!(cfg.stage.prepare.len(), 2);
        assert_eq!(cfg.test, TestConfig::default());
    }

    #[test]
    fn rejects_empty_commands() {
        let mut cfg = CourseConfig::default();
        cfg.test.command.clear();
        let err = cfg.validate().expect_err("empty test command");
        assert!(err.to_string().contains("test.command"));

        let mut cfg = CourseConfig::default();
        cfg.stage.prepare.push(vec![" ".to_string()]);
        let err = cfg.validate().expect_err("blank prepare command");
        assert!(err.to_string().contains("stage.prepare[1]"));
    }

    #[test]
    fn rejects_zero_limits() {
        let mut cfg = CourseConfig::default();
        cfg.test.timeout_secs = Some(0);
        assert!(cfg.validate().is_err());

        let mut cfg = CourseConfig::default();
        cfg.test.output_limit_bytes = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_blank_extension() {
        let cfg = CourseConfig {
            source_extension: ".".to_string(),
            ..CourseConfig::default()
        };
        assert!(cfg.validate().is_err());
    }
}
