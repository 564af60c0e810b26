//! Test-only helpers for building course layouts in temp directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::io::config::{CONFIG_FILE, CourseConfig, write_config};

/// A throwaway course root with a `templates/` source root and a `current/` working dir.
pub struct TempCourse {
    dir: TempDir,
}

impl Default for TempCourse {
    fn default() -> Self {
        Self::new()
    }
}

impl TempCourse {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn source_root(&self) -> PathBuf {
        self.root().join("templates")
    }

    pub fn working_dir(&self) -> PathBuf {
        self.root().join("current")
    }

    /// Create template `module` (already padded, e.g. `"05"`) with the given files.
    pub fn add_template(&self, module: &str, files: &[(&str, &str)]) -> PathBuf {
        let template = self.source_root().join(module);
        fs::create_dir_all(&template).expect("create template");
        for (name, contents) in files {
            let path = template.join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create template subdir");
            }
            fs::write(&path, contents).expect("write template file");
        }
        template
    }

    /// Config pointing at this course with absolute paths and no prepare commands.
    pub fn config(&self) -> CourseConfig {
        let mut cfg = CourseConfig {
            source_root: self.source_root(),
            working_dir: self.working_dir(),
            ..CourseConfig::default()
        };
        cfg.stage.prepare.clear();
        cfg
    }

    /// Config whose test command is a shell script.
    pub fn config_with_test_script(&self, script: &str) -> CourseConfig {
        let mut cfg = self.config();
        cfg.test.command = sh(script);
        cfg
    }

    /// Write `cfg` as `course.toml` in the course root.
    pub fn write_config(&self, cfg: &CourseConfig) -> PathBuf {
        let path = self.root().join(CONFIG_FILE);
        write_config(&path, cfg).expect("write config");
        path
    }
}

/// argv for running `script` through `sh -c`.
pub fn sh(script: &str) -> Vec<String> {
    vec!["sh".to_string(), "-c".to_string(), script.to_string()]
}
