//! Staging of a module template into the working directory.
//!
//! Staging is destructive: whatever lives at the destination is removed
//! before the template is copied in.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::process::{command_from_argv, run_command};
use crate::core::module_id::ModuleId;

/// Output kept from each preparation command, for error reports.
pub const PREPARE_OUTPUT_LIMIT_BYTES: usize = 100_000;

/// Which template to stage and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRequest {
    /// Directory holding one template per module.
    pub source_root: PathBuf,
    pub module: ModuleId,
    /// Working directory to (re)create.
    pub dest: PathBuf,
}

/// What to do once the template is in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrepareSteps {
    /// Files copied into `dest` next to the template contents.
    pub extra_files: Vec<PathBuf>,
    /// Commands run inside `dest`, in order.
    pub commands: Vec<Vec<String>>,
}

/// Summary of a completed staging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedModule {
    pub module: ModuleId,
    pub template: PathBuf,
    pub dest: PathBuf,
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("template for module {module} not found at {}", path.display())]
    TemplateNotFound { module: ModuleId, path: PathBuf },

    #[error("prepare command {command:?} failed in {}: {reason}", dir.display())]
    PrepareFailed {
        command: Vec<String>,
        dir: PathBuf,
        reason: String,
    },

    #[error("{action} {}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StageRequest {
    pub fn template_dir(&self) -> PathBuf {
        self.source_root.join(self.module.dir_name())
    }
}

/// Replace `request.dest` with a fresh copy of the module template, then prepare it.
#[instrument(skip_all, fields(module = %request.module, dest = %request.dest.display()))]
pub fn stage(request: &StageRequest, steps: &PrepareSteps) -> Result<StagedModule, StageError> {
    let template = request.template_dir();
    if !template.is_dir() {
        return Err(StageError::TemplateNotFound {
            module: request.module.clone(),
            path: template,
        });
    }

    remove_existing(&request.dest)?;

    debug!(template = %template.display(), "copying template");
    copy_dir_recursive(&template, &request.dest)?;

    for file in &steps.extra_files {
        copy_extra_file(file, &request.dest)?;
    }

    for command in &steps.commands {
        run_prepare(command, &request.dest)?;
    }

    info!("module staged");
    Ok(StagedModule {
        module: request.module.clone(),
        template,
        dest: request.dest.clone(),
    })
}

fn remove_existing(dest: &Path) -> Result<(), StageError> {
    let metadata = match fs::symlink_metadata(dest) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(source) => return Err(io_error("inspect", dest, source)),
    };
    debug!(dest = %dest.display(), "removing existing working directory");
    if metadata.is_dir() {
        fs::remove_dir_all(dest).map_err(|source| io_error("remove", dest, source))
    } else {
        fs::remove_file(dest).map_err(|source| io_error("remove", dest, source))
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), StageError> {
    fs::create_dir_all(dst).map_err(|source| io_error("create", dst, source))?;
    let entries = fs::read_dir(src).map_err(|source| io_error("read", src, source))?;
    for entry in entries {
        let entry = entry.map_err(|source| io_error("read entry in", src, source))?;
        let path = entry.path();
        let target = dst.join(entry.file_name());
        if path.is_dir() {
            copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target).map_err(|source| io_error("copy", &path, source))?;
        }
    }
    Ok(())
}

fn copy_extra_file(file: &Path, dest: &Path) -> Result<(), StageError> {
    let name = file.file_name().ok_or_else(|| {
        io_error(
            "copy",
            file,
            io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"),
        )
    })?;
    let target = dest.join(name);
    debug!(file = %file.display(), "copying extra file");
    fs::copy(file, &target).map_err(|source| io_error("copy", file, source))?;
    Ok(())
}

fn run_prepare(command: &[String], dir: &Path) -> Result<(), StageError> {
    let failed = |reason: String| StageError::PrepareFailed {
        command: command.to_vec(),
        dir: dir.to_path_buf(),
        reason,
    };

    debug!(command = ?command, "running prepare command");
    let mut cmd = command_from_argv(command).map_err(|err| failed(format!("{err:#}")))?;
    cmd.current_dir(dir);
    let output =
        run_command(cmd, None, PREPARE_OUTPUT_LIMIT_BYTES).map_err(|err| failed(format!("{err:#}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(command = ?command, exit_code = ?output.status.code(), "prepare command failed");
        return Err(failed(format!(
            "exit code {:?}: {}",
            output.status.code(),
            stderr.trim()
        )));
    }
    Ok(())
}

fn io_error(action: &'static str, path: &Path, source: io::Error) -> StageError {
    StageError::Io {
        action,
        path: path.to_path_buf(),
        source,
    }
}
