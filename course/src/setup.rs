//! `course setup`: stage a module into the working directory.

use anyhow::{Context, Result, anyhow};
use tracing::{debug, instrument};

use crate::core::module_id::ModuleId;
use crate::io::config::CourseConfig;
use crate::io::stage::{PrepareSteps, StageRequest, StagedModule, stage};

/// Build the staging request for `module` from the config layout.
pub fn stage_request(cfg: &CourseConfig, module: ModuleId) -> StageRequest {
    StageRequest {
        source_root: cfg.source_root.clone(),
        module,
        dest: cfg.working_dir.clone(),
    }
}

pub fn prepare_steps(cfg: &CourseConfig) -> PrepareSteps {
    PrepareSteps {
        extra_files: cfg.stage.extra_files.clone(),
        commands: cfg.stage.prepare.clone(),
    }
}

/// Parse the module argument and stage it, printing progress lines.
#[instrument(skip_all)]
pub fn run_setup(cfg: &CourseConfig, module: Option<&str>) -> Result<StagedModule> {
    let module: ModuleId = module
        .ok_or_else(|| anyhow!("Invalid module number specified (use -m <module>)"))?
        .parse()?;
    let request = stage_request(cfg, module.clone());
    debug!(template = %request.template_dir().display(), "resolved template");

    println!(
        "Setting up module {} in \"{}\" directory",
        module,
        request.dest.display()
    );
    let staged = stage(&request, &prepare_steps(cfg))
        .with_context(|| format!("setup module {module}"))?;
    println!(
        "Completed setup of module {} in \"{}\" directory",
        module,
        staged.dest.display()
    );
    Ok(staged)
}
