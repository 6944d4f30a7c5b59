//! Runs SpotBugs and PMD as one Maven invocation.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::CheckConfiguration;
use crate::maven::{self, ExecuteOptions, MavenError, MavenParameters};
use crate::runner::CommandRunner;
use crate::{pmd, spotbugs};

pub const NOTHING_CONFIGURED: &str =
    "Neither SpotBugs nor PMD are configured. Skipping step execution";

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("installing maven artifacts failed: {0}")]
    Install(#[source] MavenError),
    #[error("static code checks failed: {0}")]
    Execute(#[source] MavenError),
}

impl CheckError {
    pub fn maven_error(&self) -> &MavenError {
        match self {
            CheckError::Install(error) | CheckError::Execute(error) => error,
        }
    }
}

/// What a successful run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// The consolidated invocation; `None` when no check was enabled.
    pub plan: Option<ExecuteOptions>,
    pub warnings: Vec<String>,
}

impl RunReport {
    pub fn skipped() -> Self {
        Self {
            plan: None,
            warnings: vec![NOTHING_CONFIGURED.to_string()],
        }
    }

    pub fn is_skipped(&self) -> bool {
        self.plan.is_none()
    }
}

/// `-pl !<module>` for each module, in the order given.
pub fn module_excludes(modules: &[String]) -> Vec<String> {
    modules
        .iter()
        .flat_map(|module| ["-pl".to_string(), format!("!{module}")])
        .collect()
}

/// Merges the parameters of every enabled check with the module exclusions.
/// SpotBugs always comes before PMD.
pub fn build_plan<R: CommandRunner + ?Sized>(
    config: &CheckConfiguration,
    runner: &R,
) -> (ExecuteOptions, Vec<String>) {
    let mut defines = maven::test_modules_excludes(runner);
    defines.extend(module_excludes(&config.maven_modules_excludes));

    let mut goals = Vec::new();
    let mut warnings = Vec::new();
    let mut merge = |params: MavenParameters| {
        goals.extend(params.goals);
        defines.extend(params.defines);
        warnings.extend(params.warnings);
    };
    if config.spot_bugs {
        merge(spotbugs::maven_parameters(config));
    }
    if config.pmd {
        merge(pmd::maven_parameters(config));
    }

    let plan = ExecuteOptions {
        goals,
        defines,
        project_settings_file: config.project_settings_file.clone(),
        global_settings_file: config.global_settings_file.clone(),
        m2_path: config.m2_path.clone(),
        log_successful_maven_transfers: config.log_successful_maven_transfers,
    };
    (plan, warnings)
}

/// Installs artifacts if requested, then runs every enabled check in a
/// single Maven invocation. The first failure ends the run and is returned
/// as is.
pub fn run_static_code_checks<R: CommandRunner + ?Sized>(
    config: &CheckConfiguration,
    runner: &R,
) -> Result<RunReport, CheckError> {
    if !config.any_check_enabled() {
        warn!("{NOTHING_CONFIGURED}");
        return Ok(RunReport::skipped());
    }

    if config.install_artifacts {
        maven::install_artifacts(runner, &config.evaluate_options()).map_err(CheckError::Install)?;
    }

    let (plan, warnings) = build_plan(config, runner);
    info!(goals = ?plan.goals, "running static code checks");
    maven::execute(&plan, runner).map_err(CheckError::Execute)?;

    Ok(RunReport {
        plan: Some(plan),
        warnings,
    })
}
