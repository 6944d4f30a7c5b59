//! Maven invocation glue: turns goals and defines into an `mvn` command line
//! and runs it through a [`CommandRunner`].

use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::runner::{CommandCall, CommandRunner};

const MAVEN_EXECUTABLE: &str = "mvn";

const TRANSFER_LOG_QUIET: &str =
    "-Dorg.slf4j.simpleLogger.log.org.apache.maven.cli.transfer.Slf4jMavenTransferListener=warn";

const FLATTEN_GOAL: &str = "org.codehaus.mojo:flatten-maven-plugin:1.2.2:flatten";

/// Sub-projects that only hold tests and are left out of static analysis
/// when present.
const TEST_MODULES: &[&str] = &["unit-tests", "integration-tests"];

/// Goals and defines contributed by one check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MavenParameters {
    pub goals: Vec<String>,
    pub defines: Vec<String>,
    /// Soft configuration problems noticed while building the parameters.
    pub warnings: Vec<String>,
}

/// A complete Maven invocation: what to run plus the build environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub goals: Vec<String>,
    pub defines: Vec<String>,
    pub project_settings_file: String,
    pub global_settings_file: String,
    pub m2_path: String,
    pub log_successful_maven_transfers: bool,
}

/// Build environment shared by the install step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluateOptions {
    pub m2_path: String,
    pub project_settings_file: String,
    pub global_settings_file: String,
}

#[derive(Debug, Error)]
pub enum MavenError {
    #[error("failed to start executable, command: '{command}', error: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to run executable, command: '{command}', exit status: {status}")]
    Failed { command: String, status: i32 },
    #[error("no pom.xml found in the working directory, cannot install artifacts")]
    MissingPom,
}

impl ExecuteOptions {
    /// The `mvn` arguments for this invocation.
    ///
    /// Order: settings files, local repository, defines, transfer logging,
    /// `--batch-mode`, goals.
    pub fn arguments(&self) -> Vec<String> {
        let mut args = Vec::new();
        if !self.global_settings_file.is_empty() {
            args.push("--global-settings".to_string());
            args.push(self.global_settings_file.clone());
        }
        if !self.project_settings_file.is_empty() {
            args.push("--settings".to_string());
            args.push(self.project_settings_file.clone());
        }
        if !self.m2_path.is_empty() {
            args.push(format!("-Dmaven.repo.local={}", self.m2_path));
        }
        args.extend(self.defines.iter().cloned());
        if !self.log_successful_maven_transfers {
            args.push(TRANSFER_LOG_QUIET.to_string());
        }
        args.push("--batch-mode".to_string());
        args.extend(self.goals.iter().cloned());
        args
    }
}

/// Runs Maven once with `options`. Returns the captured stdout on success.
pub fn execute<R: CommandRunner + ?Sized>(
    options: &ExecuteOptions,
    runner: &R,
) -> Result<String, MavenError> {
    let call = CommandCall::new(MAVEN_EXECUTABLE, options.arguments());
    let command = call.command_line();
    info!("running: {command}");

    let result = runner
        .run(call)
        .map_err(|source| MavenError::Spawn {
            command: command.clone(),
            source,
        })?;

    if !result.success() {
        return Err(MavenError::Failed {
            command,
            status: result.status,
        });
    }

    debug!("maven finished successfully");
    Ok(result.stdout)
}

/// Installs the project's artifacts into the local repository so that
/// multi-module builds can resolve sibling modules.
///
/// Flattens the root POM first (resolving CI-friendly versions), then runs
/// `install` without tests.
pub fn install_artifacts<R: CommandRunner + ?Sized>(
    runner: &R,
    options: &EvaluateOptions,
) -> Result<(), MavenError> {
    if !runner.file_exists(Path::new("pom.xml")) {
        return Err(MavenError::MissingPom);
    }

    info!("installing maven artifacts");
    let flatten = ExecuteOptions {
        goals: vec![FLATTEN_GOAL.to_string()],
        defines: vec![
            "-Dflatten.mode=resolveCiFriendliesOnly".to_string(),
            "-DupdatePomFile=true".to_string(),
        ],
        ..options.execute_options()
    };
    execute(&flatten, runner)?;

    let install = ExecuteOptions {
        goals: vec!["install".to_string()],
        defines: vec!["-DskipTests".to_string()],
        ..options.execute_options()
    };
    execute(&install, runner)?;
    Ok(())
}

impl EvaluateOptions {
    fn execute_options(&self) -> ExecuteOptions {
        ExecuteOptions {
            m2_path: self.m2_path.clone(),
            project_settings_file: self.project_settings_file.clone(),
            global_settings_file: self.global_settings_file.clone(),
            ..ExecuteOptions::default()
        }
    }
}

/// `-pl !<module>` pairs for test-only modules present in the working
/// directory.
pub fn test_modules_excludes<R: CommandRunner + ?Sized>(runner: &R) -> Vec<String> {
    let mut excludes = Vec::new();
    for module in TEST_MODULES {
        let pom = Path::new(module).join("pom.xml");
        if runner.file_exists(&pom) {
            debug!("excluding test module {module}");
            excludes.push("-pl".to_string());
            excludes.push(format!("!{module}"));
        }
    }
    excludes
}
