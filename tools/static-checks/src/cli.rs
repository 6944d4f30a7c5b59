use std::path::PathBuf;

use clap::Parser;

use crate::config::{CheckConfiguration, ConfigError};

/// Run SpotBugs and PMD through a single Maven invocation.
///
/// Options given on the command line override the configuration file.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "mvn-static-checks", version)]
pub struct Cli {
    /// JSON file with the step configuration (camelCase keys).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable the SpotBugs check.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub spot_bugs: Option<bool>,

    /// Enable the PMD check.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub pmd: Option<bool>,

    #[arg(long, value_name = "FILE")]
    pub spot_bugs_include_filter_file: Option<String>,

    #[arg(long, value_name = "FILE")]
    pub spot_bugs_exclude_filter_file: Option<String>,

    /// 0 disables the threshold.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub spot_bugs_max_allowed_violations: Option<i32>,

    /// 0 disables the threshold.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub pmd_max_allowed_violations: Option<i32>,

    /// 1 (high) to 5 (low). Other non-zero values are ignored with a warning.
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub pmd_failure_priority: Option<i32>,

    /// Modules to leave out of the reactor. Repeatable or comma-separated.
    #[arg(long, value_name = "MODULE", value_delimiter = ',')]
    pub maven_modules_excludes: Option<Vec<String>>,

    /// Install the project's artifacts before running the checks.
    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub install_artifacts: Option<bool>,

    #[arg(long, value_name = "DIR")]
    pub m2_path: Option<String>,

    #[arg(long, value_name = "FILE")]
    pub project_settings_file: Option<String>,

    #[arg(long, value_name = "FILE")]
    pub global_settings_file: Option<String>,

    #[arg(long, num_args = 0..=1, default_missing_value = "true", value_name = "BOOL")]
    pub log_successful_maven_transfers: Option<bool>,

    /// Append a JSON line describing the run to this file.
    #[arg(long, value_name = "FILE", env = "STATIC_CHECKS_TELEMETRY_FILE")]
    pub telemetry_file: Option<PathBuf>,

    /// Log at debug level. `RUST_LOG` takes precedence.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// The configuration file (or defaults) with command-line overrides applied.
    pub fn configuration(&self) -> Result<CheckConfiguration, ConfigError> {
        let mut config = match &self.config {
            Some(path) => CheckConfiguration::from_file(path)?,
            None => CheckConfiguration::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut CheckConfiguration) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(value) = value {
                *target = value.clone();
            }
        }

        set(&mut config.spot_bugs, &self.spot_bugs);
        set(&mut config.pmd, &self.pmd);
        set(&mut config.spot_bugs_include_filter_file, &self.spot_bugs_include_filter_file);
        set(&mut config.spot_bugs_exclude_filter_file, &self.spot_bugs_exclude_filter_file);
        set(&mut config.spot_bugs_max_allowed_violations, &self.spot_bugs_max_allowed_violations);
        set(&mut config.pmd_max_allowed_violations, &self.pmd_max_allowed_violations);
        set(&mut config.pmd_failure_priority, &self.pmd_failure_priority);
        set(&mut config.maven_modules_excludes, &self.maven_modules_excludes);
        set(&mut config.install_artifacts, &self.install_artifacts);
        set(&mut config.m2_path, &self.m2_path);
        set(&mut config.project_settings_file, &self.project_settings_file);
        set(&mut config.global_settings_file, &self.global_settings_file);
        set(&mut config.log_successful_maven_transfers, &self.log_successful_maven_transfers);
    }
}
