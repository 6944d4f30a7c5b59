use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::maven::EvaluateOptions;

/// Options for one static-checks run. Field names follow the step's
/// camelCase configuration keys; anything missing takes its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckConfiguration {
    pub spot_bugs: bool,
    pub pmd: bool,
    pub spot_bugs_include_filter_file: String,
    pub spot_bugs_exclude_filter_file: String,
    /// 0 means no threshold.
    pub spot_bugs_max_allowed_violations: i32,
    /// 0 means no threshold.
    pub pmd_max_allowed_violations: i32,
    /// 1 (high) to 5 (low); 0 leaves the plugin default.
    pub pmd_failure_priority: i32,
    pub maven_modules_excludes: Vec<String>,
    pub install_artifacts: bool,
    pub m2_path: String,
    pub project_settings_file: String,
    pub global_settings_file: String,
    pub log_successful_maven_transfers: bool,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse configuration '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl CheckConfiguration {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn any_check_enabled(&self) -> bool {
        self.spot_bugs || self.pmd
    }

    pub fn evaluate_options(&self) -> EvaluateOptions {
        EvaluateOptions {
            m2_path: self.m2_path.clone(),
            project_settings_file: self.project_settings_file.clone(),
            global_settings_file: self.global_settings_file.clone(),
        }
    }
}
