use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::checks::{CheckError, RunReport};
use crate::config::CheckConfiguration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Skipped,
    Success,
    Failure,
}

/// One line of step telemetry. Written, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepTelemetry {
    pub timestamp: String,
    pub spot_bugs: bool,
    pub pmd: bool,
    pub goals: Vec<String>,
    pub defines_count: usize,
    pub outcome: Outcome,
    pub duration_ms: u64,
}

impl StepTelemetry {
    pub fn from_run(
        config: &CheckConfiguration,
        result: &Result<RunReport, CheckError>,
        duration_ms: u64,
    ) -> Self {
        let (outcome, goals, defines_count) = match result {
            Ok(report) => match &report.plan {
                Some(plan) => (Outcome::Success, plan.goals.clone(), plan.defines.len()),
                None => (Outcome::Skipped, Vec::new(), 0),
            },
            Err(_) => (Outcome::Failure, Vec::new(), 0),
        };

        Self {
            timestamp: utc_now_rfc3339(),
            spot_bugs: config.spot_bugs,
            pmd: config.pmd,
            goals,
            defines_count,
            outcome,
            duration_ms,
        }
    }
}

pub fn utc_now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// Appends `record` as a JSON line. Errors are logged and dropped so that
/// telemetry never changes the outcome of a run.
pub fn append_telemetry(path: &Path, record: &StepTelemetry) {
    if let Err(error) = try_append(path, record) {
        debug!("could not write telemetry to {}: {error}", path.display());
    }
}

fn try_append(path: &Path, record: &StepTelemetry) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let line = serde_json::to_string(record)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maven::{ExecuteOptions, MavenError};

    fn record(outcome: Outcome) -> StepTelemetry {
        StepTelemetry {
            timestamp: "2024-01-01T00:00:00Z".to_string(),
            spot_bugs: true,
            pmd: false,
            goals: vec!["goal".to_string()],
            defines_count: 2,
            outcome,
            duration_ms: 15,
        }
    }

    #[test]
    fn from_run_classifies_outcomes() {
        let config = CheckConfiguration {
            pmd: true,
            ..CheckConfiguration::default()
        };

        let skipped = StepTelemetry::from_run(&config, &Ok(RunReport::skipped()), 1);
        assert_eq!(skipped.outcome, Outcome::Skipped);
        assert!(skipped.goals.is_empty());

        let plan = ExecuteOptions {
            goals: vec!["pmd:check".to_string()],
            defines: vec!["-Da=1".to_string(), "-Db=2".to_string()],
            ..ExecuteOptions::default()
        };
        let report = RunReport {
            plan: Some(plan),
            warnings: Vec::new(),
        };
        let success = StepTelemetry::from_run(&config, &Ok(report), 2);
        assert_eq!(success.outcome, Outcome::Success);
        assert_eq!(success.goals, vec!["pmd:check"]);
        assert_eq!(success.defines_count, 2);
        assert!(success.pmd && !success.spot_bugs);

        let failed = Err(CheckError::Execute(MavenError::Failed {
            command: "mvn".to_string(),
            status: 1,
        }));
        let failure = StepTelemetry::from_run(&config, &failed, 3);
        assert_eq!(failure.outcome, Outcome::Failure);
        assert_eq!(failure.duration_ms, 3);
    }

    #[test]
    fn append_writes_one_json_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/telemetry.jsonl");

        append_telemetry(&path, &record(Outcome::Success));
        append_telemetry(&path, &record(Outcome::Failure));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["outcome"], "success");
        assert_eq!(first["defines_count"], 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["outcome"], "failure");
    }

    #[test]
    fn append_ignores_unwritable_paths() {
        let dir = tempfile::tempdir().unwrap();
        append_telemetry(dir.path(), &record(Outcome::Skipped));
        assert!(dir.path().is_dir());
    }

    #[test]
    fn timestamp_is_utc() {
        assert!(utc_now_rfc3339().ends_with('Z'));
    }
}
