use std::ops::RangeInclusive;

use tracing::warn;

use crate::config::CheckConfiguration;
use crate::maven::MavenParameters;

/// `check` runs the pmd goal first and fails the build if violations were found.
pub const PMD_CHECK_GOAL: &str = "org.apache.maven.plugins:maven-pmd-plugin:3.13.0:check";

const FAILURE_PRIORITIES: RangeInclusive<i32> = 1..=5;

/// Goal and defines for the PMD check.
///
/// A non-zero failure priority outside 1..=5 is dropped with a warning and
/// the plugin's own default applies. It is not clamped.
pub fn maven_parameters(config: &CheckConfiguration) -> MavenParameters {
    let mut defines = Vec::new();
    let mut warnings = Vec::new();

    if config.pmd_max_allowed_violations != 0 {
        defines.push(format!(
            "-Dpmd.maxAllowedViolations={}",
            config.pmd_max_allowed_violations
        ));
    }

    let priority = config.pmd_failure_priority;
    if FAILURE_PRIORITIES.contains(&priority) {
        defines.push(format!("-Dpmd.failurePriority={priority}"));
    } else if priority != 0 {
        let message = format!(
            "PMD failure priority must be a value between 1 and 5. {priority} was configured. Using the plugin default."
        );
        warn!("{message}");
        warnings.push(message);
    }

    MavenParameters {
        goals: vec![PMD_CHECK_GOAL.to_string()],
        defines,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_priority(priority: i32) -> CheckConfiguration {
        CheckConfiguration {
            pmd_failure_priority: priority,
            ..CheckConfiguration::default()
        }
    }

    #[test]
    fn defaults_give_goal_only() {
        let params = maven_parameters(&CheckConfiguration::default());
        assert_eq!(params.goals, vec![PMD_CHECK_GOAL]);
        assert!(params.defines.is_empty());
        assert!(params.warnings.is_empty());
    }

    #[test]
    fn max_violations_before_priority() {
        let config = CheckConfiguration {
            pmd_max_allowed_violations: 7,
            pmd_failure_priority: 3,
            ..CheckConfiguration::default()
        };
        assert_eq!(
            maven_parameters(&config).defines,
            vec!["-Dpmd.maxAllowedViolations=7", "-Dpmd.failurePriority=3"]
        );
    }

    #[test]
    fn negative_max_violations_is_passed_through() {
        let config = CheckConfiguration {
            pmd_max_allowed_violations: -1,
            ..CheckConfiguration::default()
        };
        assert_eq!(
            maven_parameters(&config).defines,
            vec!["-Dpmd.maxAllowedViolations=-1"]
        );
    }

    #[test]
    fn priorities_in_range_are_passed_through() {
        for priority in 1..=5 {
            let params = maven_parameters(&with_priority(priority));
            assert_eq!(params.defines, vec![format!("-Dpmd.failurePriority={priority}")]);
            assert!(params.warnings.is_empty());
        }
    }

    #[test]
    fn out_of_range_priority_is_dropped_with_warning() {
        for priority in [-1, 6, 7, 100] {
            let params = maven_parameters(&with_priority(priority));
            assert!(params.defines.is_empty(), "priority {priority} must not be passed");
            assert_eq!(params.warnings.len(), 1);
            assert!(params.warnings[0].contains(&format!("{priority} was configured")));
        }
    }

    #[test]
    fn zero_priority_is_silent() {
        let params = maven_parameters(&with_priority(0));
        assert!(params.defines.is_empty());
        assert!(params.warnings.is_empty());
    }
}
