use crate::config::CheckConfiguration;
use crate::maven::MavenParameters;

/// `check` runs the spotbugs goal first and fails the build if bugs were found.
pub const SPOTBUGS_CHECK_GOAL: &str = "com.github.spotbugs:spotbugs-maven-plugin:4.1.4:check";

/// Goal and defines for the SpotBugs check. Filter paths are passed through
/// without checking that they exist.
pub fn maven_parameters(config: &CheckConfiguration) -> MavenParameters {
    let mut defines = Vec::new();
    if !config.spot_bugs_include_filter_file.is_empty() {
        defines.push(format!(
            "-Dspotbugs.includeFilterFile={}",
            config.spot_bugs_include_filter_file
        ));
    }
    if !config.spot_bugs_exclude_filter_file.is_empty() {
        defines.push(format!(
            "-Dspotbugs.excludeFilterFile={}",
            config.spot_bugs_exclude_filter_file
        ));
    }
    if config.spot_bugs_max_allowed_violations != 0 {
        defines.push(format!(
            "-Dspotbugs.maxAllowedViolations={}",
            config.spot_bugs_max_allowed_violations
        ));
    }

    MavenParameters {
        goals: vec![SPOTBUGS_CHECK_GOAL.to_string()],
        defines,
        warnings: Vec::new(),
    }
}
