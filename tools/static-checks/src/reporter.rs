use crate::checks::{CheckError, RunReport};
use owo_colors::OwoColorize;
use std::io::{self, Write};

const LABEL_WIDTH: usize = 12;

/// Print the run summary: one line per goal, any warnings, then PASS, SKIP
/// or FAIL with the elapsed time.
pub fn print_summary<W: Write>(
    out: &mut W,
    result: &Result<RunReport, CheckError>,
    elapsed_secs: u64,
) -> io::Result<()> {
    writeln!(out)?;
    match result {
        Ok(report) => {
            if let Some(plan) = &report.plan {
                for goal in &plan.goals {
                    writeln!(
                        out,
                        "  {} {:<width$} {}",
                        "\u{2713}".green(),
                        check_name(goal),
                        goal.dimmed(),
                        width = LABEL_WIDTH
                    )?;
                }
            }
            for warning in &report.warnings {
                writeln!(out, "  {} {}", "!".yellow(), warning)?;
            }
            writeln!(out)?;
            let status = if report.is_skipped() {
                "SKIP".yellow().bold().to_string()
            } else {
                "PASS".green().bold().to_string()
            };
            writeln!(out, "  {} {}", status, format!("({elapsed_secs}s)").dimmed())?;
        }
        Err(error) => {
            writeln!(out, "  {} {}", "\u{2717}".red(), error)?;
            writeln!(out)?;
            writeln!(
                out,
                "  {} {}",
                "FAIL".red().bold(),
                format!("({elapsed_secs}s)").dimmed()
            )?;
        }
    }
    writeln!(out)?;
    Ok(())
}

/// Short label for a plugin goal, e.g. `spotbugs` for the spotbugs check.
fn check_name(goal: &str) -> &str {
    goal.split(':')
        .nth(1)
        .map(|artifact| {
            artifact
                .trim_start_matches("maven-")
                .trim_end_matches("-maven-plugin")
                .trim_end_matches("-plugin")
        })
        .unwrap_or(goal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maven::{ExecuteOptions, MavenError};
    use crate::pmd::PMD_CHECK_GOAL;
    use crate::spotbugs::SPOTBUGS_CHECK_GOAL;

    fn render(result: &Result<RunReport, CheckError>) -> String {
        let mut output = Vec::new();
        print_summary(&mut output, result, 4).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn check_name_uses_artifact() {
        assert_eq!(check_name(SPOTBUGS_CHECK_GOAL), "spotbugs");
        assert_eq!(check_name(PMD_CHECK_GOAL), "pmd");
        assert_eq!(check_name("verify"), "verify");
    }

    #[test]
    fn success_lists_goals_and_warnings() {
        let report = RunReport {
            plan: Some(ExecuteOptions {
                goals: vec![SPOTBUGS_CHECK_GOAL.to_string(), PMD_CHECK_GOAL.to_string()],
                ..ExecuteOptions::default()
            }),
            warnings: vec!["priority ignored".to_string()],
        };
        let text = render(&Ok(report));
        assert!(text.contains("spotbugs"));
        assert!(text.contains(PMD_CHECK_GOAL));
        assert!(text.contains("priority ignored"));
        assert!(text.contains("PASS"));
    }

    #[test]
    fn skipped_run_says_skip() {
        let text = render(&Ok(RunReport::skipped()));
        assert!(text.contains("SKIP"));
        assert!(!text.contains("PASS"));
    }

    #[test]
    fn failure_shows_error() {
        let error = CheckError::Execute(MavenError::Failed {
            command: "mvn --batch-mode".to_string(),
            status: 1,
        });
        let text = render(&Err(error));
        assert!(text.contains("FAIL"));
        assert!(text.contains("mvn --batch-mode"));
    }
}
