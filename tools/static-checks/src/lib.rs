pub mod checks;
pub mod cli;
pub mod config;
pub mod maven;
pub mod pmd;
pub mod reporter;
pub mod runner;
pub mod spotbugs;
pub mod telemetry;
pub mod timing;

pub use checks::{run_static_code_checks, CheckError, RunReport};
pub use config::CheckConfiguration;
pub use runner::{CommandCall, CommandResult, CommandRunner, RealCommandRunner};
