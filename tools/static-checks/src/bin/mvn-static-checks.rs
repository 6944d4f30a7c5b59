use std::io;
use std::process;

use clap::Parser;
use static_checks::cli::Cli;
use static_checks::telemetry::{self, StepTelemetry};
use static_checks::timing::Stopwatch;
use static_checks::{reporter, run_static_code_checks, RealCommandRunner};
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match cli.configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            process::exit(1);
        }
    };
    debug!(?config, "loaded configuration");

    let stopwatch = Stopwatch::start();
    let runner = RealCommandRunner::default();
    let result = run_static_code_checks(&config, &runner);

    let elapsed_ms = stopwatch.elapsed_millis();
    if let Some(path) = &cli.telemetry_file {
        let record = StepTelemetry::from_run(&config, &result, elapsed_ms);
        telemetry::append_telemetry(path, &record);
    }

    let elapsed_secs = elapsed_ms / 1000;
    if let Err(err) = reporter::print_summary(&mut io::stdout(), &result, elapsed_secs) {
        debug!("could not print summary: {err}");
    }

    if let Err(err) = result {
        error!(error = %err, "step execution failed");
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .try_init();
}
