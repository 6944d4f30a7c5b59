use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::process::{ChildStdout, Command, Stdio};

use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandCall {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub status: i32,
    pub stdout: String,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Process and filesystem capabilities the checks need from the host.
///
/// `run` returns `Err` only when the executable could not be started; a
/// non-zero exit is reported through [`CommandResult::status`].
pub trait CommandRunner {
    fn run(&self, command: CommandCall) -> io::Result<CommandResult>;

    fn file_exists(&self, path: &Path) -> bool;
}

/// Runs commands with `std::process`, forwarding the child's stdout line by
/// line while also capturing it. Stderr is inherited.
///
/// Output bytes are forwarded unchanged and the captured copy is decoded
/// lossily. The child is always waited on, so its exit status is reported
/// even when reading its output fails.
#[derive(Debug, Clone)]
pub struct RealCommandRunner {
    echo: bool,
}

impl Default for RealCommandRunner {
    fn default() -> Self {
        Self { echo: true }
    }
}

impl RealCommandRunner {
    #[cfg(test)]
    fn quiet() -> Self {
        Self { echo: false }
    }

    fn forward(&self, stdout: ChildStdout, captured: &mut Vec<u8>) -> io::Result<()> {
        let mut reader = BufReader::new(stdout);
        let out = io::stdout();
        let mut out = out.lock();
        let mut echo = self.echo;
        let mut line = Vec::new();
        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line)? == 0 {
                return Ok(());
            }
            if echo && out.write_all(&line).is_err() {
                echo = false;
            }
            captured.extend_from_slice(&line);
        }
    }
}

impl CommandRunner for RealCommandRunner {
    fn run(&self, command: CommandCall) -> io::Result<CommandResult> {
        let mut child = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let mut captured = Vec::new();
        let read = match child.stdout.take() {
            Some(stdout) => self.forward(stdout, &mut captured),
            None => Ok(()),
        };
        let status = child.wait()?;
        if let Err(error) = read {
            debug!("stopped reading output of {}: {error}", command.program);
        }

        Ok(CommandResult {
            status: status.code().unwrap_or(1),
            stdout: String::from_utf8_lossy(&captured).into_owned(),
        })
    }

    fn file_exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

impl CommandCall {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Space-joined command line, used in log lines and error messages.
    pub fn command_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}
