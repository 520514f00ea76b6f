// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{Result, SdkprepError};
use crate::process::CommandLine;
use std::io::{ErrorKind, Write};
use std::process::{ChildStdin, ExitStatus, Stdio};
use std::thread;

/// Answer count of the legacy fixed confirmation mode.
pub const LEGACY_CONFIRM_ANSWERS: usize = 50;

const AFFIRMATIVE_ANSWER: &[u8] = b"y\n";
const BANNER_WIDTH: usize = 80;

/// How affirmative answers are fed to an interactive child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfirmStrategy {
    /// Keep answering until the child exits and closes its input
    #[default]
    Unbounded,
    /// Write exactly this many answers, then close the input
    Fixed(usize),
}

impl From<Option<usize>> for ConfirmStrategy {
    fn from(count: Option<usize>) -> Self {
        match count {
            Some(count) => ConfirmStrategy::Fixed(count),
            None => ConfirmStrategy::Unbounded,
        }
    }
}

pub trait CommandRunner {
    /// Run a command to completion, failing on a non-zero exit.
    fn run(&self, command: &CommandLine) -> Result<()>;

    /// Run a command while answering "y" to every prompt on its input.
    fn run_auto_confirm(&self, command: &CommandLine, strategy: ConfirmStrategy) -> Result<()>;
}

/// Runs commands as child processes with inherited stdout and stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, command: &CommandLine) -> Result<()> {
        print_banner(&command.to_string());
        log::debug!("Running {command}");

        let status = command
            .to_command()
            .status()
            .map_err(|e| spawn_error(command, e))?;

        check_status(command, status)
    }

    fn run_auto_confirm(&self, command: &CommandLine, strategy: ConfirmStrategy) -> Result<()> {
        print_banner(&format!("yes|{command}"));
        log::debug!("Running {command} with {strategy:?} confirmation");

        let mut child = command
            .to_command()
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_error(command, e))?;

        let stdin = child.stdin.take().ok_or_else(|| {
            SdkprepError::ValidationError(format!("No stdin pipe for {command}"))
        })?;

        match strategy {
            ConfirmStrategy::Fixed(count) => feed_fixed(stdin, count),
            ConfirmStrategy::Unbounded => {
                // Detached; the writer ends once the child closes the pipe
                thread::Builder::new()
                    .name("auto-confirm".to_string())
                    .spawn(move || feed_unbounded(stdin))?;
            }
        }

        let status = child.wait()?;
        check_status(command, status)
    }
}

fn print_banner(line: &str) {
    println!("{}", "=".repeat(BANNER_WIDTH));
    println!("{line}");
}

fn feed_fixed(mut stdin: ChildStdin, count: usize) {
    let answers = AFFIRMATIVE_ANSWER.repeat(count);
    if let Err(e) = stdin.write_all(&answers) {
        // The child may exit before reading every answer
        log::debug!("Stopped feeding answers: {e}");
    }
    // Dropping stdin closes the pipe so the child sees end of input
}

fn feed_unbounded(mut stdin: ChildStdin) -> usize {
    let mut written = 0usize;
    loop {
        match stdin.write_all(AFFIRMATIVE_ANSWER) {
            Ok(()) => written += 1,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                if e.kind() != ErrorKind::BrokenPipe {
                    log::debug!("Auto-confirm writer stopped: {e}");
                }
                break;
            }
        }
    }
    log::trace!("Fed {written} answers");
    written
}

fn spawn_error(command: &CommandLine, error: std::io::Error) -> SdkprepError {
    match error.kind() {
        ErrorKind::NotFound => {
            SdkprepError::CommandNotFound(command.program().display().to_string())
        }
        ErrorKind::PermissionDenied => {
            SdkprepError::PermissionDenied(command.program().display().to_string())
        }
        _ => SdkprepError::Io(error),
    }
}

fn check_status(command: &CommandLine, status: ExitStatus) -> Result<()> {
    if status.success() {
        Ok(())
    } else {
        Err(SdkprepError::CommandFailed {
            command: command.to_string(),
            code: status.code(),
        })
    }
}
