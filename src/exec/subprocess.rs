//! Subprocess execution
//!
//! Commands are assembled as a program plus an argument vector and run
//! with inherited stdio so the tool's own output streams to the console.

use std::borrow::Cow;
use std::fmt;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::utils::tools::resolve_tool;

/// An external command, ready to be echoed or spawned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    /// Program as configured (bare name or path)
    pub program: String,

    /// Arguments, one entry per argv slot
    pub args: Vec<String>,
}

impl ToolCommand {
    /// Create a command for `program` with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Quote `word` for a POSIX shell, leaving plain words untouched
fn shell_quote(word: &str) -> Cow<'_, str> {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));

    if plain {
        Cow::Borrowed(word)
    } else {
        Cow::Owned(format!("'{}'", word.replace('\'', r"'\''")))
    }
}

/// Renders the command so it can be pasted back into a POSIX shell
impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(arg))?;
        }
        Ok(())
    }
}

/// Result of a subprocess execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,

    /// Process exit code, `None` when killed by a signal
    pub exit_code: Option<i32>,

    /// Execution duration
    pub duration: Duration,
}

impl CommandResult {
    /// A successful result that took no time, for runners that skip execution
    pub fn skipped() -> Self {
        Self {
            success: true,
            exit_code: Some(0),
            duration: Duration::ZERO,
        }
    }
}

/// Something that can execute a [`ToolCommand`].
///
/// `step` names the build step the command belongs to, for diagnostics.
pub trait CommandRunner {
    fn run(&mut self, step: &str, command: &ToolCommand) -> Result<CommandResult>;
}

/// Runs commands for real, streaming their output to the console
#[derive(Debug, Default)]
pub struct SystemRunner {
    verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, step: &str, command: &ToolCommand) -> Result<CommandResult> {
        let program = resolve_tool(&command.program, step)?;
        crate::utils::terminal::print_verbose(
            self.verbose,
            &format!("{} -> {}", command.program, program.display()),
        );

        let start = Instant::now();

        let mut cmd = Command::new(&program);
        cmd.args(&command.args);

        let status = cmd
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .with_context(|| format!("Failed to execute {}", program.display()))?;

        Ok(CommandResult {
            success: status.success(),
            exit_code: status.code(),
            duration: start.elapsed(),
        })
    }
}

/// Echoes nothing and spawns nothing; every command "succeeds"
#[derive(Debug, Default)]
pub struct DryRunner;

impl CommandRunner for DryRunner {
    fn run(&mut self, _step: &str, _command: &ToolCommand) -> Result<CommandResult> {
        Ok(CommandResult::skipped())
    }
}
