// src/system/executor.rs

use colored::*;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command as StdCommand, Stdio};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("Program '{program}' was not found in PATH. Make sure it is installed.")]
    ProgramNotFound { program: String },
    #[error("Command '{0}' could not be executed: {1}")]
    CommandFailed(String, std::io::Error),
    #[error("Command '{command}' exited with a non-zero error code ({code}).")]
    NonZeroExitStatus { command: String, code: String },
    #[error("Command '{command}' produced output that was not valid UTF-8")]
    InvalidUtf8Output {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

/// A program and its arguments, kept as separate words until it is spawned.
///
/// Nothing is ever passed through a shell: the words go straight to the
/// process, and [`CommandLine::display`] only exists for humans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Renders the command as a line that can be pasted into a POSIX shell.
    pub fn display(&self) -> String {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        // `try_join` only fails on NUL bytes; fall back to plain spaces for display.
        shlex::try_join(words.clone()).unwrap_or_else(|_| words.collect::<Vec<_>>().join(" "))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// The boundary between the workflow and the external tools.
pub trait ProcessRunner {
    /// Runs a command attached to the terminal and waits for it to finish.
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<(), ExecutionError>;

    /// Runs a command and returns its standard output. Never affected by dry runs,
    /// as it is only used for read-only lookups.
    fn capture(&self, command: &CommandLine, cwd: &Path) -> Result<String, ExecutionError>;
}

/// Runs commands for real.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

/// Prints mutating commands instead of running them, but still performs lookups.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunRunner;

fn locate_program(program: &str) -> Result<PathBuf, ExecutionError> {
    which::which(program).map_err(|_| ExecutionError::ProgramNotFound {
        program: program.to_string(),
    })
}

fn exit_code_label(status: std::process::ExitStatus) -> String {
    status
        .code()
        .map_or_else(|| "terminated by signal".to_string(), |c| c.to_string())
}

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<(), ExecutionError> {
        let program = locate_program(command.program())?;
        let clean_cwd = dunce::simplified(cwd);
        log::debug!("Running '{}' in '{}'", command, clean_cwd.display());

        let status = StdCommand::new(program)
            .args(command.get_args())
            .current_dir(clean_cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| ExecutionError::CommandFailed(command.display(), e))?;

        if !status.success() {
            return Err(ExecutionError::NonZeroExitStatus {
                command: command.display(),
                code: exit_code_label(status),
            });
        }
        Ok(())
    }

    fn capture(&self, command: &CommandLine, cwd: &Path) -> Result<String, ExecutionError> {
        let program = locate_program(command.program())?;
        let clean_cwd = dunce::simplified(cwd);
        log::debug!("Capturing output of '{}' in '{}'", command, clean_cwd.display());

        let output = StdCommand::new(program)
            .args(command.get_args())
            .current_dir(clean_cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| ExecutionError::CommandFailed(command.display(), e))?;

        if !output.status.success() {
            return Err(ExecutionError::NonZeroExitStatus {
                command: command.display(),
                code: exit_code_label(output.status),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| ExecutionError::InvalidUtf8Output {
            command: command.display(),
            source: e,
        })
    }
}

impl ProcessRunner for DryRunRunner {
    fn run(&self, command: &CommandLine, _cwd: &Path) -> Result<(), ExecutionError> {
        println!("{} {}", "(dry run)".dimmed(), command.display().green());
        Ok(())
    }

    fn capture(&self, command: &CommandLine, cwd: &Path) -> Result<String, ExecutionError> {
        SystemRunner.capture(command, cwd)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_quotes_words_with_spaces() {
        let cmd = CommandLine::new("security")
            .arg("add-generic-password")
            .args(["-a", "acme-ansible-vault", "-s", "acme-ansible-vault Password"]);
        assert_eq!(
            cmd.display(),
            "security add-generic-password -a acme-ansible-vault -s 'acme-ansible-vault Password'"
        );
    }

    #[test]
    fn test_display_keeps_json_in_one_word() {
        let cmd = CommandLine::new("ansible-playbook")
            .arg("--extra-vars")
            .arg(r#"{"ac_site":"acme"}"#);
        assert_eq!(
            cmd.display(),
            r#"ansible-playbook --extra-vars '{"ac_site":"acme"}'"#
        );
    }

    #[test]
    fn test_missing_program_is_reported() {
        let cmd = CommandLine::new("definitely-not-a-real-program-7f3a");
        let err = SystemRunner.run(&cmd, Path::new(".")).unwrap_err();
        assert!(matches!(err, ExecutionError::ProgramNotFound { .. }));
    }
}
