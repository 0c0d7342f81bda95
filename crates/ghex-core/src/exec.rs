//! `--exec` support: template tokenizing, placeholder substitution and
//! synchronous process execution.
//!
//! The template is split into an argument vector once, up front. Each
//! surviving item's payload is substituted into the tokens and the program is
//! spawned directly, never through a shell, so payload text cannot change
//! the command structure.

use crate::error::{ExploreError, ExploreResult};
use std::process::Stdio;
use tokio::process::Command;

/// Token replaced by the serialized item.
pub const PLACEHOLDER: &str = "{}";

/// A parsed `--exec` command template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    argv: Vec<String>,
}

impl CommandTemplate {
    /// Split a template into arguments.
    ///
    /// Whitespace separates arguments. Single quotes group literally, double
    /// quotes group with backslash escapes, and outside quotes a backslash
    /// escapes the next character.
    pub fn parse(template: &str) -> ExploreResult<Self> {
        let mut argv = Vec::new();
        let mut current = String::new();
        let mut in_token = false;
        let mut chars = template.chars();

        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    in_token = true;
                    loop {
                        match chars.next() {
                            Some('\'') => break,
                            Some(ch) => current.push(ch),
                            None => return Err(unterminated('\'')),
                        }
                    }
                }
                '"' => {
                    in_token = true;
                    loop {
                        match chars.next() {
                            Some('"') => break,
                            Some('\\') => match chars.next() {
                                Some(ch @ ('"' | '\\')) => current.push(ch),
                                Some(ch) => {
                                    current.push('\\');
                                    current.push(ch);
                                }
                                None => return Err(unterminated('"')),
                            },
                            Some(ch) => current.push(ch),
                            None => return Err(unterminated('"')),
                        }
                    }
                }
                '\\' => {
                    in_token = true;
                    match chars.next() {
                        Some(ch) => current.push(ch),
                        None => {
                            return Err(ExploreError::InvalidCommand(
                                "trailing backslash".to_string(),
                            ))
                        }
                    }
                }
                c if c.is_whitespace() => {
                    if in_token {
                        argv.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                c => {
                    in_token = true;
                    current.push(c);
                }
            }
        }

        if in_token {
            argv.push(current);
        }

        if argv.is_empty() {
            return Err(ExploreError::InvalidCommand("command is empty".to_string()));
        }

        Ok(Self { argv })
    }

    /// Program name (first argument).
    pub fn program(&self) -> &str {
        &self.argv[0]
    }

    /// Whether any argument contains the placeholder.
    pub fn has_placeholder(&self) -> bool {
        self.argv.iter().any(|arg| arg.contains(PLACEHOLDER))
    }

    /// Argument vector with every placeholder replaced by `payload`.
    pub fn render(&self, payload: &str) -> Vec<String> {
        self.argv
            .iter()
            .map(|arg| arg.replace(PLACEHOLDER, payload))
            .collect()
    }
}

fn unterminated(quote: char) -> ExploreError {
    ExploreError::InvalidCommand(format!("unterminated {quote} quote"))
}

/// Runs rendered commands one at a time.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run the template for one payload and return its standard output.
    ///
    /// Waits for the process to exit. A non-zero status is an error; stderr
    /// is passed through to ours. One trailing newline is removed from the
    /// captured output.
    pub async fn run(&self, template: &CommandTemplate, payload: &str) -> ExploreResult<String> {
        let argv = template.render(payload);
        let program = template.program().to_string();

        tracing::debug!(program = %program, args = argv.len() - 1, "running command");

        let output = Command::new(&argv[0])
            .args(&argv[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|source| ExploreError::CommandSpawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            tracing::error!(program = %program, status = %output.status, "command failed");
            return Err(ExploreError::CommandFailed {
                program,
                status: output.status.to_string(),
            });
        }

        let mut stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        if stdout.ends_with('\n') {
            stdout.pop();
            if stdout.ends_with('\r') {
                stdout.pop();
            }
        }
        Ok(stdout)
    }
}
