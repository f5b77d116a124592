use std::collections::HashMap;
use std::process::{Command, Output};

use crate::errors::PerldepsError;

/// Builder for constructing and executing external processes.
///
/// Provides a fluent API for setting program, arguments, and environment
/// variables.
pub struct CommandBuilder {
    program: String,
    args: Vec<String>,
    env: HashMap<String, String>,
}

impl CommandBuilder {
    /// Create a new builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the child process.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Execute the command and return its output.
    pub fn exec(&self) -> Result<Output, PerldepsError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }
        cmd.output().map_err(PerldepsError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_captures_stdout() {
        let output = CommandBuilder::new("echo").arg("hello").exec().unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "hello");
    }

    #[test]
    fn missing_program_is_an_error() {
        let result = CommandBuilder::new("definitely-not-a-real-program-xyz").exec();
        assert!(result.is_err());
    }
}
