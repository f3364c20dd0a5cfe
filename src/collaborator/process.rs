//! Blocking invocation of external commands
//!
//! Every run owns the child's pipes for its whole lifetime: stdin is
//! written and dropped before waiting, stdout and stderr are drained by
//! `wait_with_output`, and a child whose stdin cannot be written is killed
//! and reaped before returning.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use log::{debug, warn};

use super::environment::Environment;

/// Runs one external program
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    program: String,
}

impl ProcessRunner {
    pub fn new(program: impl Into<String>) -> Self {
        ProcessRunner { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program to completion and return its stdout
    ///
    /// # Arguments
    /// * `args` - Arguments passed verbatim
    /// * `env` - Context whose variables are added to the child's environment
    /// * `input` - Text written to the child's stdin, if any
    ///
    /// # Returns
    /// Stdout as text, or a message describing why the run failed
    /// (spawn error, I/O error, nonzero exit status with stderr)
    pub fn run(&self, args: &[String], env: &Environment, input: Option<&str>) -> Result<String, String> {
        debug!("Running {} {:?} in environment '{}'", self.program, args, env.name());

        let mut child = Command::new(&self.program)
            .args(args)
            .envs(env.vars())
            .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format!("failed to start {}: {}", self.program, e))?;

        if let Some(text) = input {
            let written = match child.stdin.take() {
                // Dropping the handle at the end of this arm closes the pipe
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin was not captured")),
            };

            if let Err(e) = written {
                warn!("Failed to write input to {}: {}", self.program, e);
                let _ = child.kill();
                let _ = child.wait();
                return Err(format!("failed to write input to {}: {}", self.program, e));
            }
        }

        let output = child.wait_with_output()
            .map_err(|e| format!("failed to read output of {}: {}", self.program, e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("{} exited with {}: {}", self.program, output.status, stderr.trim()));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| format!("{} produced output that is not valid UTF-8", self.program))
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Vec<String> {
        vec!["-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_pipes_input_through() {
        let runner = ProcessRunner::new("sh");
        let out = runner.run(&sh("cat"), &Environment::new("test"), Some("1 2\n3 4\n")).unwrap();
        assert_eq!(out, "1 2\n3 4\n");
    }

    #[test]
    fn test_environment_is_passed() {
        let runner = ProcessRunner::new("sh");
        let env = Environment::new("test").with_var("REGIONKIT_PROBE", "visible");
        let out = runner.run(&sh("printf %s \"$REGIONKIT_PROBE\""), &env, None).unwrap();
        assert_eq!(out, "visible");
    }

    #[test]
    fn test_nonzero_exit_reports_stderr() {
        let runner = ProcessRunner::new("sh");
        let err = runner.run(&sh("echo boom >&2; exit 3"), &Environment::new("test"), None).unwrap_err();
        assert!(err.contains("boom"), "{}", err);
    }

    #[test]
    fn test_missing_program() {
        let runner = ProcessRunner::new("regionkit-no-such-program");
        assert!(runner.run(&[], &Environment::new("test"), None).is_err());
    }
}
