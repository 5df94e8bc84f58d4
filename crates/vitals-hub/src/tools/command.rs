//! Command probe — run a host command and hand back its raw stdout.

use std::process::Stdio;
use tokio::process::Command;

use vitals_core::error::{Result, VitalsError};

/// A host command whose stdout is passed to the model verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandProbe {
    /// Tool name reported in errors.
    pub probe: String,
    pub program: String,
    pub args: Vec<String>,
}

impl CommandProbe {
    pub fn new(probe: &str, program: &str, args: &[&str]) -> Self {
        Self {
            probe: probe.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Build from a command line given as program followed by arguments.
    pub fn from_argv(probe: &str, argv: &[String]) -> Result<Self> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            VitalsError::Config(format!("empty command for probe {}", probe))
        })?;
        Ok(Self {
            probe: probe.to_string(),
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// Human-readable command line.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(|a| a.as_str()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Spawn the command, wait for it, and return stdout.
    ///
    /// Spawn failure and non-zero exit are both errors. Output is not parsed.
    pub async fn run(&self) -> Result<String> {
        tracing::info!("Running probe {}: {}", self.probe, self.command_line());

        let output = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| VitalsError::Probe {
                probe: self.probe.clone(),
                message: format!("failed to run `{}`: {}", self.command_line(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(VitalsError::Probe {
                probe: self.probe.clone(),
                message: format!(
                    "`{}` exited with {}: {}",
                    self.command_line(),
                    output.status,
                    stderr.trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandProbe {
        CommandProbe::new("test_probe", "sh", &["-c", script])
    }

    #[tokio::test]
    async fn test_returns_stdout_verbatim() {
        let out = sh("printf '  Filesystem  Size\\n/dev/x  10G\\n'").run().await.unwrap();
        assert_eq!(out, "  Filesystem  Size\n/dev/x  10G\n");
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_error() {
        let err = sh("echo partial; echo boom >&2; exit 3").run().await.unwrap_err();
        match err {
            VitalsError::Probe { probe, message } => {
                assert_eq!(probe, "test_probe");
                assert!(message.contains("boom"), "{}", message);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_failure_is_error() {
        let probe = CommandProbe::new("test_probe", "/nonexistent/vitals-probe", &[]);
        let err = probe.run().await.unwrap_err();
        assert!(matches!(err, VitalsError::Probe { .. }));
        assert!(err.to_string().contains("/nonexistent/vitals-probe"));
    }

    #[test]
    fn test_from_argv() {
        let argv = vec!["df".to_string(), "-h".to_string(), ".".to_string()];
        let probe = CommandProbe::from_argv("get_storage_info", &argv).unwrap();
        assert_eq!(probe, CommandProbe::new("get_storage_info", "df", &["-h", "."]));
        assert_eq!(probe.command_line(), "df -h .");
        assert!(CommandProbe::from_argv("get_storage_info", &[]).is_err());
    }
}
