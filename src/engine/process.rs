use super::{Invocation, LaunchStatus, Launcher};
use crate::error::RunError;
use std::fs::File;
use std::process::{Command, ExitStatus, Stdio};

/// Launches the engine as a real child process via `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&self, invocation: &Invocation) -> Result<LaunchStatus, RunError> {
        let log = File::create(&invocation.log_path)
            .map_err(|e| RunError::io("create log file", &invocation.log_path, e))?;
        // Both handles share one file description, so the child's writes land in order.
        let log_err = log
            .try_clone()
            .map_err(|e| RunError::io("duplicate log handle", &invocation.log_path, e))?;

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.working_dir)
            .stdout(Stdio::from(log))
            .stderr(Stdio::from(log_err))
            .status()
            .map_err(|e| RunError::io("launch", &invocation.program, e))?;

        Ok(status_of(status))
    }
}

#[cfg(unix)]
fn status_of(status: ExitStatus) -> LaunchStatus {
    use std::os::unix::process::ExitStatusExt;
    LaunchStatus {
        code: status.code(),
        signal: status.signal(),
    }
}

#[cfg(not(unix))]
fn status_of(status: ExitStatus) -> LaunchStatus {
    LaunchStatus {
        code: status.code(),
        signal: None,
    }
}
