use crate::engine::{self, Invocation, Launcher, ProcessLauncher};
use crate::error::RunError;
use crate::model::{EngineSettings, ExecutionResult, RunDirectory, RunOutcome, RunRequest};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Runs one case at a time against a configured engine installation.
pub struct Orchestrator<L = ProcessLauncher> {
    settings: EngineSettings,
    launcher: L,
}

impl Orchestrator<ProcessLauncher> {
    pub fn new(settings: EngineSettings) -> Self {
        Self::with_launcher(settings, ProcessLauncher)
    }
}

impl<L: Launcher> Orchestrator<L> {
    pub fn with_launcher(settings: EngineSettings, launcher: L) -> Self {
        Self { settings, launcher }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Run the case unless its run directory already exists.
    ///
    /// Setup errors are returned before anything is created on disk. A nonzero
    /// engine exit is returned as `Completed` with that exit code.
    pub fn execute(&self, request: &RunRequest) -> Result<RunOutcome, RunError> {
        let base = resolve_base(request.base_directory())?;
        let run_dir = RunDirectory::under(&base);

        if run_dir.exists() {
            let log = run_dir.log_path();
            tracing::info!(run_dir = %run_dir.path().display(), "run directory exists, skipping");
            return Ok(RunOutcome::Skipped {
                run_directory: run_dir.path().to_path_buf(),
                stdout_log_path: log.is_file().then_some(log),
            });
        }

        let installation = engine::resolve_installation(&self.settings)?;

        std::fs::create_dir(run_dir.path())
            .map_err(|e| RunError::io("create run directory", run_dir.path(), e))?;

        let invocation = Invocation::for_case(
            &installation,
            request.input_file(),
            run_dir.path(),
            run_dir.log_path(),
        );
        tracing::info!(
            case = %request.input_file().display(),
            run_dir = %run_dir.path().display(),
            "launching engine"
        );
        tracing::debug!(program = %invocation.program.display(), args = ?invocation.args);

        let started_utc = time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into());
        let start = Instant::now();
        let status = self.launcher.launch(&invocation)?;
        let elapsed = start.elapsed();

        let exit_code = status.exit_code();
        if exit_code == 0 {
            tracing::info!(?elapsed, "engine finished");
        } else {
            tracing::warn!(exit_code, signal = ?status.signal, "engine exited with failure");
        }

        Ok(RunOutcome::Completed(ExecutionResult {
            exit_code,
            signal: status.signal,
            run_directory: run_dir.path().to_path_buf(),
            stdout_log_path: invocation.log_path,
            started_utc,
            elapsed,
        }))
    }
}

/// Absolute base directory; defaults to the current directory.
fn resolve_base(base: Option<&Path>) -> Result<PathBuf, RunError> {
    match base {
        Some(dir) if dir.is_absolute() => Ok(dir.to_path_buf()),
        other => {
            let cwd = std::env::current_dir()
                .map_err(|e| RunError::io("read current directory", ".", e))?;
            Ok(other.map_or(cwd.clone(), |dir| cwd.join(dir)))
        }
    }
}
