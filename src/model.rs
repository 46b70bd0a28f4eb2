use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the root of the engine installation.
pub const INSTALL_DIR_VAR: &str = "AMANZI_INSTALL_DIR";
/// Environment variable naming the schema file handed to the engine.
pub const SCHEMA_VAR: &str = "AMANZI_XSD";
/// File name of the engine executable under `<install>/bin`.
pub const ENGINE_NAME: &str = "amanzi";
/// Name of the per-case output directory created under the base directory.
pub const RUN_DIR_NAME: &str = "amanzi-output";
/// Log file receiving the engine's merged stdout and stderr.
pub const LOG_FILE_NAME: &str = "stdout.out";

/// Raw configuration values, gathered at the edge and passed into the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub install_dir: Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
}

impl EngineSettings {
    /// Read settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        Self {
            install_dir: get(INSTALL_DIR_VAR),
            schema_path: get(SCHEMA_VAR),
        }
    }
}

/// One case to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    input_file: PathBuf,
    base_directory: Option<PathBuf>,
}

impl RunRequest {
    pub fn new(input_file: impl Into<PathBuf>) -> Self {
        Self {
            input_file: input_file.into(),
            base_directory: None,
        }
    }

    pub fn with_base_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_directory = Some(dir.into());
        self
    }

    /// Case file, passed to the engine as given. Relative paths resolve
    /// against the run directory, which is the engine's working directory.
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    pub fn base_directory(&self) -> Option<&Path> {
        self.base_directory.as_deref()
    }
}

/// The isolated workspace of one run: `<base>/amanzi-output`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunDirectory {
    path: PathBuf,
}

impl RunDirectory {
    pub fn under(base: &Path) -> Self {
        Self {
            path: base.join(RUN_DIR_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_path(&self) -> PathBuf {
        self.path.join(LOG_FILE_NAME)
    }

    /// Used as the idempotency marker: anything at this path means the case already ran.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// A resolved, on-disk engine installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineInstallation {
    pub bin_dir: PathBuf,
    pub schema_path: PathBuf,
    pub executable_path: PathBuf,
}

/// Result of a run in which the engine was actually launched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Engine exit code. A signal-terminated child reports `128 + signal`.
    pub exit_code: i32,
    #[serde(default)]
    pub signal: Option<i32>,
    pub run_directory: PathBuf,
    pub stdout_log_path: PathBuf,
    #[serde(default)]
    pub started_utc: String,
    #[serde(with = "humantime_serde")]
    pub elapsed: Duration,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Completed(ExecutionResult),
    /// The run directory already existed; nothing was launched or written.
    Skipped {
        run_directory: PathBuf,
        /// Log left by the earlier run, if there is one.
        stdout_log_path: Option<PathBuf>,
    },
}

impl RunOutcome {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            RunOutcome::Completed(r) => Some(r.exit_code),
            RunOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, RunOutcome::Skipped { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn settings_from_lookup_treats_empty_as_unset() {
        let vars: HashMap<&str, &str> =
            [(INSTALL_DIR_VAR, "/opt/amanzi"), (SCHEMA_VAR, "")].into();
        let settings = EngineSettings::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(settings.install_dir, Some(PathBuf::from("/opt/amanzi")));
        assert_eq!(settings.schema_path, None);
    }

    #[test]
    fn run_directory_layout() {
        let dir = RunDirectory::under(Path::new("/tmp/case1"));
        assert_eq!(dir.path(), Path::new("/tmp/case1/amanzi-output"));
        assert_eq!(dir.log_path(), PathBuf::from("/tmp/case1/amanzi-output/stdout.out"));
    }

    #[test]
    fn request_keeps_input_path_verbatim() {
        let req = RunRequest::new("../case.xml").with_base_directory("/tmp/case1");
        assert_eq!(req.input_file(), Path::new("../case.xml"));
        assert_eq!(req.base_directory(), Some(Path::new("/tmp/case1")));
    }

    #[test]
    fn skipped_outcome_serializes_with_status_tag() {
        let outcome = RunOutcome::Skipped {
            run_directory: PathBuf::from("/tmp/case1/amanzi-output"),
            stdout_log_path: None,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "skipped");
        assert_eq!(outcome.exit_code(), None);
    }

    #[test]
    fn completed_outcome_serializes_elapsed_as_humantime() {
        let outcome = RunOutcome::Completed(ExecutionResult {
            exit_code: 3,
            signal: None,
            run_directory: PathBuf::from("/tmp/c/amanzi-output"),
            stdout_log_path: PathBuf::from("/tmp/c/amanzi-output/stdout.out"),
            started_utc: "2024-01-01T00:00:00Z".into(),
            elapsed: Duration::from_millis(1500),
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "completed");
        assert_eq!(json["exit_code"], 3);
        assert_eq!(json["elapsed"], "1s 500ms");
        assert_eq!(outcome.exit_code(), Some(3));
    }
}
