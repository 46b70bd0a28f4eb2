//! The external simulation engine: where it is installed and how it is launched.

mod installation;
mod process;

pub use installation::resolve_installation;
pub use process::ProcessLauncher;

use crate::error::RunError;
use crate::model::EngineInstallation;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Everything needed to start the engine for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Working directory of the child. The caller's own directory is never changed.
    pub working_dir: PathBuf,
    /// Receives both stdout and stderr of the child.
    pub log_path: PathBuf,
}

impl Invocation {
    /// Build the `amanzi --xml_file=<case> --xml_schema=<xsd>` command line.
    pub fn for_case(
        installation: &EngineInstallation,
        input_file: &Path,
        working_dir: &Path,
        log_path: PathBuf,
    ) -> Self {
        Self {
            program: installation.executable_path.clone(),
            args: vec![
                flag("--xml_file=", input_file),
                flag("--xml_schema=", &installation.schema_path),
            ],
            working_dir: working_dir.to_path_buf(),
            log_path,
        }
    }
}

fn flag(prefix: &str, value: &Path) -> OsString {
    let mut s = OsString::from(prefix);
    s.push(value.as_os_str());
    s
}

/// How the child terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchStatus {
    pub code: Option<i32>,
    pub signal: Option<i32>,
}

impl LaunchStatus {
    pub fn exited(code: i32) -> Self {
        Self {
            code: Some(code),
            signal: None,
        }
    }

    /// Exit code as a shell would report it.
    pub fn exit_code(&self) -> i32 {
        match (self.code, self.signal) {
            (Some(code), _) => code,
            (None, Some(sig)) => 128 + sig,
            (None, None) => -1,
        }
    }
}

/// Starts the engine and blocks until it exits.
pub trait Launcher {
    fn launch(&self, invocation: &Invocation) -> Result<LaunchStatus, RunError>;
}
