use amanzi_run::error::RunError;
use amanzi_run::model::{EngineSettings, RunOutcome, RunRequest};
use amanzi_run::orchestrator::Orchestrator;
use amanzi_run::text_summary::build_text_summary;
use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

/// Exit code for configuration or installation problems.
pub const SETUP_ERROR_EXIT: i32 = 2;
/// Exit code for any other orchestrator failure.
pub const FAILURE_EXIT: i32 = 1;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "amanzi-run",
    version,
    about = "Run one Amanzi regression case in an isolated amanzi-output directory"
)]
pub struct Cli {
    /// Case file passed to the engine as --xml_file (relative paths resolve from the run directory)
    pub input_file: PathBuf,

    /// Base directory in which amanzi-output is created (default: current directory)
    #[arg(short = 'C', long)]
    pub base_dir: Option<PathBuf>,

    /// Root of the Amanzi installation; the engine is expected at <DIR>/bin/amanzi
    #[arg(long, env = "AMANZI_INSTALL_DIR", value_name = "DIR")]
    pub install_dir: Option<OsString>,

    /// Schema file passed to the engine as --xml_schema
    #[arg(long, env = "AMANZI_XSD", value_name = "FILE")]
    pub xsd: Option<OsString>,

    /// Print the run outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Build `EngineSettings` from CLI arguments (flags first, then environment).
pub fn build_settings(args: &Cli) -> EngineSettings {
    let non_empty = |v: &Option<OsString>| v.clone().filter(|v| !v.is_empty()).map(PathBuf::from);
    EngineSettings {
        install_dir: non_empty(&args.install_dir),
        schema_path: non_empty(&args.xsd),
    }
}

pub fn build_request(args: &Cli) -> RunRequest {
    let request = RunRequest::new(args.input_file.clone());
    match args.base_dir.as_ref() {
        Some(dir) => request.with_base_directory(dir.clone()),
        None => request,
    }
}

/// Run the case and return the process exit code.
pub fn run(args: Cli) -> Result<i32> {
    let orchestrator = Orchestrator::new(build_settings(&args));
    let outcome = orchestrator
        .execute(&build_request(&args))
        .with_context(|| format!("running case {}", args.input_file.display()))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        let json = serde_json::to_string_pretty(&outcome)?;
        writeln!(out, "{json}")?;
    } else {
        for line in build_text_summary(&outcome).lines {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()?;

    Ok(exit_code_for(&outcome))
}

/// The engine's exit code, or 0 for a skipped run.
pub fn exit_code_for(outcome: &RunOutcome) -> i32 {
    match outcome.exit_code() {
        Some(code) if (0..=255).contains(&code) => code,
        Some(_) => FAILURE_EXIT,
        None => 0,
    }
}

/// Process exit code for an error returned by [`run`].
pub fn failure_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RunError>() {
        Some(e) if e.is_setup_error() => SETUP_ERROR_EXIT,
        _ => FAILURE_EXIT,
    }
}

pub fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use amanzi_run::model::ExecutionResult;
    use std::time::Duration;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("amanzi-run").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_populate_settings_and_request() {
        let args = parse(&[
            "--install-dir",
            "/opt/amanzi",
            "--xsd",
            "/opt/amanzi/amanzi.xsd",
            "-C",
            "/tmp/case1",
            "case.xml",
        ]);
        let settings = build_settings(&args);
        assert_eq!(settings.install_dir, Some(PathBuf::from("/opt/amanzi")));
        assert_eq!(settings.schema_path, Some(PathBuf::from("/opt/amanzi/amanzi.xsd")));

        let request = build_request(&args);
        assert_eq!(request.input_file(), std::path::Path::new("case.xml"));
        assert_eq!(request.base_directory(), Some(std::path::Path::new("/tmp/case1")));
    }

    #[test]
    fn empty_flag_counts_as_unset() {
        let args = parse(&["--install-dir", "", "--xsd", "/x.xsd", "case.xml"]);
        assert_eq!(build_settings(&args).install_dir, None);
    }

    #[test]
    fn exit_code_mapping() {
        let skipped = RunOutcome::Skipped {
            run_directory: PathBuf::from("/tmp/c/amanzi-output"),
            stdout_log_path: None,
        };
        assert_eq!(exit_code_for(&skipped), 0);

        let completed = |code| {
            RunOutcome::Completed(ExecutionResult {
                exit_code: code,
                signal: None,
                run_directory: PathBuf::from("/tmp/c/amanzi-output"),
                stdout_log_path: PathBuf::from("/tmp/c/amanzi-output/stdout.out"),
                started_utc: String::new(),
                elapsed: Duration::ZERO,
            })
        };
        assert_eq!(exit_code_for(&completed(0)), 0);
        assert_eq!(exit_code_for(&completed(42)), 42);
        assert_eq!(exit_code_for(&completed(-1)), FAILURE_EXIT);
    }

    #[test]
    fn setup_errors_map_to_dedicated_code() {
        let err = anyhow::Error::new(RunError::Configuration {
            variable: "AMANZI_XSD",
        })
        .context("running case case.xml");
        assert_eq!(failure_code(&err), SETUP_ERROR_EXIT);

        let err = anyhow::anyhow!("something else");
        assert_eq!(failure_code(&err), FAILURE_EXIT);
    }
}
