//! Launcher for Amanzi regression cases.
//!
//! [`orchestrator::Orchestrator::execute`] runs one case file in
//! `<base>/amanzi-output`, capturing the engine's merged console output in
//! `stdout.out`. An existing `amanzi-output` directory marks the case as
//! already run and the call is skipped.

pub mod engine;
pub mod error;
pub mod model;
pub mod orchestrator;
pub mod text_summary;

pub use error::RunError;
pub use model::{EngineSettings, ExecutionResult, RunOutcome, RunRequest};
pub use orchestrator::Orchestrator;
