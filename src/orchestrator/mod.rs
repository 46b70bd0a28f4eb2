//! Run orchestration for a single case.
//!
//! Owns the run-directory lifecycle, installation discovery and the launch of
//! the engine. The caller's working directory is never changed: the engine is
//! started with the run directory as its own working directory instead, so the
//! orchestrator is safe to call from any code that relies on the current
//! directory.

mod runner;

pub use runner::Orchestrator;
