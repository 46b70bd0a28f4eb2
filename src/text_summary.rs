//! Text summary builder for CLI output.

use crate::model::RunOutcome;

/// Pre-formatted lines for text output.
pub struct TextSummary {
    pub lines: Vec<String>,
}

/// Build a text summary for a finished or skipped run.
pub fn build_text_summary(outcome: &RunOutcome) -> TextSummary {
    let mut lines = Vec::new();

    match outcome {
        RunOutcome::Completed(result) => {
            let status = if result.success() { "ok" } else { "FAILED" };
            match result.signal {
                Some(sig) => lines.push(format!(
                    "Engine: {status} (killed by signal {sig}, exit code {})",
                    result.exit_code
                )),
                None => lines.push(format!("Engine: {status} (exit code {})", result.exit_code)),
            }
            lines.push(format!("Run directory: {}", result.run_directory.display()));
            lines.push(format!("Output log: {}", result.stdout_log_path.display()));
            if !result.started_utc.is_empty() {
                lines.push(format!("Started: {}", result.started_utc));
            }
            lines.push(format!(
                "Elapsed: {}",
                humantime::format_duration(truncate_to_millis(result.elapsed))
            ));
        }
        RunOutcome::Skipped {
            run_directory,
            stdout_log_path,
        } => {
            lines.push(format!(
                "Skipped: {} already exists",
                run_directory.display()
            ));
            if let Some(log) = stdout_log_path {
                lines.push(format!("Previous output log: {}", log.display()));
            }
        }
    }

    TextSummary { lines }
}

fn truncate_to_millis(d: std::time::Duration) -> std::time::Duration {
    std::time::Duration::from_millis(d.as_millis() as u64)
}
