use crate::error::RunError;
use crate::model::{EngineInstallation, EngineSettings, ENGINE_NAME, INSTALL_DIR_VAR, SCHEMA_VAR};

/// Resolve the engine executable and schema from settings.
///
/// Both settings are required. The executable must exist as a regular file at
/// `<install_dir>/bin/amanzi`; the schema is passed through unchecked since the
/// engine validates it itself.
pub fn resolve_installation(settings: &EngineSettings) -> Result<EngineInstallation, RunError> {
    let install_dir = settings
        .install_dir
        .as_deref()
        .ok_or(RunError::Configuration {
            variable: INSTALL_DIR_VAR,
        })?;
    let schema_path = settings
        .schema_path
        .clone()
        .ok_or(RunError::Configuration {
            variable: SCHEMA_VAR,
        })?;

    let bin_dir = install_dir.join("bin");
    let executable_path = bin_dir.join(ENGINE_NAME);
    tracing::debug!(executable = %executable_path.display(), "resolving engine executable");

    if !executable_path.is_file() {
        return Err(RunError::Installation {
            executable: executable_path,
        });
    }

    Ok(EngineInstallation {
        bin_dir,
        schema_path,
        executable_path,
    })
}
