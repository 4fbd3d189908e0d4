//! CLI-level errors (wraps domain and settings errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::HierarchyError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Hierarchy(#[from] HierarchyError),

    #[error("{0}")]
    Settings(#[from] SettingsError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Settings(e) => match e {
                SettingsError::NotFound(_) => crate::exitcode::NOINPUT,
                SettingsError::Read { .. } => crate::exitcode::IOERR,
                SettingsError::Parse { .. } | SettingsError::Environment(_) => {
                    crate::exitcode::CONFIG
                }
            },
            CliError::Hierarchy(e) => match e {
                HierarchyError::LeafOperationFailed { .. } => crate::exitcode::DATAERR,
                _ => crate::exitcode::SOFTWARE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn given_errors_when_mapping_exit_codes_then_sysexits_values() {
        let missing = CliError::from(SettingsError::NotFound(PathBuf::from("x.toml")));
        assert_eq!(missing.exit_code(), crate::exitcode::NOINPUT);

        let leaf = CliError::from(HierarchyError::leaf_failed("tv", "broken"));
        assert_eq!(leaf.exit_code(), crate::exitcode::DATAERR);

        let usage = CliError::InvalidArgs("nope".into());
        assert_eq!(usage.exit_code(), crate::exitcode::USAGE);
    }
}
