use std::path::PathBuf;

use thiserror::Error;

/// Why an edit modal refused to save its draft.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Password cannot be empty")]
    EmptyPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Weight must be a positive number")]
    InvalidWeight,
    #[error("Name cannot be empty")]
    EmptyName,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
