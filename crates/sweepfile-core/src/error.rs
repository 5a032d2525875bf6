//! Error types for scanning operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can be returned from a scan invocation.
///
/// Per-node filesystem failures never show up here; they are recorded as
/// [`SkipRecord`](crate::SkipRecord)s on the result instead.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The root argument was rejected before traversal began.
    #[error("Invalid root path: {message}")]
    InvalidRoot { message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// The scan was stopped through its cancellation token.
    #[error("Scan cancelled")]
    Cancelled,

    /// Other error.
    #[error("{message}")]
    Other { message: String },
}

impl ScanError {
    /// Create an invalid root error.
    pub fn invalid_root(message: impl Into<String>) -> Self {
        Self::InvalidRoot {
            message: message.into(),
        }
    }
}

impl From<crate::config::ScanConfigBuilderError> for ScanError {
    fn from(err: crate::config::ScanConfigBuilderError) -> Self {
        match err {
            crate::config::ScanConfigBuilderError::ValidationError(message) => {
                Self::InvalidRoot { message }
            }
            other => Self::InvalidConfig {
                message: other.to_string(),
            },
        }
    }
}

/// Why a path could not be scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Stat failed: permission denied, or the path vanished.
    PermissionOrMissing,
    /// The directory exists but its entries could not be listed.
    ListingFailed,
}

impl SkipReason {
    /// User-visible label. Kept stable for display consistency.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PermissionOrMissing => "Sem permissao ou inexistente",
            Self::ListingFailed => "Nao foi possivel listar",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_labels() {
        assert_eq!(
            SkipReason::PermissionOrMissing.to_string(),
            "Sem permissao ou inexistente"
        );
        assert_eq!(SkipReason::ListingFailed.label(), "Nao foi possivel listar");
    }

    #[test]
    fn test_invalid_root_message() {
        let err = ScanError::invalid_root("Root path cannot be empty");
        assert!(matches!(err, ScanError::InvalidRoot { .. }));
        assert!(err.to_string().contains("cannot be empty"));
    }
}
