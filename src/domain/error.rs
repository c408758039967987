// Panel build errors
use thiserror::Error;

/// Failure of a single panel build. Every variant is terminal for the build
/// it occurred in; no partial table or figure is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PanelError {
    #[error("could not resolve indicator metadata for: {}", .missing.join(", "))]
    MetadataResolution { missing: Vec<String> },

    #[error("data source error: {0}")]
    DataSource(String),

    #[error("invalid indicator group: {0}")]
    InvalidGroup(String),
}
