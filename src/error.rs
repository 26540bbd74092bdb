//! Crate error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by page parsing and configuration loading.
///
/// Runtime sub-behavior failures (clipboard, preference store, analytics)
/// are deliberately absent: they are logged and swallowed so that no single
/// capability failure can take down the controller.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("malformed HTML document")]
    MalformedHtml,
}
