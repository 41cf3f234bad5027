// Error type for the plugin host.
//
// `PluginError` wraps every failure the host can see. Only `Import` is
// recoverable: the session turns it into a `HostEvent::ImportFailed` and keeps
// running. The rest end the process (bad input files, broken stdout).

use blockfield_core::{ConfigError, ImportError, SceneError};
use blockfield_protocol::FramingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Framing(#[from] FramingError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
