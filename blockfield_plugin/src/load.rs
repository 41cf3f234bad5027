// Input files for the plugin binary.
//
// The scene is a JSON export of one canvas page (see
// `blockfield_core::scene`). The layout config is optional; without a path
// the stock `LayoutConfig::default()` is used.

use std::fs;
use std::path::Path;

use blockfield_core::{LayoutConfig, SceneDocument};
use tracing::info;

use crate::error::PluginError;

fn read(path: &Path) -> Result<String, PluginError> {
    fs::read_to_string(path).map_err(|source| PluginError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn load_scene(path: &Path) -> Result<SceneDocument, PluginError> {
    let doc = SceneDocument::from_json_str(&read(path)?)?;
    info!(path = %path.display(), page = %doc.page.name, "loaded scene");
    Ok(doc)
}

pub fn load_config(path: Option<&Path>) -> Result<LayoutConfig, PluginError> {
    match path {
        Some(path) => Ok(LayoutConfig::from_json_str(&read(path)?)?),
        None => Ok(LayoutConfig::default()),
    }
}
