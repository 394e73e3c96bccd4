pub mod batch;
pub mod compose;
pub mod config;
pub mod info;
pub mod recipes;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use meso_core::package::CompositeImage;
use meso_core::recipes::config::CompositeConfig;

/// Read a composite config, or fall back to defaults when none is given.
pub(crate) fn load_config(path: Option<&Path>) -> Result<CompositeConfig> {
    let Some(path) = path else {
        return Ok(CompositeConfig::default());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("Invalid composite config {}", path.display()))
}

/// Write the TOML metadata sidecar next to an exported image.
pub(crate) fn write_sidecar(image: &CompositeImage, image_path: &Path) -> Result<PathBuf> {
    let path = image_path.with_extension("toml");
    let toml_str = toml::to_string_pretty(&image.summary())?;
    std::fs::write(&path, toml_str)
        .with_context(|| format!("Failed to write metadata to {}", path.display()))?;
    Ok(path)
}

/// File-name friendly form of a recipe name: "Enhanced IR (ice)" → "enhanced_ir_ice".
pub(crate) fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}
