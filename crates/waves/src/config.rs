//! Loading and rendering settings files.
//!
//! YAML (`.yaml`, `.yml`) and JSON (`.json`) are accepted. Missing fields
//! take their defaults, out-of-range values are clamped into slider ranges.

use crate::settings::WaveSettings;
use std::path::Path;

/// Errors from settings file operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parameter {0} is not a finite number")]
    NonFinite(&'static str),
    #[error("unsupported settings file extension: {0:?}")]
    UnknownFormat(String),
}

/// Settings file encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Format::Yaml),
            "json" => Ok(Format::Json),
            _ => Err(ConfigError::UnknownFormat(ext)),
        }
    }
}

/// Parse settings text, then validate and clamp them.
pub fn parse(text: &str, format: Format) -> Result<WaveSettings, ConfigError> {
    let raw: WaveSettings = match format {
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    };
    sanitize(raw)
}

/// Read a settings file, picking the format from its extension.
pub fn load(path: impl AsRef<Path>) -> Result<WaveSettings, ConfigError> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let text = std::fs::read_to_string(path)?;
    let settings = parse(&text, format)?;
    tracing::info!("loaded wave settings from {}", path.display());
    Ok(settings)
}

pub fn to_string(settings: &WaveSettings, format: Format) -> Result<String, ConfigError> {
    Ok(match format {
        Format::Yaml => serde_yaml::to_string(settings)?,
        Format::Json => serde_json::to_string_pretty(settings)?,
    })
}

fn sanitize(settings: WaveSettings) -> Result<WaveSettings, ConfigError> {
    if let Some(p) = settings.non_finite().first() {
        return Err(ConfigError::NonFinite(p.label()));
    }
    for p in settings.out_of_range() {
        let r = p.range();
        tracing::warn!(
            "{} = {} outside [{}, {}], clamping",
            p.label(),
            p.get(&settings),
            r.min,
            r.max
        );
    }
    Ok(settings.clamped())
}
