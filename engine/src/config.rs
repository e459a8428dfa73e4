use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;

pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Reads a YAML config from `path`. A missing file yields the default
/// config; an unreadable file, invalid YAML, or a config that fails
/// validation is an error.
pub fn load_or_default<TConfig>(path: &Path) -> Result<TConfig, String>
where
    TConfig: DeserializeOwned + Validate + Default,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(TConfig::default()),
        Err(err) => return Err(format!("Failed to read config file: {}", err)),
    };

    let config: TConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("Failed to deserialize config: {}", e))?;

    config
        .validate()
        .map_err(|e| format!("Config validation error: {}", e))?;

    Ok(config)
}
