use std::fs;
use std::path::{Path, PathBuf};

use crate::model::KioskConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse kiosk.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read kiosk.toml from the root. A missing file is not an error; it
/// means all defaults. A present-but-broken file is reported, since
/// silently ignoring it would mask typos.
pub fn read_config(root: &Path) -> Result<KioskConfig, ConfigError> {
    let path = root.join("kiosk.toml");
    if !path.exists() {
        return Ok(KioskConfig::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_means_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.shop.name, "Anything Electronic");
    }

    #[test]
    fn file_overrides_apply() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("kiosk.toml"),
            "[shop]\nname = \"Bench Test Ltd\"\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.shop.name, "Bench Test Ltd");
    }

    #[test]
    fn broken_toml_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("kiosk.toml"), "[shop\nname=").unwrap();
        assert!(read_config(tmp.path()).is_err());
    }
}
