use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::model::{CatalogConfig, CatalogItem};
use crate::parse::parse_catalog;

/// Error type for catalog loading. A missing catalog is the one hard
/// failure in the system: the catalog view cannot render without data.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog.csv not found. Looked in:{}\n\nLast error: {source}", attempted_list(.attempted))]
    NotFound {
        attempted: Vec<PathBuf>,
        source: std::io::Error,
    },
}

fn attempted_list(attempted: &[PathBuf]) -> String {
    attempted
        .iter()
        .map(|p| format!("\n  - {}", p.display()))
        .collect()
}

/// Candidate catalog locations, most specific first.
fn candidates(root: &Path, config: &CatalogConfig) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(configured) = &config.path {
        paths.push(root.join(configured));
    }
    paths.push(root.join("data").join("catalog.csv"));
    paths.push(root.join("catalog.csv"));
    paths
}

/// Read and parse the catalog, trying the configured path and then the
/// well-known locations. Individual bad rows drop inside the parser;
/// only a completely unreadable catalog errors.
pub fn load_catalog(root: &Path, config: &CatalogConfig) -> Result<Vec<CatalogItem>, CatalogError> {
    let attempted = candidates(root, config);
    let mut last_err = None;
    for path in &attempted {
        match fs::read_to_string(path) {
            Ok(text) => {
                let items = parse_catalog(&text);
                info!(path = %path.display(), count = items.len(), "catalog loaded");
                return Ok(items);
            }
            Err(e) => last_err = Some(e),
        }
    }
    Err(CatalogError::NotFound {
        attempted,
        source: last_err.unwrap_or_else(|| std::io::Error::other("no candidate paths")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "partnumber,title\nX1,Widget\n";

    #[test]
    fn loads_from_data_subdirectory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data")).unwrap();
        fs::write(tmp.path().join("data/catalog.csv"), SAMPLE).unwrap();

        let items = load_catalog(tmp.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn falls_back_to_root_catalog() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("catalog.csv"), SAMPLE).unwrap();

        let items = load_catalog(tmp.path(), &CatalogConfig::default()).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn configured_path_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("catalog.csv"), SAMPLE).unwrap();
        fs::write(
            tmp.path().join("other.csv"),
            "partnumber,title\nY1,Gadget\n",
        )
        .unwrap();

        let config = CatalogConfig { path: Some("other.csv".to_string()) };
        let items = load_catalog(tmp.path(), &config).unwrap();
        assert_eq!(items[0].partnumber, "Y1");
    }

    #[test]
    fn missing_catalog_names_every_attempted_path() {
        let tmp = TempDir::new().unwrap();
        let err = load_catalog(tmp.path(), &CatalogConfig::default()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("data"));
        assert!(message.contains("catalog.csv"));
        assert!(message.contains("Last error"));
    }
}
