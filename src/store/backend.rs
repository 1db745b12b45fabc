use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

/// Key-value persistence the selection store writes through.
///
/// A backend that cannot read returns `None`; a backend that cannot
/// write drops the value. Neither case surfaces an error; callers
/// degrade to empty reads and no-op writes.
pub trait StorageBackend {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&mut self, key: &str, value: &str);
}

/// File-per-key backend rooted in a state directory. Writes are atomic:
/// temp file in the same directory, then rename over the target.
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileBackend { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        // Keys may carry namespace separators; keep filenames portable.
        let safe: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
            .collect();
        self.dir.join(format!("{}.json", safe))
    }

    fn try_write(&self, path: &Path, value: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.key_path(key)).ok()
    }

    fn write(&mut self, key: &str, value: &str) {
        let path = self.key_path(key);
        if let Err(e) = self.try_write(&path, value) {
            warn!(key, error = %e, "state write dropped");
        }
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    values: HashMap<String, String>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        MemoryBackend::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Backend that refuses everything, for exercising the degraded path.
pub struct UnavailableBackend;

impl StorageBackend for UnavailableBackend {
    fn read(&self, _key: &str) -> Option<String> {
        None
    }

    fn write(&mut self, _key: &str, _value: &str) {}
}

/// Default state directory: the platform data dir plus an app folder.
pub fn default_state_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("ae-kiosk"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn file_backend_round_trips() {
        let tmp = TempDir::new().unwrap();
        let mut backend = FileBackend::new(tmp.path());
        backend.write("ae:selected-products", "[1,2,3]");
        assert_eq!(
            backend.read("ae:selected-products"),
            Some("[1,2,3]".to_string())
        );
    }

    #[test]
    fn file_backend_sanitizes_key() {
        let tmp = TempDir::new().unwrap();
        let mut backend = FileBackend::new(tmp.path());
        backend.write("ae:selected-products", "[]");
        assert!(tmp.path().join("ae-selected-products.json").exists());
    }

    #[test]
    fn file_backend_missing_key_reads_none() {
        let tmp = TempDir::new().unwrap();
        let backend = FileBackend::new(tmp.path());
        assert_eq!(backend.read("nothing"), None);
    }

    #[test]
    fn file_backend_creates_state_dir() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("deep/state");
        let mut backend = FileBackend::new(&nested);
        backend.write("k", "v");
        assert_eq!(backend.read("k"), Some("v".to_string()));
    }

    #[test]
    fn file_backend_overwrite_replaces_whole_value() {
        let tmp = TempDir::new().unwrap();
        let mut backend = FileBackend::new(tmp.path());
        backend.write("k", "a longer first value");
        backend.write("k", "short");
        assert_eq!(backend.read("k"), Some("short".to_string()));
    }

    #[test]
    fn unavailable_backend_is_silent() {
        let mut backend = UnavailableBackend;
        backend.write("k", "v");
        assert_eq!(backend.read("k"), None);
    }
}
