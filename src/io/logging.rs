use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Route logs to a file under the state directory so nothing prints
/// into the alternate screen. INFO by default, RUST_LOG overrides.
///
/// Returns `None` when the log file cannot be created or a subscriber
/// is already installed; the app runs unlogged in that case.
pub fn init(state_dir: &Path) -> Option<()> {
    std::fs::create_dir_all(state_dir).ok()?;
    let log_file = File::create(state_dir.join("aek.log")).ok()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_log_file_in_state_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("state");
        // may be None if another test installed a subscriber first;
        // the file must exist either way once the dir was writable
        let _ = init(&dir);
        assert!(dir.join("aek.log").exists());
    }
}
