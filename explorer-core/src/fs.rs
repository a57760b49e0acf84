//! Access to the host description and configuration files.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::Result;

/// Source of the JSON documents the explorer is configured from.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Whole contents of the file at `path`.
    fn read_to_string(&self, path: &Path) -> Result<String>;
}

/// Reads from the local disk.
#[derive(Debug, Default, Clone)]
pub struct StdFileSystem;

impl StdFileSystem {
    /// Disk-backed source.
    pub fn new() -> Self {
        Self
    }
}

/// Read and deserialize a JSON document.
pub fn read_json<F, T>(fs: &F, path: &Path) -> Result<T>
where
    F: FileSystem + ?Sized,
    T: DeserializeOwned,
{
    let raw = fs.read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{MockFileSystem, StdFileSystem, read_json};
    use crate::fs::FileSystem;
    use std::path::{Path, PathBuf};

    #[test]
    fn std_filesystem_reads_files() {
        let root = std::env::temp_dir().join(unique_dir_name());
        std::fs::create_dir_all(&root).expect("create temp dir");
        let file_path = root.join("app.json");
        std::fs::write(&file_path, "{\"models\":[]}").expect("write test file");

        let fs = StdFileSystem::new();
        let contents = fs.read_to_string(&file_path).expect("read file");
        assert_eq!(contents, "{\"models\":[]}");

        std::fs::remove_dir_all(&root).expect("cleanup temp dir");
    }

    #[test]
    fn read_json_reports_malformed_documents() {
        let mut fs = MockFileSystem::new();
        fs.expect_read_to_string()
            .returning(|_| Ok("{\"models\": [".to_string()));

        let result: crate::Result<serde_json::Value> = read_json(&fs, Path::new("app.json"));
        assert!(matches!(result, Err(crate::ExplorerError::Json(_))));
    }

    #[test]
    fn std_filesystem_reports_missing_file() {
        let fs = StdFileSystem::new();
        let missing = std::env::temp_dir()
            .join(unique_dir_name())
            .join("missing.json");
        assert!(fs.read_to_string(&missing).is_err());
    }

    fn unique_dir_name() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time")
            .as_nanos();
        PathBuf::from(format!("explorer_core_test_{nanos}"))
    }
}
