use crate::core::Storage;
use crate::utils::error::{Result, TtsError};
use std::path::{Path, PathBuf};

/// 本機檔案系統，相對路徑以 `root` 為基準
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &Path) -> Result<Vec<u8>> {
        let full_path = self.resolve(path);
        tokio::fs::read(&full_path)
            .await
            .map_err(|source| TtsError::InputReadError {
                path: full_path.display().to_string(),
                source,
            })
    }

    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let write_error = |source: std::io::Error| TtsError::WriteError {
            path: full_path.display().to_string(),
            source,
        };

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }

        tokio::fs::write(&full_path, data).await.map_err(write_error)
    }
}
