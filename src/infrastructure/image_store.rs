// src/infrastructure/image_store.rs
use crate::application::ImageSink;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Writes extracted images as plain files into one directory
#[derive(Debug)]
pub struct DirectoryImageSink {
    dir: PathBuf,
}

impl DirectoryImageSink {
    /// Create the directory (and parents) if needed; existing content is kept
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self { dir })
    }
}

impl ImageSink for DirectoryImageSink {
    fn store(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.dir.join(file_name);
        std::fs::write(&path, bytes)
            .with_context(|| format!("Failed to write image {}", path.display()))?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_nested_missing_dir_when_creating_then_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a/b/images");

        let mut sink = DirectoryImageSink::create(&dir).unwrap();

        assert!(dir.is_dir());
        let path = sink.store("cell_0_image_0.png", &[0]).unwrap();
        assert_eq!(path, dir.join("cell_0_image_0.png"));
    }

    #[test]
    fn given_existing_files_when_creating_then_keeps_them() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("old.png");
        fs::write(&existing, b"old").unwrap();

        DirectoryImageSink::create(temp_dir.path()).unwrap();

        assert_eq!(fs::read(&existing).unwrap(), b"old");
    }

    #[test]
    fn given_bytes_when_storing_then_writes_file_and_returns_joined_path() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = DirectoryImageSink::create(temp_dir.path()).unwrap();

        let path = sink.store("cell_0_image_0.png", &[1, 2, 3]).unwrap();

        assert_eq!(path, temp_dir.path().join("cell_0_image_0.png"));
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }
}
