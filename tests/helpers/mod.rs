use anyhow::{Context, Result};
use nbextract::domain::RewritePolicy;
use nbextract::infrastructure::Compression;
use nbextract::ExtractRequest;
use serde_json::Value;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// Temporary directory holding an input notebook and all extraction outputs
#[allow(dead_code)]
pub struct Workspace {
    _temp_dir: TempDir,
    pub root: PathBuf,
    pub notebook_path: PathBuf,
    pub output_dir: PathBuf,
    pub output_notebook_path: PathBuf,
}

#[allow(dead_code)]
impl Workspace {
    /// Create a workspace with `notebook` written as the input file
    pub fn with_notebook(notebook: &Value) -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let root = temp_dir.path().to_path_buf();
        let notebook_path = root.join("input.ipynb");
        std::fs::write(&notebook_path, serde_json::to_string(notebook)?)
            .context("Failed to write input notebook")?;

        Ok(Self {
            _temp_dir: temp_dir,
            output_dir: root.join("extracted_images"),
            output_notebook_path: root.join("updated_notebook.ipynb"),
            notebook_path,
            root,
        })
    }

    pub fn request(&self, policy: RewritePolicy) -> ExtractRequest {
        ExtractRequest {
            notebook_path: self.notebook_path.clone(),
            output_dir: self.output_dir.clone(),
            output_notebook_path: self.output_notebook_path.clone(),
            policy,
            compression: Compression::Deflated,
        }
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root.join("extracted_images.zip")
    }

    pub fn output_notebook(&self) -> Result<Value> {
        let content = std::fs::read_to_string(&self.output_notebook_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Reference line the extractor writes for `file_name`
    pub fn reference(&self, file_name: &str) -> String {
        format!("![Image]({})\n", self.output_dir.join(file_name).display())
    }
}

/// Entry names of a zip archive in central directory order
#[allow(dead_code)]
pub fn archive_entries(path: &Path) -> Result<Vec<String>> {
    let archive = ZipArchive::new(File::open(path)?)?;
    Ok(archive.file_names().map(|s| s.to_string()).collect())
}

/// Read one entry of a zip archive
#[allow(dead_code)]
pub fn archive_entry(path: &Path, name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut entry = archive.by_name(name)?;
    let mut content = Vec::new();
    entry.read_to_end(&mut content)?;
    Ok(content)
}
