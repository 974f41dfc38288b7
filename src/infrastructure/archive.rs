// src/infrastructure/archive.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::constants::ARCHIVE_EXTENSION;

/// Compression used for archive entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compression {
    Stored,
    #[default]
    Deflated,
}

impl From<Compression> for CompressionMethod {
    fn from(value: Compression) -> Self {
        match value {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// `<dir>.zip`, ignoring trailing separators on `dir`
pub fn archive_path_for(dir: &Path) -> PathBuf {
    let trimmed: PathBuf = dir.components().collect();
    let mut name = OsString::from(trimmed.as_os_str());
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}

/// Archive entry name for a path as given on the command line.
///
/// Root and drive prefixes and `.` are dropped, `..` collapses against a
/// preceding component, and separators become `/`.
pub fn entry_name(path: &Path) -> String {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => match parts.last() {
                Some(last) if last != ".." => {
                    parts.pop();
                }
                _ => parts.push("..".to_string()),
            },
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts.join("/")
}

/// Zip the rewritten notebook and every file below `content_dir`.
///
/// The notebook is stored under its normalized given path, directory files
/// relative to `content_dir`. Returns the entry names in write order.
#[instrument(level = "debug")]
pub fn create_archive(
    archive_path: &Path,
    notebook_path: &Path,
    content_dir: &Path,
    compression: Compression,
) -> Result<Vec<String>> {
    let file = File::create(archive_path)
        .with_context(|| format!("Failed to create archive {}", archive_path.display()))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default().compression_method(compression.into());

    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    add_file(
        &mut zip,
        options,
        notebook_path,
        entry_name(notebook_path),
        &mut seen,
        &mut entries,
    )?;

    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", content_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(content_dir)
            .context("Failed to get relative path")?;
        add_file(
            &mut zip,
            options,
            entry.path(),
            entry_name(relative),
            &mut seen,
            &mut entries,
        )?;
    }

    zip.finish().context("Failed to finalize archive")?.flush()?;
    debug!(entries = entries.len(), path = %archive_path.display(), "Archive written");
    Ok(entries)
}

fn add_file<W: Write + std::io::Seek>(
    zip: &mut ZipWriter<W>,
    options: SimpleFileOptions,
    source: &Path,
    name: String,
    seen: &mut HashSet<String>,
    entries: &mut Vec<String>,
) -> Result<()> {
    if !seen.insert(name.clone()) {
        warn!(%name, source = %source.display(), "Skipping duplicate archive entry");
        return Ok(());
    }

    let content = std::fs::read(source)
        .with_context(|| format!("Failed to read {} for archiving", source.display()))?;
    zip.start_file(name.as_str(), options)
        .with_context(|| format!("Failed to add archive entry {}", name))?;
    zip.write_all(&content)?;

    entries.push(name);
    Ok(())
}
