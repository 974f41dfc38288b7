// src/domain/report.rs
use crate::domain::ExtractedImage;
use serde::Serialize;
use std::path::PathBuf;

/// Outcome of a successful extraction run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub image_count: usize,
    pub output_dir: PathBuf,
    pub output_notebook: PathBuf,
    pub archive_path: PathBuf,
    pub images: Vec<ExtractedImage>,
}
