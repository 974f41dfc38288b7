// src/domain/image.rs
use serde::Serialize;
use std::path::PathBuf;

/// One attachment payload that was decoded and written to disk
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedImage {
    pub cell_index: usize,
    pub image_index: usize,
    pub attachment_name: String,
    pub mime_type: String,
    pub file_name: String,
    pub path: PathBuf,
    pub byte_len: usize,
}

/// File extension for a MIME type: everything after the last '/'.
///
/// No validation happens here, so `image/svg+xml` yields `svg+xml` and a
/// value without a slash is returned unchanged.
pub fn extension_from_mime(mime_type: &str) -> &str {
    mime_type.rsplit('/').next().unwrap_or(mime_type)
}

/// `cell_<cell>_image_<counter>.<ext>`; the counter is notebook-wide
pub fn image_file_name(cell_index: usize, image_index: usize, mime_type: &str) -> String {
    format!(
        "cell_{}_image_{}.{}",
        cell_index,
        image_index,
        extension_from_mime(mime_type)
    )
}

/// Markdown line that replaces the attachment in the cell source
pub fn image_reference(path: &str) -> String {
    format!("![Image]({})\n", path)
}
