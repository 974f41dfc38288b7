// src/domain/mod.rs
pub mod error;
pub mod image;
pub mod notebook;
pub mod report;

pub use error::ExtractError;
pub use image::ExtractedImage;
pub use notebook::{Attachment, Notebook, RewritePolicy};
pub use report::ExtractionReport;
