// src/application/mod.rs
pub mod image_extractor;

pub use image_extractor::{ImageExtractor, ImageSink};
