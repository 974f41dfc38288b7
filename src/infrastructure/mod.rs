// src/infrastructure/mod.rs
pub mod archive;
pub mod config;
pub mod image_store;
pub mod notebook_store;

pub use archive::Compression;
pub use config::Config;
pub use image_store::DirectoryImageSink;
