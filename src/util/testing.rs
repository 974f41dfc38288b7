// src/util/testing.rs

use anyhow::Result;
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::ImageSink;

/// In-memory `ImageSink` for exercising the extractor without touching disk
///
/// Returned paths are `<dir>/<file_name>`, exactly what a directory sink
/// rooted at `dir` would produce.
///
/// # Examples
///
/// ```
/// use nbextract::application::ImageSink;
/// use nbextract::util::testing::MemoryImageSink;
///
/// let mut sink = MemoryImageSink::new("out");
/// let path = sink.store("cell_0_image_0.png", &[1, 2]).unwrap();
/// assert_eq!(path, std::path::PathBuf::from("out/cell_0_image_0.png"));
/// assert_eq!(sink.get("cell_0_image_0.png"), Some(&vec![1, 2]));
/// ```
#[derive(Debug, Default)]
pub struct MemoryImageSink {
    dir: PathBuf,
    files: BTreeMap<String, Vec<u8>>,
}

impl MemoryImageSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    pub fn get(&self, file_name: &str) -> Option<&Vec<u8>> {
        self.files.get(file_name)
    }
}

impl ImageSink for MemoryImageSink {
    fn store(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        self.files.insert(file_name.to_string(), bytes.to_vec());
        Ok(self.dir.join(file_name))
    }
}

/// Builder for notebook JSON fixtures
///
/// Cells are added in order; attachments keep insertion order.
#[derive(Debug, Default)]
pub struct NotebookBuilder {
    cells: Vec<Value>,
}

impl NotebookBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markdown cell without attachments
    pub fn with_text_cell(mut self, source: &[&str]) -> Self {
        self.cells.push(json!({
            "cell_type": "markdown",
            "metadata": {},
            "source": source,
        }));
        self
    }

    /// Markdown cell with one attachment per `(name, mime type, base64)` entry
    pub fn with_attachment_cell(mut self, attachments: &[(&str, &str, &str)]) -> Self {
        let mut map = Map::new();
        let mut source = Vec::new();
        for (name, mime_type, payload) in attachments {
            let formats = map
                .entry(name.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(formats) = formats {
                formats.insert(mime_type.to_string(), Value::String(payload.to_string()));
            }
            source.push(format!("![{}](attachment:{})", name, name));
        }
        self.cells.push(json!({
            "cell_type": "markdown",
            "metadata": {},
            "attachments": map,
            "source": source,
        }));
        self
    }

    pub fn build(self) -> Value {
        json!({
            "cells": self.cells,
            "metadata": {},
            "nbformat": 4,
            "nbformat_minor": 5,
        })
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["walkdir", "zip"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
