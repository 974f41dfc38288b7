// src/infrastructure/notebook_store.rs
use crate::constants::JSON_INDENT;
use crate::domain::{ExtractError, Notebook};
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::File;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;
use tracing::instrument;

/// Read and parse the input notebook.
///
/// Only this step distinguishes a missing file and unparsable JSON from other
/// failures.
#[instrument(level = "debug")]
pub fn read_notebook(path: &Path) -> Result<Notebook, ExtractError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ExtractError::NotFound(path.to_path_buf()))
        }
        Err(e) => {
            return Err(anyhow::Error::new(e)
                .context(format!("Failed to read notebook {}", path.display()))
                .into())
        }
    };

    let value = serde_json::from_str(&content).map_err(|source| ExtractError::MalformedInput {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(Notebook::from_value(value))
}

/// Write the notebook as pretty-printed JSON with four-space indentation
#[instrument(level = "debug", skip(notebook))]
pub fn write_notebook(path: &Path, notebook: &Notebook) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create notebook file at {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let formatter = PrettyFormatter::with_indent(JSON_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    notebook
        .as_value()
        .serialize(&mut serializer)
        .context("Failed to serialize notebook")?;

    writer.flush().context("Failed to write notebook file")?;
    Ok(())
}
