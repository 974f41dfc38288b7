// src/domain/notebook.rs
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// When a cell gets its attachments cleared and its source replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RewritePolicy {
    /// Rewrite every cell once any image has been extracted so far in the
    /// notebook, including later cells without attachments
    #[default]
    Cumulative,
    /// Rewrite only cells that themselves yielded at least one image
    PerCell,
}

impl RewritePolicy {
    pub fn should_rewrite(&self, total_images: usize, cell_images: usize) -> bool {
        match self {
            RewritePolicy::Cumulative => total_images > 0,
            RewritePolicy::PerCell => cell_images > 0,
        }
    }
}

/// A single MIME-typed payload of a named cell attachment
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub name: String,
    pub mime_type: String,
    pub payload: String,
}

/// Notebook JSON document, kept as a generic tree so unknown keys survive
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    root: Value,
}

impl Notebook {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Number of cells; a missing "cells" key counts as none
    pub fn cell_count(&self) -> Result<usize> {
        Ok(self.cells()?.len())
    }

    /// Attachment payloads of a cell, flattened in document order
    pub fn cell_attachments(&self, cell_index: usize) -> Result<Vec<Attachment>> {
        let cell = self.cell(cell_index)?;
        let attachments = match cell.get("attachments") {
            None => return Ok(Vec::new()),
            Some(Value::Object(map)) => map,
            Some(_) => bail!("Cell {}: \"attachments\" is not an object", cell_index),
        };

        let mut result = Vec::new();
        for (name, formats) in attachments {
            let formats = formats.as_object().with_context(|| {
                format!("Cell {}: attachment '{}' is not an object", cell_index, name)
            })?;
            for (mime_type, payload) in formats {
                let payload = payload.as_str().with_context(|| {
                    format!(
                        "Cell {}: attachment '{}' ({}) payload is not a string",
                        cell_index, name, mime_type
                    )
                })?;
                result.push(Attachment {
                    name: name.clone(),
                    mime_type: mime_type.clone(),
                    payload: payload.to_string(),
                });
            }
        }
        Ok(result)
    }

    /// Clear a cell's attachments and replace its source lines
    pub fn rewrite_cell(&mut self, cell_index: usize, source: Vec<String>) -> Result<()> {
        let cell = self
            .cells_mut()?
            .get_mut(cell_index)
            .with_context(|| format!("Cell {} does not exist", cell_index))?
            .as_object_mut()
            .with_context(|| format!("Cell {} is not an object", cell_index))?;

        cell.insert("attachments".to_string(), Value::Object(Map::new()));
        cell.insert(
            "source".to_string(),
            Value::Array(source.into_iter().map(Value::String).collect()),
        );
        Ok(())
    }

    fn cells(&self) -> Result<&[Value]> {
        let root = self
            .root
            .as_object()
            .context("Notebook root is not a JSON object")?;
        match root.get("cells") {
            None => Ok(&[]),
            Some(Value::Array(cells)) => Ok(cells.as_slice()),
            Some(_) => bail!("Notebook \"cells\" is not an array"),
        }
    }

    fn cells_mut(&mut self) -> Result<&mut Vec<Value>> {
        match self.root.get_mut("cells") {
            Some(Value::Array(cells)) => Ok(cells),
            _ => bail!("Notebook has no \"cells\" array"),
        }
    }

    fn cell(&self, cell_index: usize) -> Result<&Map<String, Value>> {
        self.cells()?
            .get(cell_index)
            .with_context(|| format!("Cell {} does not exist", cell_index))?
            .as_object()
            .with_context(|| format!("Cell {} is not an object", cell_index))
    }
}
