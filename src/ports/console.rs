// src/ports/console.rs
use crate::domain::{ExtractError, ExtractionReport};
use anyhow::{Context, Result};
use serde_json::json;

/// Renders extraction outcomes for a terminal, as text or JSON
#[derive(Debug, Default)]
pub struct ConsolePresenter {
    json: bool,
}

impl ConsolePresenter {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn render_success(&self, report: &ExtractionReport) -> Result<String> {
        if self.json {
            return serde_json::to_string_pretty(report).context("Failed to serialize report");
        }

        Ok(format!(
            "Extracted {} images to {} and updated the notebook. Saved as {}\nOutput archive: {}",
            report.image_count,
            report.output_dir.display(),
            report.output_notebook.display(),
            report.archive_path.display(),
        ))
    }

    pub fn render_failure(&self, error: &ExtractError) -> Result<String> {
        if self.json {
            let value = json!({
                "error": error.kind(),
                "message": error.to_string(),
            });
            return serde_json::to_string_pretty(&value).context("Failed to serialize error");
        }

        Ok(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExtractedImage;
    use std::path::PathBuf;

    fn report() -> ExtractionReport {
        ExtractionReport {
            image_count: 1,
            output_dir: PathBuf::from("images"),
            output_notebook: PathBuf::from("clean.ipynb"),
            archive_path: PathBuf::from("images.zip"),
            images: vec![ExtractedImage {
                cell_index: 0,
                image_index: 0,
                attachment_name: "a.png".to_string(),
                mime_type: "image/png".to_string(),
                file_name: "cell_0_image_0.png".to_string(),
                path: PathBuf::from("images/cell_0_image_0.png"),
                byte_len: 2,
            }],
        }
    }

    #[test]
    fn given_report_when_rendering_text_then_mentions_count_and_paths() {
        let text = ConsolePresenter::new(false).render_success(&report()).unwrap();

        assert!(text.starts_with(
            "Extracted 1 images to images and updated the notebook. Saved as clean.ipynb"
        ));
        assert!(text.contains("images.zip"));
    }

    #[test]
    fn given_report_when_rendering_json_then_is_parseable() {
        let text = ConsolePresenter::new(true).render_success(&report()).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["image_count"], 1);
        assert_eq!(value["images"][0]["file_name"], "cell_0_image_0.png");
    }

    #[test]
    fn given_not_found_when_rendering_json_then_includes_kind() {
        let error = ExtractError::NotFound(PathBuf::from("nb.ipynb"));

        let text = ConsolePresenter::new(true).render_failure(&error).unwrap();

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["error"], "not_found");
        assert_eq!(value["message"], "File not found: nb.ipynb");
    }

    #[test]
    fn given_error_when_rendering_text_then_returns_message() {
        let error = ExtractError::NotFound(PathBuf::from("nb.ipynb"));
        let text = ConsolePresenter::new(false).render_failure(&error).unwrap();
        assert_eq!(text, "File not found: nb.ipynb");
    }
}
