// src/application/image_extractor.rs
use crate::domain::image::{image_file_name, image_reference};
use crate::domain::{ExtractedImage, Notebook, RewritePolicy};
use anyhow::{bail, Context, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use std::path::PathBuf;
use tracing::{debug, instrument, trace};

/// Destination for decoded attachment bytes
pub trait ImageSink {
    /// Persist `bytes` under `file_name` and return the path that was written
    fn store(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}

/// Walks a notebook, moves attachment payloads into an `ImageSink` and
/// rewrites cell sources to reference the stored files
pub struct ImageExtractor<S: ImageSink> {
    sink: S,
    policy: RewritePolicy,
}

impl<S: ImageSink> ImageExtractor<S> {
    pub fn new(sink: S, policy: RewritePolicy) -> Self {
        Self { sink, policy }
    }

    #[cfg(test)]
    pub(crate) fn into_sink(self) -> S {
        self.sink
    }

    /// Extract every attachment of `notebook` and rewrite its cells in place.
    ///
    /// Images are numbered with one counter for the whole notebook. Whether a
    /// cell is rewritten is decided by the configured `RewritePolicy`.
    #[instrument(level = "debug", skip(self, notebook), fields(policy = ?self.policy))]
    pub fn extract(&mut self, notebook: &mut Notebook) -> Result<Vec<ExtractedImage>> {
        let mut images: Vec<ExtractedImage> = Vec::new();

        for cell_index in 0..notebook.cell_count()? {
            let attachments = notebook.cell_attachments(cell_index)?;
            let mut new_source_lines = Vec::with_capacity(attachments.len());

            for attachment in attachments {
                let image_index = images.len();
                let bytes = decode_payload(&attachment.payload).with_context(|| {
                    format!(
                        "Failed to decode attachment '{}' ({}) in cell {}",
                        attachment.name, attachment.mime_type, cell_index
                    )
                })?;

                let file_name = image_file_name(cell_index, image_index, &attachment.mime_type);
                let path = self.sink.store(&file_name, &bytes)?;
                debug!(cell_index, image_index, path = %path.display(), "Extracted image");

                new_source_lines.push(image_reference(&path.to_string_lossy()));
                images.push(ExtractedImage {
                    cell_index,
                    image_index,
                    attachment_name: attachment.name,
                    mime_type: attachment.mime_type,
                    file_name,
                    path,
                    byte_len: bytes.len(),
                });
            }

            if self.policy.should_rewrite(images.len(), new_source_lines.len()) {
                trace!(cell_index, lines = new_source_lines.len(), "Rewriting cell");
                notebook.rewrite_cell(cell_index, new_source_lines)?;
            }
        }

        Ok(images)
    }
}

/// Standard alphabet; padding is checked by `decode_payload` itself
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode a base64 payload leniently.
///
/// Characters outside the standard alphabet are discarded (notebooks often
/// wrap payloads across lines), `=` before the third symbol of a quad is
/// ignored, and decoding stops at the first padding that completes a quad.
/// Non-zero trailing bits are accepted. An unterminated partial quad is an
/// error.
pub fn decode_payload(payload: &str) -> Result<Vec<u8>> {
    let mut cleaned = String::with_capacity(payload.len());
    let mut quad_pos = 0;
    let mut pads = 0;
    let mut terminated = false;

    for c in payload.chars() {
        if c == '=' {
            if quad_pos >= 2 {
                pads += 1;
                if quad_pos + pads >= 4 {
                    terminated = true;
                    break;
                }
            }
        } else if c.is_ascii_alphanumeric() || c == '+' || c == '/' {
            cleaned.push(c);
            quad_pos = (quad_pos + 1) % 4;
        }
    }

    if quad_pos != 0 && !terminated {
        bail!("Invalid base64 payload: incorrect padding");
    }

    LENIENT
        .decode(cleaned.as_bytes())
        .context("Invalid base64 payload")
}
