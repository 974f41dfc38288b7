// src/constants.rs
//
// Application-wide constants shared by the CLI, config and file layers.

pub const APP_NAME: &str = "nbextract";

/// Name of the user config file below `<config dir>/nbextract/`.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Image directory used when neither the command line nor the config names one.
pub const DEFAULT_OUTPUT_DIR: &str = "extracted_images";

/// Rewritten notebook path used when neither the command line nor the config names one.
pub const DEFAULT_OUTPUT_NOTEBOOK: &str = "updated_notebook.ipynb";

/// Appended to the output directory to name the bundle archive.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Indentation of the rewritten notebook JSON.
///
/// Used in: `infrastructure/notebook_store.rs`
pub const JSON_INDENT: &[u8] = b"    ";
