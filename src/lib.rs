// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::Result;
use application::ImageExtractor;
use domain::{ExtractError, ExtractionReport, RewritePolicy};
use infrastructure::archive::{self, Compression};
use infrastructure::{notebook_store, Config, DirectoryImageSink};
use ports::ConsolePresenter;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use crate::cli::args::Args;

/// Fully resolved parameters of one extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractRequest {
    pub notebook_path: PathBuf,
    pub output_dir: PathBuf,
    pub output_notebook_path: PathBuf,
    pub policy: RewritePolicy,
    pub compression: Compression,
}

impl ExtractRequest {
    /// Command line values win over config values
    pub fn from_args(args: &Args, config: &Config) -> Self {
        Self {
            notebook_path: args.notebook_path.clone(),
            output_dir: args
                .output_dir
                .clone()
                .unwrap_or_else(|| config.output.dir.clone()),
            output_notebook_path: args
                .output_notebook_path
                .clone()
                .unwrap_or_else(|| config.output.notebook.clone()),
            policy: args.policy.unwrap_or(config.extract.policy),
            compression: config.extract.compression,
        }
    }
}

/// Extract all image attachments, write the rewritten notebook and bundle
/// both into `<output_dir>.zip`.
///
/// Files written before a failure are left in place.
pub fn extract(request: &ExtractRequest) -> Result<ExtractionReport, ExtractError> {
    let mut notebook = notebook_store::read_notebook(&request.notebook_path)?;

    let sink = DirectoryImageSink::create(&request.output_dir)?;
    let mut extractor = ImageExtractor::new(sink, request.policy);
    let images = extractor.extract(&mut notebook)?;
    info!(count = images.len(), dir = %request.output_dir.display(), "Extracted images");

    notebook_store::write_notebook(&request.output_notebook_path, &notebook)?;

    let archive_path = archive::archive_path_for(&request.output_dir);
    let entries = archive::create_archive(
        &archive_path,
        &request.output_notebook_path,
        &request.output_dir,
        request.compression,
    )?;
    debug!(?entries, "Archive entries");

    Ok(ExtractionReport {
        image_count: images.len(),
        output_dir: request.output_dir.clone(),
        output_notebook: request.output_notebook_path.clone(),
        archive_path,
        images,
    })
}

pub fn run(args: Args) -> Result<ExitCode> {
    debug!(?args, "Starting nbextract with arguments");

    let config = Config::resolve(args.config.as_deref())?;
    let request = ExtractRequest::from_args(&args, &config);
    debug!(?request, "Resolved request");

    let presenter = ConsolePresenter::new(args.json);
    match extract(&request) {
        Ok(report) => {
            println!("{}", presenter.render_success(&report)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            debug!(error = ?e, "Extraction failed");
            let message = presenter.render_failure(&e)?;
            if args.json {
                println!("{}", message);
            } else {
                eprintln!("{}", message);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing;
    use clap::Parser;

    #[ctor::ctor]
    fn init() {
        testing::init_test_setup().expect("Failed to initialize test setup");
    }

    #[test]
    fn given_no_optional_args_when_resolving_request_then_uses_config_values() {
        let args = Args::try_parse_from(["nbextract", "nb.ipynb"]).unwrap();
        let mut config = Config::default();
        config.extract.policy = RewritePolicy::PerCell;

        let request = ExtractRequest::from_args(&args, &config);

        assert_eq!(request.output_dir, PathBuf::from("extracted_images"));
        assert_eq!(request.output_notebook_path, PathBuf::from("updated_notebook.ipynb"));
        assert_eq!(request.policy, RewritePolicy::PerCell);
    }

    #[test]
    fn given_cli_values_when_resolving_request_then_they_override_config() {
        let args = Args::try_parse_from([
            "nbextract",
            "nb.ipynb",
            "imgs",
            "out.ipynb",
            "--policy",
            "cumulative",
        ])
        .unwrap();
        let mut config = Config::default();
        config.extract.policy = RewritePolicy::PerCell;

        let request = ExtractRequest::from_args(&args, &config);

        assert_eq!(request.output_dir, PathBuf::from("imgs"));
        assert_eq!(request.output_notebook_path, PathBuf::from("out.ipynb"));
        assert_eq!(request.policy, RewritePolicy::Cumulative);
    }
}
