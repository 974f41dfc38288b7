// src/cli/args.rs
use crate::domain::RewritePolicy;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true)]
pub struct Args {
    /// Path to the Jupyter notebook file
    #[arg(value_name = "NOTEBOOK")]
    pub notebook_path: PathBuf,

    /// Directory to save the extracted images [default: extracted_images]
    #[arg(value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to save the updated notebook with image paths [default: updated_notebook.ipynb]
    #[arg(value_name = "OUTPUT_NOTEBOOK")]
    pub output_notebook_path: Option<PathBuf>,

    /// Which cells get their source replaced
    #[arg(long, value_enum, value_name = "POLICY")]
    pub policy: Option<RewritePolicy>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Path to a TOML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
