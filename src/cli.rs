use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::pdf::raster::OutputFormat;
use crate::pdf::render::Dpi;

#[derive(Parser)]
#[command(name = "pdfpix")]
#[command(about = "Convert PDF pages to high-resolution PNG or JPEG images")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory containing the PDFium shared library
    #[arg(long, env = "PDFPIX_PDFIUM_PATH", global = true)]
    pub pdfium_path: Option<PathBuf>,

    /// Defaults to the interactive session
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask for the PDF, resolution, format and pages, then convert
    Interactive(InteractiveArgs),

    /// Convert pages without prompting
    Convert {
        /// PDF file to convert
        path: PathBuf,

        /// Pages to convert (e.g., "all", "3", "1-3,7,9-11")
        #[arg(short, long)]
        pages: String,

        /// Output resolution
        #[arg(short, long, value_enum, default_value = "300")]
        dpi: Dpi,

        /// Output image format
        #[arg(short, long, value_enum, default_value = "png")]
        format: OutputFormat,

        /// Directory for the images (default: current directory)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Replace images that already exist
        #[arg(long, conflicts_with = "skip_existing")]
        overwrite: bool,

        /// Leave existing images alone and report them as skipped
        #[arg(long)]
        skip_existing: bool,

        /// Print the result summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show page count and page sizes
    Info {
        /// PDF file to inspect
        path: PathBuf,
    },
}

#[derive(Args, Default)]
pub struct InteractiveArgs {
    /// Directory for the images
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_pause: bool,
}
