use anyhow::{bail, Context, Result};
use console::style;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::page_range::{parse_page_range, PageSet};
use crate::pdf::raster::OutputFormat;
use crate::pdf::render::Dpi;

/// Line-oriented question/answer session over any reader and writer.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_line(&mut self) -> Result<String> {
        write!(self.output, "> ")?;
        self.output.flush()?;

        let mut line = String::new();
        let n = self
            .input
            .read_line(&mut line)
            .context("Failed to read from stdin")?;
        if n == 0 {
            bail!("Input closed before the session finished");
        }
        Ok(line.trim().to_string())
    }

    fn error(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{} {}\n", style("Error:").red(), message)?;
        Ok(())
    }

    fn accepted(&mut self, message: impl std::fmt::Display) -> Result<()> {
        writeln!(self.output, "{} {}\n", style("✓").green(), message)?;
        Ok(())
    }

    /// Ask for a PDF until `open` accepts one. `open` returns the page count
    /// alongside whatever handle the caller wants to keep.
    pub fn ask_pdf<T>(
        &mut self,
        suggestions: &[String],
        mut open: impl FnMut(&Path) -> Result<(T, u32)>,
    ) -> Result<(PathBuf, T, u32)> {
        if !suggestions.is_empty() {
            writeln!(self.output, "PDF files in this directory: {}\n", suggestions.join(", "))?;
        }

        loop {
            writeln!(self.output, "Enter the PDF filename:")?;
            let name = self.read_line()?;

            if name.is_empty() {
                self.error("Filename cannot be empty. Please try again.")?;
                continue;
            }

            let path = PathBuf::from(&name);
            if !path.is_file() {
                self.error(format!(
                    "File '{}' not found. Please make sure the file exists and try again.",
                    name
                ))?;
                continue;
            }

            if !name.to_ascii_lowercase().ends_with(".pdf") {
                self.error("Please include the .pdf extension (example: file.pdf).")?;
                continue;
            }

            match open(&path) {
                Ok((handle, page_count)) => {
                    self.accepted(format!("PDF loaded successfully ({} pages)", page_count))?;
                    return Ok((path, handle, page_count));
                }
                Err(e) => {
                    self.error(format!("Could not open PDF file. {:#}", e))?;
                }
            }
        }
    }

    pub fn ask_dpi(&mut self) -> Result<Dpi> {
        loop {
            writeln!(self.output, "Select DPI (resolution):")?;
            writeln!(self.output, "  300 - Standard high resolution (default)")?;
            writeln!(self.output, "  600 - Ultra high resolution")?;
            writeln!(self.output, "Press Enter for default (300 DPI)")?;
            let answer = self.read_line()?;

            if answer.is_empty() {
                self.accepted("Using default: 300 DPI")?;
                return Ok(Dpi::default());
            }

            if let Some(dpi) = answer.parse().ok().and_then(Dpi::from_value) {
                self.accepted(format!("Selected: {} DPI", dpi.value()))?;
                return Ok(dpi);
            }

            self.error("Invalid DPI. Please enter 300 or 600 (or press Enter for default).")?;
        }
    }

    pub fn ask_format(&mut self) -> Result<OutputFormat> {
        loop {
            writeln!(self.output, "Select output format:")?;
            writeln!(self.output, "  png  - PNG format (default, lossless)")?;
            writeln!(self.output, "  jpeg - JPEG format (compressed, smaller files)")?;
            writeln!(self.output, "Press Enter for default (png)")?;
            let answer = self.read_line()?;

            if answer.is_empty() {
                self.accepted("Using default: PNG")?;
                return Ok(OutputFormat::default());
            }

            if let Some(format) = OutputFormat::from_name(&answer) {
                self.accepted(format!("Selected: {}", format.extension().to_uppercase()))?;
                return Ok(format);
            }

            self.error("Invalid format. Please enter png or jpeg (or press Enter for default).")?;
        }
    }

    pub fn ask_pages(&mut self, total_pages: u32) -> Result<PageSet> {
        loop {
            writeln!(self.output, "Select pages to extract (1-{}):", total_pages)?;
            writeln!(self.output, "  Examples:")?;
            writeln!(self.output, "    all        - Extract all pages")?;
            writeln!(self.output, "    3          - Extract page 3")?;
            writeln!(self.output, "    1,3,5      - Extract pages 1, 3, and 5")?;
            writeln!(self.output, "    1-5        - Extract pages 1 through 5")?;
            writeln!(self.output, "    1-3,7,9-11 - Combination of ranges and individual pages")?;
            let answer = self.read_line()?;

            match parse_page_range(&answer, total_pages) {
                Ok(pages) => {
                    self.accepted(format!("Selected pages: {}", pages.describe()))?;
                    return Ok(pages);
                }
                Err(e) => self.error(e)?,
            }
        }
    }

    /// Returns `false` when the user declines to overwrite.
    pub fn confirm_overwrite(&mut self, existing: &[PathBuf]) -> Result<bool> {
        writeln!(
            self.output,
            "{} The following files already exist:",
            style("⚠ Warning:").yellow()
        )?;
        for path in existing {
            writeln!(self.output, "  - {}", path.display())?;
        }
        writeln!(self.output)?;

        loop {
            writeln!(self.output, "Overwrite existing files? (y/n):")?;
            match self.read_line()?.to_ascii_lowercase().as_str() {
                "y" => {
                    self.accepted("Will overwrite existing files")?;
                    return Ok(true);
                }
                "n" => {
                    writeln!(self.output, "Operation cancelled by user.\n")?;
                    return Ok(false);
                }
                _ => self.error("Please enter 'y' or 'n'.")?,
            }
        }
    }

    /// Wait for Enter. A closed input counts as Enter.
    pub fn pause(&mut self) -> Result<()> {
        write!(self.output, "Press Enter to exit...")?;
        self.output.flush()?;
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(())
    }
}

/// PDF file names directly inside `dir`, sorted.
pub fn pdf_files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| name.to_ascii_lowercase().ends_with(".pdf"))
        .collect();
    names.sort();
    names
}
