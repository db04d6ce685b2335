use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::extract::{self, ExtractionRequest, OverwritePolicy};
use crate::pdf::render::PageRenderer;
use crate::pdf::{bind_pdfium, PdfiumDocument};
use crate::prompt::{pdf_files_in, Prompter};
use crate::report;

pub struct InteractiveOptions {
    pub output_dir: PathBuf,
    pub pause: bool,
}

pub fn run(options: &InteractiveOptions, pdfium_path: Option<&Path>) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    report::banner(prompter.output(), "PDF to High-Resolution Image Converter")?;

    let result = bind_pdfium(pdfium_path).and_then(|pdfium| {
        session(&mut prompter, &options.output_dir, |path| {
            let doc = PdfiumDocument::open(&pdfium, path)?;
            let count = doc.page_count();
            Ok((doc, count))
        })
    });

    if options.pause {
        if let Err(e) = &result {
            writeln!(prompter.output(), "\n\nUnexpected error: {:#}", e)?;
        }
        prompter.pause()?;
    }
    result
}

/// One full question-and-convert pass. Declining to overwrite ends the
/// session without converting anything.
pub fn session<R, W, D>(
    prompter: &mut Prompter<R, W>,
    output_dir: &Path,
    open: impl FnMut(&Path) -> Result<(D, u32)>,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    D: PageRenderer,
{
    let suggestions = pdf_files_in(Path::new("."));
    let (path, doc, page_count) = prompter.ask_pdf(&suggestions, open)?;
    let dpi = prompter.ask_dpi()?;
    let format = prompter.ask_format()?;
    let pages = prompter.ask_pages(page_count)?;

    let stem = path.file_stem().unwrap_or(path.as_os_str());
    let request = ExtractionRequest {
        pages,
        dpi,
        format,
        output_base: output_dir.join(stem),
        overwrite: OverwritePolicy::Overwrite,
    };

    let existing = request.existing_outputs();
    if !existing.is_empty() && !prompter.confirm_overwrite(&existing)? {
        return Ok(());
    }

    info!(
        pages = request.pages.pages().len(),
        dpi = dpi.value(),
        "converting {}",
        path.display()
    );
    report::banner(prompter.output(), "Starting extraction...")?;

    let out = prompter.output();
    let mut printed = Ok(());
    let summary = extract::extract(&doc, &request, |event| {
        if printed.is_ok() {
            printed = report::progress(out, &event);
        }
    });
    printed?;

    report::summary(prompter.output(), &summary)?;
    Ok(())
}
