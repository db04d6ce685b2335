use anyhow::{bail, Result};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::extract::{self, ExtractionRequest, OverwritePolicy, PageOutcome};
use crate::page_range::parse_page_range;
use crate::pdf::raster::OutputFormat;
use crate::pdf::render::{Dpi, PageRenderer};
use crate::pdf::{bind_pdfium, PdfiumDocument};
use crate::report;

pub struct ConvertOptions {
    pub pages: String,
    pub dpi: Dpi,
    pub format: OutputFormat,
    pub output_dir: Option<PathBuf>,
    pub overwrite: Option<OverwritePolicy>,
    pub json: bool,
}

pub fn run(path: &Path, options: &ConvertOptions, pdfium_path: Option<&Path>) -> Result<()> {
    if !path.is_file() {
        bail!("File not found: {}", path.display());
    }

    let pdfium = bind_pdfium(pdfium_path)?;
    let doc = PdfiumDocument::open(&pdfium, path)?;

    let output_dir = options.output_dir.as_deref().unwrap_or(Path::new("."));
    std::fs::create_dir_all(output_dir)?;

    let request = build_request(path, &doc, options, output_dir)?;
    info!(
        pages = request.pages.pages().len(),
        dpi = request.dpi.value(),
        "converting {}",
        path.display()
    );

    // Keep stdout clean for the JSON report.
    let mut progress_out: Box<dyn Write> = if options.json {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    };

    let mut printed = Ok(());
    let summary = extract::extract(&doc, &request, |event| {
        if printed.is_ok() {
            printed = report::progress(&mut progress_out, &event);
        }
    });
    printed?;

    let mut out = io::stdout().lock();
    if options.json {
        serde_json::to_writer_pretty(&mut out, &summary)?;
        writeln!(out)?;
    } else {
        report::summary(&mut out, &summary)?;
    }

    let errors = summary
        .failures()
        .filter(|r| matches!(r.outcome, PageOutcome::Failure { .. }))
        .count();
    if errors > 0 {
        bail!("{} of {} page(s) failed", errors, summary.results.len());
    }

    Ok(())
}

fn build_request(
    path: &Path,
    doc: &impl PageRenderer,
    options: &ConvertOptions,
    output_dir: &Path,
) -> Result<ExtractionRequest> {
    let pages = parse_page_range(&options.pages, doc.page_count())?;

    let stem = path.file_stem().unwrap_or(path.as_os_str());
    let mut request = ExtractionRequest {
        pages,
        dpi: options.dpi,
        format: options.format,
        output_base: output_dir.join(stem),
        overwrite: options.overwrite.unwrap_or(OverwritePolicy::Skip),
    };

    if options.overwrite.is_none() {
        let existing = request.existing_outputs();
        if !existing.is_empty() {
            let list: Vec<_> = existing.iter().map(|p| p.display().to_string()).collect();
            bail!(
                "Output files already exist (pass --overwrite or --skip-existing): {}",
                list.join(", ")
            );
        }
        request.overwrite = OverwritePolicy::Overwrite;
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::render::ScaleTransform;
    use image::RgbImage;

    struct Pages(u32);

    impl PageRenderer for Pages {
        fn page_count(&self) -> u32 {
            self.0
        }

        fn render_page(&self, _index: u32, _scale: ScaleTransform) -> Result<RgbImage> {
            Ok(RgbImage::new(1, 1))
        }
    }

    fn options(pages: &str, overwrite: Option<OverwritePolicy>) -> ConvertOptions {
        ConvertOptions {
            pages: pages.to_string(),
            dpi: Dpi::Standard,
            format: OutputFormat::Jpeg,
            output_dir: None,
            overwrite,
            json: false,
        }
    }

    #[test]
    fn test_request_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let request = build_request(
            Path::new("scans/report.pdf"),
            &Pages(9),
            &options("7", None),
            dir.path(),
        )
        .unwrap();

        assert_eq!(request.output_path(7), dir.path().join("report_page_7.jpeg"));
        assert_eq!(request.overwrite, OverwritePolicy::Overwrite);
    }

    #[test]
    fn test_existing_outputs_need_a_policy() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report_page_2.jpeg"), b"").unwrap();
        let path = Path::new("report.pdf");

        let err = build_request(path, &Pages(3), &options("1-3", None), dir.path()).unwrap_err();
        assert!(err.to_string().contains("report_page_2.jpeg"));

        let request = build_request(
            path,
            &Pages(3),
            &options("1-3", Some(OverwritePolicy::Skip)),
            dir.path(),
        )
        .unwrap();
        assert_eq!(request.overwrite, OverwritePolicy::Skip);
    }

    #[test]
    fn test_bad_selection() {
        let dir = tempfile::tempdir().unwrap();
        let err = build_request(Path::new("a.pdf"), &Pages(3), &options("4", None), dir.path())
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
