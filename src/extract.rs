use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::page_range::PageSet;
use crate::pdf::raster::{self, OutputFormat};
use crate::pdf::render::{Dpi, PageRenderer};

pub const SKIPPED_REASON: &str = "already exists, skipped";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Overwrite,
    Skip,
}

#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub pages: PageSet,
    pub dpi: Dpi,
    pub format: OutputFormat,
    /// Path prefix for output files, usually the PDF's file stem.
    pub output_base: PathBuf,
    pub overwrite: OverwritePolicy,
}

impl ExtractionRequest {
    pub fn output_path(&self, page: u32) -> PathBuf {
        output_path(&self.output_base, page, self.format)
    }

    /// Targets that are already on disk, in page order.
    pub fn existing_outputs(&self) -> Vec<PathBuf> {
        self.pages
            .iter()
            .map(|page| self.output_path(page))
            .filter(|path| path.is_file())
            .collect()
    }
}

/// `{base}_page_{page}.{ext}`
pub fn output_path(base: &Path, page: u32, format: OutputFormat) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(format!("_page_{}.{}", page, format.extension()));
    PathBuf::from(name)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PageOutcome {
    Success { path: PathBuf },
    Skipped { path: PathBuf },
    Failure { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult {
    pub page: u32,
    #[serde(flatten)]
    pub outcome: PageOutcome,
}

impl PageResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, PageOutcome::Success { .. })
    }

    /// Why the page produced no file, if it didn't.
    pub fn reason(&self) -> Option<&str> {
        match &self.outcome {
            PageOutcome::Success { .. } => None,
            PageOutcome::Skipped { .. } => Some(SKIPPED_REASON),
            PageOutcome::Failure { error } => Some(error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<PageResult>,
}

impl BatchSummary {
    fn from_results(results: Vec<PageResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.is_success()).count();
        BatchSummary {
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &PageResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

/// Progress events, `position` is 1-based within the batch.
#[derive(Debug)]
pub enum Progress<'a> {
    Started {
        page: u32,
        position: usize,
        total: usize,
    },
    Finished(&'a PageResult),
}

/// Render and save every requested page. A page that fails is recorded and
/// the batch moves on; this never returns an error.
pub fn extract<R, F>(renderer: &R, request: &ExtractionRequest, mut on_progress: F) -> BatchSummary
where
    R: PageRenderer + ?Sized,
    F: FnMut(Progress<'_>),
{
    let scale = request.dpi.scale();
    let total = request.pages.pages().len();
    let mut results = Vec::with_capacity(total);

    for (idx, page) in request.pages.iter().enumerate() {
        on_progress(Progress::Started {
            page,
            position: idx + 1,
            total,
        });

        let path = request.output_path(page);
        let outcome = if request.overwrite == OverwritePolicy::Skip && path.exists() {
            debug!(page, path = %path.display(), "output exists, skipping");
            PageOutcome::Skipped { path }
        } else {
            let written = renderer
                .render_page(page - 1, scale)
                .and_then(|image| raster::save(image, &path, request.format));
            match written {
                Ok(()) => {
                    debug!(page, path = %path.display(), "saved page");
                    PageOutcome::Success { path }
                }
                Err(e) => {
                    warn!(page, "page failed: {:#}", e);
                    PageOutcome::Failure {
                        error: format!("{:#}", e),
                    }
                }
            }
        };

        let result = PageResult { page, outcome };
        on_progress(Progress::Finished(&result));
        results.push(result);
    }

    BatchSummary::from_results(results)
}
