use console::style;
use std::io::{self, Write};

use crate::extract::{BatchSummary, PageOutcome, Progress};

const RULE: &str = "============================================================";

pub fn banner(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

/// One line per page: the start is printed without a newline so the outcome
/// lands on the same line.
pub fn progress(out: &mut impl Write, event: &Progress<'_>) -> io::Result<()> {
    match event {
        Progress::Started {
            page,
            position,
            total,
        } => {
            write!(out, "Processing page {} ({} of {})... ", page, position, total)?;
            out.flush()
        }
        Progress::Finished(result) => match &result.outcome {
            PageOutcome::Success { path } => {
                writeln!(out, "{} Saved as {}", style("✓").green(), path.display())
            }
            PageOutcome::Skipped { path } => {
                writeln!(out, "{} Skipped, {} already exists", style("-").yellow(), path.display())
            }
            PageOutcome::Failure { error } => {
                writeln!(out, "{} Error: {}", style("✗").red(), error)
            }
        },
    }
}

pub fn summary(out: &mut impl Write, summary: &BatchSummary) -> io::Result<()> {
    writeln!(out)?;
    banner(out, "Extraction Complete")?;
    writeln!(out, "Successfully extracted: {} page(s)", summary.succeeded)?;

    if summary.failed == 0 {
        writeln!(out, "No errors encountered!")?;
    } else {
        writeln!(out, "Errors encountered: {}", summary.failed)?;
        writeln!(out, "\nError details:")?;
        for result in summary.failures() {
            writeln!(
                out,
                "  - Page {}: {}",
                result.page,
                result.reason().unwrap_or_default()
            )?;
        }
    }

    writeln!(out, "{}", RULE)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::PageResult;
    use std::path::PathBuf;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        console::strip_ansi_codes(&String::from_utf8(out).unwrap()).into_owned()
    }

    #[test]
    fn test_progress_line() {
        let result = PageResult {
            page: 3,
            outcome: PageOutcome::Success {
                path: PathBuf::from("doc_page_3.png"),
            },
        };
        let out = render(|out| {
            progress(
                out,
                &Progress::Started {
                    page: 3,
                    position: 2,
                    total: 4,
                },
            )?;
            progress(out, &Progress::Finished(&result))
        });
        assert_eq!(out, "Processing page 3 (2 of 4)... ✓ Saved as doc_page_3.png\n");
    }

    #[test]
    fn test_summary_lists_failures() {
        let summary = BatchSummary {
            succeeded: 1,
            failed: 2,
            results: vec![
                PageResult {
                    page: 1,
                    outcome: PageOutcome::Skipped {
                        path: PathBuf::from("doc_page_1.png"),
                    },
                },
                PageResult {
                    page: 2,
                    outcome: PageOutcome::Success {
                        path: PathBuf::from("doc_page_2.png"),
                    },
                },
                PageResult {
                    page: 3,
                    outcome: PageOutcome::Failure {
                        error: "bad xref".to_string(),
                    },
                },
            ],
        };
        let out = render(|out| super::summary(out, &summary));

        assert!(out.contains("Successfully extracted: 1 page(s)"));
        assert!(out.contains("Errors encountered: 2"));
        assert!(out.contains("  - Page 1: already exists, skipped\n"));
        assert!(out.contains("  - Page 3: bad xref\n"));
    }

    #[test]
    fn test_summary_without_errors() {
        let summary = BatchSummary {
            succeeded: 0,
            failed: 0,
            results: Vec::new(),
        };
        let out = render(|out| super::summary(out, &summary));
        assert!(out.contains("No errors encountered!"));
    }
}
