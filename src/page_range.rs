use std::collections::BTreeSet;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("No pages selected")]
    EmptySelection,

    #[error("Invalid page selection: '{token}'")]
    Malformed { token: String },

    #[error("Reversed page range: '{token}' (start must not be after end)")]
    ReversedRange { token: String },

    #[error("Page selection '{token}' is out of range (valid pages: 1-{total})")]
    OutOfRange { token: String, total: u32 },
}

/// A single comma-separated token: either one page or an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Parse a token like "5" or "2-7". Bounds are checked later by `expand`.
    fn parse(token: &str, total_pages: u32) -> Result<Self, ParseError> {
        let malformed = || ParseError::Malformed {
            token: token.to_string(),
        };

        let (start, end) = match token.split_once('-') {
            Some((start, end)) => {
                if end.contains('-') {
                    return Err(malformed());
                }
                (start, end)
            }
            None => (token, token),
        };

        let start = parse_page_number(start, token, total_pages)?.ok_or_else(malformed)?;
        let end = parse_page_number(end, token, total_pages)?.ok_or_else(malformed)?;

        if start > end {
            return Err(ParseError::ReversedRange {
                token: token.to_string(),
            });
        }

        Ok(PageRange { start, end })
    }

    fn expand(&self, token: &str, total_pages: u32) -> Result<impl Iterator<Item = u32>, ParseError> {
        if self.start == 0 || self.end > total_pages {
            return Err(ParseError::OutOfRange {
                token: token.to_string(),
                total: total_pages,
            });
        }
        Ok(self.start..=self.end)
    }
}

/// `Ok(None)` means the text isn't a page number at all. Digit strings too
/// large for `u32` can only be past the last page, so they report as out of
/// range rather than malformed.
fn parse_page_number(s: &str, token: &str, total_pages: u32) -> Result<Option<u32>, ParseError> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(None);
    }
    s.parse::<u32>()
        .map(Some)
        .map_err(|_| ParseError::OutOfRange {
            token: token.to_string(),
            total: total_pages,
        })
}

/// Validated page selection: 1-based, ascending, no duplicates, never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSet(Vec<u32>);

impl PageSet {
    pub fn pages(&self) -> &[u32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Human-readable form used when confirming a selection.
    pub fn describe(&self) -> String {
        match self.0.as_slice() {
            [first, .., last] if self.0.len() > 10 => {
                format!("{} pages: {}-{} and others", self.0.len(), first, last)
            }
            pages => pages
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Parse a page selection like "all", "5" or "1-3,7,9-11" against a document
/// with `total_pages` pages. Any bad token rejects the whole selection.
pub fn parse_page_range(spec: &str, total_pages: u32) -> Result<PageSet, ParseError> {
    let spec = spec.trim();
    if spec.is_empty() || total_pages == 0 {
        return Err(ParseError::EmptySelection);
    }

    if spec.eq_ignore_ascii_case("all") {
        return Ok(PageSet((1..=total_pages).collect()));
    }

    let mut pages = BTreeSet::new();
    for token in spec.split(',').map(str::trim) {
        let range = PageRange::parse(token, total_pages)?;
        pages.extend(range.expand(token, total_pages)?);
    }

    Ok(PageSet(pages.into_iter().collect()))
}
