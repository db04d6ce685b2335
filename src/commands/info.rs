use crate::pdf::render::{Dpi, PageRenderer};
use crate::pdf::{bind_pdfium, PageSize, PdfiumDocument};
use anyhow::{bail, Result};
use std::path::Path;

pub fn run(path: &Path, pdfium_path: Option<&Path>) -> Result<()> {
    if !path.is_file() {
        bail!("File not found: {}", path.display());
    }

    let pdfium = bind_pdfium(pdfium_path)?;
    let doc = PdfiumDocument::open(&pdfium, path)?;

    println!("File: {}", path.display());
    println!("Pages: {}", doc.page_count());

    for (idx, size) in doc.page_sizes().iter().enumerate() {
        println!("{}", format_page_line(idx as u32 + 1, size));
    }

    Ok(())
}

fn format_page_line(page: u32, size: &PageSize) -> String {
    let (w300, h300) = Dpi::Standard.scale().apply(size.width, size.height);
    let (w600, h600) = Dpi::Ultra.scale().apply(size.width, size.height);
    format!(
        "  Page {}: {:.0} x {:.0} pt ({}x{} px at 300 DPI, {}x{} px at 600 DPI)",
        page, size.width, size.height, w300, h300, w600, h600
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_line() {
        let a4 = PageSize {
            width: 595.0,
            height: 842.0,
        };
        assert_eq!(
            format_page_line(2, &a4),
            "  Page 2: 595 x 842 pt (2479x3508 px at 300 DPI, 4958x7017 px at 600 DPI)"
        );
    }
}
