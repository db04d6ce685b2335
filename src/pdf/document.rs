use anyhow::{anyhow, Context, Result};
use image::{DynamicImage, RgbImage, RgbaImage};
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

use super::render::{PageRenderer, ScaleTransform};

/// Bind to PDFium in `library_dir` when given, otherwise in the current
/// directory and then the system library search path.
pub fn bind_pdfium(library_dir: Option<&Path>) -> Result<Pdfium> {
    let bindings = match library_dir {
        Some(dir) => {
            let dir_name = dir.to_string_lossy().into_owned();
            let name = Pdfium::pdfium_platform_library_name_at_path(&dir_name);
            Pdfium::bind_to_library(name)
                .with_context(|| format!("Failed to load PDFium from {}", dir.display()))?
        }
        None => Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .context("Failed to load the PDFium library (set --pdfium-path or PDFPIX_PDFIUM_PATH)")?,
    };
    Ok(Pdfium::new(bindings))
}

pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
}

impl<'a> PdfiumDocument<'a> {
    pub fn open(pdfium: &'a Pdfium, path: &Path) -> Result<Self> {
        let document = pdfium
            .load_pdf_from_file(path, None)
            .with_context(|| format!("Failed to open PDF: {}", path.display()))?;
        Ok(PdfiumDocument { document })
    }

    /// Width and height of every page, in points.
    pub fn page_sizes(&self) -> Vec<PageSize> {
        self.document
            .pages()
            .iter()
            .map(|page| PageSize {
                width: page.width().value,
                height: page.height().value,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageRenderer for PdfiumDocument<'_> {
    fn page_count(&self) -> u32 {
        u32::try_from(self.document.pages().len()).unwrap_or(0)
    }

    fn render_page(&self, index: u32, scale: ScaleTransform) -> Result<RgbImage> {
        let page_index = index
            .try_into()
            .map_err(|_| anyhow!("Page index {} is beyond PDFium's page limit", index))?;
        let page = self.document.pages().get(page_index)?;

        let config = PdfRenderConfig::new().scale_page_by_factor(scale.zoom);
        let bitmap = page.render_with_config(&config)?;

        let width = u32::try_from(bitmap.width())?;
        let height = u32::try_from(bitmap.height())?;
        debug!(index, width, height, "rendered page");

        let rgba = RgbaImage::from_raw(width, height, bitmap.as_rgba_bytes())
            .ok_or_else(|| anyhow!("PDFium returned a truncated bitmap for page index {}", index))?;
        drop(bitmap);

        Ok(DynamicImage::ImageRgba8(rgba).into_rgb8())
    }
}
