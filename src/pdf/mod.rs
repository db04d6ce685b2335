pub mod document;
pub mod raster;
pub mod render;

pub use document::{bind_pdfium, PageSize, PdfiumDocument};
