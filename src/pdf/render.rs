use anyhow::Result;
use clap::ValueEnum;
use image::RgbImage;

/// PDF user space unit: 72 points per inch.
pub const POINTS_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Dpi {
    /// Standard high resolution
    #[default]
    #[value(name = "300")]
    Standard,
    /// Ultra high resolution
    #[value(name = "600")]
    Ultra,
}

impl Dpi {
    pub fn value(self) -> u32 {
        match self {
            Dpi::Standard => 300,
            Dpi::Ultra => 600,
        }
    }

    pub fn from_value(dpi: u32) -> Option<Self> {
        match dpi {
            300 => Some(Dpi::Standard),
            600 => Some(Dpi::Ultra),
            _ => None,
        }
    }

    pub fn scale(self) -> ScaleTransform {
        ScaleTransform::uniform(self.value() as f32 / POINTS_PER_INCH)
    }
}

/// Uniform scale applied to page space when rasterizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleTransform {
    pub zoom: f32,
}

impl ScaleTransform {
    pub fn uniform(zoom: f32) -> Self {
        ScaleTransform { zoom }
    }

    /// Pixel size of a page measured in points.
    pub fn apply(&self, width_pt: f32, height_pt: f32) -> (u32, u32) {
        (
            (width_pt * self.zoom).round() as u32,
            (height_pt * self.zoom).round() as u32,
        )
    }
}

/// Rasterizes pages of an already opened document.
pub trait PageRenderer {
    fn page_count(&self) -> u32;

    /// Render the page at 0-based `index`.
    fn render_page(&self, index: u32, scale: ScaleTransform) -> Result<RgbImage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_from_dpi() {
        assert_eq!(Dpi::Standard.scale(), ScaleTransform::uniform(300.0 / 72.0));
        assert_eq!(Dpi::Ultra.scale().zoom, 600.0 / 72.0);
    }

    #[test]
    fn test_from_value() {
        assert_eq!(Dpi::from_value(300), Some(Dpi::Standard));
        assert_eq!(Dpi::from_value(600), Some(Dpi::Ultra));
        assert_eq!(Dpi::from_value(150), None);
    }

    #[test]
    fn test_letter_page_pixels() {
        // 8.5x11in
        assert_eq!(Dpi::Standard.scale().apply(612.0, 792.0), (2550, 3300));
        assert_eq!(Dpi::Ultra.scale().apply(612.0, 792.0), (5100, 6600));
    }
}
