use anyhow::{Context, Result};
use clap::ValueEnum;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::RgbImage;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const JPEG_QUALITY: u8 = 95;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// PNG (lossless)
    #[default]
    Png,
    /// JPEG (compressed, smaller files)
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpeg",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" => Some(OutputFormat::Png),
            "jpeg" => Some(OutputFormat::Jpeg),
            _ => None,
        }
    }
}

/// Write `raster` to `path`. The buffer is consumed and freed on return.
pub fn save(raster: RgbImage, path: &Path, format: OutputFormat) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let encoded = match format {
        OutputFormat::Png => raster.write_with_encoder(PngEncoder::new(&mut writer)),
        OutputFormat::Jpeg => {
            raster.write_with_encoder(JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY))
        }
    };
    encoded.with_context(|| format!("Failed to encode {}", path.display()))?;

    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn sample() -> RgbImage {
        RgbImage::from_fn(8, 4, |x, y| Rgb([(x * 30) as u8, (y * 60) as u8, 128]))
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Png.extension(), "png");
        assert_eq!(OutputFormat::Jpeg.extension(), "jpeg");
    }

    #[test]
    fn test_from_name() {
        assert_eq!(OutputFormat::from_name(" JPEG "), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_name("jpg"), None);
        assert_eq!(OutputFormat::from_name("tiff"), None);
    }

    #[test]
    fn test_png_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        save(sample(), &path, OutputFormat::Png).unwrap();

        let decoded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_jpeg_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.jpeg");
        save(sample(), &path, OutputFormat::Jpeg).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 4));
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.png");
        let err = save(sample(), &path, OutputFormat::Png).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to create"));
    }
}
