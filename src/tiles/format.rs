use crate::{PrintError, Result};
use std::fmt;

const WRITABLE: [image::ImageFormat; 5] = [
    image::ImageFormat::Png,
    image::ImageFormat::Jpeg,
    image::ImageFormat::Gif,
    image::ImageFormat::Tiff,
    image::ImageFormat::Bmp,
];

/// Tile image encoding, resolved from a layer's file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageFormat(image::ImageFormat);

impl ImageFormat {
    /// Looks up the writer for an extension such as `png` or `jpeg`
    pub fn from_extension(extension: &str) -> Result<Self> {
        image::ImageFormat::from_extension(extension.to_ascii_lowercase())
            .filter(|format| WRITABLE.contains(format))
            .map(ImageFormat)
            .ok_or_else(|| {
                PrintError::invalid_configuration(format!(
                    "no image writer for extension '{}'",
                    extension
                ))
            })
    }

    /// Formats this build can write
    pub fn supported() -> Vec<ImageFormat> {
        WRITABLE.iter().copied().map(ImageFormat).collect()
    }

    pub fn extension(&self) -> &'static str {
        match self.0 {
            image::ImageFormat::Jpeg => "jpeg",
            image::ImageFormat::Gif => "gif",
            image::ImageFormat::Tiff => "tiff",
            image::ImageFormat::Bmp => "bmp",
            _ => "png",
        }
    }

    pub fn mime_type(&self) -> String {
        format!("image/{}", self.extension())
    }

    pub fn inner(&self) -> image::ImageFormat {
        self.0
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
