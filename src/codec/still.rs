use std::io::Cursor;
use std::path::Path;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::foundation::error::{LowPolyError, LowPolyResult};

/// JPEG quality used when writing stylized stills.
pub const JPEG_QUALITY: u8 = 95;

/// Supported input/output encodings, chosen by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    /// Animated (or single-frame) palette-indexed sequence.
    Gif,
}

impl ImageKind {
    /// Case-insensitive; accepts the extension with or without the leading dot.
    pub fn from_extension(ext: &str) -> LowPolyResult<Self> {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "gif" => Ok(Self::Gif),
            _ => Err(LowPolyError::validation(format!(
                "unsupported image format: .{ext}"
            ))),
        }
    }

    pub fn from_path(path: &Path) -> LowPolyResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        Self::from_extension(ext)
    }

    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Gif)
    }

    fn still_format(self) -> LowPolyResult<ImageFormat> {
        match self {
            Self::Jpeg => Ok(ImageFormat::Jpeg),
            Self::Png => Ok(ImageFormat::Png),
            Self::Gif => Err(LowPolyError::validation(
                "GIF is handled as a frame sequence, not a still image",
            )),
        }
    }
}

/// Decode JPEG/PNG bytes to straight-alpha RGBA8.
pub fn decode_still(bytes: &[u8], kind: ImageKind) -> LowPolyResult<RgbaImage> {
    let format = kind.still_format()?;
    let img = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("decode {format:?} image"))?;
    Ok(img.to_rgba8())
}

/// Encode RGBA8 as JPEG (quality [`JPEG_QUALITY`], alpha dropped) or PNG.
pub fn encode_still(image: &RgbaImage, kind: ImageKind) -> LowPolyResult<Vec<u8>> {
    let mut buf = Vec::new();
    match kind.still_format()? {
        ImageFormat::Jpeg => {
            let rgb = DynamicImage::ImageRgba8(image.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
                .encode_image(&rgb)
                .context("encode jpeg")?;
        }
        _ => {
            image
                .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
                .context("encode png")?;
        }
    }
    Ok(buf)
}

#[tracing::instrument(level = "debug")]
pub fn load_still(path: &Path) -> LowPolyResult<RgbaImage> {
    let kind = ImageKind::from_path(path)?;
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_still(&bytes, kind)
}

#[tracing::instrument(level = "debug", skip(image))]
pub fn save_still(image: &RgbaImage, path: &Path) -> LowPolyResult<()> {
    let kind = ImageKind::from_path(path)?;
    let bytes = encode_still(image, kind)?;
    std::fs::write(path, bytes).with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/codec/still.rs"]
mod tests;
