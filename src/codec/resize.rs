use image::RgbaImage;
use image::imageops::{self, FilterType};

/// Resize to exactly `width x height` with a Catmull-Rom kernel.
pub fn resize_rgba(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    if image.dimensions() == (width, height) {
        return image.clone();
    }
    imageops::resize(image, width, height, FilterType::CatmullRom)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/resize.rs"]
mod tests;
