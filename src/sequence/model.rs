use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::foundation::error::{LowPolyError, LowPolyResult};

/// Largest color table an indexed frame can carry.
pub const MAX_PALETTE_LEN: usize = 256;

/// Ordered color table of an indexed frame (1..=256 entries, straight-alpha RGBA8).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    pub fn new(colors: Vec<Rgba<u8>>) -> LowPolyResult<Self> {
        if colors.is_empty() || colors.len() > MAX_PALETTE_LEN {
            return Err(LowPolyError::validation(format!(
                "palette must have 1..={MAX_PALETTE_LEN} colors, got {}",
                colors.len()
            )));
        }
        Ok(Self { colors })
    }

    /// Build from packed `RGBRGB...` bytes. The `transparent` entry (if any) keeps its stored RGB
    /// with zero alpha, so [`Palette::to_rgb_bytes`] writes the table back unchanged.
    pub fn from_rgb_bytes(rgb: &[u8], transparent: Option<u8>) -> LowPolyResult<Self> {
        if rgb.len() % 3 != 0 {
            return Err(LowPolyError::validation(format!(
                "palette byte length {} is not a multiple of 3",
                rgb.len()
            )));
        }
        let colors = rgb
            .chunks_exact(3)
            .enumerate()
            .map(|(i, c)| {
                let alpha = if transparent.is_some_and(|t| usize::from(t) == i) {
                    0
                } else {
                    255
                };
                Rgba([c[0], c[1], c[2], alpha])
            })
            .collect();
        Self::new(colors)
    }

    /// Packed `RGBRGB...` bytes (alpha dropped).
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| [c[0], c[1], c[2]]).collect()
    }

    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: u8) -> Option<Rgba<u8>> {
        self.colors.get(usize::from(index)).copied()
    }
}

/// What a viewer does with a frame's area before drawing the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Disposal {
    #[default]
    Unspecified,
    Keep,
    Background,
    Previous,
}

/// One palette-indexed image of a sequence.
///
/// The palette is shared by reference; stylizing a frame swaps its pixel indices but keeps the
/// very same palette allocation.
#[derive(Clone, Debug)]
pub struct IndexedFrame {
    /// Horizontal offset on the logical screen.
    pub left: u32,
    /// Vertical offset on the logical screen.
    pub top: u32,
    /// Display time in hundredths of a second.
    pub delay_cs: u16,
    pub disposal: Disposal,
    /// Palette index rendered as fully transparent.
    pub transparent: Option<u8>,
    width: u32,
    height: u32,
    palette: Arc<Palette>,
    indices: Vec<u8>,
}

impl IndexedFrame {
    pub fn new(
        width: u32,
        height: u32,
        palette: Arc<Palette>,
        indices: Vec<u8>,
    ) -> LowPolyResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| LowPolyError::validation("frame size overflow"))?;
        if indices.len() != expected {
            return Err(LowPolyError::validation(format!(
                "frame {width}x{height} expects {expected} indices, got {}",
                indices.len()
            )));
        }
        Ok(Self {
            left: 0,
            top: 0,
            delay_cs: 0,
            disposal: Disposal::default(),
            transparent: None,
            width,
            height,
            palette,
            indices,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &Arc<Palette> {
        &self.palette
    }

    /// Row-major palette indices.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Expand to full color. Indices outside the palette become transparent black.
    pub fn to_rgba(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width, self.height);
        for (px, &idx) in out.pixels_mut().zip(self.indices.iter()) {
            *px = self.palette.get(idx).unwrap_or(Rgba([0, 0, 0, 0]));
        }
        out
    }

    /// Same timing, disposal and palette; new geometry and pixel indices.
    pub(crate) fn with_pixels(
        &self,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
        indices: Vec<u8>,
    ) -> Self {
        debug_assert_eq!(indices.len(), width as usize * height as usize);
        Self {
            left,
            top,
            delay_cs: self.delay_cs,
            disposal: self.disposal,
            transparent: self.transparent,
            width,
            height,
            palette: Arc::clone(&self.palette),
            indices,
        }
    }
}

/// How many times an animation plays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopCount {
    #[default]
    Infinite,
    /// Play once, then repeat this many more times.
    Finite(u16),
    /// Play once; no looping metadata is written.
    Once,
}

/// An animated sequence: logical screen size, loop behaviour and frames in display order.
#[derive(Clone, Debug)]
pub struct FrameSequence {
    pub width: u32,
    pub height: u32,
    pub loop_count: LoopCount,
    pub frames: Vec<IndexedFrame>,
}

impl FrameSequence {
    pub fn new(width: u32, height: u32, frames: Vec<IndexedFrame>) -> Self {
        Self {
            width,
            height,
            loop_count: LoopCount::default(),
            frames,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/model.rs"]
mod tests;
