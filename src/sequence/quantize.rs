use std::collections::HashMap;

use image::{Rgba, RgbaImage};

use crate::sequence::model::Palette;

/// Index of the palette entry closest to `px` by squared RGBA distance. Ties go to the lower index.
pub fn nearest_index(palette: &Palette, px: Rgba<u8>) -> u8 {
    let mut best = 0usize;
    let mut best_dist = u32::MAX;
    for (i, c) in palette.colors().iter().enumerate() {
        let dist = px
            .0
            .iter()
            .zip(c.0.iter())
            .map(|(&a, &b)| {
                let d = i32::from(a) - i32::from(b);
                (d * d) as u32
            })
            .sum::<u32>();
        if dist < best_dist {
            best = i;
            best_dist = dist;
            if dist == 0 {
                break;
            }
        }
    }
    best as u8
}

/// Map every pixel of `image` onto `palette`, row-major.
///
/// Flat-shaded input repeats the same few colors, so lookups are memoized per call.
pub fn quantize_to_palette(image: &RgbaImage, palette: &Palette) -> Vec<u8> {
    let mut memo = HashMap::<[u8; 4], u8>::new();
    image
        .pixels()
        .map(|px| {
            *memo
                .entry(px.0)
                .or_insert_with(|| nearest_index(palette, *px))
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/quantize.rs"]
mod tests;
