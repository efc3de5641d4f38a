use image::{Rgba, RgbaImage};

use crate::foundation::core::Point;

/// Fill color for a triangle that covers no source pixel.
pub const FALLBACK_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Precomputed barycentric frame of a triangle `(a, b, c)`.
///
/// `denom == 0` marks a degenerate (zero-area) triangle, which contains no point at all.
#[derive(Clone, Copy, Debug)]
pub struct TriangleCoverage {
    vertices: [Point; 3],
    ac: (f64, f64),
    ab: (f64, f64),
    dot00: f64,
    dot01: f64,
    dot11: f64,
    denom: f64,
}

impl TriangleCoverage {
    pub fn new(vertices: [Point; 3]) -> Self {
        let [a, b, c] = vertices;
        let ac = (c.x - a.x, c.y - a.y);
        let ab = (b.x - a.x, b.y - a.y);
        let dot00 = ac.0 * ac.0 + ac.1 * ac.1;
        let dot01 = ac.0 * ab.0 + ac.1 * ab.1;
        let dot11 = ab.0 * ab.0 + ab.1 * ab.1;
        Self {
            vertices,
            ac,
            ab,
            dot00,
            dot01,
            dot11,
            denom: dot00 * dot11 - dot01 * dot01,
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.denom == 0.0
    }

    /// Edge-inclusive barycentric membership test.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        if self.is_degenerate() {
            return false;
        }
        let a = self.vertices[0];
        let ap = (px - a.x, py - a.y);
        let dot02 = self.ac.0 * ap.0 + self.ac.1 * ap.1;
        let dot12 = self.ab.0 * ap.0 + self.ab.1 * ap.1;

        let u = (self.dot11 * dot02 - self.dot01 * dot12) / self.denom;
        let v = (self.dot00 * dot12 - self.dot01 * dot02) / self.denom;
        u >= 0.0 && v >= 0.0 && u + v <= 1.0
    }

    /// Integer pixel coordinates of the bounding box (`floor(min)..=ceil(max)`) that pass
    /// [`Self::contains`]. Not clipped to any buffer.
    pub fn pixels(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        let [a, b, c] = self.vertices;
        let min_x = a.x.min(b.x).min(c.x).floor() as i64;
        let max_x = a.x.max(b.x).max(c.x).ceil() as i64;
        let min_y = a.y.min(b.y).min(c.y).floor() as i64;
        let max_y = a.y.max(b.y).max(c.y).ceil() as i64;

        let rows = if self.is_degenerate() {
            1..=0
        } else {
            min_y..=max_y
        };
        rows.flat_map(move |y| (min_x..=max_x).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.contains(x as f64, y as f64))
    }
}

/// Convenience wrapper over [`TriangleCoverage::contains`].
pub fn point_in_triangle(p: Point, vertices: [Point; 3]) -> bool {
    TriangleCoverage::new(vertices).contains(p.x, p.y)
}

fn in_bounds(img: &RgbaImage, x: i64, y: i64) -> Option<(u32, u32)> {
    let (w, h) = img.dimensions();
    if x < 0 || y < 0 || x >= i64::from(w) || y >= i64::from(h) {
        return None;
    }
    Some((x as u32, y as u32))
}

/// Mean color of the source pixels covered by the triangle.
///
/// Channels are widened to 16 bits (`c * 0x101`) before summing; the truncated mean is shifted
/// back down to 8 bits. Returns [`FALLBACK_COLOR`] when nothing inside `source` is covered.
pub fn average_color(source: &RgbaImage, coverage: &TriangleCoverage) -> Rgba<u8> {
    let mut sum = [0u64; 4];
    let mut count = 0u64;
    for (x, y) in coverage.pixels() {
        let Some((x, y)) = in_bounds(source, x, y) else {
            continue;
        };
        let px = source.get_pixel(x, y);
        for (acc, &c) in sum.iter_mut().zip(px.0.iter()) {
            *acc += u64::from(c) * 0x101;
        }
        count += 1;
    }
    if count == 0 {
        return FALLBACK_COLOR;
    }
    Rgba(sum.map(|s| ((s / count) >> 8) as u8))
}

/// Write `color` to every covered pixel that lies inside `dest`. Returns the number written.
pub fn fill_triangle(dest: &mut RgbaImage, coverage: &TriangleCoverage, color: Rgba<u8>) -> usize {
    let mut written = 0;
    for (x, y) in coverage.pixels() {
        if let Some((x, y)) = in_bounds(dest, x, y) {
            dest.put_pixel(x, y, color);
            written += 1;
        }
    }
    written
}

/// Average `source` over the triangle and flat-fill the same coverage in `dest`.
///
/// `dest` may have different dimensions from `source`; each buffer is bounds-checked on its own.
/// Degenerate triangles leave `dest` untouched.
pub fn rasterize_triangle(source: &RgbaImage, dest: &mut RgbaImage, vertices: [Point; 3]) -> usize {
    let coverage = TriangleCoverage::new(vertices);
    if coverage.is_degenerate() {
        return 0;
    }
    let color = average_color(source, &coverage);
    fill_triangle(dest, &coverage, color)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/triangle.rs"]
mod tests;
