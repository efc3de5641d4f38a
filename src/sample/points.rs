use rand::Rng;

use crate::foundation::core::Point;
use crate::foundation::error::{LowPolyError, LowPolyResult};

/// Default source pixels per sampled point at 100% intensity.
pub const DEFAULT_DENSITY: u32 = 500;
/// Default lower bound on the number of random points.
pub const DEFAULT_MIN_POINTS: u32 = 10;

/// Controls how many points are sampled for an image.
///
/// The random point count is `max(min_points, (width * height / density) * intensity / 100)`,
/// with each division truncating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Source pixels per sampled point at 100% intensity. Must be >= 1.
    pub density: u32,
    /// Minimum number of random (non-corner) points.
    pub min_points: u32,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            min_points: DEFAULT_MIN_POINTS,
        }
    }
}

impl SamplerConfig {
    /// Reject configurations that cannot produce a point count.
    pub fn validate(&self) -> LowPolyResult<()> {
        if self.density == 0 {
            return Err(LowPolyError::validation("sampler density must be >= 1"));
        }
        Ok(())
    }

    /// Number of random points (corners excluded) for a `width x height` image.
    pub fn poly_point_count(&self, width: u32, height: u32, intensity: u32) -> usize {
        let area = u64::from(width) * u64::from(height);
        let scaled = area / u64::from(self.density.max(1)) * u64::from(intensity) / 100;
        scaled.max(u64::from(self.min_points)) as usize
    }

    /// Sample the vertex set for a `width x height` image.
    ///
    /// Returns `poly_point_count(..)` uniform points in `[0, width) x [0, height)` followed by the
    /// four corners in the order of [`corner_points`].
    pub fn sample<R: Rng + ?Sized>(
        &self,
        width: u32,
        height: u32,
        intensity: u32,
        rng: &mut R,
    ) -> Vec<Point> {
        let n = self.poly_point_count(width, height, intensity);
        let (w, h) = (f64::from(width), f64::from(height));

        let mut points = Vec::with_capacity(n + 4);
        for _ in 0..n {
            let x = rng.r#gen::<f64>() * w;
            let y = rng.r#gen::<f64>() * h;
            points.push(Point::new(x, y));
        }
        points.extend(corner_points(width, height));
        points
    }
}

/// `(0,0)`, `(W-1,0)`, `(0,H-1)`, `(W-1,H-1)`.
pub fn corner_points(width: u32, height: u32) -> [Point; 4] {
    let right = f64::from(width.saturating_sub(1));
    let bottom = f64::from(height.saturating_sub(1));
    [
        Point::new(0.0, 0.0),
        Point::new(right, 0.0),
        Point::new(0.0, bottom),
        Point::new(right, bottom),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/sample/points.rs"]
mod tests;
