use image::RgbaImage;
use rand::Rng;

use crate::foundation::core::Point;
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::raster::triangle::rasterize_triangle;
use crate::sample::points::SamplerConfig;
use crate::triangulate::Triangulator;
use crate::triangulate::delaunay::DelaunayTriangulator;

/// Low-poly stylization engine.
///
/// Holds the sampling configuration and the triangulation capability; both are fixed for the
/// lifetime of the engine, so one instance can be shared by every frame worker.
#[derive(Clone, Debug)]
pub struct LowPoly<T = DelaunayTriangulator> {
    sampler: SamplerConfig,
    triangulator: T,
}

impl Default for LowPoly {
    fn default() -> Self {
        Self::new()
    }
}

impl LowPoly {
    /// Default sampler with Delaunay triangulation.
    pub fn new() -> Self {
        Self::with_sampler(SamplerConfig::default())
    }

    /// Custom sampler with Delaunay triangulation.
    pub fn with_sampler(sampler: SamplerConfig) -> Self {
        Self::with_triangulator(sampler, DelaunayTriangulator)
    }
}

impl<T: Triangulator> LowPoly<T> {
    pub fn with_triangulator(sampler: SamplerConfig, triangulator: T) -> Self {
        Self {
            sampler,
            triangulator,
        }
    }

    pub fn sampler(&self) -> &SamplerConfig {
        &self.sampler
    }

    pub fn triangulator(&self) -> &T {
        &self.triangulator
    }

    /// Stylize `image` using the thread-local random generator.
    ///
    /// The result has the same dimensions as `image`; `image` itself is not modified.
    pub fn apply(&self, image: &RgbaImage, intensity: u32) -> LowPolyResult<RgbaImage> {
        self.apply_with_rng(image, intensity, &mut rand::thread_rng())
    }

    /// Stylize `image`, drawing the random points from `rng`.
    #[tracing::instrument(
        level = "debug",
        skip(self, image, rng),
        fields(width = image.width(), height = image.height())
    )]
    pub fn apply_with_rng<R: Rng + ?Sized>(
        &self,
        image: &RgbaImage,
        intensity: u32,
        rng: &mut R,
    ) -> LowPolyResult<RgbaImage> {
        let points = self
            .sampler
            .sample(image.width(), image.height(), intensity, rng);
        self.render_points(image, &points)
    }

    /// Triangulate an explicit point set and fill every triangle with its average source color.
    ///
    /// Pixels not covered by any triangle keep their source color.
    pub fn render_points(&self, image: &RgbaImage, points: &[Point]) -> LowPolyResult<RgbaImage> {
        let triangles = self.triangulator.triangulate(points)?;

        let mut out = image.clone();
        let mut written = 0usize;
        for t in &triangles {
            let vertices = t.vertices(points).ok_or_else(|| {
                LowPolyError::triangulation(format!(
                    "triangle {t:?} indexes outside the {}-point set",
                    points.len()
                ))
            })?;
            written += rasterize_triangle(image, &mut out, vertices);
        }

        tracing::debug!(
            points = points.len(),
            triangles = triangles.len(),
            pixels_written = written,
            "rasterized low-poly image"
        );
        Ok(out)
    }
}

/// Stylize `image` with the default engine configuration.
pub fn apply_low_poly(image: &RgbaImage, intensity: u32) -> LowPolyResult<RgbaImage> {
    LowPoly::new().apply(image, intensity)
}

#[cfg(test)]
#[path = "../../tests/unit/engine/lowpoly.rs"]
mod tests;
