//! Triangulation capability consumed by the stylization engine.
//!
//! The engine only relies on the contract of [`Triangulator`]: given `N` points, return triangles
//! whose indices point into that same slice. How the triangles are computed is up to the
//! implementation.

/// Delaunay triangulation backed by the `delaunator` crate.
pub mod delaunay;
/// Deterministic fan triangulation for tests and debugging.
pub mod fan;

use crate::foundation::core::{Point, Triangle};
use crate::foundation::error::LowPolyResult;

/// Turns a point set into a list of index triangles.
///
/// Implementations must be shareable across frame workers.
pub trait Triangulator: Send + Sync {
    /// Triangulate `points`. Every returned index must be `< points.len()`.
    fn triangulate(&self, points: &[Point]) -> LowPolyResult<Vec<Triangle>>;
}

impl<T: Triangulator + ?Sized> Triangulator for &T {
    fn triangulate(&self, points: &[Point]) -> LowPolyResult<Vec<Triangle>> {
        (**self).triangulate(points)
    }
}
