use crate::foundation::core::{Point, Triangle};
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::triangulate::Triangulator;

/// Delaunay triangulation of the full point set.
#[derive(Clone, Copy, Debug, Default)]
pub struct DelaunayTriangulator;

impl Triangulator for DelaunayTriangulator {
    fn triangulate(&self, points: &[Point]) -> LowPolyResult<Vec<Triangle>> {
        let input = points
            .iter()
            .map(|p| delaunator::Point { x: p.x, y: p.y })
            .collect::<Vec<_>>();
        let tri = delaunator::triangulate(&input);
        if tri.triangles.is_empty() {
            return Err(LowPolyError::triangulation(format!(
                "no triangles for {} points (fewer than 3 distinct or all collinear)",
                points.len()
            )));
        }
        Triangle::from_flat(&tri.triangles)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/triangulate/delaunay.rs"]
mod tests;
