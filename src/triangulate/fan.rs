use crate::foundation::core::{Point, Triangle};
use crate::foundation::error::{LowPolyError, LowPolyResult};
use crate::triangulate::Triangulator;

/// Fan from point 0: `(0, 1, 2), (0, 2, 3), ...`.
///
/// Only a valid tiling when the points are already in convex-polygon order, but its output is
/// fully predictable, which is what tests need.
#[derive(Clone, Copy, Debug, Default)]
pub struct FanTriangulator;

impl Triangulator for FanTriangulator {
    fn triangulate(&self, points: &[Point]) -> LowPolyResult<Vec<Triangle>> {
        if points.len() < 3 {
            return Err(LowPolyError::triangulation(format!(
                "fan needs at least 3 points, got {}",
                points.len()
            )));
        }
        Ok((1..points.len() - 1)
            .map(|i| Triangle::new(0, i, i + 1))
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/triangulate/fan.rs"]
mod tests;
