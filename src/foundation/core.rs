use crate::foundation::error::{LowPolyError, LowPolyResult};

pub use kurbo::Point;

/// One triangle of a triangulation, as three indices into the point set it was built from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Triangle {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Triangle {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        Self { a, b, c }
    }

    /// Resolve the three vertices. `None` if any index is outside `points`.
    pub fn vertices(self, points: &[Point]) -> Option<[Point; 3]> {
        Some([
            *points.get(self.a)?,
            *points.get(self.b)?,
            *points.get(self.c)?,
        ])
    }

    /// Group a flat `[ia, ib, ic, ia, ib, ic, ...]` index list into triangles.
    pub fn from_flat(indices: &[usize]) -> LowPolyResult<Vec<Self>> {
        if indices.len() % 3 != 0 {
            return Err(LowPolyError::triangulation(format!(
                "triangle index list length {} is not a multiple of 3",
                indices.len()
            )));
        }
        Ok(indices
            .chunks_exact(3)
            .map(|t| Self::new(t[0], t[1], t[2]))
            .collect())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
