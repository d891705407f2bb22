use crate::error::{PlannerError, Result};

/// Precomputed footprint of a circular robot on the grid.
///
/// The footprint is stored as a set of `(di, dj)` offsets relative to the
/// cell under test, covering every cell whose squared distance to the center
/// is at most `(radius_cells - 1)^2`. The set is symmetric about `(0, 0)` and
/// always contains it.
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionProfile {
    /// Radius in meters as requested
    radius: f64,
    /// Radius rounded up to whole cells
    radius_cells: i64,
    offsets: Vec<(i64, i64)>,
}

impl CollisionProfile {
    /// Build the footprint for a radius in meters on a grid with the given cell size.
    pub fn new(radius: f64, meters_per_cell: f64) -> Result<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(PlannerError::InvalidCollisionRadius(radius));
        }
        let cells = (radius / meters_per_cell).ceil();
        if !cells.is_finite() || cells >= i64::MAX as f64 {
            return Err(PlannerError::InvalidCollisionRadius(radius));
        }
        let radius_cells = cells as i64;

        // A zero radius still has to test the cell itself.
        let reach = (radius_cells - 1).max(0);
        let capacity = reach
            .checked_mul(2)
            .and_then(|d| d.checked_add(1))
            .and_then(|side| side.checked_mul(side))
            .and_then(|n| usize::try_from(n).ok())
            .ok_or(PlannerError::InvalidCollisionRadius(radius))?;
        let mut offsets = Vec::new();
        offsets
            .try_reserve(capacity)
            .map_err(|_| PlannerError::InvalidCollisionRadius(radius))?;
        for dj in -reach..=reach {
            for di in -reach..=reach {
                if di * di + dj * dj <= reach * reach {
                    offsets.push((di, dj));
                }
            }
        }

        Ok(Self {
            radius,
            radius_cells,
            offsets,
        })
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn radius_cells(&self) -> i64 {
        self.radius_cells
    }

    /// Offsets in row-major order, `dj` outermost.
    pub fn offsets(&self) -> &[(i64, i64)] {
        &self.offsets
    }

    /// The footprint translated so that it is centered on `(i, j)`.
    pub fn cells_around(&self, i: i64, j: i64) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.offsets.iter().map(move |(di, dj)| (i + di, j + dj))
    }
}
