use std::fmt;

use crate::config::{PlannerConfig, DEFAULT_COLLISION_RADIUS, DEFAULT_THRESHOLD};
use crate::error::{PlannerError, Result};
use crate::map_representation::collision::CollisionProfile;
use crate::map_representation::map::Map;
use crate::{Cell, Point};

/// Axis-aligned neighbour displacements in search order: east, west, south, north.
const NEIGHBOUR_OFFSETS: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// An occupancy grid map viewed as an implicit 4-connected graph.
///
/// The map is plain data: once built it can be wrapped in an `Arc` and shared
/// by any number of searches, each with its own
/// [`SearchState`](crate::graph_search::search_state::SearchState).
#[derive(Clone, Debug, PartialEq)]
pub struct GridGraph {
    /// Width in cells
    width: usize,
    /// Height in cells
    height: usize,
    /// World position of the outer corner of cell (0, 0)
    origin: Point,
    /// Size of a cell edge in meters
    meters_per_cell: f64,
    /// Log-odds per cell, row-major, `height` rows of `width` values
    cell_odds: Vec<i8>,
    /// Values at or above this count as occupied
    threshold: i8,
    collision: CollisionProfile,
}

impl GridGraph {
    /// Creates a new map with the default threshold and collision radius.
    /// # Arguments
    /// * `width` - Width of the grid in cells
    /// * `height` - Height of the grid in cells
    /// * `origin` - World position of the corner of cell (0, 0)
    /// * `meters_per_cell` - Edge length of each cell
    /// * `cell_odds` - `width * height` log-odds values, row after row
    pub fn new(
        width: usize,
        height: usize,
        origin: Point,
        meters_per_cell: f64,
        cell_odds: Vec<i8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PlannerError::InvalidMap(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if !meters_per_cell.is_finite() || meters_per_cell <= 0.0 {
            return Err(PlannerError::InvalidMap(format!(
                "meters_per_cell must be positive, got {}",
                meters_per_cell
            )));
        }
        if !origin.x.is_finite() || !origin.y.is_finite() {
            return Err(PlannerError::InvalidMap("origin must be finite".to_string()));
        }
        let size = cell_count(width, height)?;
        if cell_odds.len() != size {
            return Err(PlannerError::InvalidMap(format!(
                "expected {} cells for a {}x{} map, got {}",
                size,
                width,
                height,
                cell_odds.len()
            )));
        }

        let collision = CollisionProfile::new(DEFAULT_COLLISION_RADIUS, meters_per_cell)?;
        Ok(Self {
            width,
            height,
            origin,
            meters_per_cell,
            cell_odds,
            threshold: DEFAULT_THRESHOLD,
            collision,
        })
    }

    /// A map where every cell has the same log-odds value.
    pub fn filled(
        width: usize,
        height: usize,
        origin: Point,
        meters_per_cell: f64,
        odds: i8,
    ) -> Result<Self> {
        let size = cell_count(width, height)?;
        Self::new(width, height, origin, meters_per_cell, vec![odds; size])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn meters_per_cell(&self) -> f64 {
        self.meters_per_cell
    }

    pub fn threshold(&self) -> i8 {
        self.threshold
    }

    pub fn collision_profile(&self) -> &CollisionProfile {
        &self.collision
    }

    /// Raw log-odds, row-major.
    pub fn cell_odds(&self) -> &[i8] {
        &self.cell_odds
    }

    /// Log-odds of a cell, `None` outside the grid.
    pub fn odds(&self, i: i64, j: i64) -> Option<i8> {
        self.index(i, j).map(|idx| self.cell_odds[idx])
    }

    pub fn set_threshold(&mut self, threshold: i8) {
        self.threshold = threshold;
    }

    /// Recomputes the collision footprint for a radius in meters.
    pub fn set_collision_radius(&mut self, radius: f64) -> Result<()> {
        self.collision = CollisionProfile::new(radius, self.meters_per_cell)?;
        Ok(())
    }

    /// Applies the threshold and collision radius of a configuration.
    pub fn apply_config(&mut self, config: &PlannerConfig) -> Result<()> {
        self.set_collision_radius(config.collision_radius)?;
        self.set_threshold(config.threshold);
        Ok(())
    }

    /// Cell containing a world position. The result may lie outside the grid.
    pub fn pos_to_cell(&self, x: f64, y: f64) -> Cell {
        let i = ((x - self.origin.x) / self.meters_per_cell).floor() as i64;
        let j = ((y - self.origin.y) / self.meters_per_cell).floor() as i64;
        Cell::new(i, j)
    }

    /// World position of the center of a cell.
    pub fn cell_to_pos(&self, i: i64, j: i64) -> Point {
        Point::new(
            (i as f64 + 0.5) * self.meters_per_cell + self.origin.x,
            (j as f64 + 0.5) * self.meters_per_cell + self.origin.y,
        )
    }

    pub fn is_cell_in_bounds(&self, i: i64, j: i64) -> bool {
        0 <= i && i < self.width as i64 && 0 <= j && j < self.height as i64
    }

    /// Whether the cell's log-odds reach the threshold. Cells outside the grid
    /// report `false`; check bounds first.
    pub fn is_cell_occupied(&self, i: i64, j: i64) -> bool {
        self.odds(i, j).map_or(false, |odds| odds >= self.threshold)
    }

    /// Whether a robot centered on `(i, j)` would overlap an occupied cell.
    ///
    /// Footprint cells that fall outside the grid are ignored, so a cell whose
    /// footprint lies entirely off the map is never in collision.
    pub fn check_collision(&self, i: i64, j: i64) -> bool {
        self.collision
            .cells_around(i, j)
            .filter(|&(ci, cj)| self.is_cell_in_bounds(ci, cj))
            .any(|(ci, cj)| self.is_cell_occupied(ci, cj))
    }

    /// In bounds and not in collision.
    pub fn is_cell_free(&self, i: i64, j: i64) -> bool {
        self.is_cell_in_bounds(i, j) && !self.check_collision(i, j)
    }

    /// The in-bounds 4-connected neighbours of a cell, ordered east, west,
    /// south, north. Occupancy is not considered.
    pub fn find_neighbors(&self, i: i64, j: i64) -> Vec<Cell> {
        NEIGHBOUR_OFFSETS
            .iter()
            .map(|(di, dj)| Cell::new(i + di, j + dj))
            .filter(|c| self.is_cell_in_bounds(c.i, c.j))
            .collect()
    }

    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.cell_odds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cell_odds.is_empty()
    }

    /// Row-major index of a cell, `None` outside the grid.
    pub(crate) fn index(&self, i: i64, j: i64) -> Option<usize> {
        if !self.is_cell_in_bounds(i, j) {
            return None;
        }
        Some(j as usize * self.width + i as usize)
    }
}

impl Map for GridGraph {
    fn get_occupancy(&self, position: Point) -> Option<bool> {
        let cell = self.pos_to_cell(position.x, position.y);
        if !self.is_cell_in_bounds(cell.i, cell.j) {
            return None;
        }
        Some(self.is_cell_occupied(cell.i, cell.j))
    }
}

/// Serializes the map as `"{origin_x} {origin_y} {width} {height} {meters_per_cell}"`
/// followed by every log-odds value in row-major order, all space separated.
impl fmt::Display for GridGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {:?} {} {} {:?}",
            self.origin.x, self.origin.y, self.width, self.height, self.meters_per_cell
        )?;
        for odds in &self.cell_odds {
            write!(f, " {}", odds)?;
        }
        Ok(())
    }
}

/// Number of cells in a `width` x `height` grid, if it fits in `usize`.
pub(crate) fn cell_count(width: usize, height: usize) -> Result<usize> {
    width.checked_mul(height).ok_or_else(|| {
        PlannerError::InvalidMap(format!("{} x {} cells do not fit in memory", width, height))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(width: usize, height: usize) -> GridGraph {
        let mut graph =
            GridGraph::filled(width, height, Point::new(0.0, 0.0), 0.1, -127).unwrap();
        graph.set_collision_radius(0.05).unwrap();
        graph
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        let origin = Point::new(0.0, 0.0);
        assert!(GridGraph::new(0, 3, origin, 0.1, vec![]).is_err());
        assert!(GridGraph::new(2, 2, origin, 0.0, vec![0; 4]).is_err());
        assert!(GridGraph::new(2, 2, origin, -0.1, vec![0; 4]).is_err());
        assert!(GridGraph::new(2, 2, origin, f64::NAN, vec![0; 4]).is_err());
        assert!(GridGraph::new(2, 2, origin, 0.1, vec![0; 3]).is_err());
        assert!(GridGraph::new(2, 2, origin, 0.1, vec![0; 4]).is_ok());
    }

    #[test]
    fn test_pos_to_cell_floors() {
        let graph =
            GridGraph::filled(10, 10, Point::new(-1.0, -0.5), 0.2, -127).unwrap();
        assert_eq!(graph.pos_to_cell(-1.0, -0.5), Cell::new(0, 0));
        assert_eq!(graph.pos_to_cell(-0.81, -0.31), Cell::new(0, 0));
        assert_eq!(graph.pos_to_cell(-0.79, -0.29), Cell::new(1, 1));
        // No bounds check
        assert_eq!(graph.pos_to_cell(-1.1, 5.0), Cell::new(-1, 27));
    }

    #[test]
    fn test_cell_to_pos_is_center() {
        let graph = GridGraph::filled(10, 10, Point::new(1.0, 2.0), 0.5, -127).unwrap();
        let p = graph.cell_to_pos(3, 4);
        assert!((p.x - 2.75).abs() < 1e-12);
        assert!((p.y - 4.25).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_every_cell() {
        let graph = GridGraph::filled(17, 9, Point::new(-3.3, 0.7), 0.05, 0).unwrap();
        for j in 0..9 {
            for i in 0..17 {
                let p = graph.cell_to_pos(i, j);
                assert_eq!(graph.pos_to_cell(p.x, p.y), Cell::new(i, j));
            }
        }
    }

    #[test]
    fn test_bounds() {
        let graph = open_grid(4, 3);
        assert!(graph.is_cell_in_bounds(0, 0));
        assert!(graph.is_cell_in_bounds(3, 2));
        assert!(!graph.is_cell_in_bounds(4, 2));
        assert!(!graph.is_cell_in_bounds(3, 3));
        assert!(!graph.is_cell_in_bounds(-1, 0));
        assert!(!graph.is_cell_in_bounds(0, -1));
    }

    #[test]
    fn test_occupancy_uses_threshold() {
        let mut odds = vec![-127; 4];
        odds[1] = 50; // cell (1, 0)
        odds[2] = -100; // cell (0, 1)
        let mut graph = GridGraph::new(2, 2, Point::new(0.0, 0.0), 0.1, odds).unwrap();
        assert!(graph.is_cell_occupied(1, 0));
        assert!(graph.is_cell_occupied(0, 1));
        assert!(!graph.is_cell_occupied(0, 0));

        graph.set_threshold(0);
        assert!(graph.is_cell_occupied(1, 0));
        assert!(!graph.is_cell_occupied(0, 1));
        assert!(!graph.is_cell_occupied(5, 5));
    }

    #[test]
    fn test_collision_with_footprint() {
        let mut odds = vec![-127; 25];
        odds[2 * 5 + 2] = 100;
        let mut graph = GridGraph::new(5, 5, Point::new(0.0, 0.0), 0.1, odds).unwrap();

        graph.set_collision_radius(0.05).unwrap();
        assert!(graph.check_collision(2, 2));
        assert!(!graph.check_collision(2, 1));

        // Reach one cell: the plus-shaped footprint touches (2, 2) from its neighbours
        graph.set_collision_radius(0.2).unwrap();
        assert_eq!(graph.collision_profile().radius_cells(), 2);
        assert!(graph.check_collision(2, 1));
        assert!(graph.check_collision(3, 2));
        assert!(!graph.check_collision(1, 1));
        assert!(!graph.check_collision(0, 0));
    }

    #[test]
    fn test_oversized_radius_keeps_previous_footprint() {
        let mut graph = GridGraph::filled(4, 4, Point::new(0.0, 0.0), 0.05, -127).unwrap();
        graph.set_collision_radius(0.1).unwrap();
        let before = graph.collision_profile().clone();

        assert!(matches!(
            graph.set_collision_radius(1e12),
            Err(PlannerError::InvalidCollisionRadius(_))
        ));
        let config = PlannerConfig::from_yaml("collision_radius: 1e12\n").unwrap();
        assert!(graph.apply_config(&config).is_err());
        assert_eq!(graph.collision_profile(), &before);
    }

    #[test]
    fn test_oversized_dimensions() {
        assert!(matches!(
            GridGraph::filled(usize::MAX, 2, Point::new(0.0, 0.0), 0.1, 0),
            Err(PlannerError::InvalidMap(_))
        ));
        assert!(matches!(
            GridGraph::new(usize::MAX, 2, Point::new(0.0, 0.0), 0.1, vec![0; 4]),
            Err(PlannerError::InvalidMap(_))
        ));
    }

    #[test]
    fn test_collision_footprint_off_map() {
        let graph = GridGraph::filled(3, 3, Point::new(0.0, 0.0), 0.1, 127).unwrap();
        assert!(graph.check_collision(0, 0));
        // Every footprint cell lies outside the grid
        assert!(!graph.check_collision(-10, -10));
        assert!(!graph.is_cell_free(-10, -10));
    }

    #[test]
    fn test_neighbour_order_and_bounds() {
        let graph = open_grid(3, 3);
        assert_eq!(
            graph.find_neighbors(1, 1),
            vec![
                Cell::new(2, 1),
                Cell::new(0, 1),
                Cell::new(1, 2),
                Cell::new(1, 0)
            ]
        );
        assert_eq!(
            graph.find_neighbors(0, 0),
            vec![Cell::new(1, 0), Cell::new(0, 1)]
        );
        assert_eq!(
            graph.find_neighbors(2, 2),
            vec![Cell::new(1, 2), Cell::new(2, 1)]
        );
    }

    #[test]
    fn test_neighbours_ignore_occupancy() {
        let graph = GridGraph::filled(3, 3, Point::new(0.0, 0.0), 0.1, 127).unwrap();
        assert_eq!(graph.find_neighbors(1, 1).len(), 4);
    }

    #[test]
    fn test_get_occupancy() {
        let mut odds = vec![-127; 4];
        odds[3] = 127;
        let graph = GridGraph::new(2, 2, Point::new(0.0, 0.0), 1.0, odds).unwrap();
        assert_eq!(graph.get_occupancy(Point::new(0.5, 0.5)), Some(false));
        assert_eq!(graph.get_occupancy(Point::new(1.5, 1.5)), Some(true));
        assert_eq!(graph.get_occupancy(Point::new(2.5, 0.5)), None);
        assert_eq!(graph.get_occupancy(Point::new(-0.1, 0.5)), None);
    }

    #[test]
    fn test_display() {
        let graph = GridGraph::new(
            3,
            2,
            Point::new(0.0, -1.5),
            0.05,
            vec![1, -2, 3, 127, -128, 0],
        )
        .unwrap();
        assert_eq!(graph.to_string(), "0.0 -1.5 3 2 0.05 1 -2 3 127 -128 0");
    }
}
