//! Route planning on 2-D occupancy grids.
//!
//! A [`GridGraph`] holds an occupancy map and answers spatial queries over it;
//! a [`SearchState`] holds the bookkeeping of one search over that map. The
//! two are kept apart so a single map can be shared between searches.

pub extern crate nalgebra as na;
use na::Vector2;

pub mod config;
pub mod error;
pub mod graph_search;
pub mod map_representation;
pub mod plan_record;
pub mod visualization;

pub use crate::config::PlannerConfig;
pub use crate::error::{PlannerError, Result};
pub use crate::graph_search::breadth_first_search::{breadth_first_search, graph_search};
pub use crate::graph_search::frontier::{FifoFrontier, Frontier};
pub use crate::graph_search::planner::{Algorithm, BreadthFirstSearch, PathPlanner};
pub use crate::graph_search::search_state::{CellState, SearchState};
pub use crate::graph_search::trace_path::trace_path;
pub use crate::map_representation::collision::CollisionProfile;
pub use crate::map_representation::grid_graph::GridGraph;
pub use crate::map_representation::map::Map;
pub use crate::map_representation::map_file::load_map_file;
pub use crate::plan_record::PlanRecord;
pub use crate::visualization::render::render_plan;

/// World position in meters
pub type Point = Vector2<f64>;

/// Grid indices of a cell: column `i` along x, row `j` along y.
///
/// Indices are signed so that offsets around a cell can be expressed before
/// they are bounds-checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub i: i64,
    pub j: i64,
}

impl Cell {
    pub fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }

    /// Number of 4-connected moves between two cells, ignoring obstacles.
    pub fn manhattan_distance(&self, other: Cell) -> u64 {
        self.i.abs_diff(other.i) + self.j.abs_diff(other.j)
    }
}

impl From<(i64, i64)> for Cell {
    fn from((i, j): (i64, i64)) -> Self {
        Cell::new(i, j)
    }
}

impl From<Cell> for [i64; 2] {
    fn from(cell: Cell) -> Self {
        [cell.i, cell.j]
    }
}
