use std::fmt;
use std::str::FromStr;

use crate::error::PlannerError;
use crate::graph_search::breadth_first_search::breadth_first_search;
use crate::graph_search::search_state::SearchState;
use crate::map_representation::grid_graph::GridGraph;
use crate::Cell;

/// A route planner over an occupancy grid.
pub trait PathPlanner {
    /// Name recorded alongside the plans this planner produces.
    fn name(&self) -> &str;

    /// Plan a route from `start` to `goal`, using `state` as scratch space.
    /// An empty route means no route exists.
    fn plan(
        &mut self,
        graph: &GridGraph,
        state: &mut SearchState,
        start: Cell,
        goal: Cell,
    ) -> Vec<Cell>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BreadthFirstSearch;

impl PathPlanner for BreadthFirstSearch {
    fn name(&self) -> &str {
        Algorithm::BreadthFirstSearch.name()
    }

    fn plan(
        &mut self,
        graph: &GridGraph,
        state: &mut SearchState,
        start: Cell,
        goal: Cell,
    ) -> Vec<Cell> {
        breadth_first_search(graph, state, start, goal)
    }
}

/// The planning algorithms that can be selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    BreadthFirstSearch,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::BreadthFirstSearch => "bfs",
        }
    }

    pub fn planner(self) -> Box<dyn PathPlanner + Send> {
        match self {
            Algorithm::BreadthFirstSearch => Box::new(BreadthFirstSearch),
        }
    }
}

impl FromStr for Algorithm {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" | "breadth_first_search" => Ok(Algorithm::BreadthFirstSearch),
            _ => Err(PlannerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
