use serde::Serialize;

use crate::error::Result;
use crate::graph_search::search_state::SearchState;
use crate::map_representation::grid_graph::GridGraph;
use crate::Cell;

/// Everything a plan viewer needs to replay one search.
///
/// Encodes to JSON as
/// `{"path": [[i, j], ...], "visited_cells": [...], "dt": [], "map": "...",
///   "start": [i, j], "goal": [i, j], "planning_algo": "bfs"}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanRecord {
    /// Route from start to goal, empty when none was found
    pub path: Vec<[i64; 2]>,
    /// Cells in exploration order
    pub visited_cells: Vec<[i64; 2]>,
    /// Per-step timings; always empty
    pub dt: Vec<f64>,
    /// The map in its serialized text form
    pub map: String,
    pub start: [i64; 2],
    pub goal: [i64; 2],
    pub planning_algo: String,
}

impl PlanRecord {
    pub fn new(
        graph: &GridGraph,
        state: &SearchState,
        start: Cell,
        goal: Cell,
        path: &[Cell],
        algorithm: &str,
    ) -> Self {
        Self {
            path: path.iter().map(|c| (*c).into()).collect(),
            visited_cells: state.visited_cells().iter().map(|c| (*c).into()).collect(),
            dt: vec![],
            map: graph.to_string(),
            start: start.into(),
            goal: goal.into(),
            planning_algo: algorithm.to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
