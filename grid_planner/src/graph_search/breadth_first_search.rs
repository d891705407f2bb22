use crate::graph_search::frontier::{FifoFrontier, Frontier};
use crate::graph_search::search_state::SearchState;
use crate::graph_search::trace_path::trace_path;
use crate::map_representation::grid_graph::GridGraph;
use crate::Cell;

/// Search from `start` to `goal`, expanding cells in the order the frontier
/// hands them out.
///
/// The state is reset first. A cell is discovered at most once: only free,
/// unvisited neighbours are pushed, in east, west, south, north order.
/// Returns the start-to-goal route, or an empty route if either endpoint is
/// out of bounds or in collision, or if the frontier runs dry.
pub fn graph_search<F: Frontier>(
    graph: &GridGraph,
    state: &mut SearchState,
    frontier: &mut F,
    start: Cell,
    goal: Cell,
) -> Vec<Cell> {
    state.init_graph(graph);
    frontier.clear();

    if !graph.is_cell_free(start.i, start.j) {
        log::debug!("Start cell {:?} is outside the map or in collision", start);
        return vec![];
    }
    if !graph.is_cell_free(goal.i, goal.j) {
        log::debug!("Goal cell {:?} is outside the map or in collision", goal);
        return vec![];
    }

    state.discover(start, None);
    frontier.push(start, state.g_cost(start));

    while let Some(current) = frontier.pop() {
        state.expand(current);
        if current == goal {
            let path = trace_path(goal, state);
            log::debug!(
                "Reached {:?} from {:?}: {} cells on path, {} discovered",
                goal,
                start,
                path.len(),
                state.visited_cells().len()
            );
            return path;
        }

        for neighbour in graph.find_neighbors(current.i, current.j) {
            if !graph.is_cell_free(neighbour.i, neighbour.j) {
                continue;
            }
            if state.discover(neighbour, Some(current)) {
                frontier.push(neighbour, state.g_cost(neighbour));
            }
        }
    }

    log::debug!(
        "No route from {:?} to {:?} after discovering {} cells",
        start,
        goal,
        state.visited_cells().len()
    );
    vec![]
}

/// Breadth-first search over the 4-connected free cells of the map.
///
/// Finds a route with the fewest moves. The exploration order is recorded in
/// `state.visited_cells()`.
pub fn breadth_first_search(
    graph: &GridGraph,
    state: &mut SearchState,
    start: Cell,
    goal: Cell,
) -> Vec<Cell> {
    graph_search(graph, state, &mut FifoFrontier::new(), start, goal)
}
