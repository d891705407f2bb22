use crate::graph_search::search_state::SearchState;
use crate::Cell;

/// Follow parent links from `goal` back to the cell with no parent and return
/// the route in start-to-goal order.
///
/// The walk is capped at one step per cell in the state, so a corrupted parent
/// chain ends instead of looping.
pub fn trace_path(goal: Cell, state: &SearchState) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(parent) = state.parent(current) {
        if path.len() > state.len() {
            log::warn!("Parent chain from {:?} does not terminate", goal);
            break;
        }
        path.push(parent);
        current = parent;
    }
    path.reverse();
    path
}
