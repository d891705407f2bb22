pub mod breadth_first_search;
pub mod frontier;
pub mod planner;
pub mod search_state;
pub mod trace_path;
