pub mod collision;
pub mod grid_graph;
pub mod map;
pub mod map_file;
