use crate::Point;

/// Abstract interface for map representation.
pub trait Map {
    /// Occupancy at a world position, or `None` when the position lies outside the map.
    fn get_occupancy(&self, position: Point) -> Option<bool>;
}
