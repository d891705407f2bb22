//! Reading occupancy maps from their text format.
//!
//! The first line holds `origin_x origin_y width height meters_per_cell`;
//! each of the following `height` lines holds `width` log-odds values.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::error::{PlannerError, Result};
use crate::map_representation::grid_graph::{cell_count, GridGraph};
use crate::Point;

impl GridGraph {
    /// Parse a map from its text representation.
    pub fn from_map_str(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let header = lines
            .next()
            .ok_or_else(|| PlannerError::MalformedMap("missing header line".to_string()))?;
        let fields = header
            .split_whitespace()
            .map(|token| parse_token::<f64>(token, "header"))
            .collect::<Result<Vec<_>>>()?;
        if fields.len() != 5 {
            return Err(PlannerError::MalformedMap(format!(
                "header needs 5 values, found {}",
                fields.len()
            )));
        }
        let (origin_x, origin_y, width, height, meters_per_cell) =
            (fields[0], fields[1], fields[2], fields[3], fields[4]);

        if width < 0.0 || height < 0.0 || meters_per_cell < 0.0 {
            return Err(PlannerError::InvalidMap(format!(
                "negative header values: width {}, height {}, meters_per_cell {}",
                width, height, meters_per_cell
            )));
        }
        // Dimensions are stored as floats and truncated.
        let width = width.trunc() as usize;
        let height = height.trunc() as usize;
        cell_count(width, height)?;

        // Grows row by row; the header alone is not trusted for allocation.
        let mut cell_odds = Vec::new();
        for row in 0..height {
            let line = lines.next().ok_or_else(|| {
                PlannerError::MalformedMap(format!("expected {} rows, found {}", height, row))
            })?;
            let mut tokens = line.split_whitespace();
            for col in 0..width {
                let token = tokens.next().ok_or_else(|| {
                    PlannerError::MalformedMap(format!(
                        "row {} has {} values, expected {}",
                        row, col, width
                    ))
                })?;
                cell_odds.push(parse_token::<i8>(token, "cell")?);
            }
        }

        GridGraph::new(
            width,
            height,
            Point::new(origin_x, origin_y),
            meters_per_cell,
            cell_odds,
        )
    }
}

/// Load a map file from disk.
pub fn load_map_file<P: AsRef<Path>>(path: P) -> Result<GridGraph> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| {
        log::warn!("Failed to load map from {}", path.display());
        PlannerError::MapIo {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let graph = GridGraph::from_map_str(&text).map_err(|e| {
        log::warn!("Rejected map {}: {}", path.display(), e);
        e
    })?;
    log::info!(
        "Loaded {}x{} map from {} ({} m/cell)",
        graph.width(),
        graph.height(),
        path.display(),
        graph.meters_per_cell()
    );
    Ok(graph)
}

fn parse_token<T: FromStr>(token: &str, what: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| PlannerError::MalformedMap(format!("invalid {} value `{}`", what, token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_MAP: &str = "-1.0 -0.5 3.0 2.0 0.05\n\
                             -128 -127 0\n\
                             10 100 127\n";

    #[test]
    fn test_parse_small_map() {
        let graph = GridGraph::from_map_str(SMALL_MAP).unwrap();
        assert_eq!(graph.width(), 3);
        assert_eq!(graph.height(), 2);
        assert_eq!(graph.origin(), Point::new(-1.0, -0.5));
        assert_eq!(graph.meters_per_cell(), 0.05);
        assert_eq!(graph.odds(0, 0), Some(-128));
        assert_eq!(graph.odds(2, 0), Some(0));
        assert_eq!(graph.odds(1, 1), Some(100));
        assert_eq!(graph.odds(3, 1), None);
    }

    #[test]
    fn test_truncates_dimensions_and_ignores_extra_tokens() {
        let graph = GridGraph::from_map_str("0 0 2.7 1.2 1\n1 2 3\nignored line\n").unwrap();
        assert_eq!((graph.width(), graph.height()), (2, 1));
        assert_eq!(graph.cell_odds(), &[1, 2]);
    }

    #[test]
    fn test_serialized_map_reparses() {
        let graph = GridGraph::from_map_str(SMALL_MAP).unwrap();
        let text = graph.to_string();
        // The serialized form is a single line; rebuild the row layout.
        let tokens: Vec<&str> = text.split(' ').collect();
        let mut reformatted = tokens[..5].join(" ");
        for row in tokens[5..].chunks(graph.width()) {
            reformatted.push('\n');
            reformatted.push_str(&row.join(" "));
        }
        assert_eq!(GridGraph::from_map_str(&reformatted).unwrap(), graph);
    }

    #[test]
    fn test_rejects_malformed_maps() {
        assert!(matches!(
            GridGraph::from_map_str(""),
            Err(PlannerError::MalformedMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 2 2\n"),
            Err(PlannerError::MalformedMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 2 2 0.1\n1 2\n"),
            Err(PlannerError::MalformedMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 2 1 0.1\n1\n"),
            Err(PlannerError::MalformedMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 2 1 0.1\n1 200\n"),
            Err(PlannerError::MalformedMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 x 1 0.1\n1 2\n"),
            Err(PlannerError::MalformedMap(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            GridGraph::from_map_str("0 0 -2 1 0.1\n"),
            Err(PlannerError::InvalidMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 1 1 -0.1\n0\n"),
            Err(PlannerError::InvalidMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 1 1 0\n0\n"),
            Err(PlannerError::InvalidMap(_))
        ));
    }

    #[test]
    fn test_rejects_oversized_headers() {
        assert!(matches!(
            GridGraph::from_map_str("0 0 1e10 1e10 0.1\n0\n"),
            Err(PlannerError::InvalidMap(_))
        ));
        assert!(matches!(
            GridGraph::from_map_str("0 0 1e300 2 0.1\n0\n"),
            Err(PlannerError::InvalidMap(_))
        ));
        // Plausible dimensions with missing rows fail on the rows, not on allocation
        assert!(matches!(
            GridGraph::from_map_str("0 0 100000 100000 0.05\n0 0 0\n"),
            Err(PlannerError::MalformedMap(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = load_map_file("/definitely/not/a/map/file.map");
        assert!(matches!(result, Err(PlannerError::MapIo { .. })));
    }
}
