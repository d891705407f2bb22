use yaml_rust::{Yaml, YamlLoader};

use crate::error::{PlannerError, Result};
use crate::graph_search::planner::Algorithm;

/// Collision radius used when none is configured, in meters.
pub const DEFAULT_COLLISION_RADIUS: f64 = 0.15;

/// Occupancy threshold used when none is configured. Cells whose log-odds are
/// at or above this value count as occupied.
pub const DEFAULT_THRESHOLD: i8 = -100;

/// Planner settings, usually read from a YAML document such as
///
/// ```yaml
/// collision_radius: 0.2
/// threshold: 0
/// algorithm: bfs
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PlannerConfig {
    /// Radius of the robot footprint in meters
    pub collision_radius: f64,
    /// Occupancy threshold
    pub threshold: i8,
    /// Search algorithm to run
    pub algorithm: Algorithm,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            collision_radius: DEFAULT_COLLISION_RADIUS,
            threshold: DEFAULT_THRESHOLD,
            algorithm: Algorithm::BreadthFirstSearch,
        }
    }
}

impl PlannerConfig {
    /// Parse a configuration document. Missing keys keep their defaults, and an
    /// empty document yields the default configuration.
    pub fn from_yaml(yaml_str: &str) -> Result<Self> {
        let docs = YamlLoader::load_from_str(yaml_str)?;
        let mut config = Self::default();

        let doc = match docs.first() {
            Some(doc) => doc,
            None => return Ok(config),
        };
        match doc {
            Yaml::Hash(_) => {}
            Yaml::Null => return Ok(config),
            _ => {
                return Err(PlannerError::Config(
                    "top level of the document must be a mapping".to_string(),
                ))
            }
        }

        let radius = &doc["collision_radius"];
        if !radius.is_badvalue() {
            config.collision_radius = yaml_f64(radius).ok_or_else(|| {
                PlannerError::Config("`collision_radius` must be a number".to_string())
            })?;
            if !config.collision_radius.is_finite() || config.collision_radius < 0.0 {
                return Err(PlannerError::InvalidCollisionRadius(config.collision_radius));
            }
        }

        let threshold = &doc["threshold"];
        if !threshold.is_badvalue() {
            let value = threshold.as_i64().ok_or_else(|| {
                PlannerError::Config("`threshold` must be an integer".to_string())
            })?;
            config.threshold = i8::try_from(value).map_err(|_| {
                PlannerError::Config(format!("`threshold` {} does not fit in -128..=127", value))
            })?;
        }

        let algorithm = &doc["algorithm"];
        if !algorithm.is_badvalue() {
            let name = algorithm.as_str().ok_or_else(|| {
                PlannerError::Config("`algorithm` must be a string".to_string())
            })?;
            config.algorithm = name.parse()?;
        }

        log::debug!("Loaded planner config {:?}", config);
        Ok(config)
    }
}

/// YAML distinguishes `1` from `1.0`; both are valid lengths here.
fn yaml_f64(value: &Yaml) -> Option<f64> {
    match value {
        Yaml::Real(_) => value.as_f64(),
        Yaml::Integer(i) => Some(*i as f64),
        _ => None,
    }
}
