//! Straight-line movement between named locations

use std::collections::HashMap;

use glam::Vec3;
use tracing::{debug, warn};

use hearth_goap::Movement;

/// Distance at which an agent counts as arrived
const ARRIVAL_RADIUS: f32 = 1.0;

/// Moves an agent in a straight line toward the location named by its current action
#[derive(Debug, Clone)]
pub struct Walker {
    pub position: Vec3,
    /// Units per second
    pub speed: f32,
    locations: HashMap<String, Vec3>,
    destination: Option<Vec3>,
}

impl Walker {
    pub fn new(position: Vec3, speed: f32, locations: HashMap<String, Vec3>) -> Self {
        Self {
            position,
            speed,
            locations,
            destination: None,
        }
    }

    /// Step toward the current destination
    pub fn advance(&mut self, delta: f32) {
        let Some(destination) = self.destination else {
            return;
        };

        let to_target = destination - self.position;
        let step = self.speed * delta;
        if to_target.length() <= step {
            self.position = destination;
            self.destination = None;
        } else {
            self.position += to_target.normalize_or_zero() * step;
        }
    }
}

impl Movement for Walker {
    fn move_to(&mut self, target: &str) {
        match self.locations.get(target) {
            Some(&position) => {
                debug!("Walking to '{}' at {:?}", target, position);
                self.destination = Some(position);
            }
            None => {
                warn!("Unknown location '{}', acting in place", target);
                self.destination = None;
            }
        }
    }

    fn has_arrived(&self, target: &str) -> bool {
        match self.locations.get(target) {
            Some(position) => self.position.distance(*position) < ARRIVAL_RADIUS,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walker() -> Walker {
        let mut locations = HashMap::new();
        locations.insert("field".to_string(), Vec3::new(10.0, 0.0, 0.0));
        Walker::new(Vec3::ZERO, 2.0, locations)
    }

    #[test]
    fn test_walks_until_arrival() {
        let mut walker = walker();
        walker.move_to("field");
        assert!(!walker.has_arrived("field"));

        for _ in 0..4 {
            walker.advance(1.0);
        }
        assert!(!walker.has_arrived("field"));
        assert_eq!(walker.position, Vec3::new(8.0, 0.0, 0.0));

        walker.advance(1.0);
        assert!(walker.has_arrived("field"));
        assert_eq!(walker.position, Vec3::new(10.0, 0.0, 0.0));

        // Already there, nothing to do
        walker.advance(1.0);
        assert_eq!(walker.position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_unknown_location_counts_as_arrived() {
        let mut walker = walker();
        walker.move_to("moon");
        assert!(walker.has_arrived("moon"));
        walker.advance(1.0);
        assert_eq!(walker.position, Vec3::ZERO);
    }
}
