//! Aesthetic tuning knobs for placement and path synthesis.
//!
//! None of these affect correctness: every value keeps the no-overlap and connectivity
//! guarantees. They only shift how busy, wobbly, or cramped a map looks.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Random positions tried per space before the space is skipped.
    pub placement_attempts: u32,
    /// Chance of a one-cell lateral drift at each wander checkpoint of a corridor.
    pub corridor_wander_chance: f64,
    /// Cells between wander checkpoints.
    pub corridor_wander_interval: u32,
    /// Per-cell chance of a corridor width change.
    pub corridor_width_chance: f64,
    /// Maximum positional jitter, in cells, of interior curve waypoints.
    pub organic_wobble: f64,
    /// Per-waypoint chance of an organic path width change.
    pub organic_width_chance: f64,
    /// Midpoint offset as a fraction of the endpoint distance.
    pub curve_offset_factor: f64,
    pub min_curve_samples: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            placement_attempts: 50,
            corridor_wander_chance: 0.3,
            corridor_wander_interval: 3,
            corridor_width_chance: 0.2,
            organic_wobble: 0.8,
            organic_width_chance: 0.3,
            curve_offset_factor: 0.3,
            min_curve_samples: 8,
        }
    }
}
