//! Declarative placement rules and the distance fields they are evaluated against.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::mapgen::assemble::{PlacementSurface, TerrainClass};
use crate::mapgen::grid::{Rect, cell_index};
use crate::types::{Pos, Size};

use super::AssetCategory;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleTarget {
    Wall,
    Door,
    Path,
    Asset(AssetCategory),
}

/// Soft rules roll their probability once per candidate position. A rule that passes its roll
/// must hold at that position; one that fails is skipped there. `Corner` never rolls.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlacementRule {
    /// Footprint within `max_distance` (Chebyshev) of the target.
    Near { target: RuleTarget, max_distance: i32, probability: f64 },
    /// Footprint at least `min_distance` (Chebyshev) from the target.
    Avoid { target: RuleTarget, min_distance: i32, probability: f64 },
    /// Every footprint cell on this terrain.
    OnTerrain { terrain: TerrainClass, probability: f64 },
    /// Some footprint cell touches a wall or the map border.
    Edge { probability: f64 },
    /// Every footprint cell at least two cells clear of walls and the map border.
    Center { probability: f64 },
    /// Some footprint cell is closed in both horizontally and vertically. Always a hard
    /// filter; `probability` is carried for catalogs but not rolled.
    Corner { probability: f64 },
}

impl PlacementRule {
    pub fn probability(&self) -> f64 {
        match *self {
            PlacementRule::Near { probability, .. }
            | PlacementRule::Avoid { probability, .. }
            | PlacementRule::OnTerrain { probability, .. }
            | PlacementRule::Edge { probability }
            | PlacementRule::Center { probability }
            | PlacementRule::Corner { probability } => probability,
        }
    }
}

/// Minimum clearance from walls and the map border for a [`PlacementRule::Center`] match.
pub(super) const CENTER_CLEARANCE: i32 = 2;

/// Chebyshev distance from every cell to the nearest source cell. Cells with no source in
/// reach hold `i32::MAX`.
#[derive(Clone, Debug)]
pub(super) struct DistanceField {
    size: Size,
    values: Vec<i32>,
    has_sources: bool,
}

impl DistanceField {
    pub(super) fn from_sources(size: Size, sources: impl IntoIterator<Item = Pos>) -> Self {
        let area = usize::try_from(size.area()).unwrap_or(0);
        let mut values = vec![i32::MAX; area];
        let mut open = VecDeque::new();
        for source in sources {
            if !size.contains(source) {
                continue;
            }
            let index = cell_index(source, size.width);
            if values[index] != 0 {
                values[index] = 0;
                open.push_back(source);
            }
        }
        let has_sources = !open.is_empty();

        while let Some(pos) = open.pop_front() {
            let next_distance = values[cell_index(pos, size.width)] + 1;
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let next = pos.offset(dx, dy);
                    if (dx == 0 && dy == 0) || !size.contains(next) {
                        continue;
                    }
                    let index = cell_index(next, size.width);
                    if values[index] > next_distance {
                        values[index] = next_distance;
                        open.push_back(next);
                    }
                }
            }
        }

        Self { size, values, has_sources }
    }

    /// Distance to the nearest wall or to the outside of the map, whichever is closer.
    pub(super) fn clearance(surface: &PlacementSurface) -> Self {
        let size = surface.size();
        let mut field = Self::from_sources(size, surface.cells_of(TerrainClass::Wall));
        for y in 0..size.height {
            for x in 0..size.width {
                let border = (x + 1).min(y + 1).min(size.width - x).min(size.height - y);
                let index = cell_index(Pos { y, x }, size.width);
                field.values[index] = field.values[index].min(border);
            }
        }
        field.has_sources = true;
        field
    }

    pub(super) fn has_sources(&self) -> bool {
        self.has_sources
    }

    pub(super) fn at(&self, pos: Pos) -> i32 {
        if !self.size.contains(pos) {
            return i32::MAX;
        }
        self.values[cell_index(pos, self.size.width)]
    }

    pub(super) fn nearest_in(&self, footprint: Rect) -> i32 {
        footprint.cells().map(|cell| self.at(cell)).min().unwrap_or(i32::MAX)
    }
}

fn is_blocking(surface: &PlacementSurface, pos: Pos) -> bool {
    matches!(surface.terrain_at(pos), None | Some(TerrainClass::Wall))
}

pub(super) fn touches_edge(surface: &PlacementSurface, footprint: Rect) -> bool {
    footprint.cells().any(|cell| {
        cell.orthogonal_neighbors().iter().any(|&neighbor| is_blocking(surface, neighbor))
    })
}

pub(super) fn sits_in_corner(surface: &PlacementSurface, footprint: Rect) -> bool {
    footprint.cells().any(|cell| {
        let horizontal =
            is_blocking(surface, cell.offset(-1, 0)) || is_blocking(surface, cell.offset(1, 0));
        let vertical =
            is_blocking(surface, cell.offset(0, -1)) || is_blocking(surface, cell.offset(0, 1));
        horizontal && vertical
    })
}

pub(super) fn all_on_terrain(
    surface: &PlacementSurface,
    footprint: Rect,
    terrain: TerrainClass,
) -> bool {
    footprint.cells().all(|cell| surface.terrain_at(cell) == Some(terrain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chebyshev_field_counts_diagonals_as_one_step() {
        let field = DistanceField::from_sources(Size::new(7, 7), [Pos::new(3, 3)]);
        assert_eq!(field.at(Pos::new(3, 3)), 0);
        assert_eq!(field.at(Pos::new(4, 4)), 1);
        assert_eq!(field.at(Pos::new(6, 0)), 3);
        assert_eq!(field.nearest_in(Rect { x: 5, y: 5, width: 2, height: 2 }), 2);
        assert!(field.has_sources());
    }

    #[test]
    fn field_without_sources_is_unreachable_everywhere() {
        let field = DistanceField::from_sources(Size::new(4, 4), Vec::new());
        assert!(!field.has_sources());
        assert_eq!(field.at(Pos::new(1, 1)), i32::MAX);
    }

    #[test]
    fn empty_surface_reduces_to_literal_map_edges_and_corners() {
        let surface = PlacementSurface::empty(Size::new(8, 6));
        let single = |x, y| Rect { x, y, width: 1, height: 1 };
        assert!(sits_in_corner(&surface, single(0, 0)));
        assert!(sits_in_corner(&surface, single(7, 5)));
        assert!(!sits_in_corner(&surface, single(3, 0)));
        assert!(touches_edge(&surface, single(3, 0)));
        assert!(!touches_edge(&surface, single(3, 3)));

        let clearance = DistanceField::clearance(&surface);
        assert_eq!(clearance.at(Pos::new(0, 2)), 1);
        assert_eq!(clearance.at(Pos::new(3, 2)), 3);
        assert!(clearance.nearest_in(single(3, 3)) >= CENTER_CLEARANCE);
    }

    #[test]
    fn rule_probability_reads_every_variant() {
        let rules = [
            PlacementRule::Near { target: RuleTarget::Door, max_distance: 2, probability: 0.1 },
            PlacementRule::Avoid {
                target: RuleTarget::Asset(AssetCategory::Creature),
                min_distance: 2,
                probability: 0.2,
            },
            PlacementRule::OnTerrain { terrain: TerrainClass::Floor, probability: 0.3 },
            PlacementRule::Edge { probability: 0.4 },
            PlacementRule::Center { probability: 0.5 },
            PlacementRule::Corner { probability: 0.6 },
        ];
        let probabilities: Vec<f64> = rules.iter().map(PlacementRule::probability).collect();
        assert_eq!(probabilities, vec![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
    }
}
