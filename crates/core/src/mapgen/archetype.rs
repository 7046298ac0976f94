//! Per-archetype strategy table: shapes, sizes, spacing, labels, and path styling.

use crate::types::{Archetype, Mood};

use super::assets::catalog::keys;
use super::model::SpaceKind;
use super::seed::SeededRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeStyle {
    Rectangular,
    Organic,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStyle {
    /// L-shaped walk with occasional lateral drift.
    Corridor,
    /// Sampled curve through an offset midpoint.
    Organic,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeProfile {
    pub archetype: Archetype,
    pub shape_style: ShapeStyle,
    pub path_style: PathStyle,
    pub buffer: i32,
    pub kinds: &'static [SpaceKind],
    pub path_width: i32,
    pub path_width_variance: i32,
    pub grid_opacity: f64,
    pub default_mood: Mood,
    pub required_features: &'static [&'static str],
    pub terrain_hints: &'static [&'static str],
}

/// Narrowest path that still leaves a floor line between its walls.
pub const MIN_PATH_WIDTH: i32 = 3;

const HOUSE_KINDS: [SpaceKind; 6] = [
    SpaceKind::Bedroom,
    SpaceKind::Kitchen,
    SpaceKind::LivingRoom,
    SpaceKind::Study,
    SpaceKind::Hall,
    SpaceKind::Storage,
];
const FOREST_KINDS: [SpaceKind; 4] =
    [SpaceKind::Clearing, SpaceKind::Grove, SpaceKind::Glade, SpaceKind::PondClearing];
const CAVE_KINDS: [SpaceKind; 4] =
    [SpaceKind::Cavern, SpaceKind::Grotto, SpaceKind::Chamber, SpaceKind::CrystalHollow];
const TOWN_KINDS: [SpaceKind; 4] =
    [SpaceKind::BuildingPlot, SpaceKind::Market, SpaceKind::Square, SpaceKind::Workshop];
const DUNGEON_KINDS: [SpaceKind; 4] =
    [SpaceKind::DungeonChamber, SpaceKind::Crypt, SpaceKind::Armory, SpaceKind::Shrine];

/// Resolves the strategy for one run. Dungeons draw once to pick rectangular or organic rooms;
/// every other archetype consumes no randomness here.
pub fn profile_for(archetype: Archetype, rng: &mut SeededRng) -> ArchetypeProfile {
    match archetype {
        Archetype::House => ArchetypeProfile {
            archetype,
            shape_style: ShapeStyle::Rectangular,
            path_style: PathStyle::Corridor,
            buffer: 1,
            kinds: &HOUSE_KINDS,
            path_width: 3,
            path_width_variance: 1,
            grid_opacity: 0.3,
            default_mood: Mood::Cheerful,
            required_features: &[keys::FIREPLACE, keys::DINING_TABLE],
            terrain_hints: &["wood"],
        },
        Archetype::Forest => ArchetypeProfile {
            archetype,
            shape_style: ShapeStyle::Organic,
            path_style: PathStyle::Organic,
            buffer: 2,
            kinds: &FOREST_KINDS,
            path_width: 3,
            path_width_variance: 1,
            grid_opacity: 0.2,
            default_mood: Mood::Neutral,
            required_features: &[keys::CAMPFIRE, keys::ANCIENT_TREE],
            terrain_hints: &["grass", "water"],
        },
        Archetype::Cave => ArchetypeProfile {
            archetype,
            shape_style: ShapeStyle::Organic,
            path_style: PathStyle::Organic,
            buffer: 2,
            kinds: &CAVE_KINDS,
            path_width: 4,
            path_width_variance: 2,
            grid_opacity: 0.25,
            default_mood: Mood::Mysterious,
            required_features: &[keys::CRYSTAL_CLUSTER],
            terrain_hints: &["stone", "water"],
        },
        Archetype::Town => ArchetypeProfile {
            archetype,
            shape_style: ShapeStyle::Rectangular,
            path_style: PathStyle::Corridor,
            buffer: 2,
            kinds: &TOWN_KINDS,
            path_width: 4,
            path_width_variance: 1,
            grid_opacity: 0.3,
            default_mood: Mood::Neutral,
            required_features: &[keys::WELL, keys::MARKET_STALL],
            terrain_hints: &["cobblestone"],
        },
        Archetype::Dungeon => {
            let shape_style =
                if rng.next_bool() { ShapeStyle::Organic } else { ShapeStyle::Rectangular };
            ArchetypeProfile {
                archetype,
                shape_style,
                path_style: PathStyle::Corridor,
                buffer: 1,
                kinds: &DUNGEON_KINDS,
                path_width: 3,
                path_width_variance: 1,
                grid_opacity: 0.4,
                default_mood: Mood::Hostile,
                required_features: &[keys::TREASURE_CHEST, keys::ALTAR],
                terrain_hints: &["stone"],
            }
        }
    }
}

impl ArchetypeProfile {
    /// Narrows the caller's `[min, max]` to the archetype's preferred part of it: caves lean
    /// large, town plots lean compact.
    pub fn space_size_range(&self, min_size: i32, max_size: i32) -> (i32, i32) {
        let spread = max_size - min_size;
        match self.archetype {
            Archetype::Cave => (min_size + spread / 3, max_size),
            Archetype::Town => (min_size, max_size - spread / 3),
            Archetype::House | Archetype::Forest | Archetype::Dungeon => (min_size, max_size),
        }
    }

    pub fn path_width_bounds(&self) -> (i32, i32) {
        let min_width = (self.path_width - self.path_width_variance).max(MIN_PATH_WIDTH);
        let max_width = (self.path_width + self.path_width_variance).max(min_width);
        (min_width, max_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_range_never_inverts() {
        let mut rng = SeededRng::from_text("profiles");
        for archetype in Archetype::ALL {
            let profile = profile_for(archetype, &mut rng);
            for (min_size, max_size) in [(4, 8), (3, 3), (5, 20)] {
                let (low, high) = profile.space_size_range(min_size, max_size);
                assert!(min_size <= low && low <= high && high <= max_size);
            }
        }
    }

    #[test]
    fn caves_allow_the_widest_paths() {
        let mut rng = SeededRng::from_text("widths");
        let cave = profile_for(Archetype::Cave, &mut rng).path_width_bounds();
        for archetype in [Archetype::House, Archetype::Town, Archetype::Forest] {
            let other = profile_for(archetype, &mut rng).path_width_bounds();
            assert!(cave.1 >= other.1);
            assert!(other.0 >= MIN_PATH_WIDTH);
        }
    }

    #[test]
    fn dungeon_picks_both_shape_styles_across_seeds() {
        let mut styles = Vec::new();
        for seed in 0..32_u64 {
            let mut rng = SeededRng::from_u64(seed);
            styles.push(profile_for(Archetype::Dungeon, &mut rng).shape_style);
        }
        assert!(styles.contains(&ShapeStyle::Organic));
        assert!(styles.contains(&ShapeStyle::Rectangular));
    }
}
