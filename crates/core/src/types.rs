use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn orthogonal_neighbors(self) -> [Pos; 4] {
        [
            Pos { y: self.y - 1, x: self.x },
            Pos { y: self.y, x: self.x + 1 },
            Pos { y: self.y + 1, x: self.x },
            Pos { y: self.y, x: self.x - 1 },
        ]
    }

    pub fn squared_distance(self, other: Pos) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> i64 {
        i64::from(self.width.max(0)) * i64::from(self.height.max(0))
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }
}

/// Terrain archetype selected once per generation run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    House,
    Forest,
    Cave,
    Town,
    Dungeon,
}

impl Archetype {
    pub const ALL: [Archetype; 5] =
        [Archetype::House, Archetype::Forest, Archetype::Cave, Archetype::Town, Archetype::Dungeon];

    pub fn label(self) -> &'static str {
        match self {
            Archetype::House => "house",
            Archetype::Forest => "forest",
            Archetype::Cave => "cave",
            Archetype::Town => "town",
            Archetype::Dungeon => "dungeon",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileKind {
    Wall,
    Floor,
    Door,
}

/// Overall feel of a map; steers which decorations are eligible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    #[default]
    Neutral,
    Cheerful,
    Eerie,
    Hostile,
    Mysterious,
}

impl Mood {
    pub const ALL: [Mood; 5] =
        [Mood::Neutral, Mood::Cheerful, Mood::Eerie, Mood::Hostile, Mood::Mysterious];

    pub fn label(self) -> &'static str {
        match self {
            Mood::Neutral => "neutral",
            Mood::Cheerful => "cheerful",
            Mood::Eerie => "eerie",
            Mood::Hostile => "hostile",
            Mood::Mysterious => "mysterious",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_neighbors_are_one_step_away() {
        let origin = Pos::new(4, 9);
        for neighbor in origin.orthogonal_neighbors() {
            assert_eq!(origin.squared_distance(neighbor), 1);
        }
    }

    #[test]
    fn size_contains_respects_half_open_bounds() {
        let size = Size::new(3, 2);
        assert!(size.contains(Pos::new(2, 1)));
        assert!(!size.contains(Pos::new(3, 1)));
        assert!(!size.contains(Pos::new(0, 2)));
        assert!(!size.contains(Pos::new(-1, 0)));
    }

    #[test]
    fn archetype_serializes_as_snake_case_label() {
        let json = serde_json::to_string(&Archetype::Dungeon).expect("archetype should serialize");
        assert_eq!(json, "\"dungeon\"");
        assert_eq!(Archetype::Town.to_string(), "town");
    }
}
