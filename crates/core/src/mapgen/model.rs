//! Public data models for generated spaces, path segments, and whole layouts.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Size};

use super::grid::Rect;
use super::shape::Shape;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpaceKind {
    Bedroom,
    Kitchen,
    LivingRoom,
    Study,
    Hall,
    Storage,
    Clearing,
    Grove,
    Glade,
    PondClearing,
    Cavern,
    Grotto,
    Chamber,
    CrystalHollow,
    BuildingPlot,
    Market,
    Square,
    Workshop,
    DungeonChamber,
    Crypt,
    Armory,
    Shrine,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Space {
    pub id: String,
    pub kind: SpaceKind,
    pub shape: Shape,
    pub bounds: Rect,
    pub doors: Vec<Pos>,
}

impl Space {
    pub fn center(&self) -> Pos {
        self.bounds.center()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Waypoint {
    pub pos: Pos,
    /// Local width; `None` falls back to the segment's nominal width.
    pub width: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    pub id: String,
    pub waypoints: Vec<Waypoint>,
    pub width: i32,
    pub connects: (String, String),
}

impl PathSegment {
    pub fn width_at(&self, waypoint: &Waypoint) -> i32 {
        waypoint.width.unwrap_or(self.width)
    }
}

/// Spaces and the paths that join them, before any tiles are painted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLayout {
    pub size: Size,
    pub spaces: Vec<Space>,
    pub paths: Vec<PathSegment>,
}

impl GeneratedLayout {
    pub fn space(&self, id: &str) -> Option<&Space> {
        self.spaces.iter().find(|space| space.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_is_empty_and_zero_sized() {
        let layout = GeneratedLayout::default();
        assert_eq!(layout.size, Size::new(0, 0));
        assert_eq!(layout.size.area(), 0);
        assert!(layout.spaces.is_empty());
        assert!(layout.paths.is_empty());
        assert!(layout.space("space-0").is_none());
    }
}
