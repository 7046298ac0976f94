//! Layer composition: paints spaces and paths into tile layers, wraps placements and the grid
//! overlay as objects, and derives the per-cell terrain surface that asset placement reads.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::document::{Layer, LayerContent, LayerKind, MapObject, ObjectKind, Tile};
use crate::types::{Pos, Size, TileKind};

use super::assets::PlacedAsset;
use super::edges::{self, EdgeMap};
use super::grid::cell_index;
use super::model::GeneratedLayout;
use super::theme::ColorTheme;

const GRID_LINE_WIDTH: u32 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerrainClass {
    /// Open ground outside every space and path.
    Void,
    Wall,
    Floor,
    Path,
    Door,
}

/// Per-cell terrain of an assembled layout, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacementSurface {
    size: Size,
    cells: Vec<TerrainClass>,
}

impl PlacementSurface {
    pub fn empty(size: Size) -> Self {
        let area = usize::try_from(size.area()).unwrap_or(0);
        Self { size, cells: vec![TerrainClass::Void; area] }
    }

    /// Spaces first, then paths, then doors. Path floor opens through space walls, path walls
    /// only claim open ground, and doors always survive.
    pub fn from_layout(size: Size, layout: &GeneratedLayout) -> Self {
        let mut surface = Self::empty(size);
        for space in &layout.spaces {
            let edge_map = edges::classify_space(space);
            surface.paint(&edge_map.edges, TerrainClass::Wall, |_| true);
            surface.paint(&edge_map.interior, TerrainClass::Floor, |_| true);
        }
        for path in &layout.paths {
            let edge_map = edges::classify_path(path, size);
            surface.paint(&edge_map.interior, TerrainClass::Path, |current| {
                matches!(current, TerrainClass::Void | TerrainClass::Wall)
            });
            surface.paint(&edge_map.edges, TerrainClass::Wall, |current| {
                current == TerrainClass::Void
            });
        }
        for space in &layout.spaces {
            for &door in &space.doors {
                surface.set(door, TerrainClass::Door);
            }
        }
        surface
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn terrain_at(&self, pos: Pos) -> Option<TerrainClass> {
        if !self.size.contains(pos) {
            return None;
        }
        self.cells.get(cell_index(pos, self.size.width)).copied()
    }

    pub fn has_terrain(&self, class: TerrainClass) -> bool {
        self.cells.contains(&class)
    }

    pub fn cells_of(&self, class: TerrainClass) -> impl Iterator<Item = Pos> + '_ {
        let width = self.size.width.max(1);
        self.cells.iter().enumerate().filter(move |(_, cell)| **cell == class).map(
            move |(index, _)| {
                let index = index as i32;
                Pos { y: index / width, x: index % width }
            },
        )
    }

    fn set(&mut self, pos: Pos, class: TerrainClass) {
        if self.size.contains(pos) {
            let index = cell_index(pos, self.size.width);
            self.cells[index] = class;
        }
    }

    fn paint(
        &mut self,
        cells: &BTreeSet<Pos>,
        class: TerrainClass,
        replaces: impl Fn(TerrainClass) -> bool,
    ) {
        for &cell in cells {
            if let Some(current) = self.terrain_at(cell)
                && replaces(current)
            {
                self.set(cell, class);
            }
        }
    }
}

/// Builds the five layers in paint order: background, terrain, paths, objects, grid.
pub fn assemble_layers(
    layout: &GeneratedLayout,
    theme: &ColorTheme,
    placements: &[PlacedAsset],
    grid_opacity: f64,
) -> Vec<Layer> {
    let size = layout.size;
    let space_edge_maps: Vec<EdgeMap> = layout.spaces.iter().map(edges::classify_space).collect();
    let path_edge_maps: Vec<EdgeMap> =
        layout.paths.iter().map(|path| edges::classify_path(path, size)).collect();

    vec![
        layer(
            LayerKind::Background,
            "Background",
            1.0,
            LayerContent::Objects(vec![MapObject {
                id: "background-fill".to_string(),
                pos: Pos::new(0, 0),
                size,
                kind: ObjectKind::Fill { color: theme.background },
            }]),
        ),
        layer(
            LayerKind::Terrain,
            "Terrain",
            1.0,
            LayerContent::Tiles(terrain_tiles(layout, &space_edge_maps, theme)),
        ),
        layer(
            LayerKind::Paths,
            "Paths",
            1.0,
            LayerContent::Tiles(path_tiles(&space_edge_maps, &path_edge_maps, theme)),
        ),
        layer(LayerKind::Objects, "Objects", 1.0, LayerContent::Objects(asset_objects(placements))),
        layer(
            LayerKind::Grid,
            "Grid",
            grid_opacity,
            LayerContent::Objects(vec![MapObject {
                id: "grid-overlay".to_string(),
                pos: Pos::new(0, 0),
                size,
                kind: ObjectKind::GridOverlay {
                    line_color: theme.grid_line,
                    line_width: GRID_LINE_WIDTH,
                    opacity: grid_opacity,
                },
            }]),
        ),
    ]
}

fn layer(kind: LayerKind, name: &str, opacity: f64, content: LayerContent) -> Layer {
    Layer {
        id: format!("layer-{}", name.to_ascii_lowercase()),
        name: name.to_string(),
        kind,
        visible: true,
        locked: false,
        opacity,
        content,
    }
}

fn terrain_tiles(
    layout: &GeneratedLayout,
    space_edge_maps: &[EdgeMap],
    theme: &ColorTheme,
) -> Vec<Tile> {
    let mut painted: BTreeMap<Pos, TileKind> = BTreeMap::new();
    for edge_map in space_edge_maps {
        painted.extend(edge_map.edges.iter().map(|&cell| (cell, TileKind::Wall)));
        painted.extend(edge_map.interior.iter().map(|&cell| (cell, TileKind::Floor)));
    }
    for space in &layout.spaces {
        painted.extend(space.doors.iter().map(|&door| (door, TileKind::Door)));
    }

    painted
        .into_iter()
        .map(|(pos, kind)| {
            let color = match kind {
                TileKind::Wall => theme.accent,
                TileKind::Floor | TileKind::Door => theme.path,
            };
            Tile { pos, kind, color }
        })
        .collect()
}

/// Path interiors become floor. Path edges only become wall out in the open, so a corridor
/// that enters a room or crosses another corridor stays passable.
fn path_tiles(
    space_edge_maps: &[EdgeMap],
    path_edge_maps: &[EdgeMap],
    theme: &ColorTheme,
) -> Vec<Tile> {
    let path_floor: BTreeSet<Pos> =
        path_edge_maps.iter().flat_map(|edge_map| edge_map.interior.iter().copied()).collect();
    let inside_space = |cell: &Pos| space_edge_maps.iter().any(|edge_map| edge_map.contains(cell));

    let mut painted: BTreeMap<Pos, TileKind> = BTreeMap::new();
    for &cell in &path_floor {
        painted.insert(cell, TileKind::Floor);
    }
    for edge_map in path_edge_maps {
        for cell in &edge_map.edges {
            if !path_floor.contains(cell) && !inside_space(cell) {
                painted.insert(*cell, TileKind::Wall);
            }
        }
    }

    painted
        .into_iter()
        .map(|(pos, kind)| {
            let color = if kind == TileKind::Wall { theme.accent } else { theme.path };
            Tile { pos, kind, color }
        })
        .collect()
}

fn asset_objects(placements: &[PlacedAsset]) -> Vec<MapObject> {
    placements
        .iter()
        .map(|placed| MapObject {
            id: placed.asset.id.clone(),
            pos: placed.pos,
            size: placed.asset.size,
            kind: ObjectKind::Asset {
                key: placed.asset.key.clone(),
                name: placed.asset.name.clone(),
                category: placed.asset.category,
                rarity: placed.asset.rarity,
            },
        })
        .collect()
}
