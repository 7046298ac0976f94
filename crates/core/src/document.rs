//! The layered map document handed to rendering, editing, and persistence layers.
//!
//! This is the only contract with those layers, so everything here round-trips through JSON
//! without loss. The generator keeps no reference to a document after returning it.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::mapgen::assets::{AssetCategory, Rarity};
use crate::mapgen::theme::Rgb;
use crate::types::{Archetype, Pos, Size, TileKind};

pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    pub metadata: MapMetadata,
    pub dimensions: Size,
    pub grid: GridConfig,
    /// Paint order: later layers render on top of earlier ones.
    pub layers: Vec<Layer>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapMetadata {
    pub id: String,
    pub name: String,
    pub tags: Vec<String>,
    pub seed: SeedRecord,
}

/// Everything needed to regenerate the same document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRecord {
    pub seed: String,
    pub archetype: Archetype,
    pub generator_version: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub cell_size: u32,
    pub show: bool,
    pub snap: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size: 32, show: true, snap: true }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Background,
    Terrain,
    Paths,
    Objects,
    Grid,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: String,
    pub name: String,
    pub kind: LayerKind,
    pub visible: bool,
    pub locked: bool,
    pub opacity: f64,
    pub content: LayerContent,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum LayerContent {
    Tiles(Vec<Tile>),
    Objects(Vec<MapObject>),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub pos: Pos,
    pub kind: TileKind,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapObject {
    pub id: String,
    pub pos: Pos,
    pub size: Size,
    pub kind: ObjectKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectKind {
    Fill { color: Rgb },
    Asset { key: String, name: String, category: AssetCategory, rarity: Rarity },
    GridOverlay { line_color: Rgb, line_width: u32, opacity: f64 },
}

impl MapDocument {
    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn tiles(&self, kind: LayerKind) -> &[Tile] {
        match self.layer(kind).map(|layer| &layer.content) {
            Some(LayerContent::Tiles(tiles)) => tiles,
            _ => &[],
        }
    }

    pub fn objects(&self, kind: LayerKind) -> &[MapObject] {
        match self.layer(kind).map(|layer| &layer.content) {
            Some(LayerContent::Objects(objects)) => objects,
            _ => &[],
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Stable hash of the canonical JSON encoding; equal documents share a fingerprint.
    pub fn fingerprint(&self) -> Result<u64, serde_json::Error> {
        Ok(xxh3_64(&serde_json::to_vec(self)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_document() -> MapDocument {
        MapDocument {
            metadata: MapMetadata {
                id: "map-test".to_string(),
                name: "Test".to_string(),
                tags: vec!["house".to_string()],
                seed: SeedRecord {
                    seed: "abc".to_string(),
                    archetype: Archetype::House,
                    generator_version: GENERATOR_VERSION.to_string(),
                },
            },
            dimensions: Size::new(2, 1),
            grid: GridConfig::default(),
            layers: vec![
                Layer {
                    id: "layer-terrain".to_string(),
                    name: "Terrain".to_string(),
                    kind: LayerKind::Terrain,
                    visible: true,
                    locked: false,
                    opacity: 1.0,
                    content: LayerContent::Tiles(vec![Tile {
                        pos: Pos::new(1, 0),
                        kind: TileKind::Floor,
                        color: Rgb::new(1, 2, 3),
                    }]),
                },
                Layer {
                    id: "layer-grid".to_string(),
                    name: "Grid".to_string(),
                    kind: LayerKind::Grid,
                    visible: true,
                    locked: false,
                    opacity: 0.3,
                    content: LayerContent::Objects(vec![MapObject {
                        id: "grid".to_string(),
                        pos: Pos::new(0, 0),
                        size: Size::new(2, 1),
                        kind: ObjectKind::GridOverlay {
                            line_color: Rgb::new(9, 9, 9),
                            line_width: 1,
                            opacity: 0.3,
                        },
                    }]),
                },
            ],
        }
    }

    #[test]
    fn layer_accessors_match_content_type() {
        let document = tiny_document();
        assert_eq!(document.tiles(LayerKind::Terrain).len(), 1);
        assert!(document.objects(LayerKind::Terrain).is_empty());
        assert_eq!(document.objects(LayerKind::Grid).len(), 1);
        assert!(document.layer(LayerKind::Paths).is_none());
    }

    #[test]
    fn layer_content_is_tagged_in_json() {
        let json = tiny_document().to_json_pretty().expect("serialize document");
        assert!(json.contains("\"type\": \"tiles\""));
        assert!(json.contains("\"type\": \"grid_overlay\""));
        let back = MapDocument::from_json(&json).expect("parse document");
        assert_eq!(back, tiny_document());
        assert_eq!(back.fingerprint().ok(), tiny_document().fingerprint().ok());
    }
}
