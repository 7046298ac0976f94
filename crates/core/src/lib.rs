pub mod document;
pub mod error;
pub mod mapgen;
pub mod types;

pub use document::{Layer, LayerContent, LayerKind, MapDocument, MapObject, ObjectKind, Tile};
pub use error::GenerateError;
pub use mapgen::assets::{AssetContext, PlacedAsset, place_assets};
pub use mapgen::{
    GeneratedMap, GenerationOptions, MapGenerator, Seed, SeededRng, Tuning, generate,
    generate_batch,
};
pub use types::*;
