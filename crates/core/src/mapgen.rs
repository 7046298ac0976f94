//! Procedural map generation domain split into coherent submodules.

pub mod archetype;
pub mod assemble;
pub mod assets;
pub mod connectivity;
pub mod edges;
pub mod grid;
pub mod layout;
pub mod model;
pub mod seed;
pub mod shape;
pub mod theme;
pub mod tuning;

mod generator;

use rayon::prelude::*;

use crate::document::MapDocument;
use crate::error::GenerateError;

pub use generator::{GeneratedMap, GenerationOptions, MapGenerator};
pub use model::{GeneratedLayout, PathSegment, Space, SpaceKind, Waypoint};
pub use seed::{Seed, SeededRng};
pub use tuning::Tuning;

pub fn generate(options: &GenerationOptions) -> Result<MapDocument, GenerateError> {
    Ok(MapGenerator::new(options.clone())?.generate().document)
}

/// Runs independent generations in parallel. Each run owns its own RNG, so results match
/// calling [`generate`] on each entry in turn.
pub fn generate_batch(options: &[GenerationOptions]) -> Vec<Result<MapDocument, GenerateError>> {
    options.par_iter().map(generate).collect()
}
