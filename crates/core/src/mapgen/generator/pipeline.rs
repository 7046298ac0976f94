//! Map-construction pipeline that composes the mapgen stages over one RNG stream.

use log::info;
use xxhash_rust::xxh3::xxh3_64;

use crate::document::{GENERATOR_VERSION, GridConfig, MapDocument, MapMetadata, SeedRecord};
use crate::types::Size;

use super::super::archetype::{ArchetypeProfile, profile_for};
use super::super::assemble::assemble_layers;
use super::super::assets::{AssetContext, place_assets};
use super::super::connectivity::PathPlanner;
use super::super::layout::{LayoutRequest, plan_spaces};
use super::super::model::GeneratedLayout;
use super::super::seed::{Seed, SeededRng};
use super::super::theme::select_theme;
use super::{GeneratedMap, GenerationOptions};

/// Stage order is fixed: profile, spaces, paths, theme, assets. Reordering any draw changes
/// every map produced from an existing seed.
pub(super) fn run(options: &GenerationOptions, seed: &Seed) -> GeneratedMap {
    let map_size = Size::new(options.width, options.height);
    let mut rng = SeededRng::new(seed);

    let profile = profile_for(options.archetype, &mut rng);
    let request = LayoutRequest {
        map_size,
        space_count: options.space_count.unsigned_abs(),
        min_size: options.min_space_size,
        max_size: options.max_space_size,
        organic_factor: options.organic_factor,
        placement_attempts: options.tuning.placement_attempts,
    };
    let spaces = plan_spaces(&mut rng, &profile, &request);
    let planner = PathPlanner { profile: &profile, tuning: &options.tuning, map_size };
    let paths = planner.plan(&mut rng, &spaces);
    let layout = GeneratedLayout { size: map_size, spaces, paths };

    let theme = select_theme(options.archetype, &mut rng);
    let context = asset_context(options, &profile);
    let placements = place_assets(&context, map_size, &layout, &mut rng);

    let layers = assemble_layers(&layout, &theme, &placements, profile.grid_opacity);
    let document = MapDocument {
        metadata: metadata(options, seed, &context),
        dimensions: map_size,
        grid: GridConfig::default(),
        layers,
    };

    info!(
        "generated {} map {}x{} (seed {seed}): {}/{} spaces, {} paths, {} assets",
        options.archetype,
        map_size.width,
        map_size.height,
        layout.spaces.len(),
        options.space_count,
        layout.paths.len(),
        placements.len()
    );

    GeneratedMap { layout, theme, placements, document }
}

fn asset_context(options: &GenerationOptions, profile: &ArchetypeProfile) -> AssetContext {
    AssetContext {
        theme: options.archetype,
        difficulty: options.difficulty,
        mood: options.mood.unwrap_or(profile.default_mood),
        required_features: profile.required_features.iter().map(|key| key.to_string()).collect(),
        terrain_types: profile.terrain_hints.iter().map(|hint| hint.to_string()).collect(),
        density: options.object_density,
    }
}

fn metadata(options: &GenerationOptions, seed: &Seed, context: &AssetContext) -> MapMetadata {
    let seed_text = seed.as_text();
    let archetype = options.archetype;
    let id = format!("map-{:016x}", xxh3_64(format!("{archetype}:{seed_text}").as_bytes()));
    let name = options.name.clone().unwrap_or_else(|| {
        let label = archetype.label();
        let mut title = label[..1].to_ascii_uppercase();
        title.push_str(&label[1..]);
        format!("{title} {seed_text}")
    });
    MapMetadata {
        id,
        name,
        tags: vec![archetype.label().to_string(), context.mood.label().to_string()],
        seed: SeedRecord {
            seed: seed_text,
            archetype,
            generator_version: GENERATOR_VERSION.to_string(),
        },
    }
}
