//! Contextual asset selection and rule-based, collision-free placement.

pub mod catalog;
mod placement;
mod rules;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::types::{Archetype, Mood, Pos, Size};

use super::assemble::PlacementSurface;
use super::grid::Rect;
use super::model::GeneratedLayout;
use super::seed::SeededRng;

use catalog::AssetSpec;

pub use placement::place;
pub use rules::{PlacementRule, RuleTarget};

pub const MIN_DIFFICULTY: u8 = 1;
pub const MAX_DIFFICULTY: u8 = 10;

/// Map cells per furniture piece at density 1.0.
const CELLS_PER_FURNITURE: f64 = 80.0;
/// Map cells per decoration at density 1.0.
const CELLS_PER_DECORATION: f64 = 60.0;
/// Map columns per interactive fixture.
const COLUMNS_PER_FIXTURE: i32 = 12;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Furniture,
    Creature,
    Interactive,
    Decoration,
    Treasure,
    Landmark,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Legendary => "legendary",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedAsset {
    pub id: String,
    pub key: String,
    pub category: AssetCategory,
    pub name: String,
    pub size: Size,
    pub rarity: Rarity,
    pub rules: Vec<PlacementRule>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedAsset {
    pub asset: GeneratedAsset,
    /// Top-left corner of the footprint.
    pub pos: Pos,
}

impl PlacedAsset {
    pub fn footprint(&self) -> Rect {
        Rect::new(self.pos, self.asset.size)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssetContext {
    pub theme: Archetype,
    pub difficulty: u8,
    pub mood: Mood,
    pub required_features: Vec<String>,
    pub terrain_types: Vec<String>,
    /// Scales furniture and decoration counts, in `[0, 1]`.
    pub density: f64,
}

impl AssetContext {
    pub fn new(theme: Archetype) -> Self {
        Self {
            theme,
            difficulty: 3,
            mood: Mood::default(),
            required_features: Vec::new(),
            terrain_types: Vec::new(),
            density: 0.5,
        }
    }
}

/// Places objects onto an existing layout without regenerating it.
pub fn place_assets(
    context: &AssetContext,
    map_size: Size,
    layout: &GeneratedLayout,
    rng: &mut SeededRng,
) -> Vec<PlacedAsset> {
    let surface = PlacementSurface::from_layout(map_size, layout);
    let candidates = build_candidates(context, map_size, rng);
    place(candidates, &surface, rng)
}

/// Required features first, then furniture, creatures, fixtures, and decorations.
pub fn build_candidates(
    context: &AssetContext,
    map_size: Size,
    rng: &mut SeededRng,
) -> Vec<GeneratedAsset> {
    let mut builder = CandidateBuilder { assets: Vec::new() };
    let theme = catalog::theme_catalog(context.theme);

    for feature in &context.required_features {
        match catalog::feature(context.theme, feature) {
            Some(spec) => builder.push(spec),
            None => debug!("dropping unknown feature '{feature}' for {} maps", context.theme),
        }
    }

    let density = context.density.clamp(0.0, 1.0);
    let area = map_size.area() as f64;
    let furniture_count = (area * density / CELLS_PER_FURNITURE).round() as usize;
    let decoration_count = (area * density / CELLS_PER_DECORATION).round() as usize;
    let creature_count = creature_count(context.difficulty);
    let fixture_count = (map_size.width / COLUMNS_PER_FIXTURE).max(1) as usize;

    for _ in 0..furniture_count {
        if let Some(spec) = rng.choice(theme.furniture) {
            builder.push(spec);
        }
    }

    let creature_weights: Vec<u32> = theme
        .creatures
        .iter()
        .map(|spec| rarity_weight(spec.rarity, context.difficulty))
        .collect();
    for _ in 0..creature_count {
        if let Some(index) = rng.weighted_index(&creature_weights) {
            builder.push(&theme.creatures[index]);
        }
    }

    for _ in 0..fixture_count {
        if let Some(spec) = rng.choice(theme.interactive) {
            builder.push(spec);
        }
    }

    let decorations = suited_decorations(theme.decorations, context);
    for _ in 0..decoration_count {
        if let Some(spec) = rng.choice(&decorations) {
            builder.push(spec);
        }
    }

    builder.assets
}

struct CandidateBuilder {
    assets: Vec<GeneratedAsset>,
}

impl CandidateBuilder {
    fn push(&mut self, spec: &AssetSpec) {
        let id = format!("asset-{}", self.assets.len());
        self.assets.push(spec.materialize(id));
    }
}

fn creature_count(difficulty: u8) -> usize {
    (usize::from(difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)) + 1) / 2
}

/// Base weight per tier; rare and legendary creatures grow likelier as difficulty rises.
fn rarity_weight(rarity: Rarity, difficulty: u8) -> u32 {
    let difficulty = u32::from(difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY));
    match rarity {
        Rarity::Common => 60,
        Rarity::Uncommon => 25,
        Rarity::Rare => 8 + difficulty * 2,
        Rarity::Legendary => 1 + difficulty,
    }
}

/// Decorations that fit the mood and at least one terrain hint. An empty selection falls back
/// to the whole theme list.
fn suited_decorations<'a>(all: &'a [AssetSpec], context: &AssetContext) -> Vec<&'a AssetSpec> {
    let suited: Vec<&AssetSpec> = all
        .iter()
        .filter(|spec| spec.moods.is_empty() || spec.moods.contains(&context.mood))
        .filter(|spec| {
            spec.terrain_hints.is_empty()
                || spec.terrain_hints.iter().any(|hint| {
                    context.terrain_types.iter().any(|terrain| terrain.as_str() == *hint)
                })
        })
        .collect();
    if suited.is_empty() { all.iter().collect() } else { suited }
}
