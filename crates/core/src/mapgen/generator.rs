//! High-level map generation orchestration: option validation, then the staged pipeline.

mod pipeline;

use serde::{Deserialize, Serialize};

use crate::document::MapDocument;
use crate::error::GenerateError;
use crate::types::{Archetype, Mood};

use super::assets::{MAX_DIFFICULTY, MIN_DIFFICULTY, PlacedAsset};
use super::model::GeneratedLayout;
use super::seed::{Seed, runtime_seed};
use super::theme::ColorTheme;
use super::tuning::Tuning;

const DEFAULT_DIFFICULTY: u8 = 3;

fn default_difficulty() -> u8 {
    DEFAULT_DIFFICULTY
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub width: i32,
    pub height: i32,
    pub archetype: Archetype,
    pub space_count: i32,
    pub min_space_size: i32,
    pub max_space_size: i32,
    pub organic_factor: f64,
    pub object_density: f64,
    /// A fresh runtime seed is chosen when absent; the document records whichever was used.
    #[serde(default)]
    pub seed: Option<Seed>,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    /// Falls back to the archetype's default mood.
    #[serde(default)]
    pub mood: Option<Mood>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tuning: Tuning,
}

impl GenerationOptions {
    pub fn new(archetype: Archetype, width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            archetype,
            space_count: 6,
            min_space_size: 4,
            max_space_size: 8,
            organic_factor: 0.3,
            object_density: 0.5,
            seed: None,
            difficulty: DEFAULT_DIFFICULTY,
            mood: None,
            name: None,
            tuning: Tuning::default(),
        }
    }

    pub fn with_seed(mut self, seed: impl Into<Seed>) -> Self {
        self.seed = Some(seed.into());
        self
    }

    /// Rejects parameters that cannot produce a map. Runs before any random draw.
    pub fn validate(&self) -> Result<(), GenerateError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GenerateError::NonPositiveDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.space_count <= 0 {
            return Err(GenerateError::NonPositiveSpaceCount(self.space_count));
        }
        if self.min_space_size <= 0 {
            return Err(GenerateError::NonPositiveMinSize(self.min_space_size));
        }
        if self.min_space_size > self.max_space_size {
            return Err(GenerateError::InvertedSizeRange {
                min: self.min_space_size,
                max: self.max_space_size,
            });
        }
        // One cell of border on every side.
        if i64::from(self.min_space_size) + 2 > i64::from(self.width.min(self.height)) {
            return Err(GenerateError::MapTooSmall {
                width: self.width,
                height: self.height,
                min_size: self.min_space_size,
            });
        }
        for (name, value) in
            [("organic factor", self.organic_factor), ("object density", self.object_density)]
        {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenerateError::FactorOutOfRange { name, value });
            }
        }
        if !(MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&self.difficulty) {
            return Err(GenerateError::DifficultyOutOfRange(self.difficulty));
        }
        Ok(())
    }
}

/// Everything one run produced. The document is the external contract; the rest is kept for
/// callers that want to inspect or re-place without parsing tiles back out.
#[derive(Clone, Debug, PartialEq)]
pub struct GeneratedMap {
    pub layout: GeneratedLayout,
    pub theme: ColorTheme,
    pub placements: Vec<PlacedAsset>,
    pub document: MapDocument,
}

pub struct MapGenerator {
    options: GenerationOptions,
    seed: Seed,
}

impl MapGenerator {
    pub fn new(options: GenerationOptions) -> Result<Self, GenerateError> {
        options.validate()?;
        let seed = options.seed.clone().unwrap_or_else(|| Seed::Text(runtime_seed()));
        Ok(Self { options, seed })
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Same options and seed always yield an identical map.
    pub fn generate(&self) -> GeneratedMap {
        pipeline::run(&self.options, &self.seed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;
    use crate::document::LayerKind;
    use crate::mapgen::edges;

    fn dungeon_options() -> GenerationOptions {
        GenerationOptions {
            space_count: 4,
            min_space_size: 4,
            max_space_size: 8,
            organic_factor: 0.3,
            object_density: 0.5,
            ..GenerationOptions::new(Archetype::Dungeon, 30, 30)
        }
        .with_seed("test-1")
    }

    #[test]
    fn validation_rejects_each_bad_parameter() {
        let base = GenerationOptions::new(Archetype::House, 40, 30);
        assert!(base.validate().is_ok());

        let cases = [
            GenerationOptions { width: 0, ..base.clone() },
            GenerationOptions { height: -3, ..base.clone() },
            GenerationOptions { space_count: 0, ..base.clone() },
            GenerationOptions { min_space_size: 0, ..base.clone() },
            GenerationOptions { min_space_size: 9, max_space_size: 8, ..base.clone() },
            GenerationOptions { min_space_size: 29, max_space_size: 30, ..base.clone() },
            GenerationOptions {
                min_space_size: i32::MAX,
                max_space_size: i32::MAX,
                ..base.clone()
            },
            GenerationOptions { organic_factor: 1.5, ..base.clone() },
            GenerationOptions { object_density: f64::NAN, ..base.clone() },
            GenerationOptions { difficulty: 0, ..base.clone() },
            GenerationOptions { difficulty: 11, ..base.clone() },
        ];
        for options in cases {
            assert!(options.validate().is_err(), "{options:?} should fail validation");
        }
    }

    #[test]
    fn huge_min_size_is_rejected_without_overflow() {
        let options = GenerationOptions {
            min_space_size: i32::MAX,
            max_space_size: i32::MAX,
            ..GenerationOptions::new(Archetype::Cave, i32::MAX, i32::MAX)
        };
        assert_eq!(
            options.validate(),
            Err(GenerateError::MapTooSmall {
                width: i32::MAX,
                height: i32::MAX,
                min_size: i32::MAX,
            })
        );

        let near_limit = GenerationOptions {
            min_space_size: i32::MAX - 1,
            max_space_size: i32::MAX,
            ..GenerationOptions::new(Archetype::Cave, i32::MAX, i32::MAX)
        };
        assert!(matches!(near_limit.validate(), Err(GenerateError::MapTooSmall { .. })));
    }

    #[test]
    fn tiny_map_fails_with_map_too_small() {
        let options = GenerationOptions {
            min_space_size: 10,
            max_space_size: 12,
            ..GenerationOptions::new(Archetype::House, 5, 5)
        };
        assert_eq!(
            MapGenerator::new(options).err(),
            Some(GenerateError::MapTooSmall { width: 5, height: 5, min_size: 10 })
        );
    }

    #[test]
    fn numeric_and_text_seeds_share_a_stream() {
        let by_number = MapGenerator::new(dungeon_options().with_seed(42_u64))
            .expect("valid options")
            .generate();
        let by_text = MapGenerator::new(dungeon_options().with_seed("42"))
            .expect("valid options")
            .generate();
        assert_eq!(by_number.layout, by_text.layout);
        assert_eq!(by_number.placements, by_text.placements);
    }

    #[test]
    fn missing_seed_is_chosen_and_recorded() {
        let options = GenerationOptions { seed: None, ..dungeon_options() };
        let generator = MapGenerator::new(options).expect("valid options");
        let map = generator.generate();
        assert_eq!(map.document.metadata.seed.seed, generator.seed().as_text());
        assert!(!map.document.metadata.seed.seed.is_empty());
    }

    #[test]
    fn document_objects_mirror_placements() {
        let map = MapGenerator::new(dungeon_options()).expect("valid options").generate();
        let objects = map.document.objects(LayerKind::Objects);
        assert_eq!(objects.len(), map.placements.len());
        for (object, placed) in objects.iter().zip(&map.placements) {
            assert_eq!(object.pos, placed.pos);
            assert_eq!(object.id, placed.asset.id);
        }
    }

    #[test]
    fn doors_sit_on_their_space_walls() {
        for archetype in Archetype::ALL {
            let options = GenerationOptions::new(archetype, 48, 36).with_seed("doors");
            let map = MapGenerator::new(options).expect("valid options").generate();
            for space in &map.layout.spaces {
                let edge_map = edges::classify_space(space);
                for door in &space.doors {
                    assert!(edge_map.edges.contains(door), "{archetype}: door {door:?}");
                }
            }
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn spaces_never_share_cells(
            seed in any::<u64>(),
            archetype_index in 0_usize..5,
            space_count in 1_i32..10,
        ) {
            let options = GenerationOptions {
                space_count,
                ..GenerationOptions::new(Archetype::ALL[archetype_index], 50, 40)
            }
            .with_seed(seed);
            let map = MapGenerator::new(options).expect("valid options").generate();
            let mut seen = BTreeSet::new();
            for space in &map.layout.spaces {
                for cell in edges::space_cells(space) {
                    prop_assert!(seen.insert(cell), "cell {cell:?} claimed twice");
                }
            }
            prop_assert!(map.layout.spaces.len() <= space_count as usize);
        }
    }
}
