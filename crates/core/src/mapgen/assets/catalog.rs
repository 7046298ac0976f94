//! Static thematic asset tables.

use crate::mapgen::assemble::TerrainClass;
use crate::types::{Archetype, Mood, Size};

use super::rules::{PlacementRule, RuleTarget};
use super::{AssetCategory, GeneratedAsset, Rarity};

use AssetCategory::{Creature, Decoration, Furniture, Interactive, Landmark, Treasure};
use Rarity::{Common, Legendary, Rare, Uncommon};
use TerrainClass::{Floor, Path, Void};

pub mod keys {
    pub const FIREPLACE: &str = "fireplace";
    pub const DINING_TABLE: &str = "dining_table";
    pub const CAMPFIRE: &str = "campfire";
    pub const ANCIENT_TREE: &str = "ancient_tree";
    pub const CRYSTAL_CLUSTER: &str = "crystal_cluster";
    pub const WELL: &str = "well";
    pub const MARKET_STALL: &str = "market_stall";
    pub const TREASURE_CHEST: &str = "treasure_chest";
    pub const ALTAR: &str = "altar";
}

const AGAINST_WALL: PlacementRule =
    PlacementRule::Near { target: RuleTarget::Wall, max_distance: 1, probability: 0.8 };
const BY_DOOR: PlacementRule =
    PlacementRule::Near { target: RuleTarget::Door, max_distance: 2, probability: 0.9 };
const BESIDE_PATH: PlacementRule =
    PlacementRule::Near { target: RuleTarget::Path, max_distance: 2, probability: 0.7 };
const CLEAR_OF_DOORS: PlacementRule =
    PlacementRule::Avoid { target: RuleTarget::Door, min_distance: 2, probability: 0.8 };
const SPREAD_OUT: PlacementRule = PlacementRule::Avoid {
    target: RuleTarget::Asset(AssetCategory::Creature),
    min_distance: 3,
    probability: 0.6,
};
const NEAR_LANDMARK: PlacementRule = PlacementRule::Near {
    target: RuleTarget::Asset(AssetCategory::Landmark),
    max_distance: 4,
    probability: 0.4,
};
const ALONG_EDGE: PlacementRule = PlacementRule::Edge { probability: 0.6 };
const CENTERED: PlacementRule = PlacementRule::Center { probability: 0.6 };
const CORNERED: PlacementRule = PlacementRule::Corner { probability: 0.5 };

/// One catalog entry. Materializing it prepends a certain `OnTerrain` rule for `ground`.
#[derive(Clone, Copy, Debug)]
pub struct AssetSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub category: AssetCategory,
    pub width: i32,
    pub height: i32,
    pub rarity: Rarity,
    pub ground: TerrainClass,
    pub rules: &'static [PlacementRule],
    /// Moods this decoration suits; empty means any.
    pub moods: &'static [Mood],
    /// Terrain hints this decoration suits; empty means any.
    pub terrain_hints: &'static [&'static str],
}

impl AssetSpec {
    const fn new(
        key: &'static str,
        name: &'static str,
        category: AssetCategory,
        (width, height): (i32, i32),
        rarity: Rarity,
        ground: TerrainClass,
        rules: &'static [PlacementRule],
    ) -> Self {
        Self {
            key,
            name,
            category,
            width,
            height,
            rarity,
            ground,
            rules,
            moods: &[],
            terrain_hints: &[],
        }
    }

    const fn moods(mut self, moods: &'static [Mood]) -> Self {
        self.moods = moods;
        self
    }

    const fn hints(mut self, terrain_hints: &'static [&'static str]) -> Self {
        self.terrain_hints = terrain_hints;
        self
    }

    pub(super) fn materialize(&self, id: String) -> GeneratedAsset {
        let mut rules = Vec::with_capacity(self.rules.len() + 1);
        rules.push(PlacementRule::OnTerrain { terrain: self.ground, probability: 1.0 });
        rules.extend_from_slice(self.rules);
        GeneratedAsset {
            id,
            key: self.key.to_string(),
            category: self.category,
            name: self.name.to_string(),
            size: Size::new(self.width, self.height),
            rarity: self.rarity,
            rules,
        }
    }
}

pub struct ThemeCatalog {
    pub furniture: &'static [AssetSpec],
    pub creatures: &'static [AssetSpec],
    pub interactive: &'static [AssetSpec],
    pub decorations: &'static [AssetSpec],
}

/// Features with an empty theme list are available to every theme.
static FEATURES: [(&[Archetype], AssetSpec); 9] = [
    (
        &[Archetype::House],
        AssetSpec::new(keys::FIREPLACE, "Fireplace", Landmark, (2, 1), Rare, Floor, &[
            AGAINST_WALL,
            CLEAR_OF_DOORS,
        ]),
    ),
    (
        &[Archetype::House],
        AssetSpec::new(keys::DINING_TABLE, "Dining Table", Furniture, (3, 2), Uncommon, Floor, &[
            CENTERED,
        ]),
    ),
    (
        &[Archetype::Forest],
        AssetSpec::new(keys::CAMPFIRE, "Campfire", Landmark, (2, 2), Uncommon, Floor, &[CENTERED]),
    ),
    (
        &[Archetype::Forest],
        AssetSpec::new(keys::ANCIENT_TREE, "Ancient Tree", Landmark, (3, 3), Legendary, Void, &[
            BESIDE_PATH,
        ]),
    ),
    (
        &[Archetype::Cave],
        AssetSpec::new(keys::CRYSTAL_CLUSTER, "Crystal Cluster", Treasure, (2, 2), Rare, Floor, &[
            AGAINST_WALL,
        ]),
    ),
    (
        &[Archetype::Town],
        AssetSpec::new(keys::WELL, "Well", Landmark, (2, 2), Rare, Void, &[BESIDE_PATH]),
    ),
    (
        &[Archetype::Town],
        AssetSpec::new(keys::MARKET_STALL, "Market Stall", Furniture, (2, 1), Uncommon, Void, &[
            BESIDE_PATH,
        ]),
    ),
    (
        &[],
        AssetSpec::new(keys::TREASURE_CHEST, "Treasure Chest", Treasure, (1, 1), Rare, Floor, &[
            CORNERED,
        ]),
    ),
    (
        &[Archetype::Dungeon],
        AssetSpec::new(keys::ALTAR, "Altar", Landmark, (2, 1), Legendary, Floor, &[CENTERED]),
    ),
];

static HOUSE: ThemeCatalog = ThemeCatalog {
    furniture: &[
        AssetSpec::new("bed", "Bed", Furniture, (2, 1), Common, Floor, &[AGAINST_WALL]),
        AssetSpec::new("chair", "Chair", Furniture, (1, 1), Common, Floor, &[]),
        AssetSpec::new("bookshelf", "Bookshelf", Furniture, (2, 1), Uncommon, Floor, &[
            AGAINST_WALL,
            ALONG_EDGE,
        ]),
        AssetSpec::new("wardrobe", "Wardrobe", Furniture, (1, 1), Common, Floor, &[CORNERED]),
        AssetSpec::new("writing_desk", "Writing Desk", Furniture, (2, 1), Uncommon, Floor, &[
            AGAINST_WALL,
        ]),
    ],
    creatures: &[
        AssetSpec::new("cat", "House Cat", Creature, (1, 1), Common, Floor, &[SPREAD_OUT]),
        AssetSpec::new("rat", "Rat", Creature, (1, 1), Common, Floor, &[ALONG_EDGE]),
        AssetSpec::new("burglar", "Burglar", Creature, (1, 1), Uncommon, Floor, &[BY_DOOR]),
        AssetSpec::new("ghost", "Restless Ghost", Creature, (1, 1), Rare, Floor, &[SPREAD_OUT]),
    ],
    interactive: &[
        AssetSpec::new("door", "Wooden Door", Interactive, (1, 1), Common, Floor, &[BY_DOOR]),
        AssetSpec::new("trapdoor", "Trapdoor", Interactive, (1, 1), Uncommon, Floor, &[CORNERED]),
    ],
    decorations: &[
        AssetSpec::new("rug", "Rug", Decoration, (2, 2), Common, Floor, &[CENTERED])
            .hints(&["wood"]),
        AssetSpec::new("potted_plant", "Potted Plant", Decoration, (1, 1), Common, Floor, &[
            CORNERED,
        ])
        .moods(&[Mood::Cheerful, Mood::Neutral]),
        AssetSpec::new("painting", "Painting", Decoration, (1, 1), Common, Floor, &[AGAINST_WALL]),
        AssetSpec::new("candelabra", "Candelabra", Decoration, (1, 1), Uncommon, Floor, &[])
            .moods(&[Mood::Eerie, Mood::Mysterious, Mood::Hostile]),
    ],
};

static FOREST: ThemeCatalog = ThemeCatalog {
    furniture: &[
        AssetSpec::new("fallen_log", "Fallen Log", Furniture, (2, 1), Common, Floor, &[]),
        AssetSpec::new("tree_stump", "Tree Stump", Furniture, (1, 1), Common, Floor, &[]),
        AssetSpec::new("tent", "Tent", Furniture, (2, 2), Uncommon, Floor, &[ALONG_EDGE]),
    ],
    creatures: &[
        AssetSpec::new("deer", "Deer", Creature, (1, 1), Common, Void, &[SPREAD_OUT]),
        AssetSpec::new("wolf", "Wolf", Creature, (1, 1), Uncommon, Void, &[SPREAD_OUT]),
        AssetSpec::new("bear", "Brown Bear", Creature, (2, 2), Rare, Void, &[]),
        AssetSpec::new("dryad", "Dryad", Creature, (1, 1), Legendary, Floor, &[NEAR_LANDMARK]),
    ],
    interactive: &[
        AssetSpec::new("signpost", "Signpost", Interactive, (1, 1), Common, Void, &[BESIDE_PATH]),
        AssetSpec::new("snare", "Hunter's Snare", Interactive, (1, 1), Uncommon, Path, &[]),
    ],
    decorations: &[
        AssetSpec::new("bush", "Bush", Decoration, (1, 1), Common, Void, &[]).hints(&["grass"]),
        AssetSpec::new("boulder", "Boulder", Decoration, (2, 2), Common, Void, &[]),
        AssetSpec::new("flower_patch", "Flower Patch", Decoration, (1, 1), Common, Floor, &[])
            .moods(&[Mood::Cheerful, Mood::Neutral])
            .hints(&["grass"]),
        AssetSpec::new("mushroom_ring", "Mushroom Ring", Decoration, (2, 2), Uncommon, Floor, &[
            CENTERED,
        ])
        .moods(&[Mood::Mysterious, Mood::Eerie]),
        AssetSpec::new("reeds", "Reeds", Decoration, (1, 1), Common, Void, &[BESIDE_PATH])
            .hints(&["water"]),
    ],
};

static CAVE: ThemeCatalog = ThemeCatalog {
    furniture: &[
        AssetSpec::new("mine_cart", "Mine Cart", Furniture, (1, 1), Common, Path, &[]),
        AssetSpec::new("supply_crate", "Supply Crate", Furniture, (1, 1), Common, Floor, &[
            CORNERED,
        ]),
        AssetSpec::new("bedroll", "Bedroll", Furniture, (2, 1), Uncommon, Floor, &[ALONG_EDGE]),
    ],
    creatures: &[
        AssetSpec::new("bat_swarm", "Bat Swarm", Creature, (1, 1), Common, Floor, &[SPREAD_OUT]),
        AssetSpec::new("giant_spider", "Giant Spider", Creature, (1, 1), Uncommon, Floor, &[
            CORNERED,
        ]),
        AssetSpec::new("troll", "Cave Troll", Creature, (2, 2), Rare, Floor, &[SPREAD_OUT]),
        AssetSpec::new("dragon", "Dragon", Creature, (3, 3), Legendary, Floor, &[CENTERED]),
    ],
    interactive: &[
        AssetSpec::new("rope_ladder", "Rope Ladder", Interactive, (1, 1), Common, Floor, &[
            AGAINST_WALL,
        ]),
        AssetSpec::new("rockfall", "Loose Rockfall", Interactive, (1, 1), Uncommon, Path, &[]),
    ],
    decorations: &[
        AssetSpec::new("stalagmite", "Stalagmite", Decoration, (1, 1), Common, Floor, &[
            ALONG_EDGE,
        ])
        .hints(&["stone"]),
        AssetSpec::new("puddle", "Puddle", Decoration, (1, 1), Common, Floor, &[])
            .hints(&["water"]),
        AssetSpec::new("glowing_fungus", "Glowing Fungus", Decoration, (1, 1), Uncommon, Floor, &[
            AGAINST_WALL,
        ])
        .moods(&[Mood::Mysterious, Mood::Eerie]),
        AssetSpec::new("bone_pile", "Bone Pile", Decoration, (1, 1), Common, Floor, &[CORNERED])
            .moods(&[Mood::Hostile, Mood::Eerie]),
    ],
};

static TOWN: ThemeCatalog = ThemeCatalog {
    furniture: &[
        AssetSpec::new("barrel", "Barrel", Furniture, (1, 1), Common, Void, &[BESIDE_PATH]),
        AssetSpec::new("crate", "Crate", Furniture, (1, 1), Common, Void, &[]),
        AssetSpec::new("bench", "Bench", Furniture, (2, 1), Common, Void, &[BESIDE_PATH]),
        AssetSpec::new("workbench", "Workbench", Furniture, (2, 1), Uncommon, Floor, &[
            AGAINST_WALL,
        ]),
    ],
    creatures: &[
        AssetSpec::new("townsfolk", "Townsfolk", Creature, (1, 1), Common, Path, &[SPREAD_OUT]),
        AssetSpec::new("stray_dog", "Stray Dog", Creature, (1, 1), Common, Void, &[]),
        AssetSpec::new("guard", "Town Guard", Creature, (1, 1), Uncommon, Floor, &[BY_DOOR]),
        AssetSpec::new("noble", "Noble", Creature, (1, 1), Rare, Floor, &[CENTERED]),
    ],
    interactive: &[
        AssetSpec::new("notice_board", "Notice Board", Interactive, (1, 1), Common, Void, &[
            BESIDE_PATH,
        ]),
        AssetSpec::new("shop_door", "Shop Door", Interactive, (1, 1), Common, Floor, &[BY_DOOR]),
    ],
    decorations: &[
        AssetSpec::new("lamp_post", "Lamp Post", Decoration, (1, 1), Common, Void, &[BESIDE_PATH])
            .hints(&["cobblestone"]),
        AssetSpec::new("flower_box", "Flower Box", Decoration, (1, 1), Common, Floor, &[
            AGAINST_WALL,
        ])
        .moods(&[Mood::Cheerful, Mood::Neutral]),
        AssetSpec::new("hay_bale", "Hay Bale", Decoration, (1, 1), Common, Void, &[]),
        AssetSpec::new("banner", "Banner", Decoration, (1, 1), Uncommon, Floor, &[ALONG_EDGE])
            .moods(&[Mood::Neutral, Mood::Cheerful, Mood::Hostile]),
    ],
};

static DUNGEON: ThemeCatalog = ThemeCatalog {
    furniture: &[
        AssetSpec::new("weapon_rack", "Weapon Rack", Furniture, (2, 1), Common, Floor, &[
            AGAINST_WALL,
        ]),
        AssetSpec::new("sarcophagus", "Sarcophagus", Furniture, (1, 2), Uncommon, Floor, &[
            ALONG_EDGE,
        ]),
        AssetSpec::new("iron_cage", "Iron Cage", Furniture, (1, 1), Common, Floor, &[CORNERED]),
    ],
    creatures: &[
        AssetSpec::new("skeleton", "Skeleton", Creature, (1, 1), Common, Floor, &[SPREAD_OUT]),
        AssetSpec::new("goblin", "Goblin", Creature, (1, 1), Common, Floor, &[SPREAD_OUT]),
        AssetSpec::new("orc", "Orc Brute", Creature, (1, 1), Uncommon, Floor, &[BY_DOOR]),
        AssetSpec::new("wraith", "Wraith", Creature, (1, 1), Rare, Floor, &[]),
        AssetSpec::new("lich", "Lich", Creature, (1, 1), Legendary, Floor, &[NEAR_LANDMARK]),
    ],
    interactive: &[
        AssetSpec::new("lever", "Lever", Interactive, (1, 1), Common, Floor, &[AGAINST_WALL]),
        AssetSpec::new("portcullis", "Portcullis", Interactive, (1, 1), Uncommon, Floor, &[
            BY_DOOR,
        ]),
        AssetSpec::new("pressure_plate", "Pressure Plate", Interactive, (1, 1), Common, Path, &[]),
    ],
    decorations: &[
        AssetSpec::new("torch_sconce", "Torch Sconce", Decoration, (1, 1), Common, Floor, &[
            AGAINST_WALL,
        ]),
        AssetSpec::new("chains", "Hanging Chains", Decoration, (1, 1), Common, Floor, &[
            ALONG_EDGE,
        ])
        .hints(&["stone"]),
        AssetSpec::new("skull_pile", "Skull Pile", Decoration, (1, 1), Common, Floor, &[CORNERED])
            .moods(&[Mood::Hostile, Mood::Eerie]),
        AssetSpec::new("cobweb", "Cobweb", Decoration, (1, 1), Common, Floor, &[CORNERED])
            .moods(&[Mood::Eerie, Mood::Mysterious, Mood::Neutral]),
    ],
};

pub fn theme_catalog(theme: Archetype) -> &'static ThemeCatalog {
    match theme {
        Archetype::House => &HOUSE,
        Archetype::Forest => &FOREST,
        Archetype::Cave => &CAVE,
        Archetype::Town => &TOWN,
        Archetype::Dungeon => &DUNGEON,
    }
}

/// Looks up a required feature by key among those available to `theme`.
pub fn feature(theme: Archetype, key: &str) -> Option<&'static AssetSpec> {
    FEATURES
        .iter()
        .find(|(themes, spec)| spec.key == key && (themes.is_empty() || themes.contains(&theme)))
        .map(|(_, spec)| spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_theme_has_entries_in_each_group() {
        for theme in Archetype::ALL {
            let catalog = theme_catalog(theme);
            assert!(!catalog.furniture.is_empty(), "{theme}");
            assert!(!catalog.creatures.is_empty(), "{theme}");
            assert!(!catalog.interactive.is_empty(), "{theme}");
            assert!(!catalog.decorations.is_empty(), "{theme}");
        }
    }

    #[test]
    fn universal_features_resolve_for_any_theme() {
        for theme in Archetype::ALL {
            assert!(feature(theme, keys::TREASURE_CHEST).is_some());
        }
        assert!(feature(Archetype::House, keys::FIREPLACE).is_some());
        assert!(feature(Archetype::Dungeon, keys::FIREPLACE).is_none());
        assert!(feature(Archetype::House, "no_such_feature").is_none());
    }

    #[test]
    fn materialized_asset_leads_with_its_ground_rule() {
        let spec = feature(Archetype::Town, keys::WELL).expect("well is a town feature");
        let asset = spec.materialize("asset-7".to_string());
        assert_eq!(asset.id, "asset-7");
        assert_eq!(asset.size, Size::new(2, 2));
        assert_eq!(
            asset.rules.first(),
            Some(&PlacementRule::OnTerrain { terrain: TerrainClass::Void, probability: 1.0 })
        );
        assert_eq!(asset.rules.len(), spec.rules.len() + 1);
    }
}
