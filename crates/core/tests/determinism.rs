use mapsmith::mapgen::assets::PlacedAsset;
use mapsmith::mapgen::model::Waypoint;
use mapsmith::{
    Archetype, GeneratedMap, GenerationOptions, MapDocument, MapGenerator, Pos, generate,
};

fn dungeon_test_one() -> GenerationOptions {
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

fn placements(items: &[PlacedAsset]) -> Vec<(String, Pos)> {
    items.iter().map(|item| (item.asset.key.clone(), item.pos)).collect()
}

#[test]
fn test_determinism_dungeon_seed_twice_matches_rooms_corridors_and_objects() {
    let first = MapGenerator::new(dungeon_test_one()).expect("valid options").generate();
    let second = MapGenerator::new(dungeon_test_one()).expect("valid options").generate();

    let rooms =
        |map: &GeneratedMap| map.layout.spaces.iter().map(|space| space.bounds).collect::<Vec<_>>();
    let corridors = |map: &GeneratedMap| -> Vec<Vec<Waypoint>> {
        map.layout.paths.iter().map(|path| path.waypoints.clone()).collect()
    };

    assert_eq!(rooms(&first), rooms(&second));
    assert_eq!(corridors(&first), corridors(&second));
    assert_eq!(placements(&first.placements), placements(&second.placements));
    assert_eq!(first.document, second.document);
}

#[test]
fn test_determinism_identical_options_produce_byte_identical_json() {
    let left = generate(&dungeon_test_one()).expect("valid options");
    let right = generate(&dungeon_test_one()).expect("valid options");
    let left_json = left.to_json_pretty().expect("serialize left");
    let right_json = right.to_json_pretty().expect("serialize right");
    assert_eq!(left_json, right_json, "identical runs must serialize identically");
    assert_eq!(left.fingerprint().ok(), right.fingerprint().ok());
}

#[test]
fn test_determinism_every_archetype_is_repeatable() {
    for archetype in Archetype::ALL {
        let options = GenerationOptions::new(archetype, 48, 40).with_seed(format!("{archetype}-7"));
        let left = generate(&options).expect("valid options");
        let right = generate(&options).expect("valid options");
        assert_eq!(left.fingerprint().ok(), right.fingerprint().ok(), "{archetype}");
    }
}

#[test]
fn test_determinism_different_seeds_produce_different_maps() {
    let left = generate(&dungeon_test_one().with_seed("test-1")).expect("valid options");
    let right = generate(&dungeon_test_one().with_seed("test-2")).expect("valid options");
    assert_ne!(
        left.fingerprint().ok(),
        right.fingerprint().ok(),
        "different seeds should produce different maps"
    );
}

#[test]
fn test_generated_document_survives_a_json_round_trip() {
    for archetype in Archetype::ALL {
        let options = GenerationOptions::new(archetype, 40, 32).with_seed("round-trip");
        let document = generate(&options).expect("valid options");
        let json = document.to_json_pretty().expect("serialize document");
        let reloaded = MapDocument::from_json(&json).expect("parse document");
        assert_eq!(reloaded, document, "{archetype}");
        assert_eq!(reloaded.fingerprint().ok(), document.fingerprint().ok());
    }
}

#[test]
fn test_seed_record_regenerates_the_same_map() {
    let original = generate(&GenerationOptions::new(Archetype::Town, 50, 40)).expect("valid");
    let record = &original.metadata.seed;
    let replayed =
        generate(&GenerationOptions::new(record.archetype, 50, 40).with_seed(record.seed.as_str()))
            .expect("valid options");
    assert_eq!(replayed, original);
}
