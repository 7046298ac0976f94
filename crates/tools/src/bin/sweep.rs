use anyhow::{Result, bail};
use clap::Parser;
use mapsmith::mapgen::edges;
use mapsmith::{Archetype, GeneratedMap, GenerationOptions, MapGenerator, Seed};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Parser)]
#[command(author, version, about = "Generate many maps and check structural invariants")]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Maps generated per archetype
    #[arg(short, long, default_value_t = 100)]
    runs: u32,
    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct SweepReport {
    maps: u32,
    spaces: usize,
    paths: usize,
    assets: usize,
    violations: Vec<String>,
}

fn between(rng: &mut ChaCha8Rng, low: i32, high: i32) -> i32 {
    low + (rng.next_u64() % (high - low + 1) as u64) as i32
}

fn random_options(rng: &mut ChaCha8Rng, archetype: Archetype) -> GenerationOptions {
    let min_space_size = between(rng, 3, 7);
    GenerationOptions {
        space_count: between(rng, 1, 10),
        min_space_size,
        max_space_size: min_space_size + between(rng, 0, 6),
        organic_factor: f64::from(between(rng, 0, 100)) / 100.0,
        object_density: f64::from(between(rng, 0, 100)) / 100.0,
        difficulty: between(rng, 1, 10) as u8,
        ..GenerationOptions::new(archetype, between(rng, 20, 72), between(rng, 20, 56))
    }
    .with_seed(Seed::Number(rng.next_u64()))
}

fn find_root(parents: &mut [usize], index: usize) -> usize {
    let parent = parents[index];
    if parent == index {
        return index;
    }
    let root = find_root(parents, parent);
    parents[index] = root;
    root
}

fn violations(map: &GeneratedMap) -> Vec<String> {
    let mut found = Vec::new();
    let size = map.layout.size;

    let mut claimed = BTreeSet::new();
    for space in &map.layout.spaces {
        let edge_map = edges::classify_space(space);
        if !edge_map.edges.is_disjoint(&edge_map.interior) {
            found.push(format!("{} edge and interior overlap", space.id));
        }
        for cell in edges::space_cells(space) {
            if !size.contains(cell) {
                found.push(format!("{} leaves the map at {cell:?}", space.id));
            }
            if !claimed.insert(cell) {
                found.push(format!("spaces overlap at {cell:?}"));
            }
        }
    }

    let index_of: BTreeMap<&str, usize> = map
        .layout
        .spaces
        .iter()
        .enumerate()
        .map(|(index, space)| (space.id.as_str(), index))
        .collect();
    let mut parents: Vec<usize> = (0..map.layout.spaces.len()).collect();
    for path in &map.layout.paths {
        match (index_of.get(path.connects.0.as_str()), index_of.get(path.connects.1.as_str())) {
            (Some(&from), Some(&to)) => {
                let from_root = find_root(&mut parents, from);
                let to_root = find_root(&mut parents, to);
                parents[from_root] = to_root;
            }
            _ => found.push(format!("{} connects unknown spaces", path.id)),
        }
    }
    let roots: BTreeSet<usize> =
        (0..parents.len()).map(|index| find_root(&mut parents, index)).collect();
    if roots.len() > 1 {
        found.push(format!("{} disconnected space groups", roots.len()));
    }

    let mut occupied = BTreeSet::new();
    for placed in &map.placements {
        let footprint = placed.footprint();
        if !footprint.fits_within(size) {
            found.push(format!("{} leaves the map", placed.asset.id));
        }
        if footprint.cells().any(|cell| !occupied.insert(cell)) {
            found.push(format!("{} overlaps another asset", placed.asset.id));
        }
    }

    found
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut report =
        SweepReport { maps: 0, spaces: 0, paths: 0, assets: 0, violations: Vec::new() };

    for archetype in Archetype::ALL {
        for _ in 0..args.runs {
            let options = random_options(&mut rng, archetype);
            let map = MapGenerator::new(options.clone())?.generate();
            let repeat = MapGenerator::new(options.clone())?.generate();
            if map != repeat {
                report.violations.push(format!("non-deterministic output for {options:?}"));
            }
            report.violations.extend(
                violations(&map)
                    .into_iter()
                    .map(|violation| format!("Invariant failed: {violation} ({options:?})")),
            );
            report.maps += 1;
            report.spaces += map.layout.spaces.len();
            report.paths += map.layout.paths.len();
            report.assets += map.placements.len();
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Swept {} maps: {} spaces, {} paths, {} assets.",
            report.maps, report.spaces, report.paths, report.assets
        );
        for violation in &report.violations {
            println!("{violation}");
        }
    }

    if !report.violations.is_empty() {
        bail!("{} invariant violation(s)", report.violations.len());
    }
    println!("Sweep completed successfully.");
    Ok(())
}
