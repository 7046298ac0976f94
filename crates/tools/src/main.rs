use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;
use mapsmith::{Archetype, GenerationOptions, MapDocument, Mood, Seed, Tuning, generate_batch};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate tabletop battle maps as layered JSON documents")]
struct Args {
    #[arg(short, long, value_parser = parse_archetype, default_value = "dungeon")]
    archetype: Archetype,
    #[arg(long, default_value_t = 40)]
    width: i32,
    #[arg(long, default_value_t = 30)]
    height: i32,
    /// Number of spaces to attempt
    #[arg(long, default_value_t = 6)]
    spaces: i32,
    #[arg(long, default_value_t = 4)]
    min_size: i32,
    #[arg(long, default_value_t = 8)]
    max_size: i32,
    #[arg(long, default_value_t = 0.3)]
    organic: f64,
    #[arg(long, default_value_t = 0.5)]
    density: f64,
    #[arg(long, default_value_t = 3)]
    difficulty: u8,
    #[arg(long, value_parser = parse_mood)]
    mood: Option<Mood>,
    /// Seed text or number; a fresh seed is chosen when omitted
    #[arg(short, long)]
    seed: Option<String>,
    #[arg(long)]
    name: Option<String>,
    /// TOML file overriding the tuning knobs
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Where to write the document JSON; several maps are written as an array
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Maps to generate; later maps derive their seed as `<seed>-<index>`
    #[arg(long, default_value_t = 1)]
    count: usize,
}

fn parse_archetype(text: &str) -> Result<Archetype, String> {
    Archetype::ALL
        .into_iter()
        .find(|archetype| archetype.label().eq_ignore_ascii_case(text))
        .ok_or_else(|| format!("unknown archetype '{text}'"))
}

fn parse_mood(text: &str) -> Result<Mood, String> {
    Mood::ALL
        .into_iter()
        .find(|mood| mood.label().eq_ignore_ascii_case(text))
        .ok_or_else(|| format!("unknown mood '{text}'"))
}

/// Numeric text becomes a numeric seed; both spellings hash to the same stream anyway.
fn parse_seed(text: &str) -> Seed {
    text.parse::<u64>().map_or_else(|_| Seed::Text(text.to_string()), Seed::Number)
}

fn load_tuning(path: &Path) -> Result<Tuning> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tuning file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse tuning TOML: {}", path.display()))
}

fn build_options(args: &Args) -> Result<Vec<GenerationOptions>> {
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    let tuning = match &args.tuning {
        Some(path) => load_tuning(path)?,
        None => Tuning::default(),
    };
    let base = GenerationOptions {
        space_count: args.spaces,
        min_space_size: args.min_size,
        max_space_size: args.max_size,
        organic_factor: args.organic,
        object_density: args.density,
        difficulty: args.difficulty,
        mood: args.mood,
        name: args.name.clone(),
        tuning,
        ..GenerationOptions::new(args.archetype, args.width, args.height)
    };

    Ok((0..args.count)
        .map(|index| {
            let seed = args.seed.as_deref().map(|seed| match index {
                0 => parse_seed(seed),
                _ => Seed::Text(format!("{seed}-{index}")),
            });
            GenerationOptions { seed, ..base.clone() }
        })
        .collect())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let batch = build_options(&args)?;

    let mut documents: Vec<MapDocument> = Vec::with_capacity(batch.len());
    for result in generate_batch(&batch) {
        let document = result.context("Invalid generation options")?;
        let fingerprint = document.fingerprint().context("Failed to serialize map")?;
        println!(
            "{} seed={} layers={} fingerprint={fingerprint:016x}",
            document.metadata.id,
            document.metadata.seed.seed,
            document.layers.len()
        );
        documents.push(document);
    }

    if let Some(path) = &args.output {
        let json = match documents.as_slice() {
            [single] => single.to_json_pretty(),
            many => serde_json::to_string_pretty(many),
        }
        .context("Failed to serialize map JSON")?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;
        info!("wrote {} map(s) to {}", documents.len(), path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(extra: &[&str]) -> Args {
        Args::try_parse_from(["mapsmith-tools"].iter().chain(extra)).expect("valid arguments")
    }

    #[test]
    fn archetype_and_mood_parse_case_insensitively() {
        assert_eq!(parse_archetype("Forest"), Ok(Archetype::Forest));
        assert_eq!(parse_mood("EERIE"), Ok(Mood::Eerie));
        assert!(parse_archetype("swamp").is_err());
    }

    #[test]
    fn numeric_seed_text_becomes_a_number() {
        assert_eq!(parse_seed("42"), Seed::Number(42));
        assert_eq!(parse_seed("test-1"), Seed::Text("test-1".to_string()));
    }

    #[test]
    fn later_maps_in_a_batch_get_derived_seeds() {
        let batch = build_options(&args(&["--seed", "cellar", "--count", "3"])).expect("batch");
        let seeds: Vec<String> =
            batch.iter().filter_map(|options| options.seed.as_ref().map(Seed::as_text)).collect();
        assert_eq!(seeds, ["cellar", "cellar-1", "cellar-2"]);
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(build_options(&args(&["--count", "0"])).is_err());
    }

    #[test]
    fn flags_flow_into_generation_options() {
        let batch = build_options(&args(&[
            "--archetype",
            "cave",
            "--width",
            "50",
            "--spaces",
            "3",
            "--organic",
            "0.9",
        ]))
        .expect("batch");
        let options = &batch[0];
        assert_eq!(options.archetype, Archetype::Cave);
        assert_eq!(options.width, 50);
        assert_eq!(options.space_count, 3);
        assert_eq!(options.organic_factor, 0.9);
        assert_eq!(options.seed, None);
    }
}
