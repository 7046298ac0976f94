//! Archetype color palettes and the per-run theme selection.

use std::fmt;
use std::ops::Range;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::types::Archetype;

use super::seed::SeededRng;

/// Dungeon palettes are a base palette scaled by this factor.
const DUNGEON_DARKEN_FACTOR: f64 = 0.55;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('#').unwrap_or(text);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |range: Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Self { r: channel(0..2)?, g: channel(2..4)?, b: channel(4..6)? })
    }

    pub fn darken(self, factor: f64) -> Self {
        let scale = |channel: u8| (f64::from(channel) * factor).round().clamp(0.0, 255.0) as u8;
        Self { r: scale(self.r), g: scale(self.g), b: scale(self.b) }
    }

    /// WCAG relative luminance.
    pub fn relative_luminance(self) -> f64 {
        let linear = |channel: u8| {
            let value = f64::from(channel) / 255.0;
            if value <= 0.039_28 { value / 12.92 } else { ((value + 0.055) / 1.055).powf(2.4) }
        };
        0.2126 * linear(self.r) + 0.7152 * linear(self.g) + 0.0722 * linear(self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Rgb::from_hex(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid color '{text}', expected #rrggbb")))
    }
}

pub fn contrast_ratio(first: Rgb, second: Rgb) -> f64 {
    let (a, b) = (first.relative_luminance(), second.relative_luminance());
    let (lighter, darker) = if a >= b { (a, b) } else { (b, a) };
    (lighter + 0.05) / (darker + 0.05)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub background: Rgb,
    pub path: Rgb,
    pub accent: Rgb,
    pub grid_line: Rgb,
    pub contrast_ratio: f64,
}

#[derive(Clone, Copy, Debug)]
struct Palette {
    background: Rgb,
    path: Rgb,
    accent: Rgb,
    grid_line: Rgb,
}

impl Palette {
    const fn new(background: Rgb, path: Rgb, accent: Rgb, grid_line: Rgb) -> Self {
        Self { background, path, accent, grid_line }
    }

    fn darken(self, factor: f64) -> Self {
        Self {
            background: self.background.darken(factor),
            path: self.path.darken(factor),
            accent: self.accent.darken(factor),
            grid_line: self.grid_line.darken(factor),
        }
    }

    fn into_theme(self) -> ColorTheme {
        ColorTheme {
            background: self.background,
            path: self.path,
            accent: self.accent,
            grid_line: self.grid_line,
            contrast_ratio: contrast_ratio(self.background, self.path),
        }
    }
}

const HOUSE_PALETTES: [Palette; 3] = [
    Palette::new(
        Rgb::new(0x3b, 0x2f, 0x2a),
        Rgb::new(0xd9, 0xc3, 0xa5),
        Rgb::new(0x8b, 0x5a, 0x3c),
        Rgb::new(0x5a, 0x4a, 0x42),
    ),
    Palette::new(
        Rgb::new(0x2e, 0x2a, 0x27),
        Rgb::new(0xe8, 0xd8, 0xc0),
        Rgb::new(0xa0, 0x52, 0x2d),
        Rgb::new(0x4d, 0x45, 0x40),
    ),
    Palette::new(
        Rgb::new(0x40, 0x35, 0x30),
        Rgb::new(0xcd, 0xb3, 0x8f),
        Rgb::new(0x6f, 0x4e, 0x37),
        Rgb::new(0x5c, 0x4d, 0x45),
    ),
];

const FOREST_PALETTES: [Palette; 3] = [
    Palette::new(
        Rgb::new(0x1f, 0x3b, 0x1f),
        Rgb::new(0x8f, 0xbc, 0x5a),
        Rgb::new(0x4e, 0x7d, 0x2e),
        Rgb::new(0x2f, 0x5a, 0x2f),
    ),
    Palette::new(
        Rgb::new(0x23, 0x3d, 0x2b),
        Rgb::new(0xa3, 0xc2, 0x7a),
        Rgb::new(0x5b, 0x8c, 0x3a),
        Rgb::new(0x35, 0x57, 0x3d),
    ),
    Palette::new(
        Rgb::new(0x1a, 0x2f, 0x1d),
        Rgb::new(0x9b, 0xb0, 0x68),
        Rgb::new(0x3f, 0x6b, 0x35),
        Rgb::new(0x2a, 0x4a, 0x30),
    ),
];

const CAVE_PALETTES: [Palette; 3] = [
    Palette::new(
        Rgb::new(0x1c, 0x1c, 0x22),
        Rgb::new(0x7d, 0x7a, 0x73),
        Rgb::new(0x4b, 0x4a, 0x55),
        Rgb::new(0x2d, 0x2d, 0x36),
    ),
    Palette::new(
        Rgb::new(0x21, 0x1d, 0x1a),
        Rgb::new(0x8c, 0x82, 0x73),
        Rgb::new(0x5a, 0x4f, 0x45),
        Rgb::new(0x33, 0x2d, 0x28),
    ),
    Palette::new(
        Rgb::new(0x17, 0x19, 0x1f),
        Rgb::new(0x6f, 0x7c, 0x85),
        Rgb::new(0x3e, 0x4a, 0x56),
        Rgb::new(0x26, 0x2b, 0x33),
    ),
];

const TOWN_PALETTES: [Palette; 3] = [
    Palette::new(
        Rgb::new(0x2f, 0x34, 0x37),
        Rgb::new(0xc9, 0xb7, 0x9c),
        Rgb::new(0x7a, 0x6a, 0x58),
        Rgb::new(0x47, 0x4d, 0x51),
    ),
    Palette::new(
        Rgb::new(0x33, 0x30, 0x2c),
        Rgb::new(0xd6, 0xc7, 0xa1),
        Rgb::new(0x8a, 0x73, 0x54),
        Rgb::new(0x4a, 0x46, 0x40),
    ),
    Palette::new(
        Rgb::new(0x2b, 0x32, 0x36),
        Rgb::new(0xbf, 0xc5, 0xc2),
        Rgb::new(0x6b, 0x7b, 0x80),
        Rgb::new(0x43, 0x4b, 0x50),
    ),
];

const DUNGEON_BASES: [Archetype; 4] =
    [Archetype::House, Archetype::Forest, Archetype::Cave, Archetype::Town];

fn palettes(archetype: Archetype) -> &'static [Palette] {
    match archetype {
        Archetype::House => &HOUSE_PALETTES,
        Archetype::Forest => &FOREST_PALETTES,
        Archetype::Cave | Archetype::Dungeon => &CAVE_PALETTES,
        Archetype::Town => &TOWN_PALETTES,
    }
}

/// Picks one palette for the run. Dungeons first pick a base archetype, then darken its
/// palette.
pub fn select_theme(archetype: Archetype, rng: &mut SeededRng) -> ColorTheme {
    match archetype {
        Archetype::Dungeon => {
            let base = rng.choice(&DUNGEON_BASES).copied().unwrap_or(Archetype::Cave);
            let palette = pick_palette(base, rng);
            palette.darken(DUNGEON_DARKEN_FACTOR).into_theme()
        }
        _ => pick_palette(archetype, rng).into_theme(),
    }
}

fn pick_palette(archetype: Archetype, rng: &mut SeededRng) -> Palette {
    let options = palettes(archetype);
    rng.choice(options).copied().unwrap_or(CAVE_PALETTES[0])
}
