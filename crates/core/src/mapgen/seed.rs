//! Deterministic seed hashing and the pseudo-random stream every generation stage draws from.

use std::fmt;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// User-facing seed. Numbers are normalized to their decimal text, so `42` and `"42"`
/// produce the same stream.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(u64),
    Text(String),
}

impl Seed {
    pub fn as_text(&self) -> String {
        match self {
            Seed::Number(value) => value.to_string(),
            Seed::Text(text) => text.clone(),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for Seed {
    fn from(text: &str) -> Self {
        Seed::Text(text.to_string())
    }
}

impl From<String> for Seed {
    fn from(text: String) -> Self {
        Seed::Text(text)
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Seed::Number(value)
    }
}

/// Counter-based stream over a 64-bit state hashed from the seed text.
///
/// One instance belongs to exactly one generation run. Every draw advances the counter, so
/// interleaved draws from two callers would change both outputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeededRng {
    state: u64,
    counter: u64,
}

impl SeededRng {
    pub fn new(seed: &Seed) -> Self {
        Self::from_text(&seed.as_text())
    }

    pub fn from_text(text: &str) -> Self {
        Self { state: xxh3_64(text.as_bytes()), counter: 0 }
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_text(&value.to_string())
    }

    pub fn next_u64(&mut self) -> u64 {
        let value = mix_seed_stream(self.state, self.counter);
        self.counter = self.counter.wrapping_add(1);
        value
    }

    /// Uniform float in `[0, 1)` built from the top 53 bits of one draw.
    pub fn next_float(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }

    /// Uniform integer in `[0, bound)`; a zero bound yields zero.
    pub fn next_int(&mut self, bound: u32) -> u32 {
        self.next_below(u64::from(bound)) as u32
    }

    pub fn next_below(&mut self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        ((u128::from(self.next_u64()) * u128::from(bound)) >> 64) as u64
    }

    pub fn range_i32(&mut self, min_value: i32, max_value: i32) -> i32 {
        debug_assert!(min_value <= max_value);
        let span = (i64::from(max_value) - i64::from(min_value) + 1) as u64;
        (i64::from(min_value) + self.next_below(span) as i64) as i32
    }

    pub fn next_bool(&mut self) -> bool {
        self.next_u64() >> 63 == 1
    }

    /// Always consumes one draw, even for probabilities of zero or one, so the stream position
    /// never depends on tuning values.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_float() < probability
    }

    /// Uniform float in `[-1, 1)`.
    pub fn signed_unit(&mut self) -> f64 {
        self.next_float() * 2.0 - 1.0
    }

    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.next_below(items.len() as u64) as usize;
        items.get(index)
    }

    pub fn weighted_index(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&weight| u64::from(weight)).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.next_below(total);
        for (index, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if roll < weight {
                return Some(index);
            }
            roll -= weight;
        }
        None
    }
}

fn mix_seed_stream(seed: u64, stream: u64) -> u64 {
    let mut mixed = seed ^ stream.wrapping_mul(0xD6E8_FD9A_5B89_7A4D);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}

static RUNTIME_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Fresh seed text for callers that did not supply one.
pub fn runtime_seed() -> String {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let pid = u64::from(process::id());
    let counter = RUNTIME_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);

    let entropy = (now_nanos as u64)
        ^ ((now_nanos >> 64) as u64)
        ^ pid.rotate_left(17)
        ^ counter.rotate_left(7);

    format!("{:016x}", mix_seed_stream(entropy, counter))
}
