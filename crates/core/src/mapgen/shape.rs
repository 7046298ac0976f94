//! Space footprints: axis-aligned rectangles and noisy radial polygons.

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Size};

use super::grid::{Rect, polygon_contains_cell};
use super::seed::SeededRng;

const MIN_ORGANIC_POINTS: u32 = 8;
const MAX_ORGANIC_POINTS: u32 = 16;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Rect { origin: Pos, size: Size },
    /// Perimeter points in ascending angle around the polygon's center.
    Polygon { points: Vec<Pos> },
}

impl Shape {
    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rect { origin, size } => Rect::new(*origin, *size),
            Shape::Polygon { points } => {
                let min_x = points.iter().map(|point| point.x).min().unwrap_or(0);
                let max_x = points.iter().map(|point| point.x).max().unwrap_or(0);
                let min_y = points.iter().map(|point| point.y).min().unwrap_or(0);
                let max_y = points.iter().map(|point| point.y).max().unwrap_or(0);
                Rect {
                    x: min_x,
                    y: min_y,
                    width: (max_x - min_x).max(1),
                    height: (max_y - min_y).max(1),
                }
            }
        }
    }

    pub fn contains(&self, cell: Pos) -> bool {
        match self {
            Shape::Rect { origin, size } => Rect::new(*origin, *size).contains(cell),
            Shape::Polygon { points } => polygon_contains_cell(points, cell),
        }
    }

    /// Occupied cells: a bounding-box scan filtered by [`Shape::contains`].
    pub fn cells(&self) -> BTreeSet<Pos> {
        self.bounds().cells().filter(|&cell| self.contains(cell)).collect()
    }
}

pub fn rectangle(origin: Pos, size: Size) -> Shape {
    Shape::Rect { origin, size }
}

/// Samples 8-16 evenly spaced angles and perturbs each radius by up to
/// `base_radius * organic_factor * 0.5`. A zero factor yields a regular polygon.
pub fn organic(rng: &mut SeededRng, center: Pos, base_radius: f64, organic_factor: f64) -> Shape {
    let factor = organic_factor.clamp(0.0, 1.0);
    let point_count =
        MIN_ORGANIC_POINTS + rng.next_int(MAX_ORGANIC_POINTS - MIN_ORGANIC_POINTS + 1);

    let mut points = Vec::with_capacity(point_count as usize);
    for index in 0..point_count {
        let (cos, sin) = unit_circle(index, point_count);
        let jitter = rng.signed_unit() * base_radius * factor * 0.5;
        let radius = (base_radius + jitter).max(1.0);
        points.push(Pos {
            y: center.y + (radius * sin).round() as i32,
            x: center.x + (radius * cos).round() as i32,
        });
    }
    points.dedup();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    Shape::Polygon { points }
}

/// `(cos, sin)` of `index / count` of a full turn.
///
/// The platform `sin`/`cos` are not correctly rounded and may differ between libm builds.
/// This folds the angle into `[-pi/4, pi/4]` with integer arithmetic and sums a fixed Taylor
/// series, so only IEEE-exact `+ - * /` touch the result.
fn unit_circle(index: u32, count: u32) -> (f64, f64) {
    let count = i64::from(count.max(1));
    let quarters = 4 * i64::from(index);
    let quadrant = (2 * quarters + count) / (2 * count);
    let remainder = quarters - quadrant * count;
    let x = FRAC_PI_2 * remainder as f64 / count as f64;

    let x2 = x * x;
    let (mut sin, mut cos) = (x, 1.0);
    let (mut sin_term, mut cos_term) = (x, 1.0);
    for k in 1..=8 {
        let k = f64::from(k);
        sin_term *= -x2 / ((2.0 * k) * (2.0 * k + 1.0));
        cos_term *= -x2 / ((2.0 * k - 1.0) * (2.0 * k));
        sin += sin_term;
        cos += cos_term;
    }

    match quadrant % 4 {
        0 => (cos, sin),
        1 => (-sin, cos),
        2 => (-cos, -sin),
        _ => (sin, -cos),
    }
}

/// Farthest a point of [`organic`] can land from its center.
pub fn organic_extent(base_radius: f64, organic_factor: f64) -> i32 {
    (base_radius * (1.0 + organic_factor.clamp(0.0, 1.0) * 0.5)).max(1.0).ceil() as i32 + 1
}
