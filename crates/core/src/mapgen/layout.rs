//! Space placement: randomized retry placement with a separation buffer, plus door carving.

use std::collections::BTreeSet;

use log::debug;

use crate::types::{Pos, Size};

use super::archetype::{ArchetypeProfile, ShapeStyle};
use super::edges;
use super::grid::Rect;
use super::model::{Space, SpaceKind};
use super::seed::SeededRng;
use super::shape::{self, Shape};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutRequest {
    pub map_size: Size,
    pub space_count: u32,
    pub min_size: i32,
    pub max_size: i32,
    pub organic_factor: f64,
    pub placement_attempts: u32,
}

/// Places up to `space_count` spaces. A space that finds no free spot within its attempt
/// budget is skipped, so the result may be shorter than requested.
pub fn plan_spaces(
    rng: &mut SeededRng,
    profile: &ArchetypeProfile,
    request: &LayoutRequest,
) -> Vec<Space> {
    let (min_size, max_size) = profile.space_size_range(request.min_size, request.max_size);
    let largest_fit = request.map_size.width.min(request.map_size.height) - 2;
    let max_size = max_size.min(largest_fit).max(min_size);

    let mut spaces: Vec<Space> = Vec::new();
    for index in 0..request.space_count {
        let placed = match profile.shape_style {
            ShapeStyle::Rectangular => {
                try_place_rectangle(rng, profile, request, min_size, max_size, &spaces)
            }
            ShapeStyle::Organic => {
                try_place_organic(rng, profile, request, min_size, max_size, &spaces)
            }
        };

        let Some(shape) = placed else {
            debug!(
                "skipping space {index}: no free position after {} attempts",
                request.placement_attempts
            );
            continue;
        };

        let cells = shape.cells();
        let doors = generate_doors(rng, &cells);
        let kind = rng.choice(profile.kinds).copied().unwrap_or(SpaceKind::Chamber);
        spaces.push(Space {
            id: format!("space-{}", spaces.len()),
            kind,
            bounds: shape.bounds(),
            shape,
            doors,
        });
    }
    spaces
}

fn try_place_rectangle(
    rng: &mut SeededRng,
    profile: &ArchetypeProfile,
    request: &LayoutRequest,
    min_size: i32,
    max_size: i32,
    placed: &[Space],
) -> Option<Shape> {
    let map = request.map_size;
    let width = rng.range_i32(min_size, max_size);
    let height = rng.range_i32(min_size, max_size);
    let max_x = map.width - width - 1;
    let max_y = map.height - height - 1;
    if max_x < 1 || max_y < 1 {
        return None;
    }

    for _ in 0..request.placement_attempts {
        let origin = Pos { y: rng.range_i32(1, max_y), x: rng.range_i32(1, max_x) };
        let candidate = Rect::new(origin, Size { width, height });
        if is_clear(candidate, profile.buffer, placed) {
            return Some(shape::rectangle(origin, candidate.size()));
        }
    }
    None
}

fn try_place_organic(
    rng: &mut SeededRng,
    profile: &ArchetypeProfile,
    request: &LayoutRequest,
    min_size: i32,
    max_size: i32,
    placed: &[Space],
) -> Option<Shape> {
    let map = request.map_size;
    let factor = request.organic_factor;
    let diameter = rng.range_i32(min_size, max_size);

    let limit = (map.width.min(map.height) - 3) / 2;
    let widest_radius = (f64::from(limit - 1) / (1.0 + factor * 0.5)).max(1.0);
    let radius = (f64::from(diameter) / 2.0).clamp(1.0, widest_radius);
    let extent = shape::organic_extent(radius, factor);
    let (low_x, high_x) = (extent, map.width - 1 - extent);
    let (low_y, high_y) = (extent, map.height - 1 - extent);
    if low_x > high_x || low_y > high_y {
        return None;
    }

    for _ in 0..request.placement_attempts {
        let center = Pos { y: rng.range_i32(low_y, high_y), x: rng.range_i32(low_x, high_x) };
        let candidate = shape::organic(rng, center, radius, factor);
        let bounds = candidate.bounds();
        if !bounds.fits_within(map) || candidate.cells().is_empty() {
            continue;
        }
        if is_clear(bounds, profile.buffer, placed) {
            return Some(candidate);
        }
    }
    None
}

fn is_clear(candidate: Rect, buffer: i32, placed: &[Space]) -> bool {
    let candidate_with_margin = candidate.expanded(buffer);
    !placed.iter().any(|existing| existing.bounds.intersects(&candidate_with_margin))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    North,
    East,
    South,
    West,
}

const SIDES: [Side; 4] = [Side::North, Side::East, Side::South, Side::West];

impl Side {
    fn outward(self, cell: Pos) -> Pos {
        match self {
            Side::North => cell.offset(0, -1),
            Side::East => cell.offset(1, 0),
            Side::South => cell.offset(0, 1),
            Side::West => cell.offset(-1, 0),
        }
    }

    fn inward(self, cell: Pos) -> Pos {
        match self {
            Side::North => cell.offset(0, 1),
            Side::East => cell.offset(-1, 0),
            Side::South => cell.offset(0, -1),
            Side::West => cell.offset(1, 0),
        }
    }

    fn flanks(self, cell: Pos) -> [Pos; 2] {
        match self {
            Side::North | Side::South => [cell.offset(-1, 0), cell.offset(1, 0)],
            Side::East | Side::West => [cell.offset(0, -1), cell.offset(0, 1)],
        }
    }
}

/// Largest 4-connected region of interior cells; the first region in scan order wins ties.
fn main_floor(cells: &BTreeSet<Pos>) -> BTreeSet<Pos> {
    let mut unvisited = edges::classify(cells).interior;
    let mut largest = BTreeSet::new();
    while let Some(start) = unvisited.pop_first() {
        let mut region = BTreeSet::from([start]);
        let mut open = vec![start];
        while let Some(cell) = open.pop() {
            for next in cell.orthogonal_neighbors() {
                if unvisited.remove(&next) {
                    region.insert(next);
                    open.push(next);
                }
            }
        }
        if region.len() > largest.len() {
            largest = region;
        }
    }
    largest
}

/// One or two doors on distinct sides. A door is a perimeter cell whose outward neighbour is
/// outside the footprint and whose inward neighbour is on [`main_floor`]. Corner cells are
/// avoided when the side has anything else. A side with no such cell gets no door, and
/// corridors fall back to the space centre.
fn generate_doors(rng: &mut SeededRng, cells: &BTreeSet<Pos>) -> Vec<Pos> {
    let door_count = 1 + rng.next_int(2);
    let first_side = rng.next_int(4) as usize;
    let mut sides = vec![SIDES[first_side]];
    if door_count == 2 {
        sides.push(SIDES[(first_side + 1 + rng.next_int(3) as usize) % 4]);
    }

    let floor = main_floor(cells);
    let mut doors = Vec::with_capacity(sides.len());
    for side in sides {
        let perimeter: Vec<Pos> = cells
            .iter()
            .copied()
            .filter(|&cell| {
                !cells.contains(&side.outward(cell)) && floor.contains(&side.inward(cell))
            })
            .collect();
        let mid_wall: Vec<Pos> = perimeter
            .iter()
            .copied()
            .filter(|&cell| side.flanks(cell).iter().all(|flank| cells.contains(flank)))
            .collect();
        let pool = if mid_wall.is_empty() { &perimeter } else { &mid_wall };
        if let Some(&door) = rng.choice(pool) {
            doors.push(door);
        }
    }
    doors
}
