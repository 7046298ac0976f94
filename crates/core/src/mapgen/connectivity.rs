//! Minimum-spanning-tree connection of spaces and path synthesis for each tree edge.

use log::debug;

use crate::types::{Pos, Size};

use super::archetype::{ArchetypeProfile, PathStyle};
use super::grid::clamp_to_bounds;
use super::model::{PathSegment, Space, Waypoint};
use super::seed::SeededRng;
use super::tuning::Tuning;

/// Prim over Euclidean distance between `centers`, grown from index 0. Squared integer
/// distances keep comparisons exact; ties go to the lowest `(connected, pending)` pair.
pub fn mst_edges(centers: &[Pos]) -> Vec<(usize, usize)> {
    if centers.len() < 2 {
        return Vec::new();
    }

    let mut connected_indices = vec![0_usize];
    let mut pending_indices: Vec<usize> = (1..centers.len()).collect();
    let mut edges = Vec::with_capacity(centers.len() - 1);

    while !pending_indices.is_empty() {
        let mut best_choice: Option<(i64, usize, usize)> = None;
        for &connected_index in &connected_indices {
            for &pending_index in &pending_indices {
                let distance = centers[connected_index].squared_distance(centers[pending_index]);
                let candidate = (distance, connected_index, pending_index);
                if best_choice.is_none_or(|best| candidate < best) {
                    best_choice = Some(candidate);
                }
            }
        }

        let Some((_, connected_index, pending_index)) = best_choice else {
            break;
        };
        edges.push((connected_index, pending_index));
        connected_indices.push(pending_index);
        pending_indices.retain(|&index| index != pending_index);
    }
    edges
}

pub struct PathPlanner<'a> {
    pub profile: &'a ArchetypeProfile,
    pub tuning: &'a Tuning,
    pub map_size: Size,
}

impl PathPlanner<'_> {
    /// One segment per spanning-tree edge; fewer than two spaces yield no segments.
    pub fn plan(&self, rng: &mut SeededRng, spaces: &[Space]) -> Vec<PathSegment> {
        if spaces.len() < 2 {
            debug!("{} space(s) placed, no paths needed", spaces.len());
            return Vec::new();
        }

        let centers: Vec<Pos> = spaces.iter().map(Space::center).collect();
        mst_edges(&centers)
            .into_iter()
            .enumerate()
            .map(|(index, (from_index, to_index))| {
                let from = &spaces[from_index];
                let to = &spaces[to_index];
                let start = anchor_point(from, to.center());
                let end = anchor_point(to, from.center());
                let waypoints = match self.profile.path_style {
                    PathStyle::Organic => self.organic_waypoints(rng, start, end),
                    PathStyle::Corridor => self.corridor_waypoints(rng, start, end),
                };
                PathSegment {
                    id: format!("path-{index}"),
                    waypoints,
                    width: self.profile.path_width,
                    connects: (from.id.clone(), to.id.clone()),
                }
            })
            .collect()
    }

    fn organic_waypoints(&self, rng: &mut SeededRng, start: Pos, end: Pos) -> Vec<Waypoint> {
        let (sx, sy) = (f64::from(start.x), f64::from(start.y));
        let (ex, ey) = (f64::from(end.x), f64::from(end.y));
        let (dx, dy) = (ex - sx, ey - sy);
        let distance = (dx * dx + dy * dy).sqrt();

        let (perp_x, perp_y) =
            if distance > 0.0 { (-dy / distance, dx / distance) } else { (0.0, 0.0) };
        let offset = rng.signed_unit() * distance * self.tuning.curve_offset_factor;
        let control_x = (sx + ex) / 2.0 + perp_x * offset;
        let control_y = (sy + ey) / 2.0 + perp_y * offset;

        let samples = self.tuning.min_curve_samples.max(distance.ceil() as usize + 1).max(2);
        let mut sampled = Vec::with_capacity(samples);
        for index in 0..samples {
            let t = index as f64 / (samples - 1) as f64;
            let inv = 1.0 - t;
            let mut x = inv * inv * sx + 2.0 * inv * t * control_x + t * t * ex;
            let mut y = inv * inv * sy + 2.0 * inv * t * control_y + t * t * ey;
            if index > 0 && index + 1 < samples {
                x += rng.signed_unit() * self.tuning.organic_wobble;
                y += rng.signed_unit() * self.tuning.organic_wobble;
            }
            let pos =
                clamp_to_bounds(Pos { y: y.round() as i32, x: x.round() as i32 }, self.map_size);
            let width = self.varied_width(rng, self.tuning.organic_width_chance);
            sampled.push(Waypoint { pos, width });
        }
        if let Some(first) = sampled.first_mut() {
            first.pos = start;
        }
        if let Some(last) = sampled.last_mut() {
            last.pos = end;
        }
        sampled.dedup_by_key(|waypoint| waypoint.pos);
        densify(&sampled)
    }

    fn corridor_waypoints(&self, rng: &mut SeededRng, start: Pos, end: Pos) -> Vec<Waypoint> {
        let mut walk = CorridorWalk {
            cursor: start,
            steps: 0,
            waypoints: vec![Waypoint { pos: start, width: None }],
        };
        let legs = if rng.next_bool() { [Axis::X, Axis::Y] } else { [Axis::Y, Axis::X] };
        for axis in legs {
            self.walk_axis(rng, &mut walk, axis, end, true);
        }
        // Drift on the second leg can leave the cursor off target; finish straight.
        self.walk_axis(rng, &mut walk, Axis::X, end, false);
        self.walk_axis(rng, &mut walk, Axis::Y, end, false);
        walk.waypoints
    }

    fn walk_axis(
        &self,
        rng: &mut SeededRng,
        walk: &mut CorridorWalk,
        axis: Axis,
        end: Pos,
        wander: bool,
    ) {
        let interval = self.tuning.corridor_wander_interval;
        while axis.get(walk.cursor) != axis.get(end) {
            let direction = (axis.get(end) - axis.get(walk.cursor)).signum();
            walk.cursor = axis.step(walk.cursor, direction);
            walk.steps += 1;
            let width = self.varied_width(rng, self.tuning.corridor_width_chance);
            walk.waypoints.push(Waypoint { pos: walk.cursor, width });

            let checkpoint = interval > 0 && walk.steps % interval == 0;
            if wander && checkpoint && rng.chance(self.tuning.corridor_wander_chance) {
                let lateral = if rng.next_bool() { 1 } else { -1 };
                let drifted =
                    clamp_to_bounds(axis.other().step(walk.cursor, lateral), self.map_size);
                if drifted != walk.cursor {
                    walk.cursor = drifted;
                    walk.waypoints.push(Waypoint { pos: drifted, width });
                }
            }
        }
    }

    fn varied_width(&self, rng: &mut SeededRng, chance: f64) -> Option<i32> {
        if !rng.chance(chance) {
            return None;
        }
        let (min_width, max_width) = self.profile.path_width_bounds();
        let magnitude = 1 + rng.next_int(self.profile.path_width_variance.max(1) as u32) as i32;
        let delta = if rng.next_bool() { magnitude } else { -magnitude };
        Some((self.profile.path_width + delta).clamp(min_width, max_width))
    }
}

struct CorridorWalk {
    cursor: Pos,
    steps: u32,
    waypoints: Vec<Waypoint>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

impl Axis {
    fn get(self, pos: Pos) -> i32 {
        match self {
            Axis::X => pos.x,
            Axis::Y => pos.y,
        }
    }

    fn step(self, pos: Pos, delta: i32) -> Pos {
        match self {
            Axis::X => pos.offset(delta, 0),
            Axis::Y => pos.offset(0, delta),
        }
    }

    fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Door or center of `space` closest to `toward`; earlier candidates win ties.
fn anchor_point(space: &Space, toward: Pos) -> Pos {
    let mut best = space.center();
    let mut best_distance = best.squared_distance(toward);
    for &door in &space.doors {
        let distance = door.squared_distance(toward);
        if distance < best_distance {
            best = door;
            best_distance = distance;
        }
    }
    best
}

/// Fills gaps between sampled waypoints so consecutive waypoints are at most one cell apart
/// on each axis.
fn densify(sampled: &[Waypoint]) -> Vec<Waypoint> {
    let mut dense: Vec<Waypoint> = Vec::with_capacity(sampled.len() * 2);
    for pair in sampled.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        dense.push(from);
        let steps = (to.pos.x - from.pos.x).abs().max((to.pos.y - from.pos.y).abs());
        for step in 1..steps {
            let t = f64::from(step) / f64::from(steps);
            let pos = Pos {
                y: (f64::from(from.pos.y) + f64::from(to.pos.y - from.pos.y) * t).round() as i32,
                x: (f64::from(from.pos.x) + f64::from(to.pos.x - from.pos.x) * t).round() as i32,
            };
            dense.push(Waypoint { pos, width: from.width });
        }
    }
    if let Some(&last) = sampled.last() {
        dense.push(last);
    }
    dense.dedup_by_key(|waypoint| waypoint.pos);
    dense
}
