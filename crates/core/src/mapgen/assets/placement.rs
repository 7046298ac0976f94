//! Rarity-ordered, collision-free placement of candidate assets.

use std::borrow::Cow;
use std::cmp::Reverse;

use log::debug;

use crate::mapgen::assemble::{PlacementSurface, TerrainClass};
use crate::mapgen::grid::{Rect, cell_index};
use crate::mapgen::seed::SeededRng;
use crate::types::{Pos, Size};

use super::rules::{CENTER_CLEARANCE, DistanceField, all_on_terrain, sits_in_corner, touches_edge};
use super::{GeneratedAsset, PlacedAsset, PlacementRule, RuleTarget};

/// Fields that depend only on the surface, built once per placement run.
struct SurfaceFields {
    walls: DistanceField,
    doors: DistanceField,
    paths: DistanceField,
    clearance: DistanceField,
}

impl SurfaceFields {
    fn new(surface: &PlacementSurface) -> Self {
        let size = surface.size();
        Self {
            walls: DistanceField::from_sources(size, surface.cells_of(TerrainClass::Wall)),
            doors: DistanceField::from_sources(size, surface.cells_of(TerrainClass::Door)),
            paths: DistanceField::from_sources(size, surface.cells_of(TerrainClass::Path)),
            clearance: DistanceField::clearance(surface),
        }
    }
}

struct Occupancy {
    size: Size,
    taken: Vec<bool>,
}

impl Occupancy {
    fn new(size: Size) -> Self {
        let area = usize::try_from(size.area()).unwrap_or(0);
        Self { size, taken: vec![false; area] }
    }

    fn is_free(&self, footprint: Rect) -> bool {
        footprint.cells().all(|cell| !self.taken[cell_index(cell, self.size.width)])
    }

    fn claim(&mut self, footprint: Rect) {
        for cell in footprint.cells() {
            self.taken[cell_index(cell, self.size.width)] = true;
        }
    }
}

/// Places candidates rarest first. An asset left with no legal position is omitted.
///
/// Soft rules roll once per candidate position and are skipped for that position when the
/// roll fails. `Corner` is structural and always applies.
pub fn place(
    mut candidates: Vec<GeneratedAsset>,
    surface: &PlacementSurface,
    rng: &mut SeededRng,
) -> Vec<PlacedAsset> {
    candidates.sort_by_key(|asset| Reverse(asset.rarity));

    let fields = SurfaceFields::new(surface);
    let mut occupancy = Occupancy::new(surface.size());
    let mut placed: Vec<PlacedAsset> = Vec::with_capacity(candidates.len());

    for asset in candidates {
        let positions = {
            let targets: Vec<Option<Cow<'_, DistanceField>>> = asset
                .rules
                .iter()
                .map(|rule| rule_target(rule).map(|t| target_field(t, surface, &fields, &placed)))
                .collect();
            let mut positions = open_positions(&occupancy, asset.size);
            positions.retain(|&pos| {
                let footprint = Rect::new(pos, asset.size);
                asset.rules.iter().zip(&targets).all(|(rule, target)| {
                    let enforced = matches!(rule, PlacementRule::Corner { .. })
                        || rng.chance(rule.probability());
                    !enforced || rule_holds(rule, target.as_deref(), footprint, surface, &fields)
                })
            });
            positions
        };

        let Some(&pos) = rng.choice(&positions) else {
            debug!("omitting {} ({}): no legal position", asset.id, asset.key);
            continue;
        };
        let item = PlacedAsset { asset, pos };
        occupancy.claim(item.footprint());
        placed.push(item);
    }
    placed
}

/// Row-major top-left anchors whose footprint fits the map and is unoccupied.
fn open_positions(occupancy: &Occupancy, asset_size: Size) -> Vec<Pos> {
    let map = occupancy.size;
    let mut positions = Vec::new();
    for y in 0..=(map.height - asset_size.height) {
        for x in 0..=(map.width - asset_size.width) {
            let pos = Pos { y, x };
            if occupancy.is_free(Rect::new(pos, asset_size)) {
                positions.push(pos);
            }
        }
    }
    positions
}

fn rule_target(rule: &PlacementRule) -> Option<RuleTarget> {
    match *rule {
        PlacementRule::Near { target, .. } | PlacementRule::Avoid { target, .. } => Some(target),
        _ => None,
    }
}

fn rule_holds(
    rule: &PlacementRule,
    target: Option<&DistanceField>,
    footprint: Rect,
    surface: &PlacementSurface,
    fields: &SurfaceFields,
) -> bool {
    match *rule {
        PlacementRule::Near { max_distance, .. } => match target {
            // Nothing to be near: the rule has no meaning on this map.
            Some(field) if field.has_sources() => field.nearest_in(footprint) <= max_distance,
            _ => true,
        },
        PlacementRule::Avoid { min_distance, .. } => {
            target.is_none_or(|field| field.nearest_in(footprint) >= min_distance)
        }
        PlacementRule::OnTerrain { terrain, .. } => {
            !surface.has_terrain(terrain) || all_on_terrain(surface, footprint, terrain)
        }
        PlacementRule::Edge { .. } => touches_edge(surface, footprint),
        PlacementRule::Center { .. } => {
            fields.clearance.nearest_in(footprint) >= CENTER_CLEARANCE
        }
        PlacementRule::Corner { .. } => sits_in_corner(surface, footprint),
    }
}

fn target_field<'a>(
    target: RuleTarget,
    surface: &PlacementSurface,
    fields: &'a SurfaceFields,
    placed: &[PlacedAsset],
) -> Cow<'a, DistanceField> {
    match target {
        RuleTarget::Wall => Cow::Borrowed(&fields.walls),
        RuleTarget::Door => Cow::Borrowed(&fields.doors),
        RuleTarget::Path => Cow::Borrowed(&fields.paths),
        RuleTarget::Asset(category) => Cow::Owned(DistanceField::from_sources(
            surface.size(),
            placed
                .iter()
                .filter(|item| item.asset.category == category)
                .flat_map(|item| item.footprint().cells()),
        )),
    }
}
