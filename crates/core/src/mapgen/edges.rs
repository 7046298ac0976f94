//! Footprint rasterization and the edge/interior split that turns footprints into walls and
//! floors.
//!
//! Classification is always per footprint. Two spaces that happen to touch keep their own
//! walls because a cell is only ever compared against its own footprint's cell set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Size};

use super::model::{PathSegment, Space};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeMap {
    pub edges: BTreeSet<Pos>,
    pub interior: BTreeSet<Pos>,
}

impl EdgeMap {
    pub fn len(&self) -> usize {
        self.edges.len() + self.interior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty() && self.interior.is_empty()
    }

    pub fn contains(&self, cell: &Pos) -> bool {
        self.edges.contains(cell) || self.interior.contains(cell)
    }
}

/// A cell is an edge when any orthogonal neighbour is missing from `cells`.
pub fn classify(cells: &BTreeSet<Pos>) -> EdgeMap {
    let mut edge_map = EdgeMap::default();
    for &cell in cells {
        if cell.orthogonal_neighbors().iter().all(|neighbor| cells.contains(neighbor)) {
            edge_map.interior.insert(cell);
        } else {
            edge_map.edges.insert(cell);
        }
    }
    edge_map
}

pub fn space_cells(space: &Space) -> BTreeSet<Pos> {
    space.shape.cells()
}

/// Every waypoint stamps a square of its local width, clipped to the map.
pub fn path_cells(path: &PathSegment, map_size: Size) -> BTreeSet<Pos> {
    let mut cells = BTreeSet::new();
    for waypoint in &path.waypoints {
        let width = path.width_at(waypoint).max(1);
        let low = -(width / 2);
        let high = (width - 1) / 2;
        for dy in low..=high {
            for dx in low..=high {
                let cell = waypoint.pos.offset(dx, dy);
                if map_size.contains(cell) {
                    cells.insert(cell);
                }
            }
        }
    }
    cells
}

pub fn classify_space(space: &Space) -> EdgeMap {
    classify(&space_cells(space))
}

pub fn classify_path(path: &PathSegment, map_size: Size) -> EdgeMap {
    classify(&path_cells(path, map_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapgen::grid::Rect;
    use crate::mapgen::model::{SpaceKind, Waypoint};
    use crate::mapgen::seed::SeededRng;
    use crate::mapgen::shape;

    #[test]
    fn rectangle_splits_into_ring_and_core() {
        let cells: BTreeSet<Pos> = Rect { x: 0, y: 0, width: 4, height: 3 }.cells().collect();
        let edge_map = classify(&cells);
        assert_eq!(edge_map.interior, BTreeSet::from([Pos::new(1, 1), Pos::new(2, 1)]));
        assert_eq!(edge_map.edges.len(), 10);
        assert!(edge_map.edges.is_disjoint(&edge_map.interior));
        assert_eq!(edge_map.len(), cells.len());
    }

    #[test]
    fn touching_spaces_keep_their_own_walls() {
        let left: BTreeSet<Pos> = Rect { x: 0, y: 0, width: 3, height: 3 }.cells().collect();
        let right: BTreeSet<Pos> = Rect { x: 3, y: 0, width: 3, height: 3 }.cells().collect();
        let left_map = classify(&left);
        let right_map = classify(&right);
        assert!(left_map.edges.contains(&Pos::new(2, 1)));
        assert!(right_map.edges.contains(&Pos::new(3, 1)));

        let merged: BTreeSet<Pos> = left.union(&right).copied().collect();
        let merged_map = classify(&merged);
        assert!(merged_map.interior.contains(&Pos::new(2, 1)));
    }

    #[test]
    fn organic_space_partitions_every_cell_exactly_once() {
        let mut rng = SeededRng::from_text("partition");
        let shape = shape::organic(&mut rng, Pos::new(10, 10), 6.0, 0.7);
        let space = Space {
            id: "space-0".to_string(),
            kind: SpaceKind::Cavern,
            bounds: shape.bounds(),
            shape,
            doors: Vec::new(),
        };
        let cells = space_cells(&space);
        let edge_map = classify_space(&space);
        assert!(edge_map.edges.is_disjoint(&edge_map.interior));
        assert_eq!(edge_map.len(), cells.len());
        assert!(cells.iter().all(|cell| edge_map.contains(cell)));
    }

    #[test]
    fn corridor_footprint_follows_local_width_and_clips_to_map() {
        let path = PathSegment {
            id: "path-0".to_string(),
            waypoints: vec![
                Waypoint { pos: Pos::new(0, 5), width: None },
                Waypoint { pos: Pos::new(1, 5), width: None },
                Waypoint { pos: Pos::new(2, 5), width: None },
                Waypoint { pos: Pos::new(3, 5), width: None },
                Waypoint { pos: Pos::new(4, 5), width: Some(5) },
            ],
            width: 3,
            connects: ("space-0".to_string(), "space-1".to_string()),
        };
        let cells = path_cells(&path, Size::new(10, 10));
        assert!(cells.contains(&Pos::new(0, 4)));
        assert!(cells.contains(&Pos::new(4, 7)));
        assert!(cells.contains(&Pos::new(6, 3)));
        assert!(!cells.contains(&Pos::new(1, 7)));
        assert!(cells.iter().all(|cell| cell.x >= 0));

        let edge_map = classify_path(&path, Size::new(10, 10));
        assert!(edge_map.interior.contains(&Pos::new(1, 5)));
        assert!(edge_map.edges.contains(&Pos::new(0, 5)));
    }
}
