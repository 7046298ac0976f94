//! Grid and tile-space primitives shared by layout, connectivity, classification, and placement.

use serde::{Deserialize, Serialize};

use crate::types::{Pos, Size};

/// Inclusive-origin, half-open-extent rectangle of grid cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(origin: Pos, size: Size) -> Self {
        Self { x: origin.x, y: origin.y, width: size.width, height: size.height }
    }

    pub fn origin(self) -> Pos {
        Pos { y: self.y, x: self.x }
    }

    pub fn size(self) -> Size {
        Size { width: self.width, height: self.height }
    }

    pub fn right(self) -> i32 {
        self.x + self.width - 1
    }

    pub fn bottom(self) -> i32 {
        self.y + self.height - 1
    }

    pub fn center(self) -> Pos {
        Pos { y: self.y + self.height / 2, x: self.x + self.width / 2 }
    }

    pub fn expanded(self, margin: i32) -> Self {
        Self {
            x: self.x - margin,
            y: self.y - margin,
            width: self.width + margin * 2,
            height: self.height + margin * 2,
        }
    }

    pub fn intersects(self, other: &Self) -> bool {
        self.x <= other.right()
            && self.right() >= other.x
            && self.y <= other.bottom()
            && self.bottom() >= other.y
    }

    pub fn contains(self, pos: Pos) -> bool {
        pos.x >= self.x && pos.x <= self.right() && pos.y >= self.y && pos.y <= self.bottom()
    }

    pub fn fits_within(self, bounds: Size) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() < bounds.width && self.bottom() < bounds.height
    }

    pub fn cells(self) -> impl Iterator<Item = Pos> {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| Pos { y, x }))
    }
}

pub(crate) fn clamp_to_bounds(pos: Pos, bounds: Size) -> Pos {
    Pos { y: pos.y.clamp(0, bounds.height - 1), x: pos.x.clamp(0, bounds.width - 1) }
}

pub(crate) fn cell_index(pos: Pos, width: i32) -> usize {
    (pos.y as usize) * (width as usize) + (pos.x as usize)
}

/// Even-odd ray casting against a cell center. Points must be ordered around the perimeter.
pub(crate) fn polygon_contains_cell(points: &[Pos], cell: Pos) -> bool {
    if points.len() < 3 {
        return false;
    }
    let px = f64::from(cell.x) + 0.5;
    let py = f64::from(cell.y) + 0.5;
    let mut inside = false;
    let mut previous = points[points.len() - 1];
    for &current in points {
        let (xi, yi) = (f64::from(current.x), f64::from(current.y));
        let (xj, yj) = (f64::from(previous.x), f64::from(previous.y));
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        previous = current;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expanded_rects_detect_near_misses() {
        let left = Rect { x: 1, y: 1, width: 4, height: 4 };
        let right = Rect { x: 6, y: 1, width: 4, height: 4 };
        assert!(!left.intersects(&right));
        assert!(left.expanded(1).intersects(&right.expanded(1)));
    }

    #[test]
    fn rect_cells_cover_exactly_its_area() {
        let rect = Rect { x: 2, y: 3, width: 3, height: 2 };
        let cells: Vec<Pos> = rect.cells().collect();
        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|&cell| rect.contains(cell)));
        assert_eq!(rect.center(), Pos { y: 4, x: 3 });
    }

    #[test]
    fn ray_casting_matches_a_square_polygon() {
        let square = [Pos::new(0, 0), Pos::new(4, 0), Pos::new(4, 4), Pos::new(0, 4)];
        assert!(polygon_contains_cell(&square, Pos::new(0, 0)));
        assert!(polygon_contains_cell(&square, Pos::new(3, 3)));
        assert!(!polygon_contains_cell(&square, Pos::new(4, 2)));
        assert!(!polygon_contains_cell(&square, Pos::new(-1, 1)));
    }

    #[test]
    fn fits_within_rejects_rects_touching_outside() {
        let bounds = Size::new(10, 10);
        assert!(Rect { x: 0, y: 0, width: 10, height: 10 }.fits_within(bounds));
        assert!(!Rect { x: 1, y: 0, width: 10, height: 10 }.fits_within(bounds));
        assert!(!Rect { x: -1, y: 2, width: 2, height: 2 }.fits_within(bounds));
    }
}
