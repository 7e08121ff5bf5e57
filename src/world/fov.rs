//! Field of View calculation
//!
//! Recursive shadowcasting over the eight octants around the observer.

use std::collections::HashSet;

use super::grid::{GridSize, Position};

/// Opacity oracle the FOV engine reads from.
///
/// The engine only asks about coordinates inside `size()`; everything
/// outside the grid is treated as opaque without consulting the map.
pub trait VisionMap {
    fn size(&self) -> GridSize;
    fn is_opaque(&self, x: i32, y: i32) -> bool;
}

/// Tiles currently in view of a single observer.
///
/// Only valid until the next [`FieldOfView::compute`].
#[derive(Debug, Clone, Default)]
pub struct FieldOfView {
    origin: Option<Position>,
    radius: i32,
    visible: HashSet<Position>,
}

impl FieldOfView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the visible set from `origin` with the given radius.
    /// A negative radius behaves like zero.
    pub fn compute<M: VisionMap + ?Sized>(&mut self, map: &M, origin: Position, radius: i32) {
        let radius = radius.max(0);
        self.visible.clear();
        self.origin = Some(origin);
        self.radius = radius;

        // Origin is always visible
        self.visible.insert(origin);

        for octant in 0..8 {
            self.cast_light(map, origin, radius, 1, 1.0, 0.0, octant);
        }

        log::trace!(
            "FOV from ({}, {}) r={} sees {} tiles",
            origin.x,
            origin.y,
            radius,
            self.visible.len()
        );
    }

    /// Recursive shadowcasting for a single octant
    #[allow(clippy::too_many_arguments)]
    fn cast_light<M: VisionMap + ?Sized>(
        &mut self,
        map: &M,
        origin: Position,
        radius: i32,
        row: i32,
        mut start_slope: f64,
        end_slope: f64,
        octant: u8,
    ) {
        if start_slope < end_slope {
            return;
        }

        let size = map.size();
        let mut next_start_slope = start_slope;

        for j in row..=radius {
            let mut blocked = false;

            let dy = -j;
            for dx in dy..=0 {
                let (map_x, map_y) = transform_octant(dx, dy, octant);
                let cur_x = origin.x + map_x;
                let cur_y = origin.y + map_y;

                let left_slope = (dx as f64 - 0.5) / (dy as f64 + 0.5);
                let right_slope = (dx as f64 + 0.5) / (dy as f64 - 0.5);

                if start_slope < right_slope {
                    continue;
                }
                if end_slope > left_slope {
                    break;
                }

                let inside = size.contains(cur_x, cur_y);
                if inside && dx * dx + dy * dy <= radius * radius {
                    self.visible.insert(Position::new(cur_x, cur_y));
                }

                let opaque = !inside || map.is_opaque(cur_x, cur_y);
                if blocked {
                    if opaque {
                        next_start_slope = right_slope;
                    } else {
                        blocked = false;
                        start_slope = next_start_slope;
                    }
                } else if opaque && j < radius {
                    blocked = true;
                    self.cast_light(map, origin, radius, j + 1, start_slope, left_slope, octant);
                    next_start_slope = right_slope;
                }
            }

            if blocked {
                break;
            }
        }
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.visible.contains(&Position::new(x, y))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.visible.iter()
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Where the view was last computed from
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    pub fn radius(&self) -> i32 {
        self.radius
    }

    pub fn visible(&self) -> &HashSet<Position> {
        &self.visible
    }
}

/// Transform coordinates based on octant
fn transform_octant(col: i32, row: i32, octant: u8) -> (i32, i32) {
    match octant {
        0 => (col, row),
        1 => (row, col),
        2 => (row, -col),
        3 => (col, -row),
        4 => (-col, -row),
        5 => (-row, -col),
        6 => (-row, col),
        7 => (-col, row),
        _ => (col, row),
    }
}
