//! Room and tunnel dungeon generator
//!
//! Classic roguelike layout: rectangular rooms that never touch, each joined
//! to the previously placed room by an L-shaped tunnel.

use rand::rngs::StdRng;
use rand::Rng;

use super::{Level, Room};
use crate::config::GameConfig;

/// Generate a level from the config using the given random source
pub fn generate_level(config: &GameConfig, rng: &mut StdRng) -> Level {
    let mut level = Level::new(config.grid_size());
    let attempts = config.room_attempts();

    for attempt in 0..attempts {
        let w = rng.gen_range(config.min_room_size..=config.max_room_size);
        let h = rng.gen_range(config.min_room_size..=config.max_room_size);
        let x = rng.gen_range(0..config.width - w);
        let y = rng.gen_range(0..config.height - h);

        let new_room = Room::new(x, y, w, h);

        // Check for overlaps
        if level.rooms().iter().any(|r| new_room.intersects(r)) {
            log::trace!("Attempt {}: room {:?} overlaps, dropped", attempt, new_room);
            continue;
        }

        level.push_room(new_room);
    }

    for i in 0..level.rooms().len() {
        let room = level.rooms()[i];
        carve_room(&mut level, &room);

        if i > 0 {
            let previous = level.rooms()[i - 1];
            tunnel_between(&mut level, rng, &previous, &room);
        }
    }

    log::info!(
        "Generated {}x{} level with {} rooms from {} attempts",
        config.width,
        config.height,
        level.rooms().len(),
        attempts
    );

    level
}

/// Carve out a room's interior
fn carve_room(level: &mut Level, room: &Room) {
    for pos in room.interior_positions() {
        level.carve(pos.x, pos.y);
    }
}

/// Join two rooms' centers with one horizontal and one vertical segment
fn tunnel_between(level: &mut Level, rng: &mut StdRng, first: &Room, second: &Room) {
    let start = first.center();
    let end = second.center();

    if rng.gen_bool(0.5) {
        // Horizontal then vertical, elbow at (end.x, start.y)
        carve_h_tunnel(level, start.x, end.x, start.y);
        carve_v_tunnel(level, start.y, end.y, end.x);
    } else {
        // Vertical then horizontal, elbow at (start.x, end.y)
        carve_v_tunnel(level, start.y, end.y, start.x);
        carve_h_tunnel(level, start.x, end.x, end.y);
    }
}

/// Carve a horizontal tunnel, skipping cells outside the tile storage
fn carve_h_tunnel(level: &mut Level, x1: i32, x2: i32, y: i32) {
    let size = level.size();
    for x in x1.min(x2)..=x1.max(x2) {
        if let Some(idx) = size.flat_index(x, y) {
            level.carve_index(idx);
        }
    }
}

/// Carve a vertical tunnel, skipping cells outside the tile storage
fn carve_v_tunnel(level: &mut Level, y1: i32, y2: i32, x: i32) {
    let size = level.size();
    for y in y1.min(y2)..=y1.max(y2) {
        if let Some(idx) = size.flat_index(x, y) {
            level.carve_index(idx);
        }
    }
}
