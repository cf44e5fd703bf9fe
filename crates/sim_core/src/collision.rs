//! Circle-vs-tile collision queries and axis-separated sliding movement.

use crate::dungeon::Dungeon;
use glam::Vec2;

/// True if a circle of `radius` at `pos` overlaps any wall tile.
///
/// Only tiles inside the circle's bounding box are tested, circle-vs-AABB
/// per tile. Out-of-bounds tiles count as walls.
pub fn blocked(d: &Dungeon, pos: Vec2, radius: f32) -> bool {
    let ts = d.tile_size;
    let x0 = ((pos.x - radius) / ts).floor() as i32;
    let x1 = ((pos.x + radius) / ts).floor() as i32;
    let y0 = ((pos.y - radius) / ts).floor() as i32;
    let y1 = ((pos.y + radius) / ts).floor() as i32;
    for ty in y0..=y1 {
        for tx in x0..=x1 {
            if !d.is_wall(tx, ty) {
                continue;
            }
            let min = Vec2::new(tx as f32 * ts, ty as f32 * ts);
            let closest = pos.clamp(min, min + Vec2::splat(ts));
            if pos.distance_squared(closest) < radius * radius {
                return true;
            }
        }
    }
    false
}

/// Advance `pos` by `vel * dt` with sliding collision, one axis at a time:
/// the horizontal move is attempted and reverted (zeroing `vel.x`) if it
/// lands in a wall, then the vertical move likewise. Axis separation is
/// deliberate: entities slide along walls instead of sticking, and knockback
/// and AI paths rely on that. Returns the resolved `(pos, vel)`.
pub fn move_with_collision(
    d: &Dungeon,
    pos: Vec2,
    vel: Vec2,
    radius: f32,
    dt: f32,
) -> (Vec2, Vec2) {
    let mut p = pos;
    let mut v = vel;

    let px = Vec2::new(p.x + v.x * dt, p.y);
    if blocked(d, px, radius) {
        v.x = 0.0;
    } else {
        p.x = px.x;
    }

    let py = Vec2::new(p.x, p.y + v.y * dt);
    if blocked(d, py, radius) {
        v.y = 0.0;
    } else {
        p.y = py.y;
    }

    let world = d.world_size();
    p.x = p.x.clamp(radius, (world.x - radius).max(radius));
    p.y = p.y.clamp(radius, (world.y - radius).max(radius));
    (p, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::Dungeon;

    #[test]
    fn open_floor_is_not_blocked() {
        let d = Dungeon::arena(10, 10, 64.0);
        assert!(!blocked(&d, d.spawn_point, 15.0));
    }

    #[test]
    fn border_wall_blocks() {
        let d = Dungeon::arena(10, 10, 64.0);
        // Centered on the left border wall.
        assert!(blocked(&d, Vec2::new(32.0, 320.0), 15.0));
        // Touching it from the inside.
        assert!(blocked(&d, Vec2::new(70.0, 320.0), 15.0));
    }

    #[test]
    fn slides_along_wall() {
        let d = Dungeon::arena(10, 10, 64.0);
        // Pushing into the left wall while moving down: x is stopped, y slides.
        let start = Vec2::new(85.0, 320.0);
        let (p, v) = move_with_collision(&d, start, Vec2::new(-200.0, 120.0), 15.0, 0.5);
        assert!(p.x >= 79.0, "clipped into wall: {p:?}");
        assert!(p.y > start.y, "vertical slide lost: {p:?}");
        assert_eq!(v.x, 0.0);
        assert!(!blocked(&d, p, 15.0));
    }
}
