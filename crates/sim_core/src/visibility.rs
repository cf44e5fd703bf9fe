//! Fog-of-war sweep and pairwise line-of-sight.
//!
//! The two features are independent: the fog sweep is player-centric and
//! radial; `line_of_sight` is a directional segment query used by AI. They
//! must not be conflated.

use crate::collision;
use crate::dungeon::Dungeon;
use glam::Vec2;
use std::collections::HashSet;
use std::f32::consts::TAU;

const RAY_COUNT: usize = 360;
const RAY_STEP: f32 = 2.0;
const LOS_STEP: f32 = 2.0;
const LOS_PROBE_RADIUS: f32 = 1.0;

pub struct Visibility {
    pub sight_range: f32,
    /// Tiles lit right now; rebuilt on every update.
    pub visible: HashSet<(i32, i32)>,
    /// Union of everything ever seen; never cleared while the level lives.
    pub explored: HashSet<(i32, i32)>,
}

impl Visibility {
    pub fn new(sight_range: f32) -> Self {
        Self {
            sight_range,
            visible: HashSet::new(),
            explored: HashSet::new(),
        }
    }

    /// Radial sweep from `from`: march each ray outward, lighting tiles until
    /// a wall is hit (the wall tile itself is lit) or range runs out.
    pub fn update(&mut self, d: &Dungeon, from: Vec2) {
        self.visible.clear();
        let origin = d.tile_at(from);
        self.visible.insert(origin);
        self.explored.insert(origin);
        for i in 0..RAY_COUNT {
            let ang = i as f32 / RAY_COUNT as f32 * TAU;
            let dir = Vec2::new(ang.cos(), ang.sin());
            let mut t = RAY_STEP;
            while t <= self.sight_range {
                let tile = d.tile_at(from + dir * t);
                self.visible.insert(tile);
                self.explored.insert(tile);
                if d.is_wall(tile.0, tile.1) {
                    break;
                }
                t += RAY_STEP;
            }
        }
    }
}

/// True when the straight segment `a -> b` is unobstructed and no longer than
/// `max_range`. Samples the segment at a fixed step with a thin probe.
pub fn line_of_sight(d: &Dungeon, a: Vec2, b: Vec2, max_range: f32) -> bool {
    let dist = a.distance(b);
    if dist > max_range {
        return false;
    }
    if dist < f32::EPSILON {
        return true;
    }
    let steps = (dist / LOS_STEP).ceil() as i32;
    for i in 1..steps {
        let p = a.lerp(b, i as f32 / steps as f32);
        if collision::blocked(d, p, LOS_PROBE_RADIUS) {
            return false;
        }
    }
    true
}
