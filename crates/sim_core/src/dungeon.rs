//! Procedural dungeon generation: rooms, L-corridors, and anchor points
//! (spawn, boss location, key, altar).
//!
//! Generation is deterministic for a fixed RNG: the caller seeds and owns the
//! generator. Degenerate inputs yield degenerate-but-valid dungeons (zero
//! rooms, fallback spawn), never an error.

use glam::Vec2;
use rand::Rng;
use rand::rngs::SmallRng;

const ROOM_ATTEMPTS: usize = 100;
const TARGET_ROOMS: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TileKind {
    Wall,
    Floor,
    /// Reserved in the tile schema; the generator never emits doors today.
    Door,
}

/// Accepted room rectangle in tile coordinates.
#[derive(Copy, Clone, Debug)]
pub struct Room {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Room {
    #[inline]
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    /// Overlap test including a 1-tile padding margin on all sides.
    pub fn overlaps_padded(&self, other: &Room) -> bool {
        self.x - 1 < other.x + other.w
            && self.x + self.w + 1 > other.x
            && self.y - 1 < other.y + other.h
            && self.y + self.h + 1 > other.y
    }
}

pub struct Dungeon {
    pub width: i32,
    pub height: i32,
    pub tile_size: f32,
    tiles: Vec<TileKind>,
    pub rooms: Vec<Room>,
    pub spawn_point: Vec2,
    pub boss_point: Option<Vec2>,
    pub key_point: Option<Vec2>,
    pub altar_point: Option<Vec2>,
}

impl Dungeon {
    /// Generate a dungeon of `width x height` tiles.
    ///
    /// Rooms are sampled up to a fixed attempt budget and accepted when they
    /// do not overlap (padded) any prior room; consecutive rooms are joined
    /// with an L-shaped corridor of random orientation. If no room fits the
    /// grid, the spawn falls back to tile (2, 2). Key/altar placement is
    /// skipped (with a warning) when fewer than two floor tiles exist.
    pub fn generate(width: i32, height: i32, tile_size: f32, rng: &mut SmallRng) -> Self {
        let mut d = Self {
            width,
            height,
            tile_size,
            tiles: vec![TileKind::Wall; (width.max(0) * height.max(0)) as usize],
            rooms: Vec::new(),
            spawn_point: Vec2::ZERO,
            boss_point: None,
            key_point: None,
            altar_point: None,
        };
        let min_room = (width / 8).clamp(3, 6);
        let max_room = (width.max(height) / 4).clamp(min_room + 2, 12);

        for _ in 0..ROOM_ATTEMPTS {
            if d.rooms.len() >= TARGET_ROOMS {
                break;
            }
            let w = rng.random_range(min_room..=max_room);
            let h = rng.random_range(min_room..=max_room);
            if w + 2 >= width || h + 2 >= height {
                continue;
            }
            let x = rng.random_range(1..width - w - 1);
            let y = rng.random_range(1..height - h - 1);
            let room = Room { x, y, w, h };
            if d.rooms.iter().any(|r| r.overlaps_padded(&room)) {
                continue;
            }
            d.carve_room(&room);
            if let Some(prev) = d.rooms.last().copied() {
                d.carve_corridor(prev.center(), room.center(), rng);
            }
            d.rooms.push(room);
        }

        let spawn_tile = d.rooms.first().map(|r| r.center()).unwrap_or((2, 2));
        d.spawn_point = d.tile_center(spawn_tile.0, spawn_tile.1);

        let floors = d.floor_tiles();
        d.boss_point = floors
            .iter()
            .copied()
            .max_by(|a, b| {
                let da = d.tile_center(a.0, a.1).distance_squared(d.spawn_point);
                let db = d.tile_center(b.0, b.1).distance_squared(d.spawn_point);
                da.total_cmp(&db)
            })
            .map(|(x, y)| d.tile_center(x, y));

        if floors.len() < 2 {
            log::warn!(
                "dungeon {}x{} has {} floor tiles; skipping key/altar placement",
                width,
                height,
                floors.len()
            );
        } else {
            let ki = rng.random_range(0..floors.len());
            let mut ai = rng.random_range(0..floors.len() - 1);
            if ai >= ki {
                ai += 1;
            }
            d.key_point = Some(d.tile_center(floors[ki].0, floors[ki].1));
            d.altar_point = Some(d.tile_center(floors[ai].0, floors[ai].1));
        }
        d
    }

    /// Open arena: border walls, all-floor interior, spawn at the center.
    /// No boss/key/altar anchors.
    pub fn arena(width: i32, height: i32, tile_size: f32) -> Self {
        let mut d = Self {
            width,
            height,
            tile_size,
            tiles: vec![TileKind::Wall; (width.max(0) * height.max(0)) as usize],
            rooms: Vec::new(),
            spawn_point: Vec2::ZERO,
            boss_point: None,
            key_point: None,
            altar_point: None,
        };
        for y in 1..height - 1 {
            for x in 1..width - 1 {
                d.set_tile(x, y, TileKind::Floor);
            }
        }
        d.spawn_point = d.tile_center(width / 2, height / 2);
        d
    }

    fn carve_room(&mut self, room: &Room) {
        for y in room.y..room.y + room.h {
            for x in room.x..room.x + room.w {
                self.set_tile(x, y, TileKind::Floor);
            }
        }
    }

    fn carve_corridor(&mut self, from: (i32, i32), to: (i32, i32), rng: &mut SmallRng) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        if rng.random_bool(0.5) {
            self.carve_h(x0, x1, y0);
            self.carve_v(y0, y1, x1);
        } else {
            self.carve_v(y0, y1, x0);
            self.carve_h(x0, x1, y1);
        }
    }

    fn carve_h(&mut self, x0: i32, x1: i32, y: i32) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.set_tile(x, y, TileKind::Floor);
        }
    }

    fn carve_v(&mut self, y0: i32, y1: i32, x: i32) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.set_tile(x, y, TileKind::Floor);
        }
    }

    /// Out-of-bounds reads as wall.
    #[inline]
    pub fn tile(&self, x: i32, y: i32) -> TileKind {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return TileKind::Wall;
        }
        self.tiles[(y * self.width + x) as usize]
    }

    pub fn set_tile(&mut self, x: i32, y: i32, kind: TileKind) {
        if x >= 0 && y >= 0 && x < self.width && y < self.height {
            self.tiles[(y * self.width + x) as usize] = kind;
        }
    }

    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == TileKind::Wall
    }

    #[inline]
    pub fn is_floor(&self, x: i32, y: i32) -> bool {
        self.tile(x, y) == TileKind::Floor
    }

    #[inline]
    pub fn world_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * self.tile_size,
            self.height as f32 * self.tile_size,
        )
    }

    /// World-space center of a tile.
    #[inline]
    pub fn tile_center(&self, x: i32, y: i32) -> Vec2 {
        Vec2::new(
            (x as f32 + 0.5) * self.tile_size,
            (y as f32 + 0.5) * self.tile_size,
        )
    }

    /// Tile coordinates containing a world-space point.
    #[inline]
    pub fn tile_at(&self, p: Vec2) -> (i32, i32) {
        (
            (p.x / self.tile_size).floor() as i32,
            (p.y / self.tile_size).floor() as i32,
        )
    }

    pub fn floor_tiles(&self) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.is_floor(x, y) {
                    out.push((x, y));
                }
            }
        }
        out
    }
}
