//! Read-only per-tick view for rendering/UI layers. Plain data, no handles
//! into the live state; the tile grid is read directly from `state.dungeon`.

use crate::actor::{AiState, Archetype, BossKind};
use crate::items::{ItemId, ItemKind};
use crate::systems::projectiles::Faction;
use glam::Vec2;

#[derive(Clone, Debug)]
pub struct PlayerRep {
    pub pos: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub level: u32,
    pub xp: i32,
    pub xp_to_next: i32,
}

#[derive(Clone, Debug)]
pub struct EnemyRep {
    pub id: u32,
    pub archetype: Archetype,
    pub pos: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub state: AiState,
    pub mind_controlled: bool,
}

#[derive(Clone, Debug)]
pub struct BossRep {
    pub id: u32,
    pub kind: BossKind,
    pub pos: Vec2,
    pub radius: f32,
    pub hp: i32,
    pub max_hp: i32,
    pub enraged: bool,
}

#[derive(Clone, Debug)]
pub struct ProjectileRep {
    pub pos: Vec2,
    pub radius: f32,
    pub faction: Faction,
}

#[derive(Clone, Debug)]
pub struct ItemRep {
    pub id: ItemId,
    pub kind: ItemKind,
    pub pos: Vec2,
}

#[derive(Clone, Debug)]
pub struct TickSnapshot {
    pub time_s: f64,
    pub depth: u32,
    pub key_collected: bool,
    pub player: PlayerRep,
    pub enemies: Vec<EnemyRep>,
    pub boss: Option<BossRep>,
    pub projectiles: Vec<ProjectileRep>,
    pub items: Vec<ItemRep>,
    /// Sorted for deterministic consumption.
    pub visible: Vec<(i32, i32)>,
    pub explored: Vec<(i32, i32)>,
}
