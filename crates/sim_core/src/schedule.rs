//! Fixed-order simulation tick.
//!
//! Order is part of the contract: player intent resolves before enemies
//! react, the boss acts after regular enemies, projectiles fly after every
//! shooter has fired, buffered damage lands once per tick, and the death
//! sweep runs over a snapshot so removal never skips entries.

use crate::actor::ActorId;
use crate::events::{EntityKind, SimEvent};
use crate::systems;
use crate::systems::projectiles::Faction;
use crate::SimState;
use glam::Vec2;

/// Per-tick intent from the embedding layer. Attack fields carry world-space
/// target points.
#[derive(Copy, Clone, Debug, Default)]
pub struct PlayerInput {
    pub move_dir: Vec2,
    pub melee: Option<Vec2>,
    pub ranged: Option<Vec2>,
    pub cast: Option<Vec2>,
    pub interact: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Player,
    Enemy(ActorId),
    Boss,
}

/// Buffered damage, applied after all systems have run for the tick.
#[derive(Copy, Clone, Debug)]
pub struct DamageEvent {
    pub target: Target,
    pub amount: i32,
    pub critical: bool,
    /// Direction and distance; resolved against walls on application.
    pub knockback: Option<(Vec2, f32)>,
}

/// Buffered projectile spawn; flushed into the live list before the
/// projectile system runs.
#[derive(Clone, Debug)]
pub struct ProjectileSpawn {
    pub kind: String,
    pub pos: Vec2,
    pub dir: Vec2,
    pub base_damage: i32,
    pub faction: Faction,
    pub owner: Option<ActorId>,
    pub ricochets: Option<i32>,
}

/// Per-tick event buffers shared by the systems.
pub struct Ctx {
    pub dt: f32,
    pub dmg: Vec<DamageEvent>,
    pub shots: Vec<ProjectileSpawn>,
}

pub struct Schedule;

impl Schedule {
    pub fn run(state: &mut SimState, input: &PlayerInput, dt: f32) {
        let t0 = std::time::Instant::now();
        state.time_s += f64::from(dt);
        let mut ctx = Ctx {
            dt,
            dmg: Vec::new(),
            shots: Vec::new(),
        };

        systems::player::update(state, input, &mut ctx);
        systems::ai::update(state, &mut ctx);
        systems::boss::update(state, &mut ctx);
        for spawn in std::mem::take(&mut ctx.shots) {
            state.spawn_shot(spawn);
        }
        systems::projectiles::update(state, &mut ctx);
        systems::combat::apply_damage(state, &mut ctx);
        cleanup(state);
        state.update_progression(input);
        state
            .visibility
            .update(&state.dungeon, state.player.pos);

        metrics::histogram!("sim.tick_ms").record(t0.elapsed().as_secs_f64() * 1000.0);
    }
}

/// Death sweep: snapshot the dead, award XP, emit events, then retain the
/// living. The boss corpse stays (its latch guards the one-shot reward);
/// dead enemies are removed.
fn cleanup(state: &mut SimState) {
    let dead: Vec<(i32, Vec2)> = state
        .enemies
        .iter()
        .filter(|e| !e.hp.alive())
        .map(|e| (e.xp, e.pos))
        .collect();
    let mut xp_gained = 0;
    for (xp, pos) in dead {
        state.events.push(SimEvent::EntityDied {
            kind: EntityKind::Enemy,
            xp,
            pos,
        });
        metrics::counter!("sim.enemy_deaths").increment(1);
        xp_gained += xp;
    }
    state.enemies.retain(|e| e.hp.alive());

    if let Some(boss) = state.boss.as_mut() {
        if !boss.core.hp.alive() && !boss.death_processed {
            boss.death_processed = true;
            let xp = boss.core.xp * 3;
            state.events.push(SimEvent::EntityDied {
                kind: EntityKind::Boss,
                xp,
                pos: boss.core.pos,
            });
            log::info!("boss {:?} defeated (xp {})", boss.kind, xp);
            metrics::counter!("sim.boss_deaths").increment(1);
            xp_gained += xp;
        }
    }

    if xp_gained > 0 {
        let levels = state.player.gain_xp(xp_gained);
        if levels > 0 {
            let red = state.player.inventory.enchant == Some(crate::items::EnchantKind::Red);
            state.player.refresh_max_hp(red);
            state.player.hp.hp = state.player.hp.max;
            log::info!("player reached level {}", state.player.level);
        }
    }

    if !state.player.hp.alive() && !state.player_death_emitted {
        state.player_death_emitted = true;
        state.events.push(SimEvent::EntityDied {
            kind: EntityKind::Player,
            xp: 0,
            pos: state.player.pos,
        });
        log::info!("player died at depth {}", state.depth);
    }
}
