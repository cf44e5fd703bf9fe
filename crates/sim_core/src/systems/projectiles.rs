//! Projectile flight, ricochet bounces, and boss area effects.
//!
//! Removal causes are checked in strict priority order each tick: wall, then
//! living target, then lifetime. Exactly one cause retires a projectile.

use crate::actor::ActorId;
use crate::collision;
use crate::schedule::{Ctx, DamageEvent, Target};
use crate::SimState;
use glam::Vec2;

/// Who fired the projectile, which decides who it can hurt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Faction {
    /// Fired by the player; hits enemies and the boss.
    Player,
    /// Fired by an enemy or the boss; hits the player.
    Hostile,
    /// Fired by a mind-controlled enemy; hits enemies and the boss, but
    /// never its own shooter.
    Turned,
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub damage: i32,
    pub life_s: f32,
    pub faction: Faction,
    pub owner: Option<ActorId>,
    /// Wall bounces left; `None` for ordinary projectiles. Goes to -1 on the
    /// bounce that retires the projectile.
    pub ricochets: Option<i32>,
    pub homing: bool,
}

const RICOCHET_DAMAGE_DECAY: f32 = 0.9;

#[derive(Clone, Debug)]
pub enum AreaEffectKind {
    /// Expanding ring; damages the player once when the ring reaches them.
    FrostNova {
        max_radius: f32,
        radius: f32,
        hit: bool,
    },
    /// Instant strike at a point, resolved on the first tick after spawn.
    LightningStrike { struck: bool },
    /// Persistent zone ticking damage on a fixed interval.
    DarkStorm { radius: f32, next_tick_s: f64 },
}

#[derive(Clone, Debug)]
pub struct AreaEffect {
    pub pos: Vec2,
    pub damage: i32,
    pub life_s: f32,
    pub kind: AreaEffectKind,
}

const FROST_NOVA_LIFE_S: f32 = 1.5;
const LIGHTNING_STRIKE_RADIUS: f32 = 20.0;
const DARK_STORM_TICK_S: f64 = 0.5;

impl AreaEffect {
    pub fn frost_nova(pos: Vec2, damage: i32, max_radius: f32) -> Self {
        Self {
            pos,
            damage,
            life_s: FROST_NOVA_LIFE_S,
            kind: AreaEffectKind::FrostNova {
                max_radius,
                radius: 0.0,
                hit: false,
            },
        }
    }

    pub fn lightning_strike(pos: Vec2, damage: i32) -> Self {
        Self {
            pos,
            damage,
            life_s: 0.3,
            kind: AreaEffectKind::LightningStrike { struck: false },
        }
    }

    pub fn dark_storm(pos: Vec2, damage: i32, radius: f32, now: f64) -> Self {
        Self {
            pos,
            damage,
            life_s: 4.0,
            kind: AreaEffectKind::DarkStorm {
                radius,
                next_tick_s: now,
            },
        }
    }
}

pub fn update(state: &mut SimState, ctx: &mut Ctx) {
    let dt = ctx.dt;
    let now = state.time_s;
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let player_alive = state.player.hp.alive();
    // Stable target views; damage is buffered, so stale health is fine
    // within the tick.
    let enemy_views: Vec<(ActorId, Vec2, f32)> = state
        .enemies
        .iter()
        .filter(|e| e.hp.alive())
        .map(|e| (e.id, e.pos, e.radius))
        .collect();
    let boss_view: Option<(ActorId, Vec2, f32)> = state
        .boss
        .as_ref()
        .filter(|b| b.core.hp.alive())
        .map(|b| (b.core.id, b.core.pos, b.core.radius));

    let dungeon = &state.dungeon;
    state.projectiles.retain_mut(|p| {
        if p.homing && p.faction == Faction::Hostile && player_alive {
            let dir = (player_pos - p.pos).normalize_or_zero();
            if dir != Vec2::ZERO {
                p.vel = dir * p.vel.length();
            }
        }
        let prev = p.pos;
        p.pos += p.vel * dt;

        // 1) Walls.
        if collision::blocked(dungeon, p.pos, p.radius) {
            match p.ricochets {
                Some(r) if r > 0 => {
                    let hit_x = collision::blocked(dungeon, Vec2::new(p.pos.x, prev.y), p.radius);
                    let hit_y = collision::blocked(dungeon, Vec2::new(prev.x, p.pos.y), p.radius);
                    if hit_x && !hit_y {
                        p.vel.x = -p.vel.x;
                    } else if hit_y && !hit_x {
                        p.vel.y = -p.vel.y;
                    } else {
                        p.vel = -p.vel;
                    }
                    p.pos = prev;
                    p.ricochets = Some(r - 1);
                    p.damage = ((p.damage as f32 * RICOCHET_DAMAGE_DECAY).round() as i32).max(1);
                    return true;
                }
                Some(_) => {
                    p.ricochets = Some(-1);
                    return false;
                }
                None => return false,
            }
        }

        // 2) Living targets.
        match p.faction {
            Faction::Player | Faction::Turned => {
                for &(id, pos, radius) in &enemy_views {
                    if p.faction == Faction::Turned && p.owner == Some(id) {
                        continue;
                    }
                    if p.pos.distance_squared(pos) <= (p.radius + radius).powi(2) {
                        ctx.dmg.push(DamageEvent {
                            target: Target::Enemy(id),
                            amount: p.damage,
                            critical: false,
                            knockback: None,
                        });
                        return false;
                    }
                }
                if let Some((_, pos, radius)) = boss_view {
                    if p.pos.distance_squared(pos) <= (p.radius + radius).powi(2) {
                        ctx.dmg.push(DamageEvent {
                            target: Target::Boss,
                            amount: p.damage,
                            critical: false,
                            knockback: None,
                        });
                        return false;
                    }
                }
            }
            Faction::Hostile => {
                if player_alive
                    && p.pos.distance_squared(player_pos)
                        <= (p.radius + player_radius).powi(2)
                {
                    ctx.dmg.push(DamageEvent {
                        target: Target::Player,
                        amount: p.damage,
                        critical: false,
                        knockback: None,
                    });
                    return false;
                }
            }
        }

        // 3) Lifetime.
        p.life_s -= dt;
        p.life_s > 0.0
    });

    // Boss area effects damage the player only.
    state.effects.retain_mut(|eff| {
        eff.life_s -= dt;
        match &mut eff.kind {
            AreaEffectKind::FrostNova {
                max_radius,
                radius,
                hit,
            } => {
                *radius += *max_radius / FROST_NOVA_LIFE_S * dt;
                let dist = eff.pos.distance(player_pos);
                if !*hit && player_alive && (dist - *radius).abs() <= player_radius + 6.0 {
                    *hit = true;
                    ctx.dmg.push(DamageEvent {
                        target: Target::Player,
                        amount: eff.damage,
                        critical: false,
                        knockback: None,
                    });
                }
            }
            AreaEffectKind::LightningStrike { struck } => {
                if !*struck {
                    *struck = true;
                    if player_alive
                        && eff.pos.distance(player_pos)
                            <= LIGHTNING_STRIKE_RADIUS + player_radius
                    {
                        ctx.dmg.push(DamageEvent {
                            target: Target::Player,
                            amount: eff.damage,
                            critical: false,
                            knockback: None,
                        });
                    }
                }
            }
            AreaEffectKind::DarkStorm {
                radius,
                next_tick_s,
            } => {
                if now >= *next_tick_s {
                    *next_tick_s = now + DARK_STORM_TICK_S;
                    if player_alive && eff.pos.distance(player_pos) <= *radius + player_radius {
                        ctx.dmg.push(DamageEvent {
                            target: Target::Player,
                            amount: eff.damage,
                            critical: false,
                            knockback: None,
                        });
                    }
                }
            }
        }
        eff.life_s > 0.0
    });
}
