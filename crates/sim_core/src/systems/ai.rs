//! Enemy AI: perception, the idle/chase/attack state machine, and the
//! movement strategies layered on top of it.
//!
//! Each strategy is a pure policy over the shared state machine: aggressive
//! and tank close in and stand while attacking, kiting holds a distance band,
//! flanking works the target's side and rear. Knockback and mind control are
//! orthogonal overlays.

use crate::actor::{ActorId, AiState, Enemy};
use crate::collision;
use crate::dungeon::Dungeon;
use crate::items::EnchantKind;
use crate::schedule::{Ctx, DamageEvent, ProjectileSpawn, Target};
use crate::systems::combat;
use crate::systems::projectiles::Faction;
use crate::visibility;
use crate::SimState;
use data_runtime::specs::archetypes::StrategyTag;
use glam::Vec2;
use rand::Rng;
use rand::rngs::SmallRng;
use std::f32::consts::TAU;

/// Chase is abandoned this long after the target was last perceived.
pub const GIVE_UP_TIMEOUT_S: f64 = 5.0;
/// Roam stays within this radius of the spawn anchor.
pub const ROAM_RADIUS: f32 = 160.0;
const ROAM_SPEED_FRAC: f32 = 0.3;
const ROAM_ARRIVE_DIST: f32 = 5.0;
/// Kiting distance band as fractions of attack range.
const KITE_NEAR_FRAC: f32 = 0.6;
const KITE_FAR_FRAC: f32 = 0.9;
const FLANK_FRONT_DEG: f32 = 60.0;
const FLANK_BEHIND_DEG: f32 = 120.0;
/// Attack-speed multiplier for flankers striking from side or behind.
pub const FLANK_SPEED_BONUS: f32 = 1.5;
const GREEN_ENCHANT_SLOW: f32 = 0.75;

#[derive(Copy, Clone)]
struct TargetView {
    tag: Target,
    pos: Vec2,
    radius: f32,
    move_dir: Vec2,
}

#[derive(Copy, Clone)]
struct EnemyView {
    id: ActorId,
    pos: Vec2,
    radius: f32,
    move_dir: Vec2,
    alive: bool,
    controlled: bool,
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Sector {
    Front,
    Side,
    Behind,
}

pub fn update(state: &mut SimState, ctx: &mut Ctx) {
    let now = state.time_s;
    let green = state.player.inventory.enchant == Some(EnchantKind::Green);
    let player_alive = state.player.hp.alive();
    let player_view = TargetView {
        tag: Target::Player,
        pos: state.player.pos,
        radius: state.player.radius,
        move_dir: state.player.last_move_dir,
    };
    // Stable views snapshotted before anything moves; mind-controlled
    // enemies retarget against these.
    let views: Vec<EnemyView> = state
        .enemies
        .iter()
        .map(|e| EnemyView {
            id: e.id,
            pos: e.pos,
            radius: e.radius,
            move_dir: e.last_move_dir,
            alive: e.hp.alive(),
            controlled: e.mind_control.is_some(),
        })
        .collect();
    let boss_view: Option<(ActorId, Vec2, f32)> = state
        .boss
        .as_ref()
        .filter(|b| b.core.hp.alive())
        .map(|b| (b.core.id, b.core.pos, b.core.radius));

    let SimState {
        dungeon,
        enemies,
        rng,
        ..
    } = state;
    for e in enemies.iter_mut() {
        if !e.hp.alive() {
            continue;
        }
        drive(
            e,
            dungeon,
            rng,
            player_view,
            player_alive,
            &views,
            boss_view,
            now,
            green,
            ctx,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn drive(
    e: &mut Enemy,
    dungeon: &Dungeon,
    rng: &mut SmallRng,
    player: TargetView,
    player_alive: bool,
    views: &[EnemyView],
    boss: Option<(ActorId, Vec2, f32)>,
    now: f64,
    green: bool,
    ctx: &mut Ctx,
) {
    // Knocked back: stunned in place until the timer runs out, then a short
    // recovery immunity.
    if e.in_knockback(now) {
        e.vel = Vec2::ZERO;
        return;
    }
    if e.state == AiState::KnockedBack {
        e.state = AiState::Idle;
        e.kb_immune_until_s = now + combat::KNOCKBACK_IMMUNE_S;
    }

    if let Some(mc) = e.mind_control {
        if now >= mc.until_s {
            e.mind_control = None;
        }
    }
    let Some(target) = resolve_target(e, player, player_alive, views, boss) else {
        e.state = AiState::Idle;
        e.last_seen = None;
        let speed = e.speed * if green { GREEN_ENCHANT_SLOW } else { 1.0 };
        let desired = roam_dir(e, rng, now) * (speed * ROAM_SPEED_FRAC);
        step(e, dungeon, desired, ctx.dt);
        return;
    };

    let dist = e.pos.distance(target.pos);
    let sees = visibility::line_of_sight(dungeon, e.pos, target.pos, e.sight_range);
    if sees {
        e.last_seen = Some((target.pos, now));
        e.state = if dist <= e.attack_range + target.radius {
            AiState::Attacking
        } else {
            AiState::Chasing
        };
    } else {
        match e.state {
            AiState::Attacking => {
                e.state = if e.last_seen.is_some() {
                    AiState::Chasing
                } else {
                    AiState::Idle
                };
            }
            AiState::Chasing => {
                if e.last_seen.is_none_or(|(_, t)| now - t > GIVE_UP_TIMEOUT_S) {
                    e.state = AiState::Idle;
                    e.last_seen = None;
                }
            }
            _ => {}
        }
    }

    let speed = e.speed * if green { GREEN_ENCHANT_SLOW } else { 1.0 };
    let desired = match e.state {
        AiState::Idle => roam_dir(e, rng, now) * (speed * ROAM_SPEED_FRAC),
        AiState::Chasing => {
            let goal = e.last_seen.map(|(p, _)| p).unwrap_or(target.pos);
            (goal - e.pos).normalize_or_zero() * speed
        }
        AiState::Attacking => {
            let mv = attack_move(e, target, dist, speed);
            try_attack(e, target, dist, sees, now, rng, ctx);
            mv
        }
        AiState::KnockedBack => Vec2::ZERO,
    };
    step(e, dungeon, desired, ctx.dt);
}

fn step(e: &mut Enemy, dungeon: &Dungeon, desired: Vec2, dt: f32) {
    let (pos, vel) = collision::move_with_collision(dungeon, e.pos, desired, e.radius, dt);
    e.pos = pos;
    e.vel = vel;
    if desired != Vec2::ZERO {
        e.last_move_dir = desired.normalize_or_zero();
    }
}

/// Who this enemy is fighting. Mind control is sticky: the stored target is
/// kept while it lives; a new one is picked only when it dies or was never
/// chosen. With nobody left to fight the effect ends early.
fn resolve_target(
    e: &mut Enemy,
    player: TargetView,
    player_alive: bool,
    views: &[EnemyView],
    boss: Option<(ActorId, Vec2, f32)>,
) -> Option<TargetView> {
    if let Some(mc) = e.mind_control.as_mut() {
        if let Some(tid) = mc.target {
            if let Some((bid, bpos, brad)) = boss {
                if tid == bid {
                    return Some(TargetView {
                        tag: Target::Boss,
                        pos: bpos,
                        radius: brad,
                        move_dir: Vec2::ZERO,
                    });
                }
            }
            if let Some(v) = views.iter().find(|v| v.id == tid && v.alive) {
                return Some(TargetView {
                    tag: Target::Enemy(v.id),
                    pos: v.pos,
                    radius: v.radius,
                    move_dir: v.move_dir,
                });
            }
            mc.target = None;
        }
        let self_id = e.id;
        let self_pos = e.pos;
        let pick = views
            .iter()
            .filter(|v| v.id != self_id && v.alive && !v.controlled)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(self_pos)
                    .total_cmp(&b.pos.distance_squared(self_pos))
            });
        if let Some(v) = pick {
            mc.target = Some(v.id);
            return Some(TargetView {
                tag: Target::Enemy(v.id),
                pos: v.pos,
                radius: v.radius,
                move_dir: v.move_dir,
            });
        }
        if let Some((bid, bpos, brad)) = boss {
            mc.target = Some(bid);
            return Some(TargetView {
                tag: Target::Boss,
                pos: bpos,
                radius: brad,
                move_dir: Vec2::ZERO,
            });
        }
        e.mind_control = None;
    }
    player_alive.then_some(player)
}

/// Movement while in attack range, by strategy.
fn attack_move(e: &Enemy, target: TargetView, dist: f32, speed: f32) -> Vec2 {
    let away = (e.pos - target.pos).normalize_or_zero();
    match e.strategy {
        StrategyTag::Aggressive | StrategyTag::Tank => Vec2::ZERO,
        StrategyTag::Kiting => {
            if dist < e.attack_range * KITE_NEAR_FRAC {
                away * speed
            } else if dist > e.attack_range * KITE_FAR_FRAC {
                -away * speed
            } else {
                Vec2::ZERO
            }
        }
        StrategyTag::Flanking => {
            if sector(target, e.pos) == Sector::Front {
                // Caught in front: back off while circling to a flank.
                (away + away.perp()).normalize_or_zero() * (speed * 0.8)
            } else {
                Vec2::ZERO
            }
        }
    }
}

fn try_attack(
    e: &mut Enemy,
    target: TargetView,
    dist: f32,
    sees: bool,
    now: f64,
    rng: &mut SmallRng,
    ctx: &mut Ctx,
) {
    if !sees || now < e.next_attack_s {
        return;
    }
    let faction = if target.tag == Target::Player {
        Faction::Hostile
    } else {
        Faction::Turned
    };
    if let Some(kind) = e.projectile.clone() {
        let dir = (target.pos - e.pos).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        ctx.shots.push(ProjectileSpawn {
            kind,
            pos: e.pos,
            dir,
            base_damage: e.damage,
            faction,
            owner: Some(e.id),
            ricochets: e.max_ricochets.map(|r| r as i32),
        });
    } else {
        if dist > e.attack_range + target.radius {
            return;
        }
        let (amount, critical) = combat::damage_roll(rng, e.damage, 1.0);
        ctx.dmg.push(DamageEvent {
            target: target.tag,
            amount,
            critical,
            knockback: None,
        });
    }
    let mut cd = f64::from(e.attack_cooldown_s);
    if e.strategy == StrategyTag::Flanking && sector(target, e.pos) != Sector::Front {
        cd /= f64::from(FLANK_SPEED_BONUS);
    }
    e.next_attack_s = now + cd;
}

/// Classify the attacker's bearing relative to the target's last movement
/// direction. A stationary target has no facing; treat as side.
fn sector(target: TargetView, attacker_pos: Vec2) -> Sector {
    let facing = target.move_dir.normalize_or_zero();
    let to_attacker = (attacker_pos - target.pos).normalize_or_zero();
    if facing == Vec2::ZERO || to_attacker == Vec2::ZERO {
        return Sector::Side;
    }
    let deg = facing.dot(to_attacker).clamp(-1.0, 1.0).acos().to_degrees();
    if deg < FLANK_FRONT_DEG {
        Sector::Front
    } else if deg > FLANK_BEHIND_DEG {
        Sector::Behind
    } else {
        Sector::Side
    }
}

/// Roam target within a bounded radius of the spawn anchor, re-rolled on a
/// randomized interval or on arrival. Returns the unit direction to walk.
fn roam_dir(e: &mut Enemy, rng: &mut SmallRng, now: f64) -> Vec2 {
    let arrived = e
        .roam_target
        .is_none_or(|t| e.pos.distance(t) < ROAM_ARRIVE_DIST);
    if arrived || now >= e.next_roam_s {
        let ang = rng.random_range(0.0..TAU);
        let r = rng.random_range(0.0..ROAM_RADIUS);
        e.roam_target = Some(e.anchor + Vec2::new(ang.cos(), ang.sin()) * r);
        e.next_roam_s = now + rng.random_range(2.0..5.0);
    }
    e.roam_target
        .map(|t| (t - e.pos).normalize_or_zero())
        .unwrap_or(Vec2::ZERO)
}
