//! Player intent resolution: movement, regen, melee/ranged attacks, spells.

use crate::actor::MindControl;
use crate::collision;
use crate::items::SpellKind;
use crate::schedule::{Ctx, DamageEvent, PlayerInput, ProjectileSpawn, Target};
use crate::systems::combat;
use crate::systems::projectiles::Faction;
use crate::visibility;
use crate::SimState;
use glam::Vec2;

/// Base melee reach before the weapon range multiplier.
pub const MELEE_BASE_RANGE: f32 = 40.0;
const MELEE_BASE_COOLDOWN_S: f64 = 0.5;
const RANGED_COOLDOWN_S: f64 = 0.6;
const REGEN_DELAY_S: f64 = 3.0;
const REGEN_PER_S: f32 = 2.0;
const HASTE_MULT: f32 = 1.25;
const POWER_PULSE_RADIUS: f32 = 120.0;
const TURN_COAT_RANGE: f32 = 300.0;
const TURN_COAT_DURATION_S: f64 = 10.0;

pub fn update(state: &mut SimState, input: &PlayerInput, ctx: &mut Ctx) {
    let now = state.time_s;
    if !state.player.hp.alive() {
        state.player.vel = Vec2::ZERO;
        return;
    }

    // Movement with sliding collision. Haste is a channel: active while the
    // cast intent is held with the spell equipped.
    let dir = input.move_dir.normalize_or_zero();
    let hasted =
        state.player.inventory.spell == Some(SpellKind::Haste) && input.cast.is_some();
    let speed = state.player.speed * if hasted { HASTE_MULT } else { 1.0 };
    let (pos, vel) = collision::move_with_collision(
        &state.dungeon,
        state.player.pos,
        dir * speed,
        state.player.radius,
        ctx.dt,
    );
    state.player.pos = pos;
    state.player.vel = vel;
    if dir != Vec2::ZERO {
        state.player.last_move_dir = dir;
    }

    // Out-of-combat regen, fractional carry in a bank.
    if now - state.player.last_damaged_s > REGEN_DELAY_S && state.player.hp.hp < state.player.hp.max
    {
        state.player.regen_bank += REGEN_PER_S * ctx.dt;
        let whole = state.player.regen_bank.floor();
        if whole >= 1.0 {
            state.player.regen_bank -= whole;
            state.player.hp.hp += whole as i32;
            state.player.hp.clamp();
        }
    }

    if let Some(target) = input.melee {
        melee(state, target, now, ctx);
    }
    if let Some(target) = input.ranged {
        ranged(state, target, now, ctx);
    }
    if let Some(target) = input.cast {
        cast(state, target, now, ctx);
    }
}

fn melee(state: &mut SimState, target: Vec2, now: f64, ctx: &mut Ctx) {
    if now < state.player.melee_ready_s {
        return;
    }
    let weapon = state.weapon_for_player();
    let origin = state.player.pos;
    let mut dir = (target - origin).normalize_or_zero();
    if dir == Vec2::ZERO {
        dir = state.player.last_move_dir;
    }
    let range = MELEE_BASE_RANGE * weapon.range_mult;
    let base = state.player.base_damage();

    let hits: Vec<(Target, Vec2, f32)> = state
        .enemies
        .iter()
        .filter(|e| e.hp.alive())
        .filter(|e| combat::melee_hit(origin, dir, range, weapon.arc_rad, e.pos, e.radius))
        .map(|e| (Target::Enemy(e.id), e.pos, e.radius))
        .chain(
            state
                .boss
                .iter()
                .filter(|b| b.core.hp.alive())
                .filter(|b| {
                    combat::melee_hit(origin, dir, range, weapon.arc_rad, b.core.pos, b.core.radius)
                })
                .map(|b| (Target::Boss, b.core.pos, b.core.radius)),
        )
        .collect();
    for (tgt, tpos, _) in hits {
        let (amount, critical) = combat::damage_roll(&mut state.rng, base, weapon.damage_mult);
        let knockback = (weapon.knockback > 0.0).then(|| {
            let mut kdir = (tpos - origin).normalize_or_zero();
            if kdir == Vec2::ZERO {
                kdir = dir;
            }
            (kdir, weapon.knockback)
        });
        ctx.dmg.push(DamageEvent {
            target: tgt,
            amount,
            critical,
            knockback,
        });
    }
    state.player.melee_ready_s = now + MELEE_BASE_COOLDOWN_S / f64::from(weapon.attack_speed);
}

fn ranged(state: &mut SimState, target: Vec2, now: f64, ctx: &mut Ctx) {
    if now < state.player.ranged_ready_s {
        return;
    }
    let dir = (target - state.player.pos).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    ctx.shots.push(ProjectileSpawn {
        kind: "bolt".to_string(),
        pos: state.player.pos,
        dir,
        base_damage: state.player.base_damage(),
        faction: Faction::Player,
        owner: None,
        ricochets: None,
    });
    state.player.ranged_ready_s = now + RANGED_COOLDOWN_S;
}

fn cast(state: &mut SimState, _target: Vec2, now: f64, ctx: &mut Ctx) {
    let Some(spell) = state.player.inventory.spell else {
        return;
    };
    if spell == SpellKind::Haste || now < state.player.spell_ready_s {
        return;
    }
    match spell {
        SpellKind::Haste => {}
        SpellKind::PowerPulse => {
            let origin = state.player.pos;
            let base = state.player.base_damage();
            let targets: Vec<Target> = state
                .enemies
                .iter()
                .filter(|e| e.hp.alive() && e.pos.distance(origin) <= POWER_PULSE_RADIUS)
                .map(|e| Target::Enemy(e.id))
                .chain(state.boss.iter().filter(|b| {
                    b.core.hp.alive() && b.core.pos.distance(origin) <= POWER_PULSE_RADIUS
                }).map(|_| Target::Boss))
                .collect();
            for tgt in targets {
                let (amount, critical) = combat::damage_roll(&mut state.rng, base, 2.0);
                ctx.dmg.push(DamageEvent {
                    target: tgt,
                    amount,
                    critical,
                    knockback: None,
                });
            }
        }
        SpellKind::TurnCoat => {
            let origin = state.player.pos;
            let victim = state
                .enemies
                .iter_mut()
                .filter(|e| e.hp.alive() && e.mind_control.is_none())
                .filter(|e| {
                    visibility::line_of_sight(&state.dungeon, origin, e.pos, TURN_COAT_RANGE)
                })
                .min_by(|a, b| {
                    a.pos
                        .distance_squared(origin)
                        .total_cmp(&b.pos.distance_squared(origin))
                });
            if let Some(e) = victim {
                e.mind_control = Some(MindControl {
                    target: None,
                    until_s: now + TURN_COAT_DURATION_S,
                });
                log::debug!("turn_coat applied to {:?}", e.id);
            } else {
                // No visible victim; the cast fizzles without cooldown.
                return;
            }
        }
    }
    state.player.spell_ready_s = now + f64::from(spell.cooldown_s());
}
