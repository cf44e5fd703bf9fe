//! Boss behavior: aggressive pursuit plus the cooldown-gated ability layer
//! and the one-shot enrage transition.

use crate::actor::{AbilityKind, AiState, Boss};
use crate::collision;
use crate::schedule::{Ctx, DamageEvent, ProjectileSpawn, Target};
use crate::systems::combat;
use crate::systems::projectiles::{AreaEffect, Faction};
use crate::visibility;
use crate::SimState;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

const CHARGE_DURATION_S: f64 = 0.4;
const CHARGE_SPEED_MULT: f32 = 3.0;
const CHARGE_TRIGGER_DIST: f32 = 80.0;
const NOVA_TRIGGER_DIST: f32 = 120.0;
const STORM_TRIGGER_DIST: f32 = 100.0;
const GUARD_SLAM_REACH: f32 = 70.0;
const GUARD_SLAM_KNOCKBACK: f32 = 60.0;
const FIRE_SPIN_SHOTS: usize = 8;
const FROST_NOVA_RADIUS: f32 = 120.0;
const DARK_STORM_RADIUS: f32 = 90.0;
const SUMMON_COUNT: usize = 3;
const SUMMON_RING: f32 = 60.0;
const SUMMON_HP_FRAC: f32 = 0.6;

pub fn update(state: &mut SimState, ctx: &mut Ctx) {
    let now = state.time_s;
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    let player_alive = state.player.hp.alive();
    let mut summons: Vec<Vec2> = Vec::new();
    {
        let SimState {
            dungeon,
            boss,
            rng,
            effects,
            ..
        } = state;
        let Some(b) = boss.as_mut() else {
            return;
        };
        if !b.core.hp.alive() {
            return;
        }

        // Enrage is a one-way latch; the multipliers apply exactly once.
        if !b.enraged && b.core.hp.ratio() <= b.enrage_threshold {
            b.enraged = true;
            b.core.speed *= 2.0;
            b.core.attack_cooldown_s *= 0.5;
            b.special_cooldown_s *= 0.6;
            log::info!("boss {:?} enraged", b.kind);
            metrics::counter!("boss.enrage").increment(1);
        }

        if b.core.in_knockback(now) {
            b.core.vel = Vec2::ZERO;
            return;
        }
        if b.core.state == AiState::KnockedBack {
            b.core.state = AiState::Idle;
            b.core.kb_immune_until_s = now + combat::KNOCKBACK_IMMUNE_S;
        }
        if !player_alive {
            b.core.vel = Vec2::ZERO;
            return;
        }

        let dist = b.core.pos.distance(player_pos);
        let sees = visibility::line_of_sight(dungeon, b.core.pos, player_pos, b.core.sight_range);
        if sees {
            b.core.last_seen = Some((player_pos, now));
            b.core.state = if dist <= b.core.attack_range + player_radius {
                AiState::Attacking
            } else {
                AiState::Chasing
            };
        } else if b.core.state == AiState::Attacking || b.core.state == AiState::Chasing {
            if b
                .core
                .last_seen
                .is_none_or(|(_, t)| now - t > super::ai::GIVE_UP_TIMEOUT_S)
            {
                b.core.state = AiState::Idle;
                b.core.last_seen = None;
            } else {
                b.core.state = AiState::Chasing;
            }
        }

        // The boss guards its lair: no roaming while idle.
        let desired = if now < b.charge_until_s {
            b.charge_dir * (b.core.speed * CHARGE_SPEED_MULT)
        } else {
            match b.core.state {
                AiState::Chasing => {
                    let goal = b.core.last_seen.map(|(p, _)| p).unwrap_or(player_pos);
                    (goal - b.core.pos).normalize_or_zero() * b.core.speed
                }
                _ => Vec2::ZERO,
            }
        };
        let (pos, vel) =
            collision::move_with_collision(dungeon, b.core.pos, desired, b.core.radius, ctx.dt);
        b.core.pos = pos;
        b.core.vel = vel;

        // Basic melee swing when in reach.
        if b.core.state == AiState::Attacking
            && sees
            && now >= b.core.next_attack_s
            && dist <= b.core.attack_range + player_radius
        {
            let (amount, critical) = combat::damage_roll(rng, b.core.damage, 1.0);
            ctx.dmg.push(DamageEvent {
                target: Target::Player,
                amount,
                critical,
                knockback: None,
            });
            b.core.next_attack_s = now + f64::from(b.core.attack_cooldown_s);
        }

        // Specials: shared gate first, then the per-archetype decision rule,
        // then the chosen ability's own cooldown.
        if sees && now >= b.special_ready_s {
            if let Some(kind) = choose_ability(b, dist, now) {
                let dir = (player_pos - b.core.pos).normalize_or_zero();
                let base = b.core.damage;
                match kind {
                    AbilityKind::GuardSlam => {
                        if dist <= GUARD_SLAM_REACH + player_radius {
                            let (amount, critical) = combat::damage_roll(rng, base, 1.5);
                            ctx.dmg.push(DamageEvent {
                                target: Target::Player,
                                amount,
                                critical,
                                knockback: Some((dir, GUARD_SLAM_KNOCKBACK)),
                            });
                        }
                    }
                    AbilityKind::FireSpin => {
                        for i in 0..FIRE_SPIN_SHOTS {
                            let ang = i as f32 / FIRE_SPIN_SHOTS as f32 * TAU;
                            ctx.shots.push(ProjectileSpawn {
                                kind: "fire_spin".to_string(),
                                pos: b.core.pos,
                                dir: Vec2::new(ang.cos(), ang.sin()),
                                base_damage: base,
                                faction: Faction::Hostile,
                                owner: Some(b.core.id),
                                ricochets: None,
                            });
                        }
                    }
                    AbilityKind::FlameCharge => {
                        if dir != Vec2::ZERO {
                            b.charge_dir = dir;
                            b.charge_until_s = now + CHARGE_DURATION_S;
                        }
                    }
                    AbilityKind::IceShard => {
                        if dir != Vec2::ZERO {
                            ctx.shots.push(ProjectileSpawn {
                                kind: "ice_shard".to_string(),
                                pos: b.core.pos,
                                dir,
                                base_damage: base,
                                faction: Faction::Hostile,
                                owner: Some(b.core.id),
                                ricochets: None,
                            });
                        }
                    }
                    AbilityKind::FrostNova => {
                        effects.push(AreaEffect::frost_nova(b.core.pos, base, FROST_NOVA_RADIUS));
                    }
                    AbilityKind::LightningBolt => {
                        effects.push(AreaEffect::lightning_strike(player_pos, base));
                    }
                    AbilityKind::ChainLightning => {
                        let amount = (base as f32 * 1.2).round() as i32;
                        effects.push(AreaEffect::lightning_strike(player_pos, amount));
                        for _ in 0..2 {
                            let off = Vec2::new(
                                rng.random_range(-60.0..60.0f32),
                                rng.random_range(-60.0..60.0f32),
                            );
                            effects.push(AreaEffect::lightning_strike(player_pos + off, amount));
                        }
                    }
                    AbilityKind::ShadowBolt => {
                        if dir != Vec2::ZERO {
                            ctx.shots.push(ProjectileSpawn {
                                kind: "shadow_bolt".to_string(),
                                pos: b.core.pos,
                                dir,
                                base_damage: base,
                                faction: Faction::Hostile,
                                owner: Some(b.core.id),
                                ricochets: None,
                            });
                        }
                    }
                    AbilityKind::DarkStorm => {
                        effects.push(AreaEffect::dark_storm(
                            player_pos,
                            (base as f32 * 0.5).round() as i32,
                            DARK_STORM_RADIUS,
                            now,
                        ));
                    }
                    AbilityKind::SummonMinions => {
                        for i in 0..SUMMON_COUNT {
                            let ang = i as f32 / SUMMON_COUNT as f32 * TAU;
                            summons
                                .push(b.core.pos + Vec2::new(ang.cos(), ang.sin()) * SUMMON_RING);
                        }
                    }
                }
                if let Some(a) = b.ability_mut(kind) {
                    a.ready_at_s = now + f64::from(a.cooldown_s);
                }
                b.special_ready_s = now + f64::from(b.special_cooldown_s);
                log::debug!("boss {:?} used {:?} at dist {:.0}", b.kind, kind, dist);
                metrics::counter!("boss.abilities").increment(1);
            }
        }
    }

    for pos in summons {
        if let Some(id) = state.spawn_enemy("fast", pos) {
            if let Some(m) = state.enemies.iter_mut().find(|e| e.id == id) {
                m.hp.max = ((m.hp.max as f32 * SUMMON_HP_FRAC).round() as i32).max(1);
                m.hp.hp = m.hp.max;
            }
        }
    }
}

/// Per-archetype decision rule, driven by distance (and enrage for the
/// lightning striker). Preference order first, then each candidate's own
/// cooldown; `None` when nothing is ready.
fn choose_ability(b: &Boss, dist: f32, now: f64) -> Option<AbilityKind> {
    use AbilityKind::*;
    use crate::actor::BossKind;
    let prefs: &[AbilityKind] = match b.kind {
        BossKind::EliteGuardian => &[GuardSlam],
        BossKind::FlameBerserker => {
            if dist <= CHARGE_TRIGGER_DIST {
                &[FlameCharge, FireSpin]
            } else {
                &[FireSpin, FlameCharge]
            }
        }
        BossKind::IceMage => {
            if dist <= NOVA_TRIGGER_DIST {
                &[FrostNova, IceShard]
            } else {
                &[IceShard, FrostNova]
            }
        }
        BossKind::LightningStriker => {
            if b.enraged {
                &[ChainLightning, LightningBolt]
            } else {
                &[LightningBolt, ChainLightning]
            }
        }
        BossKind::ShadowLord => {
            if dist <= STORM_TRIGGER_DIST {
                &[DarkStorm, ShadowBolt]
            } else {
                &[SummonMinions, ShadowBolt, DarkStorm]
            }
        }
    };
    prefs
        .iter()
        .copied()
        .find(|k| {
            b.abilities
                .iter()
                .any(|a| a.kind == *k && now >= a.ready_at_s)
        })
}
