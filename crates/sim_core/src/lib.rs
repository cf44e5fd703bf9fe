//! Authoritative dungeon-crawler simulation core.
//!
//! Owns the dungeon, the player, enemies, the boss, projectiles, area
//! effects, and ground items, and advances them with a fixed-order,
//! single-threaded tick (`SimState::step`). Rendering, audio, and UI live
//! outside; they feed `PlayerInput` in and consume drained [`SimEvent`]s and
//! [`snapshot::TickSnapshot`]s.
//!
//! All randomness (generation, archetype choice, damage variance, crits)
//! comes from one seeded `SmallRng` owned by the state, so a fixed seed and
//! input sequence reproduce a run exactly.

pub mod actor;
pub mod collision;
pub mod dungeon;
pub mod events;
pub mod items;
pub mod schedule;
pub mod snapshot;
pub mod systems;
pub mod telemetry;
pub mod visibility;

use actor::{
    ActorId, Archetype, Boss, BossAbility, BossKind, Enemy, Health, Player, Weapon,
};
use data_runtime::configs::boss as boss_cfg;
use data_runtime::configs::boss::BossCfgDb;
use data_runtime::specs::archetypes::{depth_multiplier, ArchetypeSpecDb, StrategyTag};
use data_runtime::specs::projectiles::ProjectileSpecDb;
use data_runtime::specs::weapons::WeaponSpecDb;
use dungeon::Dungeon;
use events::{EntityKind, SimEvent};
use glam::Vec2;
use items::{
    EnchantKind, GroundItem, ItemId, ItemKind, SpellKind, WeaponKind, PICKUP_RADIUS, POTION_HEAL,
};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use schedule::{PlayerInput, ProjectileSpawn, Schedule};
use snapshot::{
    BossRep, EnemyRep, ItemRep, PlayerRep, ProjectileRep, TickSnapshot,
};
use systems::projectiles::{AreaEffect, Projectile};
use visibility::Visibility;

pub use actor::AiState;
pub use schedule::Ctx;

const ENEMY_BASE_SPEED: f32 = 80.0;
const ENEMY_SPEED_PER_DEPTH: f32 = 10.0;
const ENEMY_SPEED_DEPTH_CAP: f32 = 60.0;
const ENEMY_BASE_SIGHT: f32 = 150.0;
const ENEMY_MIN_SPAWN_DIST: f32 = 150.0;
const ITEM_MIN_SPAWN_DIST: f32 = 100.0;
const KEY_PICKUP_PAD: f32 = 20.0;
const ALTAR_ACTIVATE_PAD: f32 = 25.0;
const PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Copy, Clone, Debug)]
pub struct SimConfig {
    pub width: i32,
    pub height: i32,
    pub tile_size: f32,
    pub sight_range: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 60,
            height: 40,
            tile_size: 64.0,
            sight_range: 200.0,
        }
    }
}

pub struct SimState {
    pub dungeon: Dungeon,
    pub visibility: Visibility,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    /// At most one per level. The corpse stays after death; its
    /// `death_processed` latch guards the one-shot reward.
    pub boss: Option<Boss>,
    pub projectiles: Vec<Projectile>,
    pub effects: Vec<AreaEffect>,
    pub items: Vec<GroundItem>,
    pub depth: u32,
    pub key_collected: bool,
    pub time_s: f64,
    pub events: Vec<SimEvent>,
    pub rng: SmallRng,
    pub weapons: WeaponSpecDb,
    pub archetypes: ArchetypeSpecDb,
    pub projectile_specs: ProjectileSpecDb,
    pub boss_cfgs: BossCfgDb,
    next_actor: u32,
    next_item: u32,
    pub(crate) player_death_emitted: bool,
}

impl SimState {
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, SimConfig::default())
    }

    /// Generate and populate a full level.
    pub fn with_config(seed: u64, cfg: SimConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let dungeon = Dungeon::generate(cfg.width, cfg.height, cfg.tile_size, &mut rng);
        let mut s = Self::bare(rng, dungeon, cfg.sight_range);
        s.populate_level();
        s.visibility.update(&s.dungeon, s.player.pos);
        s
    }

    /// Empty world over a caller-built dungeon: no enemies, boss, or items.
    /// Used by tools and scenario tests that stage entities by hand.
    pub fn from_dungeon(seed: u64, dungeon: Dungeon) -> Self {
        let rng = SmallRng::seed_from_u64(seed);
        Self::bare(rng, dungeon, SimConfig::default().sight_range)
    }

    fn bare(rng: SmallRng, dungeon: Dungeon, sight_range: f32) -> Self {
        let weapons = WeaponSpecDb::load_default().unwrap_or_else(|e| {
            log::warn!("weapon specs unavailable ({e:#}); using baked defaults");
            WeaponSpecDb::baked()
        });
        let archetypes = ArchetypeSpecDb::load_default().unwrap_or_else(|e| {
            log::warn!("archetype specs unavailable ({e:#}); using baked defaults");
            ArchetypeSpecDb::baked()
        });
        let projectile_specs = ProjectileSpecDb::load_default().unwrap_or_else(|e| {
            log::warn!("projectile specs unavailable ({e:#}); using baked defaults");
            ProjectileSpecDb::baked()
        });
        let boss_cfgs = BossCfgDb::load_default().unwrap_or_else(|e| {
            log::warn!("boss configs unavailable ({e:#}); using baked defaults");
            BossCfgDb::baked()
        });
        let player = Player::new(dungeon.spawn_point);
        Self {
            visibility: Visibility::new(sight_range),
            dungeon,
            player,
            enemies: Vec::new(),
            boss: None,
            projectiles: Vec::new(),
            effects: Vec::new(),
            items: Vec::new(),
            depth: 1,
            key_collected: false,
            time_s: 0.0,
            events: Vec::new(),
            rng,
            weapons,
            archetypes,
            projectile_specs,
            boss_cfgs,
            next_actor: 1,
            next_item: 1,
            player_death_emitted: false,
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, input: &PlayerInput, dt: f32) {
        Schedule::run(self, input, dt);
    }

    /// Hand the tick's events to the observer layer.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    fn alloc_actor_id(&mut self) -> ActorId {
        let id = ActorId(self.next_actor);
        self.next_actor = self.next_actor.wrapping_add(1);
        id
    }

    fn alloc_item_id(&mut self) -> ItemId {
        let id = ItemId(self.next_item);
        self.next_item = self.next_item.wrapping_add(1);
        id
    }

    /// Resolved melee weapon for the player's current loadout.
    pub fn weapon_for_player(&self) -> Weapon {
        let key = self
            .player
            .inventory
            .weapon
            .map(WeaponKind::key)
            .unwrap_or("fists");
        self.weapons
            .weapons
            .get(key)
            .map(Weapon::from_spec)
            .unwrap_or_else(Weapon::fists)
    }

    /// Spawn an enemy of the named archetype, stats scaled for the current
    /// depth (and the yellow enchant, if held).
    pub fn spawn_enemy(&mut self, key: &str, pos: Vec2) -> Option<ActorId> {
        let Some(spec) = self.archetypes.entries.get(key).cloned() else {
            log::warn!("unknown enemy archetype '{key}'");
            return None;
        };
        let Some(archetype) = Archetype::from_key(key) else {
            log::warn!("archetype '{key}' has no closed-enum tag");
            return None;
        };
        let mult = depth_multiplier(self.depth);
        let mut hp = ((spec.hp as f32 * mult).round() as i32).max(1);
        if self.player.inventory.enchant == Some(EnchantKind::Yellow) {
            hp = ((hp as f32 * 0.85).round() as i32).max(1);
        }
        let speed_base = ENEMY_BASE_SPEED
            + (ENEMY_SPEED_PER_DEPTH * self.depth.saturating_sub(1) as f32)
                .min(ENEMY_SPEED_DEPTH_CAP);
        let id = self.alloc_actor_id();
        self.enemies.push(Enemy {
            id,
            archetype,
            pos,
            vel: Vec2::ZERO,
            radius: spec.radius,
            speed: speed_base * spec.speed_mult,
            hp: Health::new(hp),
            damage: ((spec.damage as f32 * mult).round() as i32).max(1),
            xp: ((spec.xp as f32 * mult).round() as i32).max(1),
            attack_range: spec.attack_range,
            sight_range: ENEMY_BASE_SIGHT * spec.sight_mult,
            attack_cooldown_s: spec.attack_cooldown_s,
            next_attack_s: 0.0,
            strategy: spec.strategy,
            state: AiState::Idle,
            anchor: pos,
            roam_target: None,
            next_roam_s: 0.0,
            last_seen: None,
            last_move_dir: Vec2::X,
            projectile: spec.projectile.clone(),
            max_ricochets: spec.max_ricochets,
            mind_control: None,
            knocked_until_s: 0.0,
            kb_immune_until_s: 0.0,
        });
        self.events.push(SimEvent::EntitySpawned {
            kind: EntityKind::Enemy,
            id: id.0,
            pos,
        });
        metrics::counter!("sim.enemy_spawns").increment(1);
        Some(id)
    }

    /// Spawn the depth's boss: a heavy-archetype core scaled by the boss
    /// config, plus the config's ability table.
    pub fn spawn_boss(&mut self, pos: Vec2) -> Option<ActorId> {
        let kind_key = boss_cfg::kind_for_depth(self.depth);
        let Some(cfg) = self.boss_cfgs.bosses.get(kind_key).cloned() else {
            log::warn!("no boss config for '{kind_key}'");
            return None;
        };
        let Some(kind) = BossKind::from_key(kind_key) else {
            log::warn!("boss kind '{kind_key}' has no closed-enum tag");
            return None;
        };
        let Some(base) = self.archetypes.entries.get("heavy").cloned() else {
            log::warn!("missing 'heavy' archetype; cannot assemble boss");
            return None;
        };
        let mult = depth_multiplier(self.depth);
        let mut abilities: Vec<BossAbility> = cfg
            .abilities
            .iter()
            .filter_map(|(name, a)| {
                let Some(k) = actor::AbilityKind::from_key(name) else {
                    log::warn!("boss ability '{name}' has no closed-enum tag; skipping");
                    return None;
                };
                Some(BossAbility {
                    kind: k,
                    cooldown_s: a.cooldown_s,
                    ready_at_s: 0.0,
                })
            })
            .collect();
        abilities.sort_by(|a, b| a.cooldown_s.total_cmp(&b.cooldown_s));
        let id = self.alloc_actor_id();
        let core = Enemy {
            id,
            archetype: Archetype::Heavy,
            pos,
            vel: Vec2::ZERO,
            radius: cfg.radius,
            speed: 70.0,
            hp: Health::new(
                ((base.hp as f32 * mult * cfg.hp_mult).round() as i32).max(1),
            ),
            damage: ((base.damage as f32 * mult * cfg.damage_mult).round() as i32).max(1),
            xp: ((base.xp as f32 * mult).round() as i32).max(1),
            attack_range: 30.0,
            sight_range: 220.0,
            attack_cooldown_s: base.attack_cooldown_s,
            next_attack_s: 0.0,
            strategy: StrategyTag::Aggressive,
            state: AiState::Idle,
            anchor: pos,
            roam_target: None,
            next_roam_s: 0.0,
            last_seen: None,
            last_move_dir: Vec2::X,
            projectile: None,
            max_ricochets: None,
            mind_control: None,
            knocked_until_s: 0.0,
            kb_immune_until_s: 0.0,
        };
        self.boss = Some(Boss {
            core,
            kind,
            abilities,
            special_cooldown_s: cfg.special_cooldown_s,
            special_ready_s: 0.0,
            enrage_threshold: cfg.enrage_threshold,
            enraged: false,
            death_processed: false,
            charge_until_s: 0.0,
            charge_dir: Vec2::X,
        });
        self.events.push(SimEvent::EntitySpawned {
            kind: EntityKind::Boss,
            id: id.0,
            pos,
        });
        log::info!("boss {kind_key} spawned at depth {}", self.depth);
        Some(id)
    }

    pub fn spawn_item(&mut self, kind: ItemKind, pos: Vec2) -> ItemId {
        let id = self.alloc_item_id();
        self.items.push(GroundItem { id, kind, pos });
        id
    }

    /// Convert a buffered spawn into a live projectile using its named spec.
    pub(crate) fn spawn_shot(&mut self, s: ProjectileSpawn) {
        let Some(spec) = self.projectile_specs.kinds.get(&s.kind) else {
            log::warn!("unknown projectile kind '{}'", s.kind);
            return;
        };
        let dir = s.dir.normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let damage = ((s.base_damage as f32 * spec.damage_mult).round() as i32).max(1);
        let (radius, speed, life_s, homing) = (spec.radius, spec.speed, spec.life_s, spec.homing);
        self.projectiles.push(Projectile {
            pos: s.pos,
            vel: dir * speed,
            radius,
            damage,
            life_s,
            faction: s.faction,
            owner: s.owner,
            ricochets: s.ricochets,
            homing,
        });
    }

    /// Fill a freshly generated dungeon with enemies, the boss, and loot.
    /// Placement failures after the attempt budget are abandoned silently;
    /// the level just ends up sparser.
    fn populate_level(&mut self) {
        let floors = self.dungeon.floor_tiles();
        if floors.is_empty() {
            log::warn!("level has no floor tiles; nothing to populate");
            return;
        }
        let spawn = self.dungeon.spawn_point;

        let target = (10 + self.depth * 4).min(30) as usize;
        let roster = archetype_roster(self.depth);
        let mut placed = 0usize;
        for _ in 0..PLACEMENT_ATTEMPTS * 2 {
            if placed >= target {
                break;
            }
            let (tx, ty) = floors[self.rng.random_range(0..floors.len())];
            let pos = self.dungeon.tile_center(tx, ty);
            if pos.distance(spawn) < ENEMY_MIN_SPAWN_DIST {
                continue;
            }
            let key = roster[self.rng.random_range(0..roster.len())];
            if self.spawn_enemy(key, pos).is_some() {
                placed += 1;
            }
        }

        if let Some(bp) = self.dungeon.boss_point {
            self.spawn_boss(bp);
        }

        let count = self.rng.random_range(3..=7);
        for _ in 0..count {
            for _ in 0..PLACEMENT_ATTEMPTS {
                let (tx, ty) = floors[self.rng.random_range(0..floors.len())];
                let pos = self.dungeon.tile_center(tx, ty);
                if pos.distance(spawn) < ITEM_MIN_SPAWN_DIST {
                    continue;
                }
                let kind = self.roll_item_kind();
                self.spawn_item(kind, pos);
                break;
            }
        }
    }

    fn roll_item_kind(&mut self) -> ItemKind {
        let r: f32 = self.rng.random();
        if r < 0.3 {
            let w = [WeaponKind::Sword, WeaponKind::Spear, WeaponKind::Mace];
            ItemKind::Weapon(w[self.rng.random_range(0..w.len())])
        } else if r < 0.6 {
            let e = [
                EnchantKind::Red,
                EnchantKind::Yellow,
                EnchantKind::Green,
                EnchantKind::Black,
            ];
            ItemKind::Enchant(e[self.rng.random_range(0..e.len())])
        } else if r < 0.85 {
            let s = [SpellKind::Haste, SpellKind::PowerPulse, SpellKind::TurnCoat];
            ItemKind::Spell(s[self.rng.random_range(0..s.len())])
        } else {
            ItemKind::HealthPotion
        }
    }

    /// Key pickup, item pickup, and the altar gate. The altar only fires
    /// when the key is held, the boss (if any) is dead, the player stands
    /// within the activation radius, and the interact intent is set.
    pub(crate) fn update_progression(&mut self, input: &PlayerInput) {
        if !self.player.hp.alive() {
            return;
        }
        let ppos = self.player.pos;
        let pradius = self.player.radius;

        if !self.key_collected {
            if let Some(kp) = self.dungeon.key_point {
                if ppos.distance(kp) <= pradius + KEY_PICKUP_PAD {
                    self.key_collected = true;
                    self.events.push(SimEvent::KeyCollected);
                    log::info!("key collected at depth {}", self.depth);
                }
            }
        }

        // Potions are consumed on contact.
        let potions: Vec<ItemId> = self
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::HealthPotion && i.pos.distance(ppos) <= PICKUP_RADIUS)
            .map(|i| i.id)
            .collect();
        for id in potions {
            self.items.retain(|i| i.id != id);
            self.player.hp.hp += POTION_HEAL;
            self.player.hp.clamp();
            self.events.push(SimEvent::ItemPickedUp { item: id });
        }

        if !input.interact {
            return;
        }

        let boss_dead = self.boss.as_ref().is_none_or(|b| !b.core.hp.alive());
        if self.key_collected && boss_dead {
            if let Some(ap) = self.dungeon.altar_point {
                if ppos.distance(ap) <= pradius + ALTAR_ACTIVATE_PAD {
                    self.events.push(SimEvent::AltarActivated);
                    metrics::counter!("sim.altars_activated").increment(1);
                    self.advance_level();
                    return;
                }
            }
        }

        let nearest = self
            .items
            .iter()
            .filter(|i| i.pos.distance(ppos) <= PICKUP_RADIUS)
            .min_by(|a, b| {
                a.pos
                    .distance_squared(ppos)
                    .total_cmp(&b.pos.distance_squared(ppos))
            })
            .map(|i| (i.id, i.kind, i.pos));
        if let Some((id, kind, pos)) = nearest {
            self.items.retain(|i| i.id != id);
            self.events.push(SimEvent::ItemPickedUp { item: id });
            if let Some(displaced) = self.player.inventory.equip(kind) {
                let drop_id = self.spawn_item(displaced, pos);
                self.events.push(SimEvent::ItemDropped {
                    item: drop_id,
                    pos,
                });
            }
            let red = self.player.inventory.enchant == Some(EnchantKind::Red);
            self.player.refresh_max_hp(red);
        }
    }

    /// Tear the level down and generate the next depth with the same RNG
    /// stream. Player position resets to the new spawn; fog memory is wiped.
    pub fn advance_level(&mut self) {
        self.depth += 1;
        log::info!("advancing to depth {}", self.depth);
        metrics::counter!("sim.levels_advanced").increment(1);
        let (w, h, ts) = (
            self.dungeon.width,
            self.dungeon.height,
            self.dungeon.tile_size,
        );
        self.dungeon = Dungeon::generate(w, h, ts, &mut self.rng);
        self.player.pos = self.dungeon.spawn_point;
        self.player.vel = Vec2::ZERO;
        self.enemies.clear();
        self.boss = None;
        self.projectiles.clear();
        self.effects.clear();
        self.items.clear();
        self.key_collected = false;
        self.visibility = Visibility::new(self.visibility.sight_range);
        self.populate_level();
        self.events.push(SimEvent::LevelAdvanced { depth: self.depth });
    }

    /// Read-only view of the tick for rendering and UI.
    pub fn snapshot(&self) -> TickSnapshot {
        let mut visible: Vec<(i32, i32)> = self.visibility.visible.iter().copied().collect();
        visible.sort_unstable();
        let mut explored: Vec<(i32, i32)> = self.visibility.explored.iter().copied().collect();
        explored.sort_unstable();
        TickSnapshot {
            time_s: self.time_s,
            depth: self.depth,
            key_collected: self.key_collected,
            player: PlayerRep {
                pos: self.player.pos,
                radius: self.player.radius,
                hp: self.player.hp.hp,
                max_hp: self.player.hp.max,
                level: self.player.level,
                xp: self.player.xp,
                xp_to_next: self.player.xp_to_next,
            },
            enemies: self
                .enemies
                .iter()
                .map(|e| EnemyRep {
                    id: e.id.0,
                    archetype: e.archetype,
                    pos: e.pos,
                    radius: e.radius,
                    hp: e.hp.hp,
                    max_hp: e.hp.max,
                    state: e.state,
                    mind_controlled: e.mind_control.is_some(),
                })
                .collect(),
            boss: self.boss.as_ref().map(|b| BossRep {
                id: b.core.id.0,
                kind: b.kind,
                pos: b.core.pos,
                radius: b.core.radius,
                hp: b.core.hp.hp,
                max_hp: b.core.hp.max,
                enraged: b.enraged,
            }),
            projectiles: self
                .projectiles
                .iter()
                .map(|p| ProjectileRep {
                    pos: p.pos,
                    radius: p.radius,
                    faction: p.faction,
                })
                .collect(),
            items: self
                .items
                .iter()
                .map(|i| ItemRep {
                    id: i.id,
                    kind: i.kind,
                    pos: i.pos,
                })
                .collect(),
            visible,
            explored,
        }
    }
}

/// Archetype pool sampled during population; deeper floors unlock the
/// trickier shooters.
fn archetype_roster(depth: u32) -> Vec<&'static str> {
    let mut r = vec!["basic", "basic", "basic", "fast", "fast", "heavy", "scout"];
    if depth >= 2 {
        r.push("ranged");
        r.push("ranged");
    }
    if depth >= 4 {
        r.push("ricochet");
    }
    r
}
