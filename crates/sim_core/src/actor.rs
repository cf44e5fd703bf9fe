//! Actor types: player, enemies, and the boss (an enemy core plus an
//! ability set, composed rather than subclassed).

use crate::items::Inventory;
use data_runtime::specs::archetypes::StrategyTag;
use data_runtime::specs::weapons::WeaponSpec;
use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ActorId(pub u32);

#[derive(Copy, Clone, Debug)]
pub struct Health {
    pub hp: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { hp: max, max }
    }
    #[inline]
    pub fn alive(&self) -> bool {
        self.hp > 0
    }
    #[inline]
    pub fn clamp(&mut self) {
        self.hp = self.hp.clamp(0, self.max);
    }
    #[inline]
    pub fn ratio(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.hp as f32 / self.max as f32
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AiState {
    Idle,
    Chasing,
    Attacking,
    KnockedBack,
}

/// Mind control is sticky: the victim holds one target until it dies or the
/// effect expires, never re-picking every tick. `target` is lazily chosen by
/// the AI on the first tick after application.
#[derive(Copy, Clone, Debug)]
pub struct MindControl {
    pub target: Option<ActorId>,
    pub until_s: f64,
}

/// Resolved melee weapon stats, applied multiplicatively to base stats.
#[derive(Copy, Clone, Debug)]
pub struct Weapon {
    pub damage_mult: f32,
    pub range_mult: f32,
    pub arc_rad: f32,
    pub attack_speed: f32,
    pub knockback: f32,
}

impl Weapon {
    pub fn from_spec(spec: &WeaponSpec) -> Self {
        Self {
            damage_mult: spec.damage_mult,
            range_mult: spec.range_mult,
            arc_rad: spec.arc_deg.to_radians(),
            attack_speed: spec.attack_speed.max(0.01),
            knockback: spec.knockback,
        }
    }

    /// Unarmed default.
    pub fn fists() -> Self {
        Self {
            damage_mult: 1.0,
            range_mult: 1.0,
            arc_rad: 60f32.to_radians(),
            attack_speed: 1.0,
            knockback: 0.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Archetype {
    Basic,
    Fast,
    Heavy,
    Ranged,
    Ricochet,
    Scout,
}

impl Archetype {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "basic" => Self::Basic,
            "fast" => Self::Fast,
            "heavy" => Self::Heavy,
            "ranged" => Self::Ranged,
            "ricochet" => Self::Ricochet,
            "scout" => Self::Scout,
            _ => return None,
        })
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Fast => "fast",
            Self::Heavy => "heavy",
            Self::Ranged => "ranged",
            Self::Ricochet => "ricochet",
            Self::Scout => "scout",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: ActorId,
    pub archetype: Archetype,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: Health,
    pub damage: i32,
    pub xp: i32,
    pub attack_range: f32,
    pub sight_range: f32,
    pub attack_cooldown_s: f32,
    pub next_attack_s: f64,
    pub strategy: StrategyTag,
    pub state: AiState,
    /// Spawn anchor; roaming stays within a bounded radius of it.
    pub anchor: Vec2,
    pub roam_target: Option<Vec2>,
    pub next_roam_s: f64,
    /// Last position the target was perceived at, with the sim time of the
    /// sighting. Cleared when the chase is given up.
    pub last_seen: Option<(Vec2, f64)>,
    pub last_move_dir: Vec2,
    /// Projectile spec key for ranged archetypes; melee when `None`.
    pub projectile: Option<String>,
    pub max_ricochets: Option<u32>,
    pub mind_control: Option<MindControl>,
    pub knocked_until_s: f64,
    pub kb_immune_until_s: f64,
}

impl Enemy {
    #[inline]
    pub fn in_knockback(&self, now: f64) -> bool {
        now < self.knocked_until_s
    }

    /// Immune while knocked back and for a short recovery window after.
    #[inline]
    pub fn knockback_immune(&self, now: f64) -> bool {
        self.in_knockback(now) || now < self.kb_immune_until_s
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BossKind {
    EliteGuardian,
    FlameBerserker,
    IceMage,
    LightningStriker,
    ShadowLord,
}

impl BossKind {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "elite_guardian" => Self::EliteGuardian,
            "flame_berserker" => Self::FlameBerserker,
            "ice_mage" => Self::IceMage,
            "lightning_striker" => Self::LightningStriker,
            "shadow_lord" => Self::ShadowLord,
            _ => return None,
        })
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::EliteGuardian => "elite_guardian",
            Self::FlameBerserker => "flame_berserker",
            Self::IceMage => "ice_mage",
            Self::LightningStriker => "lightning_striker",
            Self::ShadowLord => "shadow_lord",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AbilityKind {
    GuardSlam,
    FireSpin,
    FlameCharge,
    IceShard,
    FrostNova,
    LightningBolt,
    ChainLightning,
    ShadowBolt,
    DarkStorm,
    SummonMinions,
}

impl AbilityKind {
    pub fn from_key(key: &str) -> Option<Self> {
        Some(match key {
            "guard_slam" => Self::GuardSlam,
            "fire_spin" => Self::FireSpin,
            "flame_charge" => Self::FlameCharge,
            "ice_shard" => Self::IceShard,
            "frost_nova" => Self::FrostNova,
            "lightning_bolt" => Self::LightningBolt,
            "chain_lightning" => Self::ChainLightning,
            "shadow_bolt" => Self::ShadowBolt,
            "dark_storm" => Self::DarkStorm,
            "summon_minions" => Self::SummonMinions,
            _ => return None,
        })
    }
}

#[derive(Copy, Clone, Debug)]
pub struct BossAbility {
    pub kind: AbilityKind,
    pub cooldown_s: f32,
    pub ready_at_s: f64,
}

/// Boss: an `Enemy` core plus a kind tag, an independent per-ability cooldown
/// table, and the enrage/death one-shot latches.
#[derive(Clone, Debug)]
pub struct Boss {
    pub core: Enemy,
    pub kind: BossKind,
    pub abilities: Vec<BossAbility>,
    pub special_cooldown_s: f32,
    pub special_ready_s: f64,
    pub enrage_threshold: f32,
    pub enraged: bool,
    /// One-shot guard so death rewards are granted exactly once.
    pub death_processed: bool,
    pub charge_until_s: f64,
    pub charge_dir: Vec2,
}

impl Boss {
    pub fn ability_mut(&mut self, kind: AbilityKind) -> Option<&mut BossAbility> {
        self.abilities.iter_mut().find(|a| a.kind == kind)
    }
}

pub const PLAYER_RADIUS: f32 = 15.0;
pub const PLAYER_SPEED: f32 = 200.0;
const PLAYER_BASE_HP: i32 = 100;
const PLAYER_HP_PER_LEVEL: i32 = 20;
const PLAYER_BASE_DAMAGE: i32 = 25;
const PLAYER_DAMAGE_PER_LEVEL: i32 = 5;

#[derive(Clone, Debug)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub last_move_dir: Vec2,
    pub radius: f32,
    pub speed: f32,
    pub hp: Health,
    pub level: u32,
    pub xp: i32,
    pub xp_to_next: i32,
    pub inventory: Inventory,
    pub melee_ready_s: f64,
    pub ranged_ready_s: f64,
    pub spell_ready_s: f64,
    /// Post-hit invulnerability window.
    pub immune_until_s: f64,
    pub last_damaged_s: f64,
    /// Fractional carry for out-of-combat regen.
    pub regen_bank: f32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            last_move_dir: Vec2::X,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            hp: Health::new(PLAYER_BASE_HP),
            level: 1,
            xp: 0,
            xp_to_next: 100,
            inventory: Inventory::default(),
            melee_ready_s: 0.0,
            ranged_ready_s: 0.0,
            spell_ready_s: 0.0,
            immune_until_s: 0.0,
            last_damaged_s: f64::NEG_INFINITY,
            regen_bank: 0.0,
        }
    }

    #[inline]
    pub fn base_damage(&self) -> i32 {
        PLAYER_BASE_DAMAGE + PLAYER_DAMAGE_PER_LEVEL * (self.level.saturating_sub(1) as i32)
    }

    /// Bank XP and resolve level-ups; returns levels gained. The caller
    /// refreshes max health afterwards (enchants factor in).
    pub fn gain_xp(&mut self, xp: i32) -> u32 {
        self.xp += xp;
        let mut gained = 0;
        while self.xp >= self.xp_to_next {
            self.xp -= self.xp_to_next;
            self.xp_to_next = (self.xp_to_next as f32 * 1.5).round() as i32;
            self.level += 1;
            gained += 1;
        }
        gained
    }

    /// Recompute max health from level and the red enchant, keeping current
    /// health within bounds.
    pub fn refresh_max_hp(&mut self, red_enchant: bool) {
        let base = PLAYER_BASE_HP + PLAYER_HP_PER_LEVEL * (self.level.saturating_sub(1) as i32);
        let max = if red_enchant {
            (base as f32 * 1.25).round() as i32
        } else {
            base
        };
        self.hp.max = max;
        self.hp.clamp();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xp_curve_and_levels() {
        let mut p = Player::new(Vec2::ZERO);
        assert_eq!(p.gain_xp(99), 0);
        assert_eq!(p.gain_xp(1), 1);
        assert_eq!(p.level, 2);
        assert_eq!(p.xp_to_next, 150);
        assert_eq!(p.base_damage(), 30);
        // Enough banked XP levels twice in one grant.
        assert_eq!(p.gain_xp(150 + 225), 2);
        assert_eq!(p.level, 4);
    }

    #[test]
    fn red_enchant_scales_max_hp() {
        let mut p = Player::new(Vec2::ZERO);
        p.refresh_max_hp(true);
        assert_eq!(p.hp.max, 125);
        assert_eq!(p.hp.hp, 100, "current hp untouched by a larger cap");
        p.refresh_max_hp(false);
        assert_eq!(p.hp.max, 100);
    }
}
