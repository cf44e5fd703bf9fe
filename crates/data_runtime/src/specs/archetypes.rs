//! Enemy archetype specifications: base stats before depth scaling, plus the
//! AI strategy each archetype runs.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyTag {
    Aggressive,
    Tank,
    Kiting,
    Flanking,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArchetypeSpec {
    pub hp: i32,
    pub damage: i32,
    pub xp: i32,
    pub attack_cooldown_s: f32,
    /// Multiplier over the baseline enemy move speed for the current depth.
    #[serde(default = "one")]
    pub speed_mult: f32,
    /// Multiplier over the baseline sight range.
    #[serde(default = "one")]
    pub sight_mult: f32,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_attack_range")]
    pub attack_range: f32,
    pub strategy: StrategyTag,
    /// Name of a projectile spec for ranged archetypes; melee when absent.
    #[serde(default)]
    pub projectile: Option<String>,
    /// Wall bounces for ricochet shooters; ignored for everyone else.
    #[serde(default)]
    pub max_ricochets: Option<u32>,
}

fn one() -> f32 {
    1.0
}
fn default_radius() -> f32 {
    12.0
}
fn default_attack_range() -> f32 {
    20.0
}

/// Stat multiplier applied to hp/damage/xp for a dungeon depth (1-based).
pub fn depth_multiplier(depth: u32) -> f32 {
    1.0 + (depth.saturating_sub(1) as f32) * 0.3
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArchetypeSpecDb {
    pub entries: HashMap<String, ArchetypeSpec>,
}

impl ArchetypeSpecDb {
    pub fn load_default() -> Result<Self> {
        let path = crate::data_root().join("config/archetypes.toml");
        if path.is_file() {
            let txt = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let db: Self = toml::from_str(&txt).context("parse archetypes TOML")?;
            Ok(db)
        } else {
            Ok(Self::baked())
        }
    }

    pub fn baked() -> Self {
        let mut db = Self::default();
        db.entries.insert(
            "basic".to_string(),
            ArchetypeSpec {
                hp: 50,
                damage: 15,
                xp: 25,
                attack_cooldown_s: 1.5,
                speed_mult: 1.0,
                sight_mult: 1.0,
                radius: 12.0,
                attack_range: 20.0,
                strategy: StrategyTag::Aggressive,
                projectile: None,
                max_ricochets: None,
            },
        );
        db.entries.insert(
            "fast".to_string(),
            ArchetypeSpec {
                hp: 30,
                damage: 12,
                xp: 20,
                attack_cooldown_s: 1.0,
                speed_mult: 1.5,
                sight_mult: 1.2,
                radius: 12.0,
                attack_range: 20.0,
                strategy: StrategyTag::Aggressive,
                projectile: None,
                max_ricochets: None,
            },
        );
        db.entries.insert(
            "heavy".to_string(),
            ArchetypeSpec {
                hp: 80,
                damage: 25,
                xp: 40,
                attack_cooldown_s: 2.5,
                speed_mult: 1.0,
                sight_mult: 1.0,
                radius: 16.0,
                attack_range: 25.0,
                strategy: StrategyTag::Tank,
                projectile: None,
                max_ricochets: None,
            },
        );
        db.entries.insert(
            "ranged".to_string(),
            ArchetypeSpec {
                hp: 40,
                damage: 20,
                xp: 35,
                attack_cooldown_s: 2.0,
                speed_mult: 1.0,
                sight_mult: 1.3,
                radius: 12.0,
                attack_range: 100.0,
                strategy: StrategyTag::Kiting,
                projectile: Some("arrow".to_string()),
                max_ricochets: None,
            },
        );
        db.entries.insert(
            "ricochet".to_string(),
            ArchetypeSpec {
                hp: 45,
                damage: 22,
                xp: 50,
                attack_cooldown_s: 2.2,
                speed_mult: 0.9,
                sight_mult: 1.4,
                radius: 12.0,
                attack_range: 120.0,
                strategy: StrategyTag::Kiting,
                projectile: Some("ricochet_orb".to_string()),
                max_ricochets: Some(2),
            },
        );
        db.entries.insert(
            "scout".to_string(),
            ArchetypeSpec {
                hp: 28,
                damage: 10,
                xp: 22,
                attack_cooldown_s: 1.1,
                speed_mult: 1.4,
                sight_mult: 1.1,
                radius: 11.0,
                attack_range: 20.0,
                strategy: StrategyTag::Flanking,
                projectile: None,
                max_ricochets: None,
            },
        );
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn depth_scaling_is_linear() {
        assert!((depth_multiplier(1) - 1.0).abs() < 1e-6);
        assert!((depth_multiplier(4) - 1.9).abs() < 1e-6);
    }
}
