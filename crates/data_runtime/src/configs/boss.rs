//! Boss configuration: per-kind stat multipliers and ability cooldown tables.
//!
//! Parses `data/config/bosses.toml` into structured configs used to assemble a
//! boss on spawn. Kept free of simulation dependencies; the sim core converts
//! these into its own types.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct BossAbilityCfg {
    pub cooldown_s: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BossCfg {
    pub hp_mult: f32,
    pub damage_mult: f32,
    pub radius: f32,
    #[serde(default = "default_enrage")]
    pub enrage_threshold: f32,
    #[serde(default = "default_special_cd")]
    pub special_cooldown_s: f32,
    pub abilities: HashMap<String, BossAbilityCfg>,
}

fn default_enrage() -> f32 {
    0.3
}
fn default_special_cd() -> f32 {
    3.0
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BossCfgDb {
    pub bosses: HashMap<String, BossCfg>,
}

/// Which boss kind guards a given dungeon depth (1-based).
pub fn kind_for_depth(depth: u32) -> &'static str {
    if depth == 10 {
        "shadow_lord"
    } else if depth % 3 == 0 {
        const ROTATION: [&str; 3] = ["flame_berserker", "ice_mage", "lightning_striker"];
        ROTATION[((depth / 3).saturating_sub(1) as usize) % ROTATION.len()]
    } else {
        "elite_guardian"
    }
}

impl BossCfgDb {
    pub fn load_default() -> Result<Self> {
        let path = crate::data_root().join("config/bosses.toml");
        if path.is_file() {
            let txt = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let db: Self = toml::from_str(&txt).context("parse bosses TOML")?;
            Ok(db)
        } else {
            Ok(Self::baked())
        }
    }

    pub fn baked() -> Self {
        fn abilities(list: &[(&str, f32)]) -> HashMap<String, BossAbilityCfg> {
            list.iter()
                .map(|(n, cd)| (n.to_string(), BossAbilityCfg { cooldown_s: *cd }))
                .collect()
        }
        let mut db = Self::default();
        db.bosses.insert(
            "elite_guardian".to_string(),
            BossCfg {
                hp_mult: 3.0,
                damage_mult: 1.5,
                radius: 16.0,
                enrage_threshold: 0.3,
                special_cooldown_s: 3.0,
                abilities: abilities(&[("guard_slam", 5.0)]),
            },
        );
        db.bosses.insert(
            "flame_berserker".to_string(),
            BossCfg {
                hp_mult: 4.5,
                damage_mult: 1.95,
                radius: 16.0,
                enrage_threshold: 0.3,
                special_cooldown_s: 3.0,
                abilities: abilities(&[("fire_spin", 4.0), ("flame_charge", 6.0)]),
            },
        );
        db.bosses.insert(
            "ice_mage".to_string(),
            BossCfg {
                hp_mult: 4.5,
                damage_mult: 1.95,
                radius: 16.0,
                enrage_threshold: 0.3,
                special_cooldown_s: 3.0,
                abilities: abilities(&[("ice_shard", 2.5), ("frost_nova", 8.0)]),
            },
        );
        db.bosses.insert(
            "lightning_striker".to_string(),
            BossCfg {
                hp_mult: 4.5,
                damage_mult: 1.95,
                radius: 16.0,
                enrage_threshold: 0.3,
                special_cooldown_s: 3.0,
                abilities: abilities(&[("lightning_bolt", 3.0), ("chain_lightning", 7.0)]),
            },
        );
        db.bosses.insert(
            "shadow_lord".to_string(),
            BossCfg {
                hp_mult: 6.0,
                damage_mult: 2.7,
                radius: 20.0,
                enrage_threshold: 0.3,
                special_cooldown_s: 3.0,
                abilities: abilities(&[
                    ("shadow_bolt", 2.0),
                    ("dark_storm", 10.0),
                    ("summon_minions", 15.0),
                ]),
            },
        );
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn depth_rotation() {
        assert_eq!(kind_for_depth(1), "elite_guardian");
        assert_eq!(kind_for_depth(3), "flame_berserker");
        assert_eq!(kind_for_depth(6), "ice_mage");
        assert_eq!(kind_for_depth(9), "lightning_striker");
        assert_eq!(kind_for_depth(10), "shadow_lord");
    }

    #[test]
    fn baked_kinds_cover_rotation() {
        let db = BossCfgDb::load_default().expect("load");
        for depth in 1..=10 {
            assert!(db.bosses.contains_key(kind_for_depth(depth)));
        }
    }
}
