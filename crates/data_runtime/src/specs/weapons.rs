//! Melee weapon specifications applied multiplicatively to base combat stats.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct WeaponSpec {
    /// Multiplier over the attacker's base damage.
    pub damage_mult: f32,
    /// Multiplier over the attacker's base melee range.
    pub range_mult: f32,
    /// Full swing arc in degrees; a hit requires the target within half of it.
    pub arc_deg: f32,
    /// Divisor on the melee cooldown (higher = faster attacks).
    pub attack_speed: f32,
    /// Knockback displacement in world units; 0 = none.
    #[serde(default)]
    pub knockback: f32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeaponSpecDb {
    /// Map from weapon name (e.g. "sword", "mace") to spec.
    pub weapons: HashMap<String, WeaponSpec>,
}

impl WeaponSpecDb {
    pub fn load_default() -> Result<Self> {
        let path = crate::data_root().join("config/weapons.toml");
        if path.is_file() {
            let txt = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let db: Self = toml::from_str(&txt).context("parse weapons TOML")?;
            Ok(db)
        } else {
            Ok(Self::baked())
        }
    }

    /// Baked defaults used when no data file is checked out.
    pub fn baked() -> Self {
        let mut db = Self::default();
        db.weapons.insert(
            "fists".to_string(),
            WeaponSpec {
                damage_mult: 1.0,
                range_mult: 1.0,
                arc_deg: 60.0,
                attack_speed: 1.0,
                knockback: 0.0,
            },
        );
        db.weapons.insert(
            "sword".to_string(),
            WeaponSpec {
                damage_mult: 1.5,
                range_mult: 1.0,
                arc_deg: 90.0,
                attack_speed: 1.0,
                knockback: 0.0,
            },
        );
        db.weapons.insert(
            "spear".to_string(),
            WeaponSpec {
                damage_mult: 0.8,
                range_mult: 2.5,
                arc_deg: 15.0,
                attack_speed: 1.5,
                knockback: 0.0,
            },
        );
        db.weapons.insert(
            "mace".to_string(),
            WeaponSpec {
                damage_mult: 1.2,
                range_mult: 0.8,
                arc_deg: 110.0,
                attack_speed: 0.9,
                knockback: 48.0,
            },
        );
        db
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_present() {
        let db = WeaponSpecDb::load_default().expect("load");
        assert!(db.weapons.contains_key("fists"));
        let spear = db.weapons.get("spear").expect("spear");
        assert!(spear.range_mult > 2.0 && spear.arc_deg < 30.0);
        let mace = db.weapons.get("mace").expect("mace");
        assert!(mace.knockback > 0.0);
    }
}
