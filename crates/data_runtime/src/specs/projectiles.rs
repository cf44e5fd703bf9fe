//! Projectile specifications used to parameterize projectile spawns.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectileSpec {
    pub speed: f32,
    pub radius: f32,
    pub life_s: f32,
    /// Multiplier over the shooter's base damage.
    pub damage_mult: f32,
    /// Homing projectiles re-aim at the target every tick.
    #[serde(default)]
    pub homing: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectileSpecDb {
    /// Map from projectile name (e.g. "bolt", "ice_shard") to spec.
    pub kinds: HashMap<String, ProjectileSpec>,
}

impl ProjectileSpecDb {
    pub fn load_default() -> Result<Self> {
        let path = crate::data_root().join("config/projectiles.toml");
        if path.is_file() {
            let txt = std::fs::read_to_string(&path)
                .with_context(|| format!("read {}", path.display()))?;
            let db: Self = toml::from_str(&txt).context("parse projectiles TOML")?;
            Ok(db)
        } else {
            Ok(Self::baked())
        }
    }

    pub fn baked() -> Self {
        let mut db = Self::default();
        // Player ranged attack.
        db.kinds.insert(
            "bolt".to_string(),
            ProjectileSpec {
                speed: 400.0,
                radius: 3.0,
                life_s: 3.0,
                damage_mult: 0.5,
                homing: false,
            },
        );
        // Ranged archetype shot.
        db.kinds.insert(
            "arrow".to_string(),
            ProjectileSpec {
                speed: 250.0,
                radius: 3.0,
                life_s: 3.0,
                damage_mult: 1.0,
                homing: false,
            },
        );
        // Wall-bouncing orb fired by the ricochet archetype.
        db.kinds.insert(
            "ricochet_orb".to_string(),
            ProjectileSpec {
                speed: 250.0,
                radius: 4.0,
                life_s: 5.0,
                damage_mult: 1.0,
                homing: false,
            },
        );
        // Boss projectiles.
        db.kinds.insert(
            "fire_spin".to_string(),
            ProjectileSpec {
                speed: 150.0,
                radius: 6.0,
                life_s: 3.0,
                damage_mult: 1.0,
                homing: false,
            },
        );
        db.kinds.insert(
            "ice_shard".to_string(),
            ProjectileSpec {
                speed: 200.0,
                radius: 6.0,
                life_s: 4.0,
                damage_mult: 1.5,
                homing: false,
            },
        );
        db.kinds.insert(
            "shadow_bolt".to_string(),
            ProjectileSpec {
                speed: 120.0,
                radius: 6.0,
                life_s: 5.0,
                damage_mult: 1.3,
                homing: true,
            },
        );
        db
    }
}
