//! Ground items and the player's single-slot-per-category inventory.

use glam::Vec2;

/// World-space pickup radius around an item.
pub const PICKUP_RADIUS: f32 = 32.0;
/// Instant heal from a health potion.
pub const POTION_HEAL: i32 = 30;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ItemId(pub u32);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WeaponKind {
    Sword,
    Spear,
    Mace,
}

impl WeaponKind {
    /// Key into the weapon spec db.
    pub fn key(self) -> &'static str {
        match self {
            Self::Sword => "sword",
            Self::Spear => "spear",
            Self::Mace => "mace",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EnchantKind {
    /// Player max health x1.25.
    Red,
    /// Enemy max health x0.85 (applied at spawn).
    Yellow,
    /// Enemy move speed x0.75.
    Green,
    /// Damage taken by the player x0.9.
    Black,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpellKind {
    /// +25% move speed while the cast intent is held. No cooldown.
    Haste,
    /// Radial burst around the player.
    PowerPulse,
    /// Mind-controls the nearest visible enemy for a while.
    TurnCoat,
}

impl SpellKind {
    pub fn cooldown_s(self) -> f32 {
        match self {
            Self::Haste => 0.0,
            Self::PowerPulse => 8.0,
            Self::TurnCoat => 4.0,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemKind {
    Weapon(WeaponKind),
    Enchant(EnchantKind),
    Spell(SpellKind),
    /// Consumed on pickup, never stored.
    HealthPotion,
}

#[derive(Copy, Clone, Debug)]
pub struct GroundItem {
    pub id: ItemId,
    pub kind: ItemKind,
    pub pos: Vec2,
}

/// One slot per category; equipping into an occupied slot returns the
/// displaced item so the caller can drop it back on the ground.
#[derive(Copy, Clone, Debug, Default)]
pub struct Inventory {
    pub weapon: Option<WeaponKind>,
    pub enchant: Option<EnchantKind>,
    pub spell: Option<SpellKind>,
}

impl Inventory {
    pub fn equip(&mut self, kind: ItemKind) -> Option<ItemKind> {
        match kind {
            ItemKind::Weapon(w) => self.weapon.replace(w).map(ItemKind::Weapon),
            ItemKind::Enchant(e) => self.enchant.replace(e).map(ItemKind::Enchant),
            ItemKind::Spell(s) => self.spell.replace(s).map(ItemKind::Spell),
            ItemKind::HealthPotion => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equip_swaps_within_category_only() {
        let mut inv = Inventory::default();
        assert_eq!(inv.equip(ItemKind::Weapon(WeaponKind::Sword)), None);
        assert_eq!(inv.equip(ItemKind::Spell(SpellKind::Haste)), None);
        let out = inv.equip(ItemKind::Weapon(WeaponKind::Spear));
        assert_eq!(out, Some(ItemKind::Weapon(WeaponKind::Sword)));
        assert_eq!(inv.weapon, Some(WeaponKind::Spear));
        assert_eq!(inv.spell, Some(SpellKind::Haste));
    }
}
