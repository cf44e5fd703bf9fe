//! Observer events drained by the embedding layer once per tick. The core
//! never formats text, renders, or plays sound; it only reports what happened.

use crate::items::ItemId;
use glam::Vec2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Player,
    Enemy,
    Boss,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SimEvent {
    EntitySpawned {
        kind: EntityKind,
        id: u32,
        pos: Vec2,
    },
    EntityDamaged {
        kind: EntityKind,
        id: u32,
        amount: i32,
        critical: bool,
    },
    EntityDied {
        kind: EntityKind,
        xp: i32,
        pos: Vec2,
    },
    ItemPickedUp {
        item: ItemId,
    },
    ItemDropped {
        item: ItemId,
        pos: Vec2,
    },
    KeyCollected,
    AltarActivated,
    LevelAdvanced {
        depth: u32,
    },
}
