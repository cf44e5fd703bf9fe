use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::events::SimEvent;
use sim_core::items::{ItemKind, WeaponKind};
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

// Picking up a second weapon swaps it into the slot and drops the old one
// back on the floor.
#[test]
fn weapon_pickup_drops_previous_weapon() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(43, d);
    let p = s.player.pos;
    let interact = PlayerInput {
        interact: true,
        ..Default::default()
    };

    s.spawn_item(ItemKind::Weapon(WeaponKind::Sword), p + Vec2::new(10.0, 0.0));
    s.step(&interact, 0.016);
    assert_eq!(s.player.inventory.weapon, Some(WeaponKind::Sword));
    assert!(s.items.is_empty());

    s.spawn_item(ItemKind::Weapon(WeaponKind::Spear), p + Vec2::new(10.0, 0.0));
    s.drain_events();
    s.step(&interact, 0.016);
    assert_eq!(s.player.inventory.weapon, Some(WeaponKind::Spear));
    assert_eq!(s.items.len(), 1, "old weapon should hit the floor");
    assert_eq!(s.items[0].kind, ItemKind::Weapon(WeaponKind::Sword));
    assert!(s
        .drain_events()
        .iter()
        .any(|e| matches!(e, SimEvent::ItemDropped { .. })));
}

// Potions never enter the inventory; walking over one heals on the spot.
#[test]
fn potion_consumed_on_contact() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(44, d);
    s.player.hp.hp = 50;
    s.spawn_item(ItemKind::HealthPotion, s.player.pos + Vec2::new(20.0, 0.0));

    s.step(&PlayerInput::default(), 0.016);
    assert!(s.items.is_empty(), "potion still on the ground");
    assert_eq!(s.player.hp.hp, 80);
    assert!(s
        .drain_events()
        .iter()
        .any(|e| matches!(e, SimEvent::ItemPickedUp { .. })));
}
