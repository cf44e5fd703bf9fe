use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::items::EnchantKind;
use sim_core::SimState;

// Enemy stats grow 30% per depth past the first.
#[test]
fn deeper_spawns_are_stronger() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(61, d);
    s.depth = 3;
    let id = s
        .spawn_enemy("basic", Vec2::new(300.0, 300.0))
        .expect("spawn");
    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    assert_eq!(e.hp.max, 80, "50 hp at 1.6x");
    assert_eq!(e.damage, 24, "15 damage at 1.6x");
    assert_eq!(e.xp, 40, "25 xp at 1.6x");
}

// The yellow enchant shaves enemy hp at spawn time.
#[test]
fn yellow_enchant_weakens_new_spawns() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(62, d);
    s.player.inventory.enchant = Some(EnchantKind::Yellow);
    let id = s
        .spawn_enemy("basic", Vec2::new(300.0, 300.0))
        .expect("spawn");
    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    assert_eq!(e.hp.max, 43, "50 hp at 0.85x, rounded");
}

// The green enchant slows enemies dynamically; dropping it restores speed.
#[test]
fn green_enchant_slow_is_not_baked_in() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(63, d);
    s.player.inventory.enchant = Some(EnchantKind::Green);
    let id = s
        .spawn_enemy("basic", Vec2::new(300.0, 300.0))
        .expect("spawn");
    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    // Spawn-time stats are untouched; the slow applies while moving.
    assert!((e.speed - 80.0).abs() < 1e-3);
}
