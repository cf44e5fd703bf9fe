use glam::Vec2;
use sim_core::actor::Archetype;
use sim_core::dungeon::Dungeon;
use sim_core::events::{EntityKind, SimEvent};
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

// The shadow lord calls in a ring of weakened fast minions when the player
// stays out of storm range.
#[test]
fn shadow_lord_summons_weakened_pack() {
    let d = Dungeon::arena(40, 40, 64.0);
    let mut s = SimState::from_dungeon(33, d);
    s.depth = 10;
    let boss_pos = s.player.pos + Vec2::new(150.0, 0.0);
    s.spawn_boss(boss_pos).expect("boss");
    s.drain_events();

    s.step(&PlayerInput::default(), 0.016);

    let minions: Vec<_> = s
        .enemies
        .iter()
        .filter(|e| e.archetype == Archetype::Fast)
        .collect();
    assert_eq!(minions.len(), 3);
    let full = {
        let spec = s.archetypes.entries.get("fast").expect("fast spec");
        let mult = 1.0 + 9.0 * 0.3;
        (spec.hp as f32 * mult).round() as i32
    };
    for m in minions {
        assert!(m.hp.max < full, "minion hp not reduced: {}", m.hp.max);
        assert!(m.pos.distance(boss_pos) < 80.0, "minion far from boss");
    }
    let spawns = s
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::EntitySpawned { kind: EntityKind::Enemy, .. }))
        .count();
    assert_eq!(spawns, 3);
}
