use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::events::{EntityKind, SimEvent};
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

// A dead player emits one death event and stops responding to input.
#[test]
fn death_event_fires_once_and_movement_stops() {
    let d = Dungeon::arena(20, 20, 64.0);
    let mut s = SimState::from_dungeon(71, d);
    s.player.hp.hp = 0;
    let pos = s.player.pos;

    let walk = PlayerInput {
        move_dir: Vec2::X,
        melee: Some(pos + Vec2::X),
        ..Default::default()
    };
    for _ in 0..10 {
        s.step(&walk, 0.016);
    }

    assert_eq!(s.player.pos, pos, "corpse moved");
    let deaths = s
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, SimEvent::EntityDied { kind: EntityKind::Player, .. }))
        .count();
    assert_eq!(deaths, 1);
}
