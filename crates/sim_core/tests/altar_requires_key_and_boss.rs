use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::events::SimEvent;
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

// The exit altar only fires once the key is held and the boss is down.
#[test]
fn altar_gates_on_key_then_boss() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(41, d);
    s.dungeon.altar_point = Some(s.player.pos + Vec2::new(10.0, 0.0));
    let interact = PlayerInput {
        interact: true,
        ..Default::default()
    };

    // No key yet: interacting does nothing.
    s.step(&interact, 0.016);
    assert_eq!(s.depth, 1);
    assert!(!s
        .drain_events()
        .iter()
        .any(|e| matches!(e, SimEvent::AltarActivated)));

    // Pick up the key, but the boss still lives.
    s.spawn_boss(Vec2::new(200.0, 200.0)).expect("boss");
    s.dungeon.key_point = Some(s.player.pos);
    s.step(&PlayerInput::default(), 0.016);
    assert!(s.key_collected);
    s.step(&interact, 0.016);
    assert_eq!(s.depth, 1, "altar opened with the boss alive");

    // Boss dies: the altar finally advances the level.
    s.boss.as_mut().expect("boss").core.hp.hp = 0;
    s.step(&PlayerInput::default(), 0.016);
    s.drain_events();
    s.step(&interact, 0.016);
    assert_eq!(s.depth, 2);
    let events = s.drain_events();
    assert!(events.iter().any(|e| matches!(e, SimEvent::AltarActivated)));
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::LevelAdvanced { depth: 2 })));
}
