use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::items::SpellKind;
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

// Turn coat picks the nearest visible enemy; the victim then fights one
// target until that target dies, not re-selecting every tick.
#[test]
fn victim_keeps_target_until_it_dies() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(17, d);
    s.player.inventory.spell = Some(SpellKind::TurnCoat);

    let p = s.player.pos;
    let a = s.spawn_enemy("basic", p + Vec2::new(60.0, 0.0)).expect("a");
    let b = s.spawn_enemy("basic", p + Vec2::new(110.0, 0.0)).expect("b");
    let c = s.spawn_enemy("basic", p + Vec2::new(400.0, 0.0)).expect("c");
    for e in &mut s.enemies {
        e.speed = 0.0;
    }

    let cast = PlayerInput {
        cast: Some(p + Vec2::X),
        ..Default::default()
    };
    s.step(&cast, 0.016);

    let mc_target = |s: &SimState, id| {
        s.enemies
            .iter()
            .find(|e| e.id == id)
            .expect("victim")
            .mind_control
            .expect("mind controlled")
            .target
    };
    assert_eq!(mc_target(&s, a), Some(b), "nearest other enemy chosen");

    // A closer candidate appears; the victim does not switch.
    if let Some(e) = s.enemies.iter_mut().find(|e| e.id == c) {
        e.pos = p + Vec2::new(70.0, 10.0);
    }
    s.step(&PlayerInput::default(), 0.016);
    assert_eq!(mc_target(&s, a), Some(b), "target re-picked while alive");

    // Original target dies; only then does the victim move on.
    if let Some(e) = s.enemies.iter_mut().find(|e| e.id == b) {
        e.hp.hp = 0;
    }
    s.step(&PlayerInput::default(), 0.016);
    assert_eq!(mc_target(&s, a), Some(c), "victim retargets after a death");
}
