use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

// Crossing the 30% threshold applies the enrage modifiers exactly once;
// healing back above the line does not revert or re-apply them.
#[test]
fn enrage_latches_and_never_reapplies() {
    sim_core::telemetry::init();
    let d = Dungeon::arena(40, 40, 64.0);
    let mut s = SimState::from_dungeon(14, d);
    s.spawn_boss(Vec2::new(300.0, 300.0)).expect("boss");
    let input = PlayerInput::default();

    // 31%: above threshold, nothing happens.
    {
        let b = s.boss.as_mut().expect("boss");
        assert_eq!(b.core.hp.max, 240);
        b.core.hp.hp = 75;
    }
    s.step(&input, 0.016);
    let speed_before = {
        let b = s.boss.as_ref().expect("boss");
        assert!(!b.enraged);
        b.core.speed
    };

    // 29%: the latch fires.
    s.boss.as_mut().expect("boss").core.hp.hp = 71;
    s.step(&input, 0.016);
    let (speed_enraged, cd_enraged) = {
        let b = s.boss.as_ref().expect("boss");
        assert!(b.enraged);
        (b.core.speed, b.core.attack_cooldown_s)
    };
    assert!((speed_enraged - speed_before * 2.0).abs() < 1e-3);

    // Healed back above threshold: modifiers stay exactly as they were.
    s.boss.as_mut().expect("boss").core.hp.hp = 200;
    for _ in 0..20 {
        s.step(&input, 0.016);
    }
    let b = s.boss.as_ref().expect("boss");
    assert!(b.enraged);
    assert!((b.core.speed - speed_enraged).abs() < 1e-3, "speed re-applied");
    assert!((b.core.attack_cooldown_s - cd_enraged).abs() < 1e-3);
}
