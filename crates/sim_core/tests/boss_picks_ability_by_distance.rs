use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

fn flame_berserker_at(offset: Vec2) -> SimState {
    let d = Dungeon::arena(40, 40, 64.0);
    let mut s = SimState::from_dungeon(31, d);
    s.depth = 3;
    let pos = s.player.pos + offset;
    s.spawn_boss(pos).expect("boss");
    s
}

// Point blank, the flame berserker charges rather than spraying shots.
#[test]
fn charges_when_player_is_close() {
    let mut s = flame_berserker_at(Vec2::new(60.0, 0.0));
    s.step(&PlayerInput::default(), 0.016);
    let b = s.boss.as_ref().expect("boss");
    assert!(b.charge_until_s > s.time_s, "charge never started");
    assert!(s.projectiles.is_empty(), "charge should not spawn shots");
}

// At range it opens with the radial fire spin instead.
#[test]
fn fire_spins_when_player_is_far() {
    let mut s = flame_berserker_at(Vec2::new(150.0, 0.0));
    s.step(&PlayerInput::default(), 0.016);
    let b = s.boss.as_ref().expect("boss");
    assert!((b.charge_until_s - 0.0).abs() < f64::EPSILON);
    assert_eq!(s.projectiles.len(), 8, "fire spin is a full ring");
}
