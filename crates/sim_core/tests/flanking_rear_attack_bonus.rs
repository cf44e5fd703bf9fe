use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::schedule::PlayerInput;
use sim_core::SimState;

fn run_one_tick_with_scout_at(offset: Vec2) -> f64 {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(9, d);
    // Establish the player's facing before the scout is placed.
    let walk = PlayerInput {
        move_dir: Vec2::X,
        ..Default::default()
    };
    s.step(&walk, 0.016);
    let id = s.spawn_enemy("scout", s.player.pos + offset).expect("spawn");
    s.step(&walk, 0.016);
    let e = s.enemies.iter().find(|e| e.id == id).expect("scout");
    assert!(e.next_attack_s > s.time_s, "scout did not attack");
    e.next_attack_s - s.time_s
}

// Flankers get an attack-speed bonus from behind, none from the front.
#[test]
fn rear_strike_cools_down_faster_than_front() {
    let rear_cd = run_one_tick_with_scout_at(Vec2::new(-28.0, 0.0));
    let front_cd = run_one_tick_with_scout_at(Vec2::new(28.0, 0.0));
    // Scout cooldown is 1.1s; the rear bonus divides it by 1.5.
    assert!(
        (rear_cd - 1.1 / 1.5).abs() < 0.05,
        "rear cooldown {rear_cd:.3}"
    );
    assert!((front_cd - 1.1).abs() < 0.05, "front cooldown {front_cd:.3}");
}
