use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::schedule::PlayerInput;
use sim_core::{AiState, SimState};

// An enemy with sight 150 and a clear line to the player 100 away leaves
// idle on the very first tick.
#[test]
fn acquires_target_within_one_tick() {
    let d = Dungeon::arena(20, 20, 64.0);
    let mut s = SimState::from_dungeon(2, d);
    let pos = s.player.pos + Vec2::new(100.0, 0.0);
    let id = s.spawn_enemy("basic", pos).expect("spawn");
    {
        let e = s.enemies.iter_mut().find(|e| e.id == id).expect("enemy");
        e.sight_range = 150.0;
    }
    s.step(&PlayerInput::default(), 0.016);
    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    assert!(
        matches!(e.state, AiState::Chasing | AiState::Attacking),
        "state after one tick: {:?}",
        e.state
    );
}

#[test]
fn moves_closer_while_chasing() {
    let d = Dungeon::arena(20, 20, 64.0);
    let mut s = SimState::from_dungeon(2, d);
    let pos = s.player.pos + Vec2::new(120.0, 0.0);
    let id = s.spawn_enemy("basic", pos).expect("spawn");
    let d0 = 120.0;
    for _ in 0..30 {
        s.step(&PlayerInput::default(), 0.016);
    }
    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    let d1 = e.pos.distance(s.player.pos);
    assert!(d1 < d0, "enemy did not close distance: {d1:.1}");
}
