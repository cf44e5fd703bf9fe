use glam::Vec2;
use sim_core::dungeon::Dungeon;
use sim_core::schedule::PlayerInput;
use sim_core::systems::projectiles::Faction;
use sim_core::SimState;

// A kiting shooter that starts nearly on top of the player backs off to its
// preferred band and keeps shooting from range.
#[test]
fn backs_away_when_too_close_and_fires() {
    let d = Dungeon::arena(30, 30, 64.0);
    let mut s = SimState::from_dungeon(6, d);
    let id = s
        .spawn_enemy("ranged", s.player.pos + Vec2::new(30.0, 0.0))
        .expect("spawn");

    let mut saw_arrow = false;
    for _ in 0..150 {
        s.step(&PlayerInput::default(), 0.016);
        saw_arrow |= s
            .projectiles
            .iter()
            .any(|p| p.faction == Faction::Hostile);
    }
    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    let dist = e.pos.distance(s.player.pos);
    assert!(dist > 55.0, "kiter failed to open distance: {dist:.1}");
    assert!(saw_arrow, "kiter never fired");
}
