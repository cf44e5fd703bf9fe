use glam::Vec2;
use sim_core::actor::AiState;
use sim_core::collision;
use sim_core::dungeon::Dungeon;
use sim_core::items::WeaponKind;
use sim_core::schedule::{Ctx, DamageEvent, PlayerInput, Target};
use sim_core::systems::combat;
use sim_core::SimState;

// A mace hit pushes the target away, shrinking the push rather than ever
// shoving it into a wall.
#[test]
fn mace_knockback_respects_walls() {
    let d = Dungeon::arena(14, 14, 64.0);
    let mut s = SimState::from_dungeon(21, d);
    s.player.inventory.weapon = Some(WeaponKind::Mace);
    // Enemy wedged near the left wall, player just to its right.
    let enemy_pos = Vec2::new(84.0, 448.0);
    s.player.pos = enemy_pos + Vec2::new(30.0, 0.0);
    let id = s.spawn_enemy("basic", enemy_pos).expect("spawn");
    {
        let e = s.enemies.iter_mut().find(|e| e.id == id).expect("enemy");
        e.speed = 0.0;
        e.sight_range = 0.0;
        e.hp.max = 1000;
        e.hp.hp = 1000;
    }
    let input = PlayerInput {
        melee: Some(enemy_pos),
        ..Default::default()
    };
    s.step(&input, 0.016);

    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    assert!(e.hp.hp < 1000, "mace swing missed");
    assert_eq!(e.state, AiState::KnockedBack);
    assert!(e.pos.x < enemy_pos.x, "no displacement applied");
    assert!(
        !collision::blocked(&s.dungeon, e.pos, e.radius),
        "knocked into a wall at {:?}",
        e.pos
    );
}

// While knocked back the target ignores further knockback; the damage still
// lands.
#[test]
fn knockback_immunity_prevents_double_push() {
    let d = Dungeon::arena(20, 20, 64.0);
    let mut s = SimState::from_dungeon(22, d);
    let start = s.dungeon.tile_center(10, 5);
    let id = s.spawn_enemy("basic", start).expect("spawn");
    s.time_s = 1.0;

    let push = DamageEvent {
        target: Target::Enemy(id),
        amount: 5,
        critical: false,
        knockback: Some((Vec2::X, 48.0)),
    };
    let mut ctx = Ctx {
        dt: 0.016,
        dmg: vec![push, push],
        shots: Vec::new(),
    };
    combat::apply_damage(&mut s, &mut ctx);

    let e = s.enemies.iter().find(|e| e.id == id).expect("enemy");
    assert_eq!(e.hp.max - e.hp.hp, 10, "both damage events apply");
    assert!(
        (e.pos.x - (start.x + 48.0)).abs() < 1e-3,
        "exactly one push expected, pos {:?}",
        e.pos
    );
    assert_eq!(e.state, AiState::KnockedBack);
    assert!(e.knocked_until_s > s.time_s);
}
