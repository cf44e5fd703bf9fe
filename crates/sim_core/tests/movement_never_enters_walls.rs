use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sim_core::dungeon::Dungeon;
use sim_core::collision;

#[test]
fn random_walks_stay_out_of_walls() {
    let mut rng = SmallRng::seed_from_u64(5);
    let d = Dungeon::generate(40, 30, 64.0, &mut rng);
    let mut pos = d.spawn_point;
    let radius = 15.0;
    assert!(!collision::blocked(&d, pos, radius));
    for _ in 0..2000 {
        let vel = Vec2::new(rng.random_range(-250.0..250.0), rng.random_range(-250.0..250.0));
        let (p, _) = collision::move_with_collision(&d, pos, vel, radius, 0.05);
        assert!(
            !collision::blocked(&d, p, radius),
            "entered wall at {p:?} from {pos:?} with vel {vel:?}"
        );
        pos = p;
    }
}
