use rand::rngs::SmallRng;
use rand::SeedableRng;
use sim_core::dungeon::Dungeon;
use std::collections::{HashSet, VecDeque};

#[test]
fn every_floor_tile_reachable_from_spawn() {
    for seed in [1u64, 7, 13, 42, 99] {
        let mut rng = SmallRng::seed_from_u64(seed);
        let d = Dungeon::generate(60, 40, 64.0, &mut rng);
        let floors: HashSet<(i32, i32)> = d.floor_tiles().into_iter().collect();
        assert!(!floors.is_empty());

        let start = d.tile_at(d.spawn_point);
        assert!(floors.contains(&start));
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some((x, y)) = queue.pop_front() {
            for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
                if floors.contains(&(nx, ny)) && seen.insert((nx, ny)) {
                    queue.push_back((nx, ny));
                }
            }
        }
        assert_eq!(
            seen.len(),
            floors.len(),
            "seed {seed}: {} of {} floor tiles reachable",
            seen.len(),
            floors.len()
        );
    }
}
