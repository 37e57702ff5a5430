use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;

use pacmaze::constants::START_LIVES;
use pacmaze::{Direction, Game, Mode};

fn bundled_game() -> Game {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("mazes/maze1.txt");
    Game::from_file(path, &[((0, 7), (20, 7))]).unwrap()
}

#[test]
fn test_ghost_cycles_modes_over_a_long_run() {
    let mut game = bundled_game();
    let mut rng = StdRng::seed_from_u64(11);
    let mut flips = Vec::new();
    let mut last = game.ghost.mode.current();

    // 0.125 s steps keep the accumulated timer exact.
    for step in 1..=(30 * 8) {
        // Collisions do not touch the mode timer; keep the game running.
        game.lives = START_LIVES;
        game.tick(0.125, None, &mut rng);
        let now = game.ghost.mode.current();
        if now != last {
            flips.push((step, now));
            last = now;
        }
    }
    assert_eq!(flips, vec![(7 * 8, Mode::Chase), (27 * 8, Mode::Scatter)]);
}

#[test]
fn test_entities_stay_on_graph_edges() {
    let mut game = bundled_game();
    let mut rng = StdRng::seed_from_u64(5);
    let turns = [Direction::Down, Direction::Right, Direction::Up, Direction::Left];
    for step in 0..600 {
        let requested = Some(turns[(step / 40) % turns.len()]);
        game.tick(1.0 / 30.0, requested, &mut rng);
        if game.is_over() || game.is_cleared() {
            break;
        }
        for entity in [&game.pacman.entity, &game.ghost.entity] {
            let from = game.nodes.position(entity.node());
            let to = game.nodes.position(entity.target());
            let at = entity.position();
            // Edges are axis-aligned, so one coordinate is shared.
            assert!(at.x == from.x && from.x == to.x || at.y == from.y && from.y == to.y);
        }
    }
    assert!(game.score > 0);
}

#[test]
fn test_pellets_only_decrease() {
    let mut game = bundled_game();
    let mut rng = StdRng::seed_from_u64(9);
    let mut last = game.pellets.len();
    for _ in 0..300 {
        game.tick(1.0 / 30.0, Some(Direction::Right), &mut rng);
        assert!(game.pellets.len() <= last);
        last = game.pellets.len();
    }
    assert_eq!(game.pellets.num_eaten + last, bundled_game().pellets.len());
}
