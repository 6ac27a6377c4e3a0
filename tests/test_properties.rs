use std::collections::HashSet;

use kitten_shooter::compute::*;
use kitten_shooter::config::GameConfig;
use kitten_shooter::entities::*;
use kitten_shooter::input::Command;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::Shoot),
    ]
}

/// Frame times (ms) paired with an optional key press before the frame.
fn session() -> impl Strategy<Value = Vec<(u64, Option<Command>)>> {
    prop::collection::vec((0u64..120, prop::option::of(command())), 1..200)
}

proptest! {
    #[test]
    fn player_stays_inside_arena(commands in prop::collection::vec(command(), 0..200)) {
        let config = GameConfig::default();
        let mut state = init_state(&config, &mut StdRng::seed_from_u64(0));
        for command in commands {
            state = apply_command(&state, command, &config);
            prop_assert!(state.player.x >= 0);
            prop_assert!(state.player.x <= config.max_player_x());
            prop_assert_eq!(state.player.x % config.player_width, 0);
        }
    }

    #[test]
    fn lanes_never_hold_two_enemies(seed in any::<u64>(), steps in session()) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(&config, &mut rng);
        for (dt, command) in steps {
            if let Some(command) = command {
                state = apply_command(&state, command, &config);
            }
            state = tick(&state, dt, &config, &mut rng).0;

            let xs: Vec<i32> = state.live_enemies().map(|e| e.x).collect();
            let distinct: HashSet<i32> = xs.iter().copied().collect();
            prop_assert_eq!(xs.len(), distinct.len());
            for (lane, slot) in state.enemies.iter().enumerate() {
                if let Some(enemy) = slot {
                    prop_assert_eq!(enemy.lane, lane);
                    prop_assert_eq!(enemy.x, config.lane_x(lane));
                }
            }
            prop_assert_eq!(state.enemies.len(), config.lane_count());
            if state.status == GameStatus::GameOver {
                break;
            }
        }
    }

    #[test]
    fn score_never_decreases_and_restart_zeroes_it(seed in any::<u64>(), steps in session()) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(&config, &mut rng);
        for (dt, _) in steps {
            let before = state.score;
            state = tick(&state, dt, &config, &mut rng).0;
            prop_assert!(state.score >= before);
            if state.status == GameStatus::GameOver {
                break;
            }
        }
        let restarted = restart(&state, &config, &mut rng);
        prop_assert_eq!(restarted.score, 0);
        prop_assert_eq!(restarted.status, GameStatus::Running);
    }

    #[test]
    fn ensure_full_reaches_capacity(
        seed in any::<u64>(),
        lanes in prop::sample::subsequence((0..5usize).collect::<Vec<_>>(), 0..=3),
    ) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(&config, &mut rng);
        state.enemies = vec![None; config.lane_count()];
        for &lane in &lanes {
            state.enemies[lane] = Some(spawn_enemy(lane, &config, &mut rng));
        }

        let full = ensure_full(&state, &config, &mut rng);
        prop_assert_eq!(occupied_lanes(&full), config.max_enemies.min(config.lane_count()));
        for &lane in &lanes {
            prop_assert_eq!(&full.enemies[lane], &state.enemies[lane]);
        }
    }
}
