/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` plus the shared `GameConfig` (and, where needed, an RNG
/// handle) and returns a brand-new value.  Side effects are limited to the
/// injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Enemy, GameState, GameStatus, Player, Projectile};
use crate::input::Command;
use crate::render::{AudioCue, Entity, Frame, Sprite, Surface, HUD_TEXT};

// ── HUD layout ───────────────────────────────────────────────────────────────

const SCORE_POS: (f64, f64) = (5.0, 30.0);
const START_AGAIN_POS: (f64, f64) = (100.0, 200.0);
const PRESS_RESTART_POS: (f64, f64) = (95.0, 280.0);

// ── Constructors ─────────────────────────────────────────────────────────────

fn start_player(config: &GameConfig) -> Player {
    Player {
        x: config.player_start_x(),
        y: config.player_y(),
    }
}

fn start_projectile(config: &GameConfig) -> Projectile {
    Projectile {
        x: 0,
        y: config.projectile_start_y(),
        speed: config.projectile_speed,
        fired: false,
    }
}

/// Build the initial game state: player in its start lane, an unfired
/// projectile and a full set of enemies.
pub fn init_state(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let state = GameState {
        player: start_player(config),
        projectile: start_projectile(config),
        enemies: vec![None; config.lane_count()],
        score: 0,
        status: GameStatus::Running,
        frame: 0,
    };
    ensure_full(&state, config, rng)
}

/// Reset a finished (or running) game in place of the old one: score back to
/// zero, player and projectile back to their start, lanes cleared and refilled.
pub fn restart(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    log::info!("Restarting after {} ms", state.score);
    let cleared = GameState {
        player: start_player(config),
        projectile: start_projectile(config),
        enemies: vec![None; state.enemies.len()],
        score: 0,
        status: GameStatus::Running,
        frame: 0,
    };
    ensure_full(&cleared, config, rng)
}

/// A new enemy at the top of `lane` with a random descent speed.
pub fn spawn_enemy(lane: usize, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    Enemy {
        lane,
        x: config.lane_x(lane),
        y: config.enemy_start_y(),
        speed: rng.gen_range(config.enemy_speed_min..config.enemy_speed_max),
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Step one lane left; a no-op at the left edge.
pub fn move_player_left(state: &GameState, config: &GameConfig) -> GameState {
    let mut player = state.player.clone();
    if player.x > 0 {
        player.x -= config.player_width;
    }
    GameState {
        player,
        ..state.clone()
    }
}

/// Step one lane right; a no-op at the right edge.
pub fn move_player_right(state: &GameState, config: &GameConfig) -> GameState {
    let mut player = state.player.clone();
    if player.x < config.max_player_x() {
        player.x += config.player_width;
    }
    GameState {
        player,
        ..state.clone()
    }
}

/// Relocate the one projectile to the player's lane at firing height.
/// Firing again before the last shot resolves simply moves it back down.
pub fn player_shoot(state: &GameState, config: &GameConfig) -> GameState {
    let projectile = Projectile {
        x: state.player.x,
        y: config.firing_height(),
        fired: true,
        ..state.projectile.clone()
    };
    GameState {
        projectile,
        ..state.clone()
    }
}

/// Apply a player command.  Commands are ignored once the game is over.
pub fn apply_command(state: &GameState, command: Command, config: &GameConfig) -> GameState {
    if state.status == GameStatus::GameOver {
        return state.clone();
    }
    match command {
        Command::MoveLeft => move_player_left(state, config),
        Command::MoveRight => move_player_right(state, config),
        Command::Shoot => player_shoot(state, config),
    }
}

// ── Motion ───────────────────────────────────────────────────────────────────

/// Move an enemy down by `dt_ms * speed`.  No bounds checking here: escaped
/// enemies are pruned by the tick.
pub fn step_enemy(enemy: &Enemy, dt_ms: u64) -> Enemy {
    Enemy {
        y: enemy.y + dt_ms as f64 * enemy.speed,
        ..enemy.clone()
    }
}

/// The projectile always rises, fired or not.
pub fn step_projectile(projectile: &Projectile, dt_ms: u64) -> Projectile {
    Projectile {
        y: projectile.y - dt_ms as f64 * projectile.speed,
        ..projectile.clone()
    }
}

// ── Spawner ──────────────────────────────────────────────────────────────────

pub fn occupied_lanes(state: &GameState) -> usize {
    state.enemies.iter().filter(|slot| slot.is_some()).count()
}

/// Put one enemy into a random empty lane and return that lane.
///
/// Lanes are sampled uniformly and re-sampled until an empty one turns up.
/// Returns `None` when every lane is occupied.
pub fn spawn_one(
    enemies: &mut [Option<Enemy>],
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Option<usize> {
    if enemies.iter().all(|slot| slot.is_some()) {
        return None;
    }
    let lane = loop {
        let candidate = rng.gen_range(0..enemies.len());
        if enemies[candidate].is_none() {
            break candidate;
        }
    };
    enemies[lane] = Some(spawn_enemy(lane, config, rng));
    log::debug!("Spawned enemy in lane {}", lane);
    Some(lane)
}

/// Spawn enemies until `max_enemies` lanes are occupied.
pub fn ensure_full(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let mut enemies = state.enemies.clone();
    while enemies.iter().flatten().count() < config.max_enemies {
        if spawn_one(&mut enemies, config, rng).is_none() {
            log::warn!(
                "All {} lanes occupied; cannot reach {} enemies",
                enemies.len(),
                config.max_enemies
            );
            break;
        }
    }
    GameState {
        enemies,
        ..state.clone()
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Remove every enemy the projectile hits and return the lanes that were
/// emptied.  A hit needs the same lane and the enemy lower than
/// `projectile.y - kill_band`.  An unfired projectile hits nothing.
pub fn kill_check(
    enemies: &mut [Option<Enemy>],
    projectile: &Projectile,
    config: &GameConfig,
) -> Vec<usize> {
    if !projectile.fired {
        return Vec::new();
    }
    let mut killed = Vec::new();
    for (lane, slot) in enemies.iter_mut().enumerate() {
        let hit = matches!(
            slot,
            Some(enemy) if enemy.x == projectile.x && enemy.y > projectile.y - config.kill_band
        );
        if hit {
            *slot = None;
            killed.push(lane);
            log::info!("Enemy in lane {} shot down", lane);
        }
    }
    killed
}

/// Empty the slots of enemies that fell past the bottom edge.
pub fn prune_escaped(enemies: &mut [Option<Enemy>], config: &GameConfig) {
    let bottom = config.arena_height as f64;
    for slot in enemies.iter_mut() {
        if slot.as_ref().is_some_and(|e| e.y > bottom) {
            if let Some(enemy) = slot.take() {
                log::debug!("Enemy in lane {} escaped", enemy.lane);
            }
        }
    }
}

/// True if an enemy shares the player's lane inside the death band.
pub fn is_player_dead(state: &GameState, config: &GameConfig) -> bool {
    let (top, bottom) = config.death_band();
    state
        .live_enemies()
        .any(|e| e.x == state.player.x && e.y >= top && e.y <= bottom)
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the game by `dt_ms` milliseconds and return the new state plus
/// everything drawn this frame.  All randomness comes through `rng` so
/// callers control determinism (useful for tests with a seeded RNG).
///
/// A finished game is absorbing: ticking it changes nothing and draws nothing.
pub fn tick(
    state: &GameState,
    dt_ms: u64,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> (GameState, Frame) {
    if state.status == GameStatus::GameOver {
        return (state.clone(), Frame::default());
    }

    let mut frame = Frame::default();
    let score = state.score + dt_ms;

    // ── 1. Move enemies, then the projectile ─────────────────────────────────
    let mut enemies: Vec<Option<Enemy>> = state
        .enemies
        .iter()
        .map(|slot| slot.as_ref().map(|e| step_enemy(e, dt_ms)))
        .collect();
    let projectile = step_projectile(&state.projectile, dt_ms);

    // ── 2. Paint back to front ───────────────────────────────────────────────
    frame.draw_sprite(Sprite::Stars, 0.0, 0.0);
    for enemy in enemies.iter().flatten() {
        enemy.render(&mut frame);
    }
    state.player.render(&mut frame);
    projectile.render(&mut frame);

    // ── 3. Shots, escapes, refill ────────────────────────────────────────────
    for _ in kill_check(&mut enemies, &projectile, config) {
        frame.play(AudioCue::Kill);
    }
    prune_escaped(&mut enemies, config);

    let next = ensure_full(
        &GameState {
            enemies,
            projectile,
            score,
            frame: state.frame + 1,
            ..state.clone()
        },
        config,
        rng,
    );

    // ── 4. Death check & HUD ─────────────────────────────────────────────────
    if is_player_dead(&next, config) {
        log::info!("Player dead after {} ms", score);
        frame.draw_text(
            &format!("{} GAME OVER", score),
            SCORE_POS.0,
            SCORE_POS.1,
            &HUD_TEXT,
        );
        frame.draw_text("START AGAIN?", START_AGAIN_POS.0, START_AGAIN_POS.1, &HUD_TEXT);
        frame.draw_text(
            "PRESS RESTART",
            PRESS_RESTART_POS.0,
            PRESS_RESTART_POS.1,
            &HUD_TEXT,
        );
        let over = GameState {
            status: GameStatus::GameOver,
            ..next
        };
        return (over, frame);
    }

    frame.draw_text(&score.to_string(), SCORE_POS.0, SCORE_POS.1, &HUD_TEXT);
    (next, frame)
}
