/// All game entity types — pure data, no logic.

#[derive(Clone, Debug, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

// ── Player, enemy & projectile ───────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Always a multiple of the player width.
    pub x: i32,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    /// Index of the lane slot holding this enemy.
    pub lane: usize,
    /// Left edge of the lane (`lane * enemy_width`).
    pub x: i32,
    pub y: f64,
    /// Descent speed in pixels per millisecond.
    pub speed: f64,
}

/// The single shared shot.  It keeps rising every frame whether or not it
/// has been fired; a new shot just relocates it.
#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub x: i32,
    pub y: f64,
    /// Upward speed in pixels per millisecond.
    pub speed: f64,
    /// False until the first shot.  An unfired projectile is neither drawn
    /// nor able to hit anything.
    pub fired: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub projectile: Projectile,
    /// One slot per lane, indexed by lane.  Never compacted: an empty slot
    /// is an empty lane.
    pub enemies: Vec<Option<Enemy>>,
    /// Milliseconds survived.
    pub score: u64,
    pub status: GameStatus,
    pub frame: u64,
}

impl GameState {
    /// Live enemies in lane order.
    pub fn live_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().flatten()
    }
}
