pub const TILE_WIDTH: i32 = 16;
pub const TILE_HEIGHT: i32 = 16;

pub const SCATTER_SECONDS: f32 = 7.0;
pub const CHASE_SECONDS: f32 = 20.0;

pub const PACMAN_SPEED: f32 = 100.0;
pub const GHOST_SPEED: f32 = 100.0;
pub const PACMAN_COLLIDE_RADIUS: f32 = 5.0;
pub const GHOST_COLLIDE_RADIUS: f32 = 5.0;
pub const START_LIVES: u32 = 3;

pub const PELLET_RADIUS: f32 = 2.0;
pub const POWER_PELLET_RADIUS: f32 = 4.0;
pub const PELLET_POINTS: u32 = 10;
pub const POWER_PELLET_POINTS: u32 = 50;
pub const POWER_FLASH_SECONDS: f32 = 0.2;

// Intersections; entities may change direction here.
pub const NODE_SYMBOLS: &[char] = &['+', 'P', 'n'];
// Open corridor between intersections.
pub const PATH_SYMBOLS: &[char] = &['.', '-', '|', 'p'];
pub const PELLET_SYMBOLS: &[char] = &['.', '+'];
pub const POWER_PELLET_SYMBOLS: &[char] = &['P', 'p'];

pub const DEFAULT_MAZE: &str = "mazes/maze1.txt";
pub const DEFAULT_TICK_MS: u64 = 33;
pub const DEFAULT_RENDER_FPS: u64 = 30;
// Upper bound for a single simulation step, in seconds.
pub const MAX_DT: f32 = 0.1;
