// Display surface
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const DEFAULT_SCREEN_WIDTH: f64 = 350.0;
pub const NARROW_VIEWPORT_BREAKPOINT: f64 = 400.0;
pub const NARROW_VIEWPORT_INSET: f64 = 30.0;
pub const MIN_SCREEN_WIDTH: f64 = 200.0;

// Bird start position as fractions of the content area
pub const BIRD_START_X_FRACTION: f64 = 0.1;
pub const BIRD_START_Y_FRACTION: f64 = 0.5;

// Bird hitbox (16px sprite frame scaled 3x, body trimmed by 8px)
pub const BIRD_WIDTH: f64 = 48.0;
pub const BIRD_HEIGHT: f64 = 40.0;

// Physics (units per second)
pub const FLAP_VELOCITY: f64 = 250.0;
pub const GRAVITY: f64 = 500.0;
pub const PIPE_X_VELOCITY: f64 = 300.0;

// Pipes
pub const PIPES_TO_RENDER: usize = 4;
pub const PIPE_WIDTH: f64 = 26.0;
pub const PIPE_HEIGHT: f64 = 320.0;
pub const RIGHTMOST_PIPE_SEED_X: f64 = 500.0;
pub const PLAY_FIELD_MARGIN: i32 = 20;

// Difficulty ramp: score strictly above a threshold selects the tier
pub const NORMAL_TIER_THRESHOLD: u32 = 20;
pub const HARD_TIER_THRESHOLD: u32 = 40;

// Scene timers
pub const COUNTDOWN_TICKS: u32 = 3;
pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
pub const RESTART_DELAY_MS: u64 = 1000;

// Host frame rate
pub const FRAME_MS: u64 = 16; // ~60 FPS

// Persistence
pub const BEST_SCORE_KEY: &str = "bestScore";
pub const LAST_UPDATE_KEY: &str = "lastUpdate";
/// Bumped whenever stored best scores must be invalidated.
pub const STORAGE_VERSION: i64 = 2;
pub const STORAGE_FILE: &str = "storage.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "flappy.log";
pub const LOG_ENV_VAR: &str = "FLAPPY_LOG";
