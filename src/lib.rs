//! Space Shooter - a 2D arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, lifecycle)
//! - `input`: Key bindings and input sources feeding the simulation
//! - `render`: Read-only frame snapshots for an external renderer
//! - `settings`: Screen/sprite configuration loaded from JSON

pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use input::{Autopilot, Key, KeyBindings};
pub use render::{Frame, ScoreSummary, Sprite, SpriteKind};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 960.0;

    /// Default player start (left edge at screen center, near the bottom)
    pub const PLAYER_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = 890.0;
    /// Where the player reappears after a restart
    pub const PLAYER_RESTART_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PLAYER_RESTART_Y: f32 = 400.0;

    /// Horizontal player speed per tick, per direction held
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Player laser speed per tick (upward)
    pub const PLAYER_LASER_SPEED: f32 = 6.0;
    /// Enemy descent per tick
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Enemy laser speed per tick (downward)
    pub const ENEMY_LASER_SPEED: f32 = 4.0;

    /// Most player lasers allowed in flight when firing
    pub const MAX_PLAYER_LASERS: usize = 4;
    /// Ticks between player shots
    pub const SHOOT_COOLDOWN_TICKS: u32 = 12;
    /// Ticks between enemy spawns
    pub const ENEMY_SPAWN_PERIOD_TICKS: u32 = 60;
    /// Each enemy fires with probability 1 / ENEMY_FIRE_ODDS per tick
    pub const ENEMY_FIRE_ODDS: u32 = 90;
    /// Player lasers at or above this y are retired
    pub const PLAYER_LASER_EXIT_Y: f32 = -10.0;

    /// Fallback sprite sizes when no assets describe them
    pub const PLAYER_SPRITE: (u32, u32) = (64, 64);
    pub const ENEMY_SPRITE: (u32, u32) = (48, 48);
    pub const LASER_SPRITE: (u32, u32) = (6, 20);
}
