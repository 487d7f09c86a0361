//! Game state and core simulation types
//!
//! One `GameState` is one play session. It is owned by whatever drives the
//! tick loop and is never shared.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Player was hit; frozen until restart
    GameOver,
}

/// Pixel size of a sprite, as reported by the asset loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: u32,
    pub height: u32,
}

impl SpriteSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Session-invariant geometry: screen bounds, sprite boxes, player spawn
/// and restart points.
///
/// Supplied once at construction and untouched by restart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub player: SpriteSize,
    pub enemy: SpriteSize,
    pub laser: SpriteSize,
    pub player_start: Vec2,
    pub player_restart: Vec2,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            player: SpriteSize::new(PLAYER_SPRITE.0, PLAYER_SPRITE.1),
            enemy: SpriteSize::new(ENEMY_SPRITE.0, ENEMY_SPRITE.1),
            laser: SpriteSize::new(LASER_SPRITE.0, LASER_SPRITE.1),
            player_start: Vec2::new(PLAYER_START_X, PLAYER_START_Y),
            player_restart: Vec2::new(PLAYER_RESTART_X, PLAYER_RESTART_Y),
        }
    }
}

impl Arena {
    /// Rightmost x the player's left edge may reach
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        self.width - self.player.width as f32
    }

    /// Exclusive upper bound for an enemy spawn column
    #[inline]
    pub fn enemy_spawn_span(&self) -> u32 {
        (self.width - self.enemy.width as f32).max(0.0) as u32
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
}

/// A laser bolt. Direction comes from which list it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Laser {
    pub pos: Vec2,
}

impl Laser {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// A descending enemy ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
}

impl Enemy {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Screen and sprite geometry
    pub arena: Arena,
    /// Current phase
    pub phase: GamePhase,
    pub player: Player,
    /// Player lasers in creation order
    pub player_lasers: Vec<Laser>,
    /// Enemy lasers in creation order
    pub enemy_lasers: Vec<Laser>,
    /// Enemies in spawn order
    pub enemies: Vec<Enemy>,
    /// Ticks until the player may fire again
    pub shoot_cooldown: u32,
    /// Ticks until the next enemy spawn
    pub enemy_spawn_timer: u32,
    pub enemies_destroyed: u32,
    pub enemies_escaped: u32,
    /// Ticks simulated since the session (re)started
    pub time_ticks: u64,
}

impl GameState {
    /// Create a fresh session in the given arena
    pub fn new(arena: Arena) -> Self {
        Self {
            arena,
            phase: GamePhase::Playing,
            player: Player {
                pos: arena.player_start,
            },
            player_lasers: Vec::new(),
            enemy_lasers: Vec::new(),
            enemies: Vec::new(),
            shoot_cooldown: 0,
            enemy_spawn_timer: ENEMY_SPAWN_PERIOD_TICKS,
            enemies_destroyed: 0,
            enemies_escaped: 0,
            time_ticks: 0,
        }
    }

    /// Return to a fresh session, keeping the arena.
    ///
    /// The player reappears at the arena's restart point, not its start.
    pub fn reset(&mut self) {
        let arena = self.arena;
        *self = Self::new(arena);
        self.player.pos = arena.player_restart;
    }

    /// Final score: destroyed minus escaped (may be negative)
    pub fn score(&self) -> i64 {
        i64::from(self.enemies_destroyed) - i64::from(self.enemies_escaped)
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn player_rect(&self) -> Rect {
        Rect::at(self.player.pos, self.arena.player)
    }

    pub fn laser_rect(&self, laser: &Laser) -> Rect {
        Rect::at(laser.pos, self.arena.laser)
    }

    pub fn enemy_rect(&self, enemy: &Enemy) -> Rect {
        Rect::at(enemy.pos, self.arena.enemy)
    }

    /// Whether a new player laser may be added right now
    pub fn can_fire(&self) -> bool {
        self.shoot_cooldown == 0 && self.player_lasers.len() < MAX_PLAYER_LASERS
    }

    /// Spawn a player laser centred on the ship's nose.
    ///
    /// The half-width offset uses whole pixels, like the sprite sizes.
    pub fn shoot_player(&mut self) {
        let offset = self.arena.player.width / 2;
        let half_laser = self.arena.laser.width / 2;
        let x = self.player.pos.x + (offset as f32 - half_laser as f32);
        self.player_lasers.push(Laser::new(x, self.player.pos.y));
    }

    /// Spawn an enemy laser from the bottom centre of `enemy`
    pub fn shoot_enemy(&mut self, enemy: Enemy) {
        let x = enemy.pos.x + self.arena.enemy.width as f32 / 2.0;
        let y = enemy.pos.y + self.arena.enemy.height as f32;
        self.enemy_lasers.push(Laser::new(x, y));
    }

    /// Spawn an enemy just above the top edge at column `x`
    pub fn spawn_enemy(&mut self, x: u32) {
        let y = -(self.arena.enemy.height as f32);
        self.enemies.push(Enemy::new(x as f32, y));
    }

    /// Clamp the player into the horizontal play area
    pub fn clamp_player(&mut self) {
        let max_x = self.arena.player_max_x();
        if self.player.pos.x < 0.0 {
            self.player.pos.x = 0.0;
        }
        if self.player.pos.x > max_x {
            self.player.pos.x = max_x;
        }
    }
}
