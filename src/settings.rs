//! Game settings
//!
//! Screen and sprite geometry plus key bindings, loaded from a JSON file.
//! Missing fields fall back to their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::input::KeyBindings;
use crate::sim::{Arena, SpriteSize};

/// Errors from loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,

    // === Sprites (pixel sizes of the loaded images) ===
    pub player: SpriteSize,
    pub enemy: SpriteSize,
    pub laser: SpriteSize,

    // === Player spawn ===
    pub player_start_x: f32,
    pub player_start_y: f32,
    pub player_restart_x: f32,
    pub player_restart_y: f32,

    /// RNG seed for the run (random when absent)
    pub seed: Option<u64>,

    pub bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player: SpriteSize::new(PLAYER_SPRITE.0, PLAYER_SPRITE.1),
            enemy: SpriteSize::new(ENEMY_SPRITE.0, ENEMY_SPRITE.1),
            laser: SpriteSize::new(LASER_SPRITE.0, LASER_SPRITE.1),

            player_start_x: PLAYER_START_X,
            player_start_y: PLAYER_START_Y,
            player_restart_x: PLAYER_RESTART_X,
            player_restart_y: PLAYER_RESTART_Y,

            seed: None,
            bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read, parse and validate a settings file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check the geometry describes a playable arena
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "screen must be positive, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }

        for (name, size) in [
            ("player", self.player),
            ("enemy", self.enemy),
            ("laser", self.laser),
        ] {
            if size.is_empty() {
                return Err(SettingsError::Invalid(format!(
                    "{name} sprite has zero size ({}x{})",
                    size.width, size.height
                )));
            }
        }

        if self.player.width as f32 > self.screen_width {
            return Err(SettingsError::Invalid(format!(
                "player width {} exceeds screen width {}",
                self.player.width, self.screen_width
            )));
        }
        if self.enemy.width as f32 >= self.screen_width {
            return Err(SettingsError::Invalid(format!(
                "enemy width {} leaves no spawn columns on a {} wide screen",
                self.enemy.width, self.screen_width
            )));
        }

        let max_x = self.screen_width - self.player.width as f32;
        if !(0.0..=max_x).contains(&self.player_start_x) {
            return Err(SettingsError::Invalid(format!(
                "player start x {} outside [0, {}]",
                self.player_start_x, max_x
            )));
        }
        if !(0.0..=max_x).contains(&self.player_restart_x) {
            return Err(SettingsError::Invalid(format!(
                "player restart x {} outside [0, {}]",
                self.player_restart_x, max_x
            )));
        }

        let conflicts = self.bindings.conflicts();
        if !conflicts.is_empty() {
            return Err(SettingsError::Invalid(format!(
                "keys bound to several commands: {conflicts:?}"
            )));
        }

        Ok(())
    }

    /// Session geometry for `GameState::new`
    pub fn arena(&self) -> Arena {
        Arena {
            width: self.screen_width,
            height: self.screen_height,
            player: self.player,
            enemy: self.enemy,
            laser: self.laser,
            player_start: Vec2::new(self.player_start_x, self.player_start_y),
            player_restart: Vec2::new(self.player_restart_x, self.player_restart_y),
        }
    }
}
