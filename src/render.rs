//! Render export
//!
//! A `Frame` is a read-only snapshot the renderer consumes once per tick.
//! While playing it lists every sprite to blit; after game over it carries
//! the score summary instead.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Which image to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
    Laser,
}

/// One sprite at its top-left position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Vec2,
}

impl Sprite {
    fn new(kind: SpriteKind, pos: Vec2) -> Self {
        Self { kind, pos }
    }
}

/// Counters shown on the game-over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub destroyed: u32,
    pub escaped: u32,
    /// destroyed - escaped
    pub score: i64,
}

impl ScoreSummary {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            destroyed: state.enemies_destroyed,
            escaped: state.enemies_escaped,
            score: state.score(),
        }
    }
}

impl fmt::Display for ScoreSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GAME OVER")?;
        writeln!(f, "Enemies destroyed: {}", self.destroyed)?;
        writeln!(f, "Enemies escaped: {}", self.escaped)?;
        writeln!(f, "Final score: {}", self.score)?;
        write!(f, "Press R to restart")
    }
}

/// Snapshot of everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase")]
pub enum Frame {
    Playing {
        player: Sprite,
        player_lasers: Vec<Sprite>,
        enemy_lasers: Vec<Sprite>,
        enemies: Vec<Sprite>,
    },
    GameOver(ScoreSummary),
}

impl Frame {
    pub fn capture(state: &GameState) -> Self {
        match state.phase {
            GamePhase::GameOver => Frame::GameOver(ScoreSummary::from_state(state)),
            GamePhase::Playing => Frame::Playing {
                player: Sprite::new(SpriteKind::Player, state.player.pos),
                player_lasers: state
                    .player_lasers
                    .iter()
                    .map(|l| Sprite::new(SpriteKind::Laser, l.pos))
                    .collect(),
                enemy_lasers: state
                    .enemy_lasers
                    .iter()
                    .map(|l| Sprite::new(SpriteKind::Laser, l.pos))
                    .collect(),
                enemies: state
                    .enemies
                    .iter()
                    .map(|e| Sprite::new(SpriteKind::Enemy, e.pos))
                    .collect(),
            },
        }
    }

    /// Sprites in paint order: player, player lasers, enemy lasers, enemies.
    /// Empty after game over.
    pub fn draw_list(&self) -> Vec<Sprite> {
        match self {
            Frame::Playing {
                player,
                player_lasers,
                enemy_lasers,
                enemies,
            } => std::iter::once(*player)
                .chain(player_lasers.iter().copied())
                .chain(enemy_lasers.iter().copied())
                .chain(enemies.iter().copied())
                .collect(),
            Frame::GameOver(_) => Vec::new(),
        }
    }

    pub fn summary(&self) -> Option<&ScoreSummary> {
        match self {
            Frame::GameOver(summary) => Some(summary),
            Frame::Playing { .. } => None,
        }
    }
}
