//! Input sources for the simulation
//!
//! The platform layer polls its keyboard once per frame and hands the result
//! to `KeyBindings::sample`, which yields the `TickInput` for that tick.
//! `Autopilot` produces the same commands without a keyboard (headless demo).

use serde::{Deserialize, Serialize};

use crate::sim::{GameState, TickInput};

/// Keys the game can be bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    Enter,
    Escape,
    A,
    D,
    R,
}

/// Which keys drive each command. Any bound key held triggers the command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub move_left: Vec<Key>,
    pub move_right: Vec<Key>,
    pub fire: Vec<Key>,
    pub restart: Vec<Key>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec![Key::Left],
            move_right: vec![Key::Right],
            fire: vec![Key::Space],
            restart: vec![Key::R],
        }
    }
}

impl KeyBindings {
    /// Build this tick's input from a key-state query
    pub fn sample(&self, is_pressed: impl Fn(Key) -> bool) -> TickInput {
        let held = |keys: &Vec<Key>| keys.iter().any(|&k| is_pressed(k));
        TickInput {
            move_left: held(&self.move_left),
            move_right: held(&self.move_right),
            fire: held(&self.fire),
            restart: held(&self.restart),
        }
    }

    /// Build this tick's input from the set of keys currently held
    pub fn from_pressed(&self, pressed: &[Key]) -> TickInput {
        self.sample(|key| pressed.contains(&key))
    }

    /// Keys bound to more than one command
    pub fn conflicts(&self) -> Vec<Key> {
        let groups = [&self.move_left, &self.move_right, &self.fire, &self.restart];
        let mut conflicts = Vec::new();
        for (i, group) in groups.iter().enumerate() {
            for key in group.iter() {
                let elsewhere = groups
                    .iter()
                    .skip(i + 1)
                    .any(|other| other.contains(key));
                if elsewhere && !conflicts.contains(key) {
                    conflicts.push(*key);
                }
            }
        }
        conflicts
    }
}

/// Deterministic demo player.
///
/// Slides under the lowest enemy still above the ship, fires whenever it can,
/// and presses restart after sitting on the game-over screen for a while.
#[derive(Debug, Clone)]
pub struct Autopilot {
    restart_delay: u32,
    frozen_ticks: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(120)
    }
}

impl Autopilot {
    /// `restart_delay`: game-over ticks to wait before restarting
    pub fn new(restart_delay: u32) -> Self {
        Self {
            restart_delay,
            frozen_ticks: 0,
        }
    }

    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        if state.is_game_over() {
            self.frozen_ticks += 1;
            if self.frozen_ticks >= self.restart_delay {
                self.frozen_ticks = 0;
                return TickInput {
                    restart: true,
                    ..Default::default()
                };
            }
            return TickInput::default();
        }
        self.frozen_ticks = 0;

        let arena = &state.arena;
        let ship_centre = state.player.pos.x + arena.player.width as f32 / 2.0;
        let target = state
            .enemies
            .iter()
            .filter(|e| e.pos.y < state.player.pos.y)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x + arena.enemy.width as f32 / 2.0);

        let (move_left, move_right) = match target {
            Some(x) if x < ship_centre - crate::consts::PLAYER_SPEED => (true, false),
            Some(x) if x > ship_centre + crate::consts::PLAYER_SPEED => (false, true),
            _ => (false, false),
        };

        TickInput {
            move_left,
            move_right,
            fire: true,
            restart: false,
        }
    }
}
