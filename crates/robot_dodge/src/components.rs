//! Game-specific components

use puddle_engine::ecs::EntityId;
use puddle_engine::foundation::math::Vec3;

/// Player lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Playing
    Alive,

    /// Out of lives; terminal
    GameOver,
}

/// Player avatar state
#[derive(Debug, Clone)]
pub struct Player {
    entity: EntityId,
    lives: u32,
    max_lives: u32,
    score: f32,
    speed: f32,
    state: PlayerState,
}

impl Player {
    /// Create a player for `entity` with `lives` starting lives
    pub fn new(entity: EntityId, lives: u32, speed: f32) -> Self {
        Self {
            entity,
            lives,
            max_lives: lives,
            score: 0.0,
            speed,
            state: if lives == 0 { PlayerState::GameOver } else { PlayerState::Alive },
        }
    }

    /// Entity carrying the player's transform and collider
    pub fn entity(&self) -> EntityId {
        self.entity
    }

    /// Remaining lives
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Starting lives
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Seconds survived
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Movement speed in units/s
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Current lifecycle state
    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Whether the player has run out of lives
    pub fn is_game_over(&self) -> bool {
        self.state == PlayerState::GameOver
    }

    /// Lose `damage` lives; the game is over once none remain
    ///
    /// Does nothing once the game is over.
    pub fn take_damage(&mut self, damage: u32) -> PlayerState {
        if self.is_game_over() {
            return self.state;
        }

        self.lives = self.lives.saturating_sub(damage);
        log::debug!("Player hit, {} of {} lives left", self.lives, self.max_lives);

        if self.lives == 0 {
            self.state = PlayerState::GameOver;
            log::info!("Game over! Final score: {}", self.score.max(0.0) as u32);
        }
        self.state
    }

    /// Accumulate survival time
    pub fn add_score(&mut self, delta_time: f32) {
        if !self.is_game_over() {
            self.score += delta_time.max(0.0);
        }
    }
}

/// Robot enemy
#[derive(Debug, Clone, Copy)]
pub struct Robot {
    /// Entity carrying the robot's transform and collider
    pub entity: EntityId,

    /// Velocity in units/s, fixed at spawn
    pub velocity: Vec3,

    /// Index into the configured robot models
    pub variant: usize,
}

/// Bullet projectile
#[derive(Debug, Clone, Copy)]
pub struct Bullet {
    /// Entity carrying the bullet's transform and collider
    pub entity: EntityId,

    /// Velocity in units/s, fixed when fired
    pub velocity: Vec3,
}
