//! Lava Platformer - a tile-grid platformer simulation core
//!
//! Core modules:
//! - `sim`: Simulation (vectors, actors, level terrain, status, tick driver)
//! - `levels`: Level packs (symbolic row maps loaded from JSON)
//! - `settings`: Data-driven driver tuning
//! - `error`: Load errors for packs and tuning files
//!
//! Rendering, input polling and audio live outside this crate. A driver
//! parses a level, calls [`sim::tick`] once per frame and polls the level
//! status until [`sim::Level::is_finished`] flips.

pub mod error;
pub mod levels;
pub mod settings;
pub mod sim;

pub use error::LoadError;
pub use levels::{LevelPack, LevelPlan};
pub use settings::Tuning;

use glam::IVec2;

use crate::sim::Vector;

/// Actor geometry and motion constants
pub mod consts {
    /// Player hitbox is shifted up from its spawn cell
    pub const PLAYER_OFFSET: (f64, f64) = (0.0, -0.5);
    pub const PLAYER_SIZE: (f64, f64) = (0.8, 1.5);

    /// Coin hitbox sits inside its spawn cell
    pub const COIN_OFFSET: (f64, f64) = (0.2, 0.1);
    pub const COIN_SIZE: (f64, f64) = (0.6, 0.6);
    /// Phase advance per second of bobbing
    pub const COIN_SPRING_SPEED: f64 = 8.0;
    /// Bobbing amplitude (tiles)
    pub const COIN_SPRING_DIST: f64 = 0.07;

    pub const FIREBALL_SIZE: (f64, f64) = (1.0, 1.0);
    pub const HORIZONTAL_FIREBALL_SPEED: (f64, f64) = (2.0, 0.0);
    pub const VERTICAL_FIREBALL_SPEED: (f64, f64) = (0.0, 2.0);
    pub const FIRE_RAIN_SPEED: (f64, f64) = (0.0, 3.0);

    /// Grace period (seconds) between a status change and the level finishing
    pub const FINISH_DELAY: f64 = 1.0;
}

/// Build a vector from a `(x, y)` constant pair
#[inline]
pub fn vec_of(pair: (f64, f64)) -> Vector {
    Vector::new(pair.0, pair.1)
}

/// Tile coordinates containing a point (floor of each component)
#[inline]
pub fn tile_of(point: Vector) -> IVec2 {
    IVec2::new(point.x.floor() as i32, point.y.floor() as i32)
}
