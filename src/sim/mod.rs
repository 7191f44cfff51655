//! Simulation module
//!
//! All gameplay logic lives here:
//! - Single-threaded, explicit elapsed time per tick
//! - Seeded RNG for randomized actor state
//! - Stable iteration order (actor list order)
//! - No rendering, input or platform dependencies

pub mod actor;
pub mod campaign;
pub mod collision;
pub mod level;
pub mod parser;
pub mod terrain;
pub mod tick;
pub mod vector;

pub use actor::{Actor, ActorId, ActorKind, ActorType, ObstacleResponse, Spring};
pub use campaign::{Campaign, CampaignEvent, CampaignPhase};
pub use collision::{Rect, TileSpan};
pub use level::{Level, LevelStatus, Touched};
pub use parser::{ActorDictionary, ActorFactory, LevelParser};
pub use terrain::{Cell, Grid, Obstacle};
pub use tick::{TickInput, tick};
pub use vector::Vector;
