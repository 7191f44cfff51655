//! Level: terrain grid, live actors and the win/lose status
//!
//! A level is built once (usually by the parser), mutated in place while it
//! is played and dropped once [`Level::is_finished`] reports true.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorId, ActorType};
use super::terrain::{Grid, Obstacle};
use super::Vector;
use crate::consts::FINISH_DELAY;

/// Ids handed out to level actors, shared by every level in the process
static NEXT_ACTOR_ID: AtomicU32 = AtomicU32::new(1);

/// Terminal outcome of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelStatus {
    Won,
    Lost,
}

/// What the player ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Touched {
    Obstacle(Obstacle),
    Actor(ActorType),
}

impl From<Obstacle> for Touched {
    fn from(obstacle: Obstacle) -> Self {
        Touched::Obstacle(obstacle)
    }
}

impl From<ActorType> for Touched {
    fn from(actor_type: ActorType) -> Self {
        Touched::Actor(actor_type)
    }
}

/// A playable level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    grid: Grid,
    /// Live actors in spawn order
    actors: Vec<Actor>,
    /// `None` while in progress
    status: Option<LevelStatus>,
    /// Seconds left after a status change before the level is finished
    finish_delay: f64,
}

impl Default for Level {
    fn default() -> Self {
        Self::new(Grid::default(), Vec::new())
    }
}

impl Level {
    /// Create a level, giving every actor a fresh id in list order
    pub fn new(grid: Grid, actors: Vec<Actor>) -> Self {
        let mut level = Self {
            grid,
            actors: Vec::with_capacity(actors.len()),
            status: None,
            finish_delay: FINISH_DELAY,
        };
        for actor in actors {
            level.add_actor(actor);
        }
        level
    }

    /// Override the grace period between a status change and finishing
    pub fn with_finish_delay(mut self, delay: f64) -> Self {
        self.finish_delay = delay;
        self
    }

    /// Append an actor, assigning it an id no other level actor shares
    pub fn add_actor(&mut self, mut actor: Actor) -> ActorId {
        let id = ActorId(NEXT_ACTOR_ID.fetch_add(1, Ordering::Relaxed));
        actor.assign_id(id);
        self.actors.push(actor);
        id
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn status(&self) -> Option<LevelStatus> {
        self.status
    }

    pub fn finish_delay(&self) -> f64 {
        self.finish_delay
    }

    /// First actor of type player
    pub fn player(&self) -> Option<&Actor> {
        self.actors
            .iter()
            .find(|a| a.actor_type() == ActorType::Player)
    }

    /// Mutable access for the driver that moves the player
    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actors
            .iter_mut()
            .find(|a| a.actor_type() == ActorType::Player)
    }

    /// True once a status is set and the grace period has run out
    pub fn is_finished(&self) -> bool {
        self.status.is_some() && self.finish_delay < 0.0
    }

    /// Count down the grace period; does nothing while still playing
    pub fn tick_finish_delay(&mut self, elapsed: f64) {
        if self.status.is_some() {
            self.finish_delay -= elapsed;
        }
    }

    /// First other actor whose box overlaps `actor`
    pub fn actor_at(&self, actor: &Actor) -> Option<&Actor> {
        self.actors.iter().find(|other| other.is_intersect(actor))
    }

    /// First obstacle overlapped by a box, see [`Grid::obstacle_at`]
    pub fn obstacle_at(&self, pos: Vector, size: Vector) -> Option<Obstacle> {
        self.grid.obstacle_at(pos, size)
    }

    /// Remove `actor` from the level; unknown actors are ignored
    pub fn remove_actor(&mut self, actor: &Actor) -> Option<Actor> {
        let index = self.actors.iter().position(|a| a.is_same(actor))?;
        Some(self.actors.remove(index))
    }

    /// True when no live actor has the given type
    pub fn no_more_actors(&self, actor_type: ActorType) -> bool {
        !self.actors.iter().any(|a| a.actor_type() == actor_type)
    }

    /// Number of live actors of the given type
    pub fn count_actors(&self, actor_type: ActorType) -> usize {
        self.actors
            .iter()
            .filter(|a| a.actor_type() == actor_type)
            .count()
    }

    /// React to the player touching terrain or another actor
    ///
    /// Lava and fireballs lose the level. Touching a coin collects it and
    /// wins once no coins remain. Everything else is ignored, as is any call
    /// after the status has been set.
    pub fn player_touched(&mut self, touched: impl Into<Touched>, actor: Option<&Actor>) {
        if self.status.is_some() {
            return;
        }

        match touched.into() {
            Touched::Obstacle(Obstacle::Lava) | Touched::Actor(ActorType::Fireball) => {
                log::debug!("Player touched a hazard, level lost");
                self.status = Some(LevelStatus::Lost);
            }
            Touched::Actor(ActorType::Coin) => {
                let Some(coin) = actor.filter(|a| a.actor_type() == ActorType::Coin) else {
                    return;
                };
                self.remove_actor(coin);
                if self.no_more_actors(ActorType::Coin) {
                    log::debug!("Last coin collected, level won");
                    self.status = Some(LevelStatus::Won);
                }
            }
            _ => {}
        }
    }

    /// Let every non-player actor run its behavior for one step
    pub fn animate_actors(&mut self, elapsed: f64) {
        let grid = &self.grid;
        for actor in self
            .actors
            .iter_mut()
            .filter(|a| a.actor_type() != ActorType::Player)
        {
            actor.act(elapsed, grid);
        }
    }
}
