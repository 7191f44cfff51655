//! Build levels from symbolic row maps
//!
//! Each character of each row is a map symbol. Terrain comes from a fixed
//! table (`x` wall, `!` lava); actors come from a caller-supplied dictionary
//! of symbol -> constructor.

use std::collections::HashMap;
use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::level::Level;
use super::terrain::{Cell, Grid, Obstacle};
use super::Vector;

/// Constructor for the actor spawned at a map cell
///
/// Returning `None` means the symbol produced nothing usable; the parser
/// drops it silently.
pub type ActorFactory = Box<dyn Fn(Vector, &mut Pcg32) -> Option<Actor>>;

/// Mapping from map symbols to actor constructors
#[derive(Default)]
pub struct ActorDictionary {
    factories: HashMap<char, ActorFactory>,
}

impl fmt::Debug for ActorDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut symbols: Vec<char> = self.factories.keys().copied().collect();
        symbols.sort_unstable();
        f.debug_struct("ActorDictionary")
            .field("symbols", &symbols)
            .finish()
    }
}

impl ActorDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// The usual symbol set: `@` player, `o` coin, `=` horizontal
    /// fireball, `|` vertical fireball, `v` fire rain
    pub fn standard() -> Self {
        Self::new()
            .with('@', |pos, _| Some(Actor::player(pos)))
            .with('o', |pos, rng| Some(Actor::coin(pos, rng)))
            .with('=', |pos, _| Some(Actor::horizontal_fireball(pos)))
            .with('|', |pos, _| Some(Actor::vertical_fireball(pos)))
            .with('v', |pos, _| Some(Actor::fire_rain(pos)))
    }

    /// Register (or replace) the constructor for a symbol
    pub fn insert<F>(&mut self, symbol: char, factory: F)
    where
        F: Fn(Vector, &mut Pcg32) -> Option<Actor> + 'static,
    {
        self.factories.insert(symbol, Box::new(factory));
    }

    /// Builder form of [`ActorDictionary::insert`]
    pub fn with<F>(mut self, symbol: char, factory: F) -> Self
    where
        F: Fn(Vector, &mut Pcg32) -> Option<Actor> + 'static,
    {
        self.insert(symbol, factory);
        self
    }

    pub fn get(&self, symbol: char) -> Option<&ActorFactory> {
        self.factories.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

/// Turns row maps into levels
#[derive(Debug)]
pub struct LevelParser {
    dictionary: Option<ActorDictionary>,
    /// Source for randomized actor state (coin phases)
    rng: Pcg32,
}

impl LevelParser {
    /// Parser with an unseeded random source
    pub fn new(dictionary: ActorDictionary) -> Self {
        Self {
            dictionary: Some(dictionary),
            rng: Pcg32::from_rng(&mut rand::rng()),
        }
    }

    /// Parser whose levels are fully determined by `seed`
    pub fn with_seed(dictionary: ActorDictionary, seed: u64) -> Self {
        Self {
            dictionary: Some(dictionary),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Parser that only builds terrain
    pub fn terrain_only() -> Self {
        Self {
            dictionary: None,
            rng: Pcg32::seed_from_u64(0),
        }
    }

    pub fn dictionary(&self) -> Option<&ActorDictionary> {
        self.dictionary.as_ref()
    }

    /// Constructor registered for a symbol, if any
    pub fn actor_from_symbol(&self, symbol: char) -> Option<&ActorFactory> {
        self.dictionary.as_ref()?.get(symbol)
    }

    /// Terrain for a symbol, if it is a wall or lava symbol
    pub fn obstacle_from_symbol(&self, symbol: char) -> Option<Obstacle> {
        Obstacle::from_symbol(symbol)
    }

    /// Terrain grid from the fixed symbol table; other symbols are empty
    pub fn create_grid<S: AsRef<str>>(&self, rows: &[S]) -> Grid {
        Grid::new(
            rows.iter()
                .map(|row| {
                    row.as_ref()
                        .chars()
                        .map(|symbol| self.obstacle_from_symbol(symbol))
                        .collect::<Vec<Cell>>()
                })
                .collect(),
        )
    }

    /// Actors for every symbol with a registered constructor, in row-major order
    pub fn create_actors<S: AsRef<str>>(&mut self, rows: &[S]) -> Vec<Actor> {
        let Some(dictionary) = self.dictionary.as_ref() else {
            return Vec::new();
        };

        let mut actors = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            for (x, symbol) in row.as_ref().chars().enumerate() {
                let Some(factory) = dictionary.get(symbol) else {
                    continue;
                };
                match factory(Vector::new(x as f64, y as f64), &mut self.rng) {
                    Some(actor) => actors.push(actor),
                    None => log::debug!("Symbol '{}' at ({}, {}) produced no actor", symbol, x, y),
                }
            }
        }
        actors
    }

    /// Build a level from its row map
    pub fn parse<S: AsRef<str>>(&mut self, rows: &[S]) -> Level {
        let grid = self.create_grid(rows);
        let actors = self.create_actors(rows);
        log::debug!(
            "Parsed level {}x{} with {} actors",
            grid.width(),
            grid.height(),
            actors.len()
        );
        Level::new(grid, actors)
    }
}
