//! Actors: positioned, sized entities that move on top of the terrain
//!
//! One `Actor` struct carries the shared box/velocity state; behavior is
//! picked by its `ActorKind`. The three projectile flavors (horizontal,
//! vertical, rain) are a single `Fireball` kind parameterized by starting
//! velocity and how it responds to hitting an obstacle.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::terrain::Grid;
use super::Vector;
use crate::consts::*;
use crate::vec_of;

/// Type tag reported to collision handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorType {
    Actor,
    Player,
    Coin,
    Fireball,
}

impl ActorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActorType::Actor => "actor",
            ActorType::Player => "player",
            ActorType::Coin => "coin",
            ActorType::Fireball => "fireball",
        }
    }
}

impl fmt::Display for ActorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Actor identity assigned by a level, unique within the process (0 = not owned by a level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ActorId(pub u32);

impl ActorId {
    pub const UNASSIGNED: ActorId = ActorId(0);

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

/// Vertical bobbing state of a coin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    /// Rest position the coin bobs around
    pub start_pos: Vector,
    /// Phase advance per unit of elapsed time
    pub speed: f64,
    /// Amplitude
    pub dist: f64,
    /// Current phase (radians)
    pub phase: f64,
}

impl Spring {
    pub fn new(start_pos: Vector, phase: f64) -> Self {
        Self {
            start_pos,
            speed: COIN_SPRING_SPEED,
            dist: COIN_SPRING_DIST,
            phase,
        }
    }

    /// Advance the phase by `speed * elapsed`
    pub fn update(&mut self, elapsed: f64) {
        self.phase += self.speed * elapsed;
    }

    /// Current offset from the rest position
    pub fn offset(&self) -> Vector {
        Vector::new(0.0, self.phase.sin() * self.dist)
    }

    /// Advance the phase, then return the displaced rest position
    pub fn next_position(&mut self, elapsed: f64) -> Vector {
        self.update(elapsed);
        self.start_pos + self.offset()
    }
}

/// What a fireball does when its next position is blocked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleResponse {
    /// Reverse velocity and fly back along the same axis
    Bounce,
    /// Jump back to the spawn position and keep falling
    Reset { start: Vector },
}

/// Behavior variant of an actor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    /// Inert box with no behavior of its own
    Plain,
    /// Moved by the driver, never by itself
    Player,
    Coin(Spring),
    Fireball(ObstacleResponse),
}

/// A positioned, sized, axis-aligned entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    id: ActorId,
    /// Top-left corner
    pub pos: Vector,
    /// Width and height
    pub size: Vector,
    /// Velocity in tiles per unit of elapsed time
    pub speed: Vector,
    pub kind: ActorKind,
}

impl Default for Actor {
    fn default() -> Self {
        Self::new(Vector::ZERO, Vector::ONE, Vector::ZERO)
    }
}

impl Actor {
    /// Create a plain actor with the given box and velocity
    pub fn new(pos: Vector, size: Vector, speed: Vector) -> Self {
        Self {
            id: ActorId::UNASSIGNED,
            pos,
            size,
            speed,
            kind: ActorKind::Plain,
        }
    }

    /// Player spawned at a grid cell (hitbox raised half a tile)
    pub fn player(cell: Vector) -> Self {
        Self {
            kind: ActorKind::Player,
            ..Self::new(cell + vec_of(PLAYER_OFFSET), vec_of(PLAYER_SIZE), Vector::ZERO)
        }
    }

    /// Coin spawned at a grid cell with a random starting phase
    pub fn coin<R: Rng>(cell: Vector, rng: &mut R) -> Self {
        let pos = cell + vec_of(COIN_OFFSET);
        let phase = rng.random_range(0.0..std::f64::consts::TAU);
        Self {
            kind: ActorKind::Coin(Spring::new(pos, phase)),
            ..Self::new(pos, vec_of(COIN_SIZE), Vector::ZERO)
        }
    }

    /// Bouncing fireball with an explicit velocity
    pub fn fireball(pos: Vector, speed: Vector) -> Self {
        Self {
            kind: ActorKind::Fireball(ObstacleResponse::Bounce),
            ..Self::new(pos, vec_of(FIREBALL_SIZE), speed)
        }
    }

    /// Fireball bouncing left and right
    pub fn horizontal_fireball(pos: Vector) -> Self {
        Self::fireball(pos, vec_of(HORIZONTAL_FIREBALL_SPEED))
    }

    /// Fireball bouncing up and down
    pub fn vertical_fireball(pos: Vector) -> Self {
        Self::fireball(pos, vec_of(VERTICAL_FIREBALL_SPEED))
    }

    /// Falling fireball that restarts from its spawn position when blocked
    pub fn fire_rain(pos: Vector) -> Self {
        Self {
            kind: ActorKind::Fireball(ObstacleResponse::Reset { start: pos }),
            ..Self::new(pos, vec_of(FIREBALL_SIZE), vec_of(FIRE_RAIN_SPEED))
        }
    }

    pub fn id(&self) -> ActorId {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: ActorId) {
        self.id = id;
    }

    pub fn actor_type(&self) -> ActorType {
        match self.kind {
            ActorKind::Plain => ActorType::Actor,
            ActorKind::Player => ActorType::Player,
            ActorKind::Coin(_) => ActorType::Coin,
            ActorKind::Fireball(_) => ActorType::Fireball,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn left(&self) -> f64 {
        self.pos.x
    }

    pub fn top(&self) -> f64 {
        self.pos.y
    }

    pub fn right(&self) -> f64 {
        self.pos.x + self.size.x
    }

    pub fn bottom(&self) -> f64 {
        self.pos.y + self.size.y
    }

    /// Same actor: same object, or the same level-assigned id
    pub fn is_same(&self, other: &Actor) -> bool {
        std::ptr::eq(self, other) || (self.id.is_assigned() && self.id == other.id)
    }

    /// Strict box overlap with another actor; never true for itself
    pub fn is_intersect(&self, other: &Actor) -> bool {
        !self.is_same(other) && self.rect().intersects(&other.rect())
    }

    /// Coin bobbing state, if this is a coin
    pub fn spring(&self) -> Option<&Spring> {
        match &self.kind {
            ActorKind::Coin(spring) => Some(spring),
            _ => None,
        }
    }

    /// Straight-line extrapolation of the current velocity
    pub fn next_position(&self, elapsed: f64) -> Vector {
        self.pos + self.speed * elapsed
    }

    /// Fireball reaction to a blocked move (bounce or reset); no-op otherwise
    pub fn handle_obstacle(&mut self) {
        match self.kind {
            ActorKind::Fireball(ObstacleResponse::Bounce) => self.speed = self.speed * -1.0,
            ActorKind::Fireball(ObstacleResponse::Reset { start }) => self.pos = start,
            _ => {}
        }
    }

    /// Per-tick behavior hook
    ///
    /// Coins bob in place. Fireballs advance unless the next position is
    /// blocked, in which case they react and stay put for this tick. Players
    /// and plain actors do nothing here.
    pub fn act(&mut self, elapsed: f64, grid: &Grid) {
        if let ActorKind::Coin(spring) = &mut self.kind {
            self.pos = spring.next_position(elapsed);
        } else if matches!(self.kind, ActorKind::Fireball(_)) {
            let next = self.next_position(elapsed);
            if grid.obstacle_at(next, self.size).is_some() {
                self.handle_obstacle();
            } else {
                self.pos = next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Level, Obstacle};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn open_grid(width: usize, height: usize) -> Grid {
        Grid::new(vec![vec![None; width]; height])
    }

    #[test]
    fn test_default_actor() {
        let actor = Actor::default();
        assert_eq!(actor.pos, Vector::ZERO);
        assert_eq!(actor.size, Vector::ONE);
        assert_eq!(actor.speed, Vector::ZERO);
        assert_eq!(actor.actor_type(), ActorType::Actor);
        assert_eq!(actor.id(), ActorId::UNASSIGNED);
    }

    #[test]
    fn test_bounds() {
        let actor = Actor::new(Vector::new(30.0, 50.0), Vector::new(5.0, 5.0), Vector::ZERO);
        assert_eq!(actor.left(), 30.0);
        assert_eq!(actor.top(), 50.0);
        assert_eq!(actor.right(), 35.0);
        assert_eq!(actor.bottom(), 55.0);
    }

    #[test]
    fn test_never_intersects_itself() {
        let actor = Actor::default();
        assert!(!actor.is_intersect(&actor));

        let mut owned = Actor::default();
        owned.assign_id(ActorId(4));
        let copy = owned.clone();
        assert!(!owned.is_intersect(&copy));
    }

    #[test]
    fn test_intersection_and_touching_edges() {
        let a = Actor::new(Vector::ZERO, Vector::new(5.0, 5.0), Vector::ZERO);
        let overlapping = Actor::new(Vector::new(4.0, 4.0), Vector::ONE, Vector::ZERO);
        let touching = Actor::new(Vector::new(5.0, 0.0), Vector::ONE, Vector::ZERO);
        assert!(a.is_intersect(&overlapping));
        assert!(overlapping.is_intersect(&a));
        assert!(!a.is_intersect(&touching));
        assert!(!touching.is_intersect(&a));
    }

    #[test]
    fn test_player_hitbox() {
        let player = Actor::player(Vector::new(3.0, 4.0));
        assert_eq!(player.pos, Vector::new(3.0, 3.5));
        assert_eq!(player.size, Vector::new(0.8, 1.5));
        assert_eq!(player.speed, Vector::ZERO);
        assert_eq!(player.actor_type(), ActorType::Player);
    }

    #[test]
    fn test_coin_spawn() {
        let mut rng = Pcg32::seed_from_u64(7);
        let coin = Actor::coin(Vector::new(1.0, 2.0), &mut rng);
        let expected = Vector::new(1.2, 2.1);
        assert!((coin.pos - expected).length() < 1e-12);
        assert_eq!(coin.size, Vector::new(0.6, 0.6));
        assert_eq!(coin.actor_type(), ActorType::Coin);

        let spring = coin.spring().unwrap();
        assert_eq!(spring.start_pos, coin.pos);
        assert_eq!(spring.speed, 8.0);
        assert_eq!(spring.dist, 0.07);
        assert!((0.0..std::f64::consts::TAU).contains(&spring.phase));
    }

    #[test]
    fn test_spring_step() {
        let mut spring = Spring::new(Vector::new(1.0, 1.0), 0.0);
        spring.update(1.0);
        assert_eq!(spring.phase, 8.0);
        assert_eq!(spring.offset(), Vector::new(0.0, 8.0f64.sin() * 0.07));

        let next = spring.next_position(0.5);
        assert_eq!(spring.phase, 12.0);
        assert_eq!(next, Vector::new(1.0, 1.0 + 12.0f64.sin() * 0.07));
    }

    #[test]
    fn test_coin_act_moves_vertically_only() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut coin = Actor::coin(Vector::new(2.0, 2.0), &mut rng);
        let grid = open_grid(5, 5);
        let start = coin.spring().unwrap().start_pos;
        coin.act(0.1, &grid);
        assert_eq!(coin.pos.x, start.x);
        let spring = coin.spring().unwrap();
        assert_eq!(coin.pos, start + spring.offset());
    }

    #[test]
    fn test_fireball_variants() {
        let pos = Vector::new(1.0, 1.0);
        assert_eq!(Actor::horizontal_fireball(pos).speed, Vector::new(2.0, 0.0));
        assert_eq!(Actor::vertical_fireball(pos).speed, Vector::new(0.0, 2.0));
        let rain = Actor::fire_rain(pos);
        assert_eq!(rain.speed, Vector::new(0.0, 3.0));
        assert_eq!(rain.size, Vector::ONE);
        for ball in [Actor::horizontal_fireball(pos), Actor::vertical_fireball(pos), rain] {
            assert_eq!(ball.actor_type(), ActorType::Fireball);
        }
    }

    #[test]
    fn test_fireball_next_position() {
        let ball = Actor::fireball(Vector::new(5.0, 5.0), Vector::new(10.0, 10.0));
        assert_eq!(ball.next_position(1.0), Vector::new(15.0, 15.0));
        assert_eq!(ball.next_position(1.6), Vector::new(21.0, 21.0));
    }

    #[test]
    fn test_fireball_moves_when_clear() {
        let grid = open_grid(10, 10);
        let mut ball = Actor::horizontal_fireball(Vector::new(2.0, 2.0));
        ball.act(1.0, &grid);
        assert_eq!(ball.pos, Vector::new(4.0, 2.0));
        assert_eq!(ball.speed, Vector::new(2.0, 0.0));
    }

    #[test]
    fn test_fireball_bounces_off_wall() {
        let mut rows = vec![vec![None; 5]; 3];
        rows[1][4] = Some(Obstacle::Wall);
        let grid = Grid::new(rows);
        let mut ball = Actor::horizontal_fireball(Vector::new(1.5, 1.0));

        // Blocked: speed flips, position unchanged
        ball.act(1.0, &grid);
        assert_eq!(ball.pos, Vector::new(1.5, 1.0));
        assert_eq!(ball.speed, Vector::new(-2.0, 0.0));

        // Next tick moves back the way it came
        ball.act(0.5, &grid);
        assert_eq!(ball.pos, Vector::new(0.5, 1.0));
    }

    #[test]
    fn test_fire_rain_resets_to_spawn() {
        let grid = open_grid(3, 4);
        let spawn = Vector::new(1.0, 1.0);
        let mut rain = Actor::fire_rain(spawn);
        rain.act(0.5, &grid);
        assert_eq!(rain.pos, Vector::new(1.0, 2.5));

        // Bottom of the grid counts as lava
        rain.act(0.5, &grid);
        assert_eq!(rain.pos, spawn);
        assert_eq!(rain.speed, Vector::new(0.0, 3.0));
    }

    #[test]
    fn test_player_and_plain_act_is_noop() {
        let grid = open_grid(5, 5);
        let mut player = Actor::player(Vector::new(1.0, 1.0));
        let before = player.clone();
        player.act(1.0, &grid);
        assert_eq!(player, before);

        let mut plain = Actor::new(Vector::ONE, Vector::ONE, Vector::ONE);
        plain.act(1.0, &grid);
        assert_eq!(plain.pos, Vector::ONE);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(ActorType::Player.to_string(), "player");
        assert_eq!(
            serde_json::to_string(&ActorType::Fireball).unwrap(),
            "\"fireball\""
        );
    }

    proptest! {
        #[test]
        fn coin_returns_near_its_rest_position(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut coin = Actor::coin(Vector::new(3.0, 3.0), &mut rng);
            let grid = open_grid(8, 8);
            let start = coin.spring().unwrap().start_pos;
            let period = std::f64::consts::TAU / COIN_SPRING_SPEED;
            let steps = 1000;

            // Sweeping one full period passes through a zero of the sine
            let mut closest = f64::INFINITY;
            for _ in 0..steps {
                coin.act(period / steps as f64, &grid);
                closest = closest.min((coin.pos - start).length());
            }
            prop_assert!(closest < 1e-3);

            // And a full period lands back where it started
            let before = coin.pos;
            coin.act(period, &grid);
            prop_assert!((coin.pos - before).length() < 1e-9);
        }

        #[test]
        fn level_actor_intersection_is_symmetric(
            ax in -10.0f64..10.0, ay in -10.0f64..10.0, aw in 0.0f64..4.0, ah in 0.0f64..4.0,
            bx in -10.0f64..10.0, by in -10.0f64..10.0, bw in 0.0f64..4.0, bh in 0.0f64..4.0,
        ) {
            let a = Actor::new(Vector::new(ax, ay), Vector::new(aw, ah), Vector::ZERO);
            let b = Actor::new(Vector::new(bx, by), Vector::new(bw, bh), Vector::ZERO);
            let here = Level::new(Grid::default(), vec![a.clone(), b]);
            let there = Level::new(Grid::default(), vec![a]);

            let (a, b) = (&here.actors()[0], &here.actors()[1]);
            let foreign = &there.actors()[0];
            prop_assert_eq!(a.is_intersect(b), b.is_intersect(a));
            prop_assert_eq!(a.is_intersect(foreign), foreign.is_intersect(a));
            prop_assert!(!a.is_intersect(a));

            // Same box owned by another level is a different actor
            let overlaps = aw > 0.0 && ah > 0.0;
            prop_assert_eq!(a.is_intersect(foreign), overlaps);
        }

        #[test]
        fn coin_stays_within_spring_distance(seed in any::<u64>(), steps in prop::collection::vec(0.0f64..0.5, 1..64)) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut coin = Actor::coin(Vector::new(3.0, 3.0), &mut rng);
            let grid = open_grid(8, 8);
            let start = coin.spring().unwrap().start_pos;
            for dt in steps {
                coin.act(dt, &grid);
                prop_assert_eq!(coin.pos.x, start.x);
                prop_assert!((coin.pos.y - start.y).abs() <= COIN_SPRING_DIST + 1e-12);
            }
        }
    }
}
