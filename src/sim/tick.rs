//! Per-frame simulation step
//!
//! Advances a level by an elapsed time: non-player actors run their own
//! behavior, the player is moved from input with gravity, and whatever the
//! player runs into is reported to the level's status handler.

use super::level::Level;
use super::Vector;
use crate::settings::Tuning;

/// Upper bound on sub-steps per tick; longer ticks use longer steps
const MAX_SUBSTEPS: f64 = 1000.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Jump when standing on something
    pub up: bool,
}

/// Advance the level by `dt` seconds
///
/// `dt` is split into sub-steps no longer than `tuning.max_step` so fast
/// actors cannot skip over thin obstacles. A non-finite `dt` is ignored.
pub fn tick(level: &mut Level, input: &TickInput, dt: f64, tuning: &Tuning) {
    if !dt.is_finite() {
        log::warn!("Ignoring non-finite tick of {}", dt);
        return;
    }
    level.tick_finish_delay(dt);

    let max_step = if tuning.max_step > 0.0 {
        tuning.max_step.max(dt / MAX_SUBSTEPS)
    } else {
        dt
    };

    let mut remaining = dt;
    while remaining > 0.0 {
        let step = remaining.min(max_step);
        level.animate_actors(step);
        move_player(level, input, step, tuning);
        remaining -= step;
    }
}

/// Move the player one sub-step and resolve what it touches
fn move_player(level: &mut Level, input: &TickInput, step: f64, tuning: &Tuning) {
    let Some(mut player) = level.player().cloned() else {
        return;
    };

    // Horizontal: constant run speed while a direction is held
    player.speed.x = 0.0;
    if input.left {
        player.speed.x -= tuning.player_x_speed;
    }
    if input.right {
        player.speed.x += tuning.player_x_speed;
    }
    let next = player.pos + Vector::new(player.speed.x * step, 0.0);
    match level.obstacle_at(next, player.size) {
        Some(obstacle) => level.player_touched(obstacle, None),
        None => player.pos = next,
    }

    // Vertical: gravity, jumping only off something solid below
    player.speed.y += step * tuning.gravity;
    let next = player.pos + Vector::new(0.0, player.speed.y * step);
    match level.obstacle_at(next, player.size) {
        Some(obstacle) => {
            level.player_touched(obstacle, None);
            player.speed.y = if input.up && player.speed.y > 0.0 {
                -tuning.jump_speed
            } else {
                0.0
            };
        }
        None => player.pos = next,
    }

    if let Some(stored) = level.player_mut() {
        stored.pos = player.pos;
        stored.speed = player.speed;
    }

    if let Some(other) = level.actor_at(&player).cloned() {
        level.player_touched(other.actor_type(), Some(&other));
    }
}
