//! 2D point/displacement value
//!
//! Positions, sizes and velocities are all plain `DVec2` values: addition
//! is `+`, uniform scaling is `* k`, and every operation yields a fresh copy.
//! Only vectors can be added to vectors; anything else is a compile error.

use glam::DVec2;

/// Immutable 2D vector in tile units
pub type Vector = DVec2;
