//! Histogram-driven tone adjustments.

mod color_correct;
mod levels;

pub use color_correct::{color_correct, color_correct_offsets};
pub use levels::{levels_adjust, LevelsCurve, LevelsOrdering};
