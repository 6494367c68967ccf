use serde::{Deserialize, Serialize};

use crate::{parallel::ExecutionStrategy, tone::LevelsOrdering};

/// Engine-wide settings handed to a [`crate::registry::Registry`].
///
/// Missing fields take their default when deserializing.
///
/// # Examples
///
/// ```
/// use raster_imgproc::config::EngineConfig;
/// use raster_imgproc::parallel::ExecutionStrategy;
/// use raster_imgproc::tone::LevelsOrdering;
///
/// let config = EngineConfig::default()
///     .with_levels_ordering(LevelsOrdering::NonStrict)
///     .with_execution(ExecutionStrategy::Serial);
///
/// assert_eq!(config.levels_ordering, LevelsOrdering::NonStrict);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ordering rule for the control points of a levels adjustment.
    pub levels_ordering: LevelsOrdering,
    /// How the row loops of each transformation are scheduled.
    pub execution: ExecutionStrategy,
}

impl EngineConfig {
    /// Set the levels ordering rule.
    pub fn with_levels_ordering(mut self, ordering: LevelsOrdering) -> Self {
        self.levels_ordering = ordering;
        self
    }

    /// Set the execution strategy.
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }
}
