//! Scheduler timing configuration.

use serde::{Deserialize, Serialize};

use crate::bar::ShowDuration;

/// Timing knobs for the scheduler.
///
/// Defaults match the usual transient-bar timings: 1500 ms short,
/// 2750 ms long. `coerce_indefinite_to` is what an indefinite duration
/// becomes when more bars are queued behind the promoted one; earlier
/// revisions of the upstream behavior disagreed between short and long,
/// so it is a knob rather than a constant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerConfig {
    pub short_millis: u64,
    pub long_millis: u64,
    pub coerce_indefinite_to: ShowDuration,
    /// Capacity of the command channel feeding the worker.
    pub channel_capacity: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            short_millis: 1500,
            long_millis: 2750,
            coerce_indefinite_to: ShowDuration::Short,
            channel_capacity: 100,
        }
    }
}
