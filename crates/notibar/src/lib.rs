//! Single-slot notification bar scheduler.
//!
//! Callers submit bars ([`BarSpec`]) with a display duration; the scheduler
//! shows at most one bar at a time in a fixed slot, auto-advances through
//! the FIFO queue as durations elapse, and reports shown/dismissed
//! transitions back through a [`DisplayListener`]. Rendering is delegated
//! to a host-provided [`Presenter`].

pub mod bar;
pub mod config;
pub mod presenter;
pub mod queue;
pub mod registry;
pub mod scheduler;

pub use bar::{ActionHandler, BarKind, BarSpec, IconRef, ShowDuration};
pub use config::SchedulerConfig;
pub use presenter::{DisplayListener, Presenter, PresenterSignals, RenderToken, TracingPresenter};
pub use queue::QueueEntry;
pub use registry::BarStore;
pub use scheduler::{BarManager, BarManagerBuilder};

/// Unified error type for the notibar crate.
///
/// Only conditions the caller can act on are surfaced as errors. Calling
/// `dismiss`/`update`/`set_progress` with nothing showing is a benign no-op,
/// and stale presenter/timer callbacks are discarded internally.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bar message must not be empty")]
    EmptyMessage,

    #[error("progress max must be at least 1, got {0}")]
    InvalidProgressMax(u32),

    #[error("no bar stored under id {0}")]
    NotFound(u32),

    #[error("scheduler unavailable: {0}")]
    Unavailable(String),
}
