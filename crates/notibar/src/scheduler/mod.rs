//! Scheduler public surface: the [`BarManager`] handle and its builder.
//!
//! The handle validates and snapshots submissions synchronously, then
//! feeds a bounded command channel consumed by a single worker task that
//! owns all mutable state (queue, active entry, timer). No call blocks.

mod worker;


use std::sync::Arc;

use tokio::sync::{mpsc, watch};

use crate::Error;
use crate::bar::{BarSpec, ShowDuration};
use crate::config::SchedulerConfig;
use crate::presenter::{DisplayListener, Presenter, PresenterSignals, RenderToken, TracingPresenter};
use crate::registry::BarStore;

use worker::Worker;

/// Commands processed by the worker. Presenter signals re-enter through
/// the same channel so every mutation runs on one context.
#[derive(Debug)]
pub(crate) enum Command {
    Show {
        spec: BarSpec,
        duration: ShowDuration,
        correlation_id: Option<u32>,
    },
    Dismiss,
    DismissAll,
    Update(BarSpec),
    Refresh,
    SetProgress(u32),
    Shown(RenderToken),
    Hidden(RenderToken),
}

/// Builder for [`BarManager`]. Defaults to a [`TracingPresenter`], no
/// listener, and [`SchedulerConfig::default`].
pub struct BarManagerBuilder {
    config: SchedulerConfig,
    presenter: Box<dyn Presenter>,
    listener: Option<Box<dyn DisplayListener>>,
}

impl BarManagerBuilder {
    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn presenter(mut self, presenter: impl Presenter) -> Self {
        self.presenter = Box::new(presenter);
        self
    }

    pub fn listener(mut self, listener: impl DisplayListener) -> Self {
        self.listener = Some(Box::new(listener));
        self
    }

    /// Spawn the worker task and return the handle.
    ///
    /// Must be called within a tokio runtime. The worker stops once every
    /// handle clone has been dropped.
    pub fn spawn(self) -> BarManager {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity);
        let (active_tx, active_rx) = watch::channel(None);

        let mut presenter = self.presenter;
        presenter.bind(PresenterSignals { tx: tx.downgrade() });

        let worker = Worker::new(self.config, rx, presenter, self.listener, active_tx);
        tokio::spawn(worker.run());

        BarManager {
            tx,
            store: Arc::new(BarStore::new()),
            active_rx,
        }
    }
}

/// Handle to one display slot's scheduler. Cheap to clone; all clones
/// feed the same worker.
#[derive(Clone)]
pub struct BarManager {
    tx: mpsc::Sender<Command>,
    store: Arc<BarStore>,
    active_rx: watch::Receiver<Option<BarSpec>>,
}

impl BarManager {
    pub fn builder() -> BarManagerBuilder {
        BarManagerBuilder {
            config: SchedulerConfig::default(),
            presenter: Box::new(TracingPresenter::new()),
            listener: None,
        }
    }

    /// Queue a bar for display. If nothing is showing it is promoted
    /// immediately; otherwise it waits its FIFO turn.
    ///
    /// The spec is validated and snapshotted here: mutating the caller's
    /// value afterwards does not affect the queued bar.
    pub fn show(&self, spec: &BarSpec, duration: ShowDuration) -> Result<(), Error> {
        self.submit(spec, duration, None)
    }

    /// Like [`show`](Self::show), attaching a correlation id that is
    /// reported back through the [`DisplayListener`].
    pub fn show_with_id(
        &self,
        spec: &BarSpec,
        duration: ShowDuration,
        correlation_id: u32,
    ) -> Result<(), Error> {
        self.submit(spec, duration, Some(correlation_id))
    }

    /// Queue a previously [`put`](Self::put) bar by its store id.
    pub fn show_by_id(&self, store_id: u32, duration: ShowDuration) -> Result<(), Error> {
        let spec = self.store.get(store_id).ok_or(Error::NotFound(store_id))?;
        self.submit(&spec, duration, None)
    }

    /// Like [`show_by_id`](Self::show_by_id), with a correlation id.
    pub fn show_by_id_with(
        &self,
        store_id: u32,
        duration: ShowDuration,
        correlation_id: u32,
    ) -> Result<(), Error> {
        let spec = self.store.get(store_id).ok_or(Error::NotFound(store_id))?;
        self.submit(&spec, duration, Some(correlation_id))
    }

    /// Store a bar under `store_id` for later [`show_by_id`](Self::show_by_id).
    pub fn put(&self, spec: &BarSpec, store_id: u32) {
        self.store.put(spec, store_id);
    }

    /// Retrieve a copy of the bar stored under `store_id`.
    pub fn get(&self, store_id: u32) -> Option<BarSpec> {
        self.store.get(store_id)
    }

    /// Dismiss the showing bar and advance to the next in queue.
    /// A no-op while nothing is showing.
    pub fn dismiss(&self) -> Result<(), Error> {
        self.send(Command::Dismiss)
    }

    /// Clear the queue and dismiss the showing bar. Nothing queued can be
    /// promoted afterwards, even by an in-flight hide signal. Idempotent.
    pub fn dismiss_all(&self) -> Result<(), Error> {
        self.send(Command::DismissAll)
    }

    /// Replace the content of the showing bar in place: no hide/show
    /// cycle, no lifecycle events, queue order and running timer
    /// untouched. A no-op while nothing is showing.
    pub fn update(&self, spec: &BarSpec) -> Result<(), Error> {
        spec.validate()?;
        self.send(Command::Update(spec.normalized()))
    }

    /// Re-issue the render for the bar currently showing.
    pub fn refresh(&self) -> Result<(), Error> {
        self.send(Command::Refresh)
    }

    /// Update the progress display of the showing bar. Ignored unless a
    /// progress-bearing kind is showing.
    pub fn set_progress(&self, progress: u32) -> Result<(), Error> {
        self.send(Command::SetProgress(progress))
    }

    /// Snapshot of the bar currently occupying the slot.
    pub fn active(&self) -> Option<BarSpec> {
        self.active_rx.borrow().clone()
    }

    /// Whether a bar currently occupies the slot (including one still
    /// playing its hide animation).
    pub fn is_showing(&self) -> bool {
        self.active_rx.borrow().is_some()
    }

    fn submit(
        &self,
        spec: &BarSpec,
        duration: ShowDuration,
        correlation_id: Option<u32>,
    ) -> Result<(), Error> {
        spec.validate()?;
        self.send(Command::Show {
            spec: spec.normalized(),
            duration,
            correlation_id,
        })
    }

    fn send(&self, cmd: Command) -> Result<(), Error> {
        self.tx
            .try_send(cmd)
            .map_err(|e| Error::Unavailable(e.to_string()))
    }
}
