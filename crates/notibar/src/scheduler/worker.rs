//! Scheduler worker: single task owning queue, active entry, and timer.

use tokio::sync::{mpsc, watch};
use tokio::time::Instant;

use crate::bar::{BarSpec, ShowDuration};
use crate::config::SchedulerConfig;
use crate::presenter::{DisplayListener, Presenter, RenderToken};
use crate::queue::{BarQueue, QueueEntry};

use super::Command;

/// The entry currently occupying the slot.
struct ActiveBar {
    entry: QueueEntry,
    token: RenderToken,
    /// Auto-advance instant; `None` while indefinite or tearing down.
    deadline: Option<Instant>,
    /// Shown has been reported to the listener.
    announced: bool,
    /// Teardown requested; waiting for the presenter's hidden signal.
    tearing_down: bool,
}

pub(crate) struct Worker {
    config: SchedulerConfig,
    rx: mpsc::Receiver<Command>,
    presenter: Box<dyn Presenter>,
    listener: Option<Box<dyn DisplayListener>>,
    queue: BarQueue,
    active: Option<ActiveBar>,
    /// Bumped at every promotion; stale tokens never match.
    generation: u64,
    active_tx: watch::Sender<Option<BarSpec>>,
}

impl Worker {
    pub(crate) fn new(
        config: SchedulerConfig,
        rx: mpsc::Receiver<Command>,
        presenter: Box<dyn Presenter>,
        listener: Option<Box<dyn DisplayListener>>,
        active_tx: watch::Sender<Option<BarSpec>>,
    ) -> Self {
        Self {
            config,
            rx,
            presenter,
            listener,
            queue: BarQueue::new(),
            active: None,
            generation: 0,
            active_tx,
        }
    }

    pub(crate) async fn run(mut self) {
        tracing::debug!("bar scheduler worker started");
        loop {
            let deadline = self.active.as_ref().and_then(|a| a.deadline);
            tokio::select! {
                cmd = self.rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle(cmd),
                        None => break,
                    }
                }
                _ = wait_until(deadline), if deadline.is_some() => {
                    self.begin_teardown("duration elapsed");
                }
            }
        }
        tracing::debug!("bar scheduler worker stopped");
    }

    fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Show {
                spec,
                duration,
                correlation_id,
            } => self.admit(spec, duration, correlation_id),
            Command::Dismiss => self.begin_teardown("manual dismiss"),
            Command::DismissAll => {
                self.queue.clear();
                self.begin_teardown("dismiss all");
            }
            Command::Update(spec) => self.update_active(spec),
            Command::Refresh => self.refresh_active(),
            Command::SetProgress(progress) => self.set_progress(progress),
            Command::Shown(token) => self.on_shown(token),
            Command::Hidden(token) => self.on_hidden(token),
        }
    }

    fn admit(&mut self, spec: BarSpec, duration: ShowDuration, correlation_id: Option<u32>) {
        self.queue.push(&spec, duration, correlation_id);
        if self.active.is_none() {
            self.promote();
            return;
        }
        // A showing indefinite bar stops being the last in line: coerce
        // its duration now so the queue keeps cycling.
        let coerced = self.config.coerce_indefinite_to.resolve(&self.config);
        if let Some(active) = self.active.as_mut()
            && !active.tearing_down
            && active.deadline.is_none()
            && active.entry.duration == ShowDuration::Indefinite
            && let Some(short) = coerced
        {
            active.deadline = Some(Instant::now() + short);
            tracing::debug!(
                message = %active.entry.spec.message,
                coerced_ms = short.as_millis() as u64,
                "indefinite bar coerced, more bars queued"
            );
        }
    }

    /// Move the queue head into the slot, or go idle.
    fn promote(&mut self) {
        let Some(entry) = self.queue.pop() else {
            tracing::debug!("queue drained, slot idle");
            return;
        };
        self.generation += 1;
        let token = RenderToken(self.generation);

        // Indefinite only holds when this is the last bar in line.
        let requested = entry.duration;
        let effective = if requested == ShowDuration::Indefinite && !self.queue.is_empty() {
            self.config.coerce_indefinite_to
        } else {
            requested
        };
        let resolved = effective.resolve(&self.config);
        let deadline = resolved.map(|d| Instant::now() + d);

        tracing::info!(
            message = %entry.spec.message,
            requested = ?requested,
            resolved_ms = resolved.map(|d| d.as_millis() as u64),
            queued = self.queue.len(),
            "bar promoted"
        );

        self.presenter.render(&entry.spec, token);
        self.presenter.show_overlay(!entry.spec.allow_user_input);
        self.active_tx.send_replace(Some(entry.spec.clone()));
        self.active = Some(ActiveBar {
            entry,
            token,
            deadline,
            announced: false,
            tearing_down: false,
        });
    }

    /// Request teardown of the active bar; promotion happens once the
    /// presenter reports the hide finished.
    fn begin_teardown(&mut self, reason: &str) {
        let Some(active) = self.active.as_mut() else {
            tracing::debug!(reason, "nothing showing, teardown skipped");
            return;
        };
        if active.tearing_down {
            tracing::debug!(reason, "teardown already in progress");
            return;
        }
        active.tearing_down = true;
        active.deadline = None;
        let token = active.token;
        tracing::debug!(reason, message = %active.entry.spec.message, "tearing down bar");
        self.presenter.show_overlay(false);
        self.presenter.teardown(token);
    }

    fn update_active(&mut self, spec: BarSpec) {
        let Some(active) = self.active.as_mut() else {
            tracing::debug!("nothing showing, update skipped");
            return;
        };
        if active.tearing_down {
            tracing::debug!("bar already tearing down, update skipped");
            return;
        }
        active.entry.spec = spec;
        let token = active.token;
        let block = !active.entry.spec.allow_user_input;
        self.presenter.render(&active.entry.spec, token);
        self.presenter.show_overlay(block);
        self.active_tx.send_replace(Some(active.entry.spec.clone()));
    }

    fn refresh_active(&mut self) {
        let Some(active) = self.active.as_ref() else {
            tracing::debug!("nothing showing, refresh skipped");
            return;
        };
        if active.tearing_down {
            return;
        }
        self.presenter.render(&active.entry.spec, active.token);
    }

    fn set_progress(&mut self, progress: u32) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        if active.tearing_down || !active.entry.spec.kind.has_progress() {
            return;
        }
        self.presenter.set_progress(progress);
    }

    fn on_shown(&mut self, token: RenderToken) {
        let Some(active) = self.active.as_mut() else {
            tracing::debug!("stale shown signal, slot idle");
            return;
        };
        if active.token != token || active.tearing_down || active.announced {
            tracing::debug!("stale or duplicate shown signal discarded");
            return;
        }
        active.announced = true;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_shown(&active.entry.spec, active.entry.correlation_id);
        }
    }

    fn on_hidden(&mut self, token: RenderToken) {
        let matches = self
            .active
            .as_ref()
            .is_some_and(|a| a.token == token && a.tearing_down);
        if !matches {
            tracing::debug!("stale hidden signal discarded");
            return;
        }
        let Some(active) = self.active.take() else {
            return;
        };
        if let Some(listener) = self.listener.as_mut() {
            listener.on_dismissed(&active.entry.spec, active.entry.correlation_id);
        }
        self.active_tx.send_replace(None);
        self.promote();
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
