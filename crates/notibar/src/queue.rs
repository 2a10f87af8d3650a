//! FIFO queue of bars awaiting the slot.

use std::collections::VecDeque;

use crate::bar::{BarSpec, ShowDuration};

/// One pending submission: the bar snapshot, its requested duration, and
/// the caller's correlation id for lifecycle reporting.
///
/// The spec is cloned at admission, so mutating the caller's original
/// `BarSpec` after submission never alters a queued entry.
#[derive(Debug, Clone)]
pub struct QueueEntry {
    pub spec: BarSpec,
    pub duration: ShowDuration,
    pub correlation_id: Option<u32>,
}

/// Strict FIFO queue of pending entries. Position 0 is next to show.
#[derive(Debug, Default)]
pub struct BarQueue {
    entries: VecDeque<QueueEntry>,
}

impl BarQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the spec and append an entry at the tail.
    pub fn push(&mut self, spec: &BarSpec, duration: ShowDuration, correlation_id: Option<u32>) {
        self.entries.push_back(QueueEntry {
            spec: spec.clone(),
            duration,
            correlation_id,
        });
    }

    /// Pop the head, the next entry to promote.
    pub fn pop(&mut self) -> Option<QueueEntry> {
        self.entries.pop_front()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bar::BarKind;

    #[test]
    fn pop_is_fifo() {
        let mut queue = BarQueue::new();
        queue.push(
            &BarSpec::new(BarKind::Message, "first"),
            ShowDuration::Short,
            Some(1),
        );
        queue.push(
            &BarSpec::new(BarKind::Message, "second"),
            ShowDuration::Long,
            Some(2),
        );
        queue.push(
            &BarSpec::new(BarKind::Message, "third"),
            ShowDuration::Indefinite,
            None,
        );

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().unwrap().spec.message, "first");
        assert_eq!(queue.pop().unwrap().spec.message, "second");
        assert_eq!(queue.pop().unwrap().spec.message, "third");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn push_snapshots_the_spec() {
        let mut queue = BarQueue::new();
        let mut spec = BarSpec::new(BarKind::Message, "original");
        queue.push(&spec, ShowDuration::Short, None);

        // Caller keeps mutating its own copy after submission.
        spec.message = "mutated".to_string();
        spec.allow_user_input = true;

        let entry = queue.pop().unwrap();
        assert_eq!(entry.spec.message, "original");
        assert!(!entry.spec.allow_user_input);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = BarQueue::new();
        queue.push(
            &BarSpec::new(BarKind::Message, "a"),
            ShowDuration::Short,
            None,
        );
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }
}
