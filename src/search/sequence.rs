//! Latest-query-wins bookkeeping for overlapping searches.
//!
//! A caller issues a [`Ticket`] before starting each search and only applies
//! the result if that ticket is still the newest one. Results of superseded
//! queries are dropped instead of overwriting newer ones.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct QuerySequence {
    latest: AtomicU64,
}

impl QuerySequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new query, superseding every earlier ticket.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// Hand back `value` only if `ticket` has not been superseded.
    pub fn accept<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{mpsc, Arc};
    use std::thread;

    #[test]
    fn newer_ticket_supersedes_older() {
        let seq = QuerySequence::new();
        let first = seq.issue();
        assert!(seq.is_current(first));
        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert_eq!(seq.accept(first, "stale"), None);
        assert_eq!(seq.accept(second, "fresh"), Some("fresh"));
    }

    #[test]
    fn slow_stale_result_is_discarded() {
        let seq = Arc::new(QuerySequence::new());
        let (release_tx, release_rx) = mpsc::channel::<()>();

        let stale = seq.issue();
        let worker = {
            let seq = Arc::clone(&seq);
            thread::spawn(move || {
                release_rx.recv().unwrap();
                seq.accept(stale, "rel")
            })
        };

        let fresh = seq.issue();
        let applied = seq.accept(fresh, "release");
        release_tx.send(()).unwrap();

        assert_eq!(applied, Some("release"));
        assert_eq!(worker.join().unwrap(), None);
    }
}
