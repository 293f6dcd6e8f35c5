//! Guards against late responses.
//!
//! Requests are never aborted on the wire. Instead every view holds a
//! [`CancelToken`] that it trips when it goes away, and a
//! [`RequestSequencer`] that only lets the newest response through.
//! [`Debouncer`] applies the same sequencing to user input.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::api::Delay;

/// Shared cancellation flag. Clones observe the same state.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run `commit` only while the token is live.
    ///
    /// Returns whether the commit happened.
    pub fn commit<F: FnOnce()>(&self, commit: F) -> bool {
        if self.is_cancelled() {
            log::debug!("🚫 Dropping result for a cancelled view");
            return false;
        }
        commit();
        true
    }
}

/// Identifies one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Hands out increasing tickets; only the latest one is current.
#[derive(Clone, Debug, Default)]
pub struct RequestSequencer {
    latest: Arc<AtomicU64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket, superseding every earlier one.
    pub fn issue(&self) -> RequestTicket {
        RequestTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

/// Collapses a burst of inputs into its last value.
///
/// Each [`Debouncer::settle`] call supersedes the ones before it. Once the
/// quiet period passes, only the newest call gets its value back, so a run
/// of keystrokes ends in a single query.
#[derive(Clone, Debug)]
pub struct Debouncer<D> {
    sequencer: RequestSequencer,
    delay: D,
    quiet: Duration,
}

impl<D: Delay> Debouncer<D> {
    pub fn new(delay: D, quiet: Duration) -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            delay,
            quiet,
        }
    }

    /// Wait out the quiet period; `None` when a later input arrived meanwhile.
    pub async fn settle<T>(&self, value: T) -> Option<T> {
        let ticket = self.sequencer.issue();
        self.delay.sleep(self.quiet).await;
        self.sequencer.is_current(ticket).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::YieldDelay;
    use crate::api::NoDelay;
    use futures::executor::block_on;
    use futures::future::join_all;

    #[test]
    fn test_cancel_token_blocks_commit() {
        let token = CancelToken::new();
        let view = token.clone();
        let mut committed = 0;

        assert!(view.commit(|| committed += 1));
        token.cancel();
        assert!(!view.commit(|| committed += 1));
        assert_eq!(committed, 1);
        assert!(view.is_cancelled());
    }

    #[test]
    fn test_sequencer_only_latest_is_current() {
        let seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();

        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert_eq!(second.id(), first.id() + 1);
    }

    #[test]
    fn test_debouncer_keeps_only_last_of_burst() {
        let debouncer = Debouncer::new(YieldDelay, Duration::from_millis(300));
        let settled = block_on(join_all(["d", "dr", "dra"].map(|text| debouncer.settle(text))));
        assert_eq!(settled, vec![None, None, Some("dra")]);
    }

    #[test]
    fn test_debouncer_separate_pauses_each_settle() {
        let debouncer = Debouncer::new(NoDelay, Duration::from_millis(300));
        assert_eq!(block_on(debouncer.settle(1)), Some(1));
        assert_eq!(block_on(debouncer.settle(2)), Some(2));
    }
}
