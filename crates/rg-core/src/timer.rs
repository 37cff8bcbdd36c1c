//! Inactivity timers, one per group.
//!
//! The table hands each arming a fresh [`TimerTicket`]. A timer service
//! keeps at most one pending timer per group and reports a run-out timer as
//! an [`Expiry`] carrying that ticket. The table only honours an expiry whose
//! ticket is still current, so a timer that ran out just before it was
//! replaced cannot clear the newer game.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::id::GroupId;

/// Identifies one arming of a group's timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerTicket(u64);

impl TimerTicket {
    /// The ticket issued after this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl Default for TimerTicket {
    fn default() -> Self {
        Self(1)
    }
}

/// A group's timer ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    /// Group whose timer ran out.
    pub group: GroupId,
    /// The arming that ran out.
    pub ticket: TimerTicket,
}

/// Schedules inactivity timers keyed by group.
pub trait TimerService {
    /// Start a timer for `group`, replacing any timer already pending for it.
    fn arm(&mut self, group: &GroupId, after: Duration, ticket: TimerTicket);

    /// Drop the pending timer for `group`, if any.
    fn cancel(&mut self, group: &GroupId);
}

/// Timers backed by tokio tasks. Expiries arrive on the paired receiver.
///
/// Must be used from within a tokio runtime.
#[derive(Debug)]
pub struct TokioTimers {
    tx: mpsc::UnboundedSender<Expiry>,
    pending: HashMap<GroupId, JoinHandle<()>>,
}

impl TokioTimers {
    /// Create the service and the receiver expiries are delivered to.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Expiry>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timers = Self {
            tx,
            pending: HashMap::new(),
        };
        (timers, rx)
    }

    /// Number of groups holding a timer that has not been cancelled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl TimerService for TokioTimers {
    fn arm(&mut self, group: &GroupId, after: Duration, ticket: TimerTicket) {
        let tx = self.tx.clone();
        let expiry = Expiry {
            group: group.clone(),
            ticket,
        };
        let task = tokio::spawn(async move {
            tokio::time::sleep(after).await;
            if let Err(e) = tx.send(expiry) {
                debug!(group = %e.0.group, "timer expiry dropped, table is gone");
            }
        });
        if let Some(old) = self.pending.insert(group.clone(), task) {
            old.abort();
        }
    }

    fn cancel(&mut self, group: &GroupId) {
        if let Some(task) = self.pending.remove(group) {
            task.abort();
        }
    }
}

impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, task) in self.pending.drain() {
            task.abort();
        }
    }
}

/// Timers that never fire on their own; the caller expires them by hand.
///
/// Used in tests and by hosts that drive time themselves.
#[derive(Debug, Default)]
pub struct ManualTimers {
    armed: HashMap<GroupId, (Duration, TimerTicket)>,
    arms: usize,
    cancels: usize,
}

impl ManualTimers {
    /// Create an empty timer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Duration and ticket of the pending timer for `group`.
    pub fn armed(&self, group: &GroupId) -> Option<(Duration, TimerTicket)> {
        self.armed.get(group).copied()
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.armed.len()
    }

    /// How many times a timer has been armed.
    pub fn arm_count(&self) -> usize {
        self.arms
    }

    /// How many pending timers have been cancelled.
    pub fn cancel_count(&self) -> usize {
        self.cancels
    }

    /// Run out the pending timer for `group`.
    pub fn expire(&mut self, group: &GroupId) -> Option<Expiry> {
        self.armed.remove(group).map(|(_, ticket)| Expiry {
            group: group.clone(),
            ticket,
        })
    }
}

impl TimerService for ManualTimers {
    fn arm(&mut self, group: &GroupId, after: Duration, ticket: TimerTicket) {
        self.arms += 1;
        self.armed.insert(group.clone(), (after, ticket));
    }

    fn cancel(&mut self, group: &GroupId) {
        if self.armed.remove(group).is_some() {
            self.cancels += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str) -> GroupId {
        GroupId::from(id)
    }

    #[test]
    fn manual_rearm_replaces() {
        let mut timers = ManualTimers::new();
        let first = TimerTicket::default();
        timers.arm(&group("g"), Duration::from_secs(5), first);
        timers.arm(&group("g"), Duration::from_secs(5), first.next());
        assert_eq!(timers.pending(), 1);
        assert_eq!(timers.armed(&group("g")).unwrap().1, first.next());

        let expiry = timers.expire(&group("g")).unwrap();
        assert_eq!(expiry.ticket, first.next());
        assert!(timers.expire(&group("g")).is_none());
    }

    #[test]
    fn manual_cancel_counts_only_pending() {
        let mut timers = ManualTimers::new();
        timers.cancel(&group("g"));
        assert_eq!(timers.cancel_count(), 0);
        timers.arm(&group("g"), Duration::from_secs(1), TimerTicket::default());
        timers.cancel(&group("g"));
        assert_eq!(timers.cancel_count(), 1);
        assert_eq!(timers.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_timer_fires_after_duration() {
        let (mut timers, mut rx) = TokioTimers::new();
        let ticket = TimerTicket::default();
        timers.arm(&group("g"), Duration::from_secs(180), ticket);

        tokio::time::sleep(Duration::from_secs(179)).await;
        assert!(rx.try_recv().is_err());

        let expiry = rx.recv().await.unwrap();
        assert_eq!(expiry, Expiry { group: group("g"), ticket });
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_rearm_fires_once() {
        let (mut timers, mut rx) = TokioTimers::new();
        let first = TimerTicket::default();
        timers.arm(&group("g"), Duration::from_secs(10), first);
        tokio::time::sleep(Duration::from_secs(5)).await;
        timers.arm(&group("g"), Duration::from_secs(10), first.next());
        assert_eq!(timers.pending(), 1);

        let expiry = rx.recv().await.unwrap();
        assert_eq!(expiry.ticket, first.next());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_cancel_prevents_expiry() {
        let (mut timers, mut rx) = TokioTimers::new();
        timers.arm(&group("g"), Duration::from_secs(10), TimerTicket::default());
        timers.cancel(&group("g"));
        assert_eq!(timers.pending(), 0);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_groups_are_independent() {
        let (mut timers, mut rx) = TokioTimers::new();
        timers.arm(&group("a"), Duration::from_secs(10), TimerTicket::default());
        timers.arm(&group("b"), Duration::from_secs(20), TimerTicket::default());
        timers.cancel(&group("a"));

        let expiry = rx.recv().await.unwrap();
        assert_eq!(expiry.group, group("b"));
    }
}
