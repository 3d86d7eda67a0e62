use std::time::Duration;

use thiserror::Error;

/// Identifier of a single page mount; timers scheduled by a page are owned by
/// the mount that scheduled them.
pub type MountId = u64;

/// Static name identifying what a timer is for, e.g. `"contact.submit"`.
pub type TimerKey = &'static str;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerOwner {
    /// Timers owned by the application itself (bootstrap).
    App,
    /// Timers owned by one mounted page instance.
    Page(MountId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub owner: TimerOwner,
    pub key: TimerKey,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("timer `{key}` is already armed for {owner:?}")]
    AlreadyArmed { owner: TimerOwner, key: TimerKey },
}

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    owner: TimerOwner,
    key: TimerKey,
    deadline: Duration,
}

/// Queue of pending one-shot timers.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since the queue was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Arm `key` for `owner`, firing once `delay` has elapsed.
    ///
    /// A key may not be re-armed while it is still pending for the same owner.
    pub fn schedule(
        &mut self,
        owner: TimerOwner,
        key: TimerKey,
        delay: Duration,
    ) -> Result<TimerHandle, TimerError> {
        if self.is_pending(owner, key) {
            return Err(TimerError::AlreadyArmed { owner, key });
        }
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(PendingTimer {
            handle,
            owner,
            key,
            deadline: self.now + delay,
        });
        Ok(handle)
    }

    /// Cancel one timer; returns whether it was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        before != self.pending.len()
    }

    pub fn cancel_key(&mut self, owner: TimerOwner, key: TimerKey) -> bool {
        let before = self.pending.len();
        self.pending
            .retain(|timer| !(timer.owner == owner && timer.key == key));
        before != self.pending.len()
    }

    /// Cancel every timer belonging to `owner`, returning how many were dropped.
    pub fn cancel_owner(&mut self, owner: TimerOwner) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.owner != owner);
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    pub fn is_pending(&self, owner: TimerOwner, key: TimerKey) -> bool {
        self.pending
            .iter()
            .any(|timer| timer.owner == owner && timer.key == key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Move the clock forward and drain every timer whose deadline passed,
    /// earliest deadline first (ties keep scheduling order).
    pub fn advance(&mut self, elapsed: Duration) -> Vec<FiredTimer> {
        self.now += elapsed;
        let now = self.now;

        let mut due: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|timer| {
            if timer.deadline <= now {
                due.push(timer.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|timer| (timer.deadline, timer.handle.0));

        due.into_iter()
            .map(|timer| FiredTimer {
                handle: timer.handle,
                owner: timer.owner,
                key: timer.key,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: TimerKey = "test.key";

    #[test]
    fn fires_once_after_delay() {
        let mut timers = TimerQueue::new();
        timers
            .schedule(TimerOwner::App, KEY, Duration::from_millis(800))
            .unwrap();
        assert!(timers.advance(Duration::from_millis(799)).is_empty());
        let fired = timers.advance(Duration::from_millis(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].key, KEY);
        assert!(timers.advance(Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn rejects_rearm_while_pending() {
        let mut timers = TimerQueue::new();
        let owner = TimerOwner::Page(1);
        timers.schedule(owner, KEY, Duration::from_millis(5)).unwrap();
        let err = timers
            .schedule(owner, KEY, Duration::from_millis(5))
            .unwrap_err();
        assert_eq!(err, TimerError::AlreadyArmed { owner, key: KEY });

        timers.advance(Duration::from_millis(5));
        assert!(timers.schedule(owner, KEY, Duration::from_millis(5)).is_ok());
    }

    #[test]
    fn cancel_owner_only_drops_that_owner() {
        let mut timers = TimerQueue::new();
        timers
            .schedule(TimerOwner::Page(1), "a", Duration::from_millis(5))
            .unwrap();
        timers
            .schedule(TimerOwner::Page(1), "b", Duration::from_millis(5))
            .unwrap();
        timers
            .schedule(TimerOwner::Page(2), "a", Duration::from_millis(5))
            .unwrap();

        assert_eq!(timers.cancel_owner(TimerOwner::Page(1)), 2);
        let fired = timers.advance(Duration::from_millis(5));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].owner, TimerOwner::Page(2));
    }

    #[test]
    fn cancel_by_handle() {
        let mut timers = TimerQueue::new();
        let handle = timers
            .schedule(TimerOwner::App, KEY, Duration::from_millis(5))
            .unwrap();
        assert!(timers.cancel(handle));
        assert!(!timers.cancel(handle));
        assert!(timers.advance(Duration::from_millis(10)).is_empty());
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = TimerQueue::new();
        timers
            .schedule(TimerOwner::App, "late", Duration::from_millis(20))
            .unwrap();
        timers
            .schedule(TimerOwner::App, "early", Duration::from_millis(10))
            .unwrap();
        let keys: Vec<_> = timers
            .advance(Duration::from_millis(30))
            .into_iter()
            .map(|fired| fired.key)
            .collect();
        assert_eq!(keys, vec!["early", "late"]);
    }
}
