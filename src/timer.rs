//! Deferred tasks with explicit handles.
//!
//! The queue never runs callbacks on its own: the host asks for due entries
//! with [`TimerQueue::take_due`] and routes each one to its owner. Cancelling
//! a handle removes the entry, so a cancelled timer can never fire late.

use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy)]
struct Scheduled<O> {
    handle: TimerHandle,
    owner: O,
    deadline: Instant,
}

#[derive(Debug, Clone)]
pub struct TimerQueue<O> {
    next_handle: u64,
    pending: Vec<Scheduled<O>>,
}

impl<O> Default for TimerQueue<O> {
    fn default() -> Self {
        Self {
            next_handle: 0,
            pending: Vec::new(),
        }
    }
}

impl<O: Copy + Eq> TimerQueue<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, owner: O, deadline: Instant) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.pending.push(Scheduled {
            handle,
            owner,
            deadline,
        });
        handle
    }

    /// Returns `true` when the handle was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.handle != handle);
        self.pending.len() != before
    }

    pub fn cancel_owner(&mut self, owner: O) -> usize {
        let before = self.pending.len();
        self.pending.retain(|entry| entry.owner != owner);
        before - self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|entry| entry.handle == handle)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|entry| entry.deadline).min()
    }

    /// Remove and return every entry whose deadline is at or before `now`,
    /// earliest first (ties keep scheduling order).
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerHandle, O)> {
        let mut due: Vec<Scheduled<O>> = Vec::new();
        self.pending.retain(|entry| {
            if entry.deadline <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|entry| (entry.deadline, entry.handle));
        due.into_iter()
            .map(|entry| (entry.handle, entry.owner))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn due_entries_fire_in_deadline_order() {
        let t0 = Instant::now();
        let mut q = TimerQueue::new();
        let late = q.schedule('b', t0 + Duration::from_millis(80));
        let early = q.schedule('a', t0 + Duration::from_millis(20));
        q.schedule('c', t0 + Duration::from_millis(500));

        assert_eq!(q.next_deadline(), Some(t0 + Duration::from_millis(20)));
        assert!(q.take_due(t0 + Duration::from_millis(10)).is_empty());

        let fired = q.take_due(t0 + Duration::from_millis(100));
        assert_eq!(fired, vec![(early, 'a'), (late, 'b')]);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn cancelled_handle_never_fires() {
        let t0 = Instant::now();
        let mut q = TimerQueue::new();
        let h = q.schedule(1u8, t0);
        assert!(q.is_pending(h));
        assert!(q.cancel(h));
        assert!(!q.cancel(h));
        assert!(q.take_due(t0 + Duration::from_secs(1)).is_empty());
    }

    #[test]
    fn cancel_owner_only_touches_that_owner() {
        let t0 = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(1u8, t0);
        q.schedule(1u8, t0);
        let other = q.schedule(2u8, t0);
        assert_eq!(q.cancel_owner(1), 2);
        assert!(q.is_pending(other));
    }
}
