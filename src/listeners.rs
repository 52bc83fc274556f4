//! Document-level pointer listeners, installed per interaction phase.
//!
//! A window that is pressed needs to hear moves and releases that happen
//! outside its own frame. Rather than every window seeing every event, a
//! window installs the listeners it needs for the current phase and removes
//! them when the phase ends. The boundary dispatches global events only to
//! owners that hold the matching listener.

use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ListenerKind {
    /// Jitter detection while pressed but not yet dragging.
    PreDragMove,
    /// Position updates while dragging.
    DragMove,
    /// Release or cancel of the active pointer.
    Release,
}

#[derive(Debug, Clone)]
pub struct GlobalListeners<O: Copy + Ord> {
    installed: BTreeSet<(O, ListenerKind)>,
}

impl<O: Copy + Ord> Default for GlobalListeners<O> {
    fn default() -> Self {
        Self {
            installed: BTreeSet::new(),
        }
    }
}

impl<O: Copy + Ord> GlobalListeners<O> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install(&mut self, owner: O, kind: ListenerKind) -> bool {
        self.installed.insert((owner, kind))
    }

    pub fn uninstall(&mut self, owner: O, kind: ListenerKind) -> bool {
        self.installed.remove(&(owner, kind))
    }

    pub fn uninstall_all(&mut self, owner: O) -> usize {
        let before = self.installed.len();
        self.installed.retain(|(o, _)| *o != owner);
        before - self.installed.len()
    }

    pub fn is_installed(&self, owner: O, kind: ListenerKind) -> bool {
        self.installed.contains(&(owner, kind))
    }

    /// Owners holding any of `kinds`, deduplicated, in owner order.
    pub fn owners(&self, kinds: &[ListenerKind]) -> Vec<O> {
        let mut owners: Vec<O> = self
            .installed
            .iter()
            .filter(|(_, kind)| kinds.contains(kind))
            .map(|(owner, _)| *owner)
            .collect();
        owners.dedup();
        owners
    }

    pub fn count_for(&self, owner: O) -> usize {
        self.installed.iter().filter(|(o, _)| *o == owner).count()
    }

    pub fn len(&self) -> usize {
        self.installed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_is_idempotent_and_scoped_per_owner() {
        let mut l = GlobalListeners::new();
        assert!(l.install(1u32, ListenerKind::Release));
        assert!(!l.install(1u32, ListenerKind::Release));
        l.install(1, ListenerKind::PreDragMove);
        l.install(2, ListenerKind::DragMove);

        assert_eq!(
            l.owners(&[ListenerKind::PreDragMove, ListenerKind::DragMove]),
            vec![1, 2]
        );
        assert_eq!(l.owners(&[ListenerKind::Release]), vec![1]);

        assert_eq!(l.uninstall_all(1), 2);
        assert_eq!(l.count_for(1), 0);
        assert!(l.is_installed(2, ListenerKind::DragMove));
    }

    #[test]
    fn owners_are_not_repeated() {
        let mut l = GlobalListeners::new();
        l.install(5u32, ListenerKind::PreDragMove);
        l.install(5, ListenerKind::Release);
        assert_eq!(
            l.owners(&[ListenerKind::PreDragMove, ListenerKind::Release]),
            vec![5]
        );
    }
}
