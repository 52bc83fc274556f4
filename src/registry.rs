//! Stacking order shared by every window in a boundary.
//!
//! The order is a plain sequence: index 0 is drawn first (back), the last
//! entry is topmost. A window's z-index is its index; windows that are not
//! registered sit at the back.

#[derive(Debug, Clone)]
pub struct ZOrderRegistry<Id> {
    order: Vec<Id>,
}

impl<Id> Default for ZOrderRegistry<Id> {
    fn default() -> Self {
        Self { order: Vec::new() }
    }
}

impl<Id: Copy + Eq + std::fmt::Debug> ZOrderRegistry<Id> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `id` if absent. Returns whether the order changed.
    pub fn register(&mut self, id: Id) -> bool {
        if self.order.contains(&id) {
            return false;
        }
        self.order.push(id);
        true
    }

    pub fn unregister(&mut self, id: Id) -> bool {
        let before = self.order.len();
        self.order.retain(|entry| *entry != id);
        self.order.len() != before
    }

    /// Make `id` topmost, inserting it if it was not registered. Already
    /// topmost is a no-op so callers can skip a redraw.
    pub fn bring_to_front(&mut self, id: Id) -> bool {
        if self.order.last() == Some(&id) {
            return false;
        }
        self.order.retain(|entry| *entry != id);
        self.order.push(id);
        tracing::trace!(window_id = ?id, depth = self.order.len(), "raised to front");
        true
    }

    pub fn index_of(&self, id: Id) -> Option<usize> {
        self.order.iter().position(|entry| *entry == id)
    }

    pub fn z_index(&self, id: Id) -> usize {
        self.index_of(id).unwrap_or(0)
    }

    pub fn topmost(&self) -> Option<Id> {
        self.order.last().copied()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.order.contains(&id)
    }

    pub fn order(&self) -> &[Id] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
