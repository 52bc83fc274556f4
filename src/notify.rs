//! Transient popup messages.
//!
//! Each popup holds for [`POPUP_HOLD`], then plays an exit of
//! [`POPUP_EXIT`] before it is dropped. At most [`POPUP_MAX_VISIBLE`]
//! popups are shown at once; showing another makes the oldest one start
//! leaving early. Like the boundary, the stack only moves when the host
//! calls [`PopupStack::advance`].

use std::time::{Duration, Instant};

use crate::constants::{POPUP_EXIT, POPUP_HOLD, POPUP_MAX_VISIBLE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupConfig {
    pub hold: Duration,
    pub exit: Duration,
    pub max_visible: usize,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            hold: POPUP_HOLD,
            exit: POPUP_EXIT,
            max_visible: POPUP_MAX_VISIBLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Popup {
    pub id: PopupId,
    pub message: String,
    expires_at: Instant,
    exit_started: Option<Instant>,
}

impl Popup {
    pub fn is_exiting(&self) -> bool {
        self.exit_started.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PopupStack {
    config: PopupConfig,
    next_id: u64,
    popups: Vec<Popup>,
}

impl PopupStack {
    pub fn new(config: PopupConfig) -> Self {
        Self {
            config,
            next_id: 0,
            popups: Vec::new(),
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Instant) -> PopupId {
        self.next_id += 1;
        let id = PopupId(self.next_id);
        let message = message.into();
        tracing::debug!(popup = self.next_id, %message, "popup shown");
        self.popups.push(Popup {
            id,
            message,
            expires_at: now + self.config.hold,
            exit_started: None,
        });
        self.enforce_cap(now);
        id
    }

    /// Start the exit of `id` if it is still fully shown.
    pub fn dismiss(&mut self, id: PopupId, now: Instant) -> bool {
        match self.popups.iter_mut().find(|p| p.id == id) {
            Some(popup) if !popup.is_exiting() => {
                popup.exit_started = Some(now);
                true
            }
            _ => false,
        }
    }

    fn enforce_cap(&mut self, now: Instant) {
        loop {
            let active = self.popups.iter().filter(|p| !p.is_exiting()).count();
            if active <= self.config.max_visible {
                break;
            }
            let Some(oldest) = self.popups.iter_mut().find(|p| !p.is_exiting()) else {
                break;
            };
            tracing::debug!(popup = oldest.id.0, "popup evicted over cap");
            oldest.exit_started = Some(now);
        }
    }

    /// Move expired popups into their exit and drop finished exits. Returns
    /// whether anything changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for popup in &mut self.popups {
            if !popup.is_exiting() && popup.expires_at <= now {
                popup.exit_started = Some(now);
                changed = true;
            }
        }
        let exit = self.config.exit;
        let before = self.popups.len();
        self.popups
            .retain(|p| p.exit_started.is_none_or(|started| started + exit > now));
        changed || self.popups.len() != before
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.popups
            .iter()
            .map(|p| match p.exit_started {
                Some(started) => started + self.config.exit,
                None => p.expires_at,
            })
            .min()
    }

    /// Oldest first, exiting entries included.
    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    pub fn visible_count(&self) -> usize {
        self.popups.iter().filter(|p| !p.is_exiting()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn popup_holds_then_exits_then_disappears() {
        let t0 = Instant::now();
        let mut s = PopupStack::default();
        s.show("hello", t0);
        assert!(!s.advance(t0 + ms(4_999)));
        assert!(s.advance(t0 + ms(5_000)));
        assert!(s.popups()[0].is_exiting());
        assert!(!s.advance(t0 + ms(5_299)));
        assert!(s.advance(t0 + ms(5_300)));
        assert!(s.is_empty());
    }

    #[test]
    fn fifth_popup_evicts_the_oldest() {
        let t0 = Instant::now();
        let mut s = PopupStack::default();
        let first = s.show("1", t0);
        for n in 2..=5 {
            s.show(n.to_string(), t0 + ms(n * 10));
        }
        assert_eq!(s.visible_count(), 4);
        let oldest = &s.popups()[0];
        assert_eq!(oldest.id, first);
        assert!(oldest.is_exiting());
        assert_eq!(s.popups().len(), 5);

        s.advance(t0 + ms(50 + 300));
        assert_eq!(s.popups().len(), 4);
        assert!(s.popups().iter().all(|p| p.id != first));
    }

    #[test]
    fn dismiss_is_one_shot() {
        let t0 = Instant::now();
        let mut s = PopupStack::default();
        let id = s.show("x", t0);
        assert!(s.dismiss(id, t0));
        assert!(!s.dismiss(id, t0 + ms(1)));
        assert_eq!(s.next_deadline(), Some(t0 + ms(300)));
    }
}
