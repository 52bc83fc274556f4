/// Front-end toggles that live outside the scene.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppState {
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
    debug_log_visible: bool,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mouse_capture_enabled: true,
            mouse_capture_dirty: false,
            debug_log_visible: false,
            dirty: true,
        }
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
        self.dirty = true;
    }

    pub fn toggle_mouse_capture(&mut self) {
        let enabled = !self.mouse_capture_enabled;
        self.set_mouse_capture_enabled(enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }

    pub fn debug_log_visible(&self) -> bool {
        self.debug_log_visible
    }

    pub fn set_debug_log_visible(&mut self, visible: bool) {
        self.debug_log_visible = visible;
        self.dirty = true;
    }

    pub fn toggle_debug_log_visible(&mut self) {
        self.set_debug_log_visible(!self.debug_log_visible);
    }

    /// Request a redraw on the next tick.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mouse_capture_toggle_and_take_change() {
        let mut s = AppState::new();
        assert!(s.mouse_capture_enabled());
        s.set_mouse_capture_enabled(true);
        assert!(s.take_mouse_capture_change().is_none());
        s.set_mouse_capture_enabled(false);
        assert_eq!(s.take_mouse_capture_change(), Some(false));
        assert!(s.take_mouse_capture_change().is_none());
        s.toggle_mouse_capture();
        assert!(s.mouse_capture_enabled());
    }

    #[test]
    fn dirty_flag_is_consumed() {
        let mut s = AppState::new();
        assert!(s.take_dirty());
        assert!(!s.take_dirty());
        s.toggle_debug_log_visible();
        assert!(s.debug_log_visible());
        assert!(s.take_dirty());
    }
}
