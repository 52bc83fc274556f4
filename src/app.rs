//! The demo page hosted in a terminal.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::layout::Rect;

use crate::boundary::{Haptics, NoHaptics};
use crate::config::Config;
use crate::debug_log::{
    DebugLogHandle, install_panic_hook, set_global_debug_log, take_panic_pending,
};
use crate::drivers::InputDriver;
use crate::drivers::OutputDriver;
use crate::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use crate::error::AppError;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::input::{PointerEvent, PointerPhase};
use crate::render::{PageLayout, layout_page, render_page};
use crate::scene::{Action, MountedScene, Scene};
use crate::state::AppState;
use crate::tracing_sub;
use crate::ui::UiFrame;

const KEY_POPUP_MESSAGE: &str = "This is a popup message!";

/// Rings the terminal bell: the closest thing a terminal has to a vibration.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Haptics for TerminalBell {
    fn pulse(&mut self, duration: Duration) {
        tracing::trace!(?duration, "haptic pulse");
        let mut stdout = io::stdout();
        if let Err(err) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            tracing::warn!(%err, "bell failed");
        }
    }
}

#[derive(Debug)]
pub struct App {
    scene: MountedScene,
    state: AppState,
    layout: PageLayout,
    log: Option<DebugLogHandle>,
}

impl App {
    pub fn new(config: &Config, log: Option<DebugLogHandle>) -> Result<Self, AppError> {
        let scene = if config.haptics {
            Scene::home().mount_with(config.session, || Box::new(TerminalBell))?
        } else {
            Scene::home().mount_with(config.session, || Box::new(NoHaptics))?
        };
        let mut state = AppState::new();
        state.set_debug_log_visible(config.debug_log && log.is_some());
        Ok(Self {
            scene,
            state,
            layout: PageLayout::default(),
            log,
        })
    }

    pub fn scene(&self) -> &MountedScene {
        &self.scene
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Recompute the page layout for a viewport of `area`.
    pub fn relayout(&mut self, area: Rect) {
        self.layout = layout_page(&mut self.scene, area, self.state.debug_log_visible());
    }

    pub fn draw(&mut self, mut frame: UiFrame<'_>) {
        self.relayout(frame.area());
        render_page(&mut frame, &self.scene, &self.layout, self.log.as_ref());
    }

    /// Advance timers to `now`. Returns whether a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if take_panic_pending() {
            self.state.set_debug_log_visible(self.log.is_some());
        }
        let changed = self.scene.advance(now);
        self.state.take_dirty() || changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scene.next_deadline()
    }

    /// Returns `true` when the app should quit.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        match event {
            Event::Key(key) => return self.handle_key(key, now),
            Event::Mouse(mouse) => self.handle_mouse(mouse, now),
            Event::Resize(..) => self.state.mark_dirty(),
            _ => {}
        }
        false
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('p') => {
                self.perform(&Action::ShowPopup(KEY_POPUP_MESSAGE.to_string()), now)
            }
            KeyCode::Char('d') if self.log.is_some() => self.state.toggle_debug_log_visible(),
            KeyCode::Char('m') => self.state.toggle_mouse_capture(),
            _ => {}
        }
        false
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent, now: Instant) {
        let Some(event) = PointerEvent::from_crossterm(mouse) else {
            return;
        };
        if event.phase == PointerPhase::Down
            && event.is_primary()
            && let Some(action) = self.layout.button_at(mouse.column, mouse.row).cloned()
        {
            self.perform(&action, now);
            return;
        }
        let mut consumed = false;
        for mounted in self.scene.boundaries_mut() {
            // A press lands in at most one boundary; moves and releases go to
            // every boundary that may hold a listener.
            if event.phase == PointerPhase::Down && consumed {
                break;
            }
            consumed |= mounted.boundary.handle_pointer(&event, now);
        }
        if consumed {
            self.state.mark_dirty();
        }
    }

    fn perform(&mut self, action: &Action, now: Instant) {
        match self.scene.perform(action, now) {
            Ok(()) => self.state.mark_dirty(),
            Err(err) => tracing::warn!(%err, ?action, "action failed"),
        }
    }
}

/// Set up logging and the terminal, then run the demo until the user quits.
pub fn run(config: Config) -> Result<(), AppError> {
    let log = DebugLogHandle::default();
    set_global_debug_log(log.clone());
    install_panic_hook();
    tracing_sub::init_default(config.log_level);
    tracing::info!(?config, "starting");

    let mut app = App::new(&config, Some(log))?;
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let mut input = ConsoleInputDriver::new();
    input.set_mouse_capture(true)?;

    let mut event_loop = EventLoop::new(input, config.poll_interval);
    let result = event_loop.run(|driver, event| {
        let now = Instant::now();
        match event {
            Some(event) => {
                if app.handle_event(&event, now) {
                    return Ok(ControlFlow::Quit);
                }
                if let Some(enabled) = app.state_mut().take_mouse_capture_change() {
                    driver.set_mouse_capture(enabled)?;
                }
            }
            None => {
                if app.tick(now) {
                    output.draw(|frame| app.draw(frame))?;
                }
            }
        }
        Ok(match app.next_deadline() {
            Some(at) => ControlFlow::WakeAt(at),
            None => ControlFlow::Continue,
        })
    });
    output.exit()?;
    tracing::info!("stopped");
    result.map_err(AppError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseButton, MouseEventKind};

    fn app() -> App {
        let config = Config {
            haptics: false,
            ..Config::default()
        };
        let mut app = App::new(&config, Some(DebugLogHandle::new(16))).expect("valid scene");
        app.relayout(Rect::new(0, 0, 80, 30));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn clicking_the_button_shows_a_popup() {
        let mut app = app();
        let now = Instant::now();
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 4), now);
        let popups = app.scene().popups.as_ref().expect("provider");
        assert_eq!(popups.visible_count(), 1);
    }

    #[test]
    fn keys_toggle_state_and_quit() {
        let mut app = app();
        let now = Instant::now();
        assert!(!app.handle_event(&key('d'), now));
        assert!(app.state().debug_log_visible());
        assert!(!app.handle_event(&key('p'), now));
        assert_eq!(app.next_deadline(), Some(now + Duration::from_secs(5)));
        assert!(app.handle_event(&key('q'), now));
    }

    #[test]
    fn header_drag_moves_window_inside_boundary() {
        let mut app = app();
        let t0 = Instant::now();
        // "Hello World" sits at (36, 3) inside a boundary whose interior
        // starts at (2, 7): its header spans rows 10..12 from column 38.
        app.handle_event(&mouse(MouseEventKind::Down(MouseButton::Left), 40, 10), t0);
        assert!(app.tick(t0 + Duration::from_millis(100)));
        app.handle_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 50, 12), t0);
        app.handle_event(&mouse(MouseEventKind::Up(MouseButton::Left), 50, 12), t0);

        let mounted = app.scene().boundaries().next().expect("boundary");
        let window = mounted
            .boundary
            .windows()
            .find(|w| w.content() == "Hello World")
            .expect("window");
        assert_eq!(window.position().x, 46);
        assert_eq!(window.position().y, 5);
        assert!(!window.is_dragging());
    }
}
