use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    /// Keep going, and make sure the handler gets a tick no later than this.
    WakeAt(Instant),
    Quit,
}

/// The message pump driving the UI thread.
///
/// Polls the input driver and hands each event to a handler closure. When the
/// poll times out the handler is called with `None`, which is where time
/// advances and frames are drawn. A handler that has timers pending returns
/// [`ControlFlow::WakeAt`] so the poll wakes up in time for them.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    /// How long to block in `poll` given an optional wake-up deadline.
    pub fn poll_timeout(&self, wake: Option<Instant>, now: Instant) -> Duration {
        match wake {
            Some(at) => at.saturating_duration_since(now).min(self.poll_interval),
            None => self.poll_interval,
        }
    }

    /// Run until the handler returns [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        let mut wake = None;
        loop {
            match handler(&mut self.driver, None)? {
                ControlFlow::Quit => return Ok(()),
                ControlFlow::WakeAt(at) => wake = Some(at),
                ControlFlow::Continue => wake = None,
            }

            let timeout = self.poll_timeout(wake, Instant::now());
            if self.driver.poll(timeout)? {
                // Drain bursts (mouse drags) so rendering doesn't fall behind
                // the input stream.
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::collections::VecDeque;

    struct Scripted(VecDeque<Event>);

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.0.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn poll_timeout_respects_deadline() {
        let lp = EventLoop::new(Scripted(VecDeque::new()), Duration::from_millis(50));
        let now = Instant::now();
        assert_eq!(lp.poll_timeout(None, now), Duration::from_millis(50));
        assert_eq!(
            lp.poll_timeout(Some(now + Duration::from_millis(10)), now),
            Duration::from_millis(10)
        );
        assert_eq!(
            lp.poll_timeout(Some(now - Duration::from_millis(10)), now),
            Duration::ZERO
        );
    }

    #[test]
    fn run_drains_events_then_quits() {
        let script = VecDeque::from(vec![key('a'), key('b'), key('q')]);
        let mut lp = EventLoop::new(Scripted(script), Duration::ZERO);
        let mut seen = Vec::new();
        lp.run(|_, event| {
            if let Some(Event::Key(k)) = event {
                if k.code == KeyCode::Char('q') {
                    return Ok(ControlFlow::Quit);
                }
                seen.push(k.code);
            }
            Ok(ControlFlow::Continue)
        })
        .unwrap();
        assert_eq!(seen, vec![KeyCode::Char('a'), KeyCode::Char('b')]);
    }
}
