use std::io;
use std::time::{Duration, Instant};

use clap::Parser;
use pad_wm::window::decorator::{OpenStepDecorator, WindowDecorator};
use pad_wm::{Boundary, Bounds, PointerEvent, SessionConfig, WindowId, WindowSpec};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

#[derive(Parser, Debug)]
#[command(
    name = "pad-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Headless drag benchmark for the window boundary"
)]
struct BenchCli {
    /// Windows mounted in the boundary.
    #[arg(short = 'w', long = "windows", default_value_t = 64)]
    windows: u16,

    /// Press-hold-drag-release gestures to replay.
    #[arg(short = 'g', long = "gestures", default_value_t = 2_000)]
    gestures: u32,

    /// Pointer moves per gesture once the drag has started.
    #[arg(short = 's', long = "steps", default_value_t = 30)]
    steps: u32,

    /// Also paint every window into an offscreen buffer after each move.
    #[arg(short = 'r', long = "render")]
    render: bool,
}

struct BenchConfig {
    windows: u16,
    gestures: u32,
    steps: u32,
    render: bool,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(1..=1_000).contains(&cli.windows) {
            return Err("windows must be between 1 and 1000".to_string());
        }
        if cli.gestures == 0 {
            return Err("gestures must be at least 1".to_string());
        }
        if !(1..=10_000).contains(&cli.steps) {
            return Err("steps must be between 1 and 10000".to_string());
        }
        Ok(Self {
            windows: cli.windows,
            gestures: cli.gestures,
            steps: cli.steps,
            render: cli.render,
        })
    }
}

const AREA: Rect = Rect {
    x: 0,
    y: 0,
    width: 200,
    height: 60,
};

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    let stats = run_benchmark(&config);
    println!("{}", stats.final_report(&config));
    Ok(())
}

fn build_boundary(windows: u16) -> (Boundary, Vec<WindowId>) {
    let mut boundary = Boundary::new(SessionConfig::default());
    boundary.set_bounds(Some(Bounds::from(AREA)));
    let ids = (0..windows)
        .map(|n| {
            let x = i32::from(n % 8) * 24;
            let y = i32::from(n / 8 % 6) * 10;
            boundary.mount(
                WindowSpec::new(format!("window {n}"))
                    .with_title(format!("#{n}"))
                    .with_size(20, 8)
                    .at(x, y),
            )
        })
        .collect();
    (boundary, ids)
}

fn run_benchmark(config: &BenchConfig) -> BenchStats {
    let (mut boundary, ids) = build_boundary(config.windows);
    let mut buffer = Buffer::empty(AREA);
    let mut stats = BenchStats::new();
    let delay = boundary.config().promotion_delay;
    // Synthetic clock: gestures are replayed far faster than real time.
    let mut now = Instant::now();

    for gesture in 0..config.gestures {
        let id = ids[gesture as usize % ids.len()];
        let Ok(window) = boundary.window(id) else {
            continue;
        };
        let grab = boundary.origin() + window.position() + pad_wm::Point::new(2, 0);
        // Windows overlap once there are more than the grid holds, so lift the
        // target first and make sure the grab point really lands on it.
        if boundary.bring_to_front(id).is_err() || boundary.window_at(grab) != Some(id) {
            stats.skipped += 1;
            continue;
        }

        boundary.handle_pointer(&PointerEvent::mouse_down(grab.x, grab.y), now);
        now += delay;
        stats.promotions += boundary.advance(now) as u64;
        stats.events += 1;

        for step in 0..config.steps {
            let dx = (step as i32 % 40) - 20;
            let dy = (step as i32 % 12) - 6;
            let started = Instant::now();
            boundary.handle_pointer(
                &PointerEvent::mouse_move(grab.x + dx, grab.y + dy),
                now,
            );
            if config.render {
                stats.cells += paint(&boundary, &mut buffer);
            }
            stats.record_event(started.elapsed());
            now += Duration::from_millis(1);
        }

        boundary.handle_pointer(&PointerEvent::mouse_up(grab.x, grab.y), now);
        stats.events += 1;
    }

    stats.mark_completed();
    stats
}

fn paint(boundary: &Boundary, buffer: &mut Buffer) -> u64 {
    buffer.reset();
    let origin = boundary.origin();
    let views = boundary.views();
    let top = views.len().saturating_sub(1);
    for (idx, view) in views.iter().enumerate() {
        OpenStepDecorator.render_window(buffer, view.frame(origin), AREA, view, idx == top);
    }
    u64::from(AREA.width) * u64::from(AREA.height)
}

struct BenchStats {
    start: Instant,
    completed_at: Option<Instant>,
    events: u64,
    moves: u64,
    promotions: u64,
    skipped: u64,
    cells: u64,
    total_move_time: Duration,
    slowest_move: Duration,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            completed_at: None,
            events: 0,
            moves: 0,
            promotions: 0,
            skipped: 0,
            cells: 0,
            total_move_time: Duration::ZERO,
            slowest_move: Duration::ZERO,
        }
    }

    fn elapsed(&self) -> Duration {
        match self.completed_at {
            Some(done) => done.duration_since(self.start),
            None => self.start.elapsed(),
        }
    }

    fn mark_completed(&mut self) {
        self.completed_at = Some(Instant::now());
    }

    fn record_event(&mut self, took: Duration) {
        self.events = self.events.saturating_add(1);
        self.moves = self.moves.saturating_add(1);
        self.total_move_time += took;
        self.slowest_move = self.slowest_move.max(took);
    }

    fn average_move_us(&self) -> f64 {
        if self.moves == 0 {
            return 0.0;
        }
        self.total_move_time.as_secs_f64() / self.moves as f64 * 1_000_000.0
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64();
        let events_per_sec = if elapsed > 0.0 {
            self.events as f64 / elapsed
        } else {
            0.0
        };

        indoc::formatdoc!(
            r#"
            Drag bench completed.
            Windows: {windows} | Gestures: {gestures} | Steps: {steps} | Render: {render}
            Duration: {elapsed:.3}s | Events: {events} (~{eps:.0}/s)
            Drags started: {promotions} | Skipped: {skipped}
            Avg move: {avg:.2} us | Worst: {worst:.2} us
            Cells painted: {cells}
            "#,
            windows = config.windows,
            gestures = config.gestures,
            steps = config.steps,
            render = config.render,
            elapsed = elapsed,
            events = self.events,
            eps = events_per_sec,
            promotions = self.promotions,
            skipped = self.skipped,
            avg = self.average_move_us(),
            worst = self.slowest_move.as_secs_f64() * 1_000_000.0,
            cells = self.cells,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_gesture_promotes_even_when_windows_overlap() {
        // 64 windows on a 48-slot grid: the last 16 sit on top of the first.
        let config = BenchConfig {
            windows: 64,
            gestures: 80,
            steps: 3,
            render: false,
        };
        let stats = run_benchmark(&config);
        assert_eq!(stats.skipped, 0);
        assert_eq!(stats.promotions, 80);
        assert_eq!(stats.moves, 80 * 3);
    }

    #[test]
    fn cli_limits_are_checked() {
        let cli = BenchCli::parse_from(["pad-bench", "--windows", "0"]);
        assert!(BenchConfig::try_from(&cli).is_err());
        let cli = BenchCli::parse_from(["pad-bench"]);
        assert!(BenchConfig::try_from(&cli).is_ok());
    }
}
