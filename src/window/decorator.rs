use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Color, Modifier, Style};

use super::WindowView;
use crate::constants::HEADER_ROWS;
use crate::geometry::Bounds;

pub trait WindowDecorator: std::fmt::Debug {
    /// Paint `view` at `frame` (viewport coordinates, may hang off-screen),
    /// touching only cells inside `clip`.
    fn render_window(
        &self,
        buffer: &mut Buffer,
        frame: Bounds,
        clip: Rect,
        view: &WindowView,
        topmost: bool,
    );
}

#[derive(Debug, Default, Clone, Copy)]
pub struct OpenStepDecorator;

fn put(buffer: &mut Buffer, clip: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    let (Ok(cx), Ok(cy)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if !clip.contains((cx, cy).into()) {
        return;
    }
    if let Some(cell) = buffer.cell_mut((cx, cy)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}

impl WindowDecorator for OpenStepDecorator {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        frame: Bounds,
        clip: Rect,
        view: &WindowView,
        topmost: bool,
    ) {
        if frame.width() < 2 || frame.height() < 2 {
            return;
        }
        let Some(clip) = frame.visible_in(clip.intersection(buffer.area)) else {
            return;
        };

        let active_header_style = Style::default()
            .bg(Color::Blue)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);
        let normal_header_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        let border_style = if view.is_dragging {
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let body_style = Style::default();
        let header_style = if topmost {
            active_header_style
        } else {
            normal_header_style
        };

        let left = frame.left;
        let top = frame.top;
        let right = frame.right - 1;
        let bottom = frame.bottom - 1;
        let header_y = top + 1;

        // Windows are opaque: wipe what lies beneath first.
        for y in top + 1..bottom {
            for x in left + 1..right {
                let style = if y == header_y { header_style } else { body_style };
                put(buffer, clip, x, y, " ", style);
            }
        }

        if header_y < bottom {
            let inner = (right - left - 1).max(0) as usize;
            let title: String = view.title.chars().take(inner).collect();
            let len = title.chars().count() as i32;
            let start = left + 1 + (inner as i32 - len) / 2;
            for (idx, ch) in title.chars().enumerate() {
                put(buffer, clip, start + idx as i32, header_y, &ch.to_string(), header_style);
            }
        }

        let content_top = top + i32::from(HEADER_ROWS);
        let content_width = (right - left - 2).max(0) as usize;
        for (row, line) in view.content.lines().enumerate() {
            let y = content_top + row as i32;
            if y >= bottom {
                break;
            }
            for (idx, ch) in line.chars().take(content_width).enumerate() {
                put(buffer, clip, left + 2 + idx as i32, y, &ch.to_string(), body_style);
            }
        }

        for x in left..=right {
            let (top_symbol, bottom_symbol) = if x == left {
                ("┌", "└")
            } else if x == right {
                ("┐", "┘")
            } else {
                ("─", "─")
            };
            put(buffer, clip, x, top, top_symbol, border_style);
            put(buffer, clip, x, bottom, bottom_symbol, border_style);
        }
        for y in top + 1..bottom {
            put(buffer, clip, left, y, "│", border_style);
            put(buffer, clip, right, y, "│", border_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Size};
    use crate::window::WindowId;

    fn view(dragging: bool) -> WindowView {
        WindowView {
            id: WindowId::from_raw(1),
            title: "Hi".to_string(),
            content: "body".to_string(),
            position: Point::ORIGIN,
            size: Size::new(10, 5),
            z_index: 0,
            is_dragging: dragging,
        }
    }

    #[test]
    fn draws_border_title_and_content() {
        let area = Rect::new(0, 0, 12, 6);
        let mut buf = Buffer::empty(area);
        let frame = Bounds::new(1, 0, 11, 5);
        OpenStepDecorator.render_window(&mut buf, frame, area, &view(false), true);
        assert_eq!(buf[(1, 0)].symbol(), "┌");
        assert_eq!(buf[(10, 4)].symbol(), "┘");
        assert_eq!(buf[(5, 1)].symbol(), "H");
        assert_eq!(buf[(5, 1)].bg, Color::Blue);
        assert_eq!(buf[(3, 2)].symbol(), "b");
    }

    #[test]
    fn clips_negative_and_outside_cells() {
        let area = Rect::new(0, 0, 6, 4);
        let mut buf = Buffer::empty(area);
        let frame = Bounds::new(-3, -1, 7, 4);
        OpenStepDecorator.render_window(&mut buf, frame, area, &view(false), false);
        assert_eq!(buf[(0, 0)].bg, Color::DarkGray);
        assert_eq!(buf[(0, 1)].symbol(), "o");
        assert_eq!(buf[(0, 3)].symbol(), "─");
    }

    #[test]
    fn dragging_outline_is_blue() {
        let area = Rect::new(0, 0, 12, 6);
        let mut buf = Buffer::empty(area);
        OpenStepDecorator.render_window(
            &mut buf,
            Bounds::new(0, 0, 10, 5),
            area,
            &view(true),
            true,
        );
        assert_eq!(buf[(0, 0)].fg, Color::Blue);
    }
}
