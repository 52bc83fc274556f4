//! Page layout and drawing for the terminal front end.
//!
//! Layout runs before every frame: it flows the scene's blocks down the
//! screen, hands each boundary its current rectangle (so drags clamp to what
//! is actually on screen) and records where buttons landed for hit testing.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block as BorderBlock, BorderType, Clear, Paragraph};

use crate::debug_log::DebugLogHandle;
use crate::geometry::Bounds;
use crate::notify::PopupStack;
use crate::scene::{Action, Block, MountedScene};
use crate::ui::{UiFrame, safe_set_string};
use crate::window::decorator::{OpenStepDecorator, WindowDecorator};

const POPUP_MAX_WIDTH: u16 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonHit {
    pub area: Rect,
    pub action: Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryArea {
    /// Index into the scene's blocks.
    pub block: usize,
    /// Outer rectangle, border included.
    pub outer: Rect,
    /// Where windows live.
    pub inner: Rect,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLayout {
    pub page: Rect,
    /// Top row of each block, in block order.
    pub rows: Vec<u16>,
    pub buttons: Vec<ButtonHit>,
    pub boundaries: Vec<BoundaryArea>,
    pub log: Option<Rect>,
}

impl PageLayout {
    pub fn button_at(&self, column: u16, row: u16) -> Option<&Action> {
        self.buttons
            .iter()
            .find(|b| b.area.contains((column, row).into()))
            .map(|b| &b.action)
    }
}

fn button_label(label: &str) -> String {
    format!("[ {label} ]")
}

/// Flow the scene into `area` and push the resulting rectangles into the
/// mounted boundaries.
pub fn layout_page(scene: &mut MountedScene, area: Rect, show_log: bool) -> PageLayout {
    let (page, log) = if show_log && area.height >= 6 {
        let [page, log] =
            Layout::vertical([Constraint::Min(3), Constraint::Percentage(30)]).areas(area);
        (page, Some(log))
    } else {
        (area, None)
    };
    let content = Rect {
        x: page.x.saturating_add(1),
        width: page.width.saturating_sub(2),
        ..page
    };

    let mut layout = PageLayout {
        page,
        log,
        ..PageLayout::default()
    };
    let bottom = content.y.saturating_add(content.height);
    let mut y = content.y;
    for (index, block) in scene.blocks.iter_mut().enumerate() {
        let remaining = bottom.saturating_sub(y);
        layout.rows.push(y);
        match block {
            Block::Heading(_) => y = y.saturating_add(2),
            Block::Paragraph(text) => {
                y = y.saturating_add(text.lines().count() as u16 + 1);
            }
            Block::Button { label, action } => {
                let width = (button_label(label).chars().count() as u16).min(content.width);
                if remaining > 0 {
                    layout.buttons.push(ButtonHit {
                        area: Rect::new(content.x, y, width, 1),
                        action: action.clone(),
                    });
                }
                y = y.saturating_add(2);
            }
            Block::Boundary(mounted) => {
                let (width, height) = match mounted.size {
                    Some(size) => (
                        size.width.saturating_add(2).min(content.width),
                        size.height.saturating_add(2),
                    ),
                    None => (content.width, remaining),
                };
                let outer = Rect::new(content.x, y, width, height);
                let inner = BorderBlock::bordered().inner(outer);
                mounted.boundary.set_bounds(Some(Bounds::from(inner)));
                layout.boundaries.push(BoundaryArea {
                    block: index,
                    outer,
                    inner,
                });
                y = y.saturating_add(height);
            }
        }
    }
    layout
}

pub fn render_page(
    frame: &mut UiFrame<'_>,
    scene: &MountedScene,
    layout: &PageLayout,
    log: Option<&DebugLogHandle>,
) {
    let content = Rect {
        x: layout.page.x.saturating_add(1),
        width: layout.page.width.saturating_sub(2),
        ..layout.page
    };
    let bottom = content.y.saturating_add(content.height);
    let mut boundaries = layout.boundaries.iter();
    for (block, &row) in scene.blocks.iter().zip(&layout.rows) {
        match block {
            Block::Heading(text) => {
                let style = Style::default().add_modifier(Modifier::BOLD);
                safe_set_string(frame.buffer_mut(), content, content.x, row, text, style);
            }
            Block::Paragraph(text) => {
                for (y, line) in (row..bottom).zip(text.lines()) {
                    safe_set_string(frame.buffer_mut(), content, content.x, y, line, Style::default());
                }
            }
            Block::Button { label, .. } => {
                let style = Style::default().fg(Color::Black).bg(Color::Gray);
                let label = button_label(label);
                safe_set_string(frame.buffer_mut(), content, content.x, row, &label, style);
            }
            Block::Boundary(mounted) => {
                let Some(area) = boundaries.next() else {
                    continue;
                };
                let border = BorderBlock::bordered().border_type(BorderType::Thick);
                frame.render_widget(border, area.outer);
                let origin = mounted.boundary.origin();
                let views = mounted.boundary.views();
                let top = views.len().saturating_sub(1);
                let clip = area.inner.intersection(frame.area());
                for (idx, view) in views.iter().enumerate() {
                    OpenStepDecorator.render_window(
                        frame.buffer_mut(),
                        view.frame(origin),
                        clip,
                        view,
                        idx == top,
                    );
                }
            }
        }
    }

    if let Some(stack) = &scene.popups {
        render_popups(frame, stack, layout.page);
    }
    if let (Some(area), Some(handle)) = (layout.log, log) {
        render_log(frame, handle, area);
    }
}

/// Stack popups in the top-right corner, newest at the bottom.
fn render_popups(frame: &mut UiFrame<'_>, stack: &PopupStack, page: Rect) {
    let mut y = page.y.saturating_add(1);
    for popup in stack.popups() {
        let width = (popup.message.chars().count() as u16)
            .saturating_add(4)
            .min(POPUP_MAX_WIDTH)
            .min(page.width);
        let x = page.x.saturating_add(page.width.saturating_sub(width + 1));
        let area = Rect::new(x, y, width, 3);
        let style = if popup.is_exiting() {
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
        } else {
            Style::default().fg(Color::White).bg(Color::Black)
        };
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(popup.message.as_str())
                .style(style)
                .block(BorderBlock::bordered().border_style(style)),
            area,
        );
        y = y.saturating_add(3);
    }
}

fn render_log(frame: &mut UiFrame<'_>, handle: &DebugLogHandle, area: Rect) {
    let rows = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = handle.tail(rows).into_iter().map(Line::from).collect();
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(lines).block(BorderBlock::bordered().title(" debug log ")),
        area,
    );
}
