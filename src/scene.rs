//! Declarative page content and its mounted form.
//!
//! A [`Scene`] is a flat list of [`Node`]s. Mounting turns every boundary
//! node into a live [`Boundary`] and checks placement on the way: windows and
//! pads only exist inside a boundary, and a boundary holds nothing else.

use std::time::Instant;

use crate::boundary::{Boundary, Haptics, NoHaptics};
use crate::error::{NotifyError, SceneError};
use crate::geometry::{Point, Size};
use crate::notify::{PopupConfig, PopupId, PopupStack};
use crate::pad::{PadSlot, PadSpec};
use crate::session::SessionConfig;
use crate::window::WindowSpec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowPopup(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading(String),
    Paragraph(String),
    Button { label: String, action: Action },
    /// `size: None` fills the rest of the page.
    Boundary { size: Option<Size>, children: Vec<Node> },
    Window(WindowSpec),
    Pad(PadSpec),
}

impl Node {
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Heading(_) => "heading",
            Node::Paragraph(_) => "paragraph",
            Node::Button { .. } => "button",
            Node::Boundary { .. } => "boundary",
            Node::Window(_) => "window",
            Node::Pad(_) => "pad",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    /// Whether the page provides the popup stack.
    pub popups: bool,
    pub nodes: Vec<Node>,
}

impl Scene {
    /// The demo page.
    pub fn home() -> Self {
        Self {
            popups: true,
            nodes: vec![
                Node::Heading("Hello, terminal!".to_string()),
                Node::Paragraph(
                    "Hold a window title for a moment, then drag it around the box.".to_string(),
                ),
                Node::Button {
                    label: "Show Popup".to_string(),
                    action: Action::ShowPopup("This is a popup message!".to_string()),
                },
                Node::Boundary {
                    size: None,
                    children: vec![
                        Node::Window(WindowSpec::new("Hello World").with_size(28, 8).at(36, 3)),
                        Node::Pad(PadSpec::new("I am on a Pad").with_size(30, 8).at(2, 1)),
                    ],
                },
            ],
        }
    }

    pub fn mount(&self, config: SessionConfig) -> Result<MountedScene, SceneError> {
        self.mount_with(config, || Box::new(NoHaptics))
    }

    /// Mount with a haptics sink per boundary.
    pub fn mount_with<F>(
        &self,
        config: SessionConfig,
        mut make_haptics: F,
    ) -> Result<MountedScene, SceneError>
    where
        F: FnMut() -> Box<dyn Haptics>,
    {
        let mut blocks = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let block = match node {
                Node::Heading(text) => Block::Heading(text.clone()),
                Node::Paragraph(text) => Block::Paragraph(text.clone()),
                Node::Button { label, action } => Block::Button {
                    label: label.clone(),
                    action: action.clone(),
                },
                Node::Boundary { size, children } => Block::Boundary(mount_boundary(
                    *size,
                    children,
                    Boundary::new(config).with_haptics(make_haptics()),
                )?),
                Node::Window(_) | Node::Pad(_) => {
                    return Err(SceneError::WindowOutsideBoundary(node.kind()));
                }
            };
            blocks.push(block);
        }
        tracing::debug!(blocks = blocks.len(), popups = self.popups, "scene mounted");
        Ok(MountedScene {
            blocks,
            popups: self.popups.then(|| PopupStack::new(PopupConfig::default())),
        })
    }
}

fn mount_boundary(
    size: Option<Size>,
    children: &[Node],
    mut boundary: Boundary,
) -> Result<MountedBoundary, SceneError> {
    let mut pads = Vec::new();
    let mut flow = 0i32;
    for child in children {
        match child {
            Node::Window(spec) => {
                boundary.mount(spec.clone());
            }
            Node::Pad(spec) => {
                let slot = spec.mount(&mut boundary, Point::new(0, flow));
                flow = slot.slot.bottom;
                pads.push(slot);
            }
            other => return Err(SceneError::UnsupportedBoundaryChild(other.kind())),
        }
    }
    Ok(MountedBoundary {
        boundary,
        size,
        pads,
    })
}

#[derive(Debug)]
pub struct MountedBoundary {
    pub boundary: Boundary,
    pub size: Option<Size>,
    pub pads: Vec<PadSlot>,
}

impl MountedBoundary {
    /// Rows reserved by pad slots.
    pub fn flow_height(&self) -> i32 {
        self.pads.last().map(|p| p.slot.bottom).unwrap_or(0)
    }
}

#[derive(Debug)]
pub enum Block {
    Heading(String),
    Paragraph(String),
    Button { label: String, action: Action },
    Boundary(MountedBoundary),
}

#[derive(Debug)]
pub struct MountedScene {
    pub blocks: Vec<Block>,
    pub popups: Option<PopupStack>,
}

impl MountedScene {
    pub fn show_popup(
        &mut self,
        message: impl Into<String>,
        now: Instant,
    ) -> Result<PopupId, NotifyError> {
        let stack = self.popups.as_mut().ok_or(NotifyError::NoProvider)?;
        Ok(stack.show(message, now))
    }

    pub fn perform(&mut self, action: &Action, now: Instant) -> Result<(), NotifyError> {
        match action {
            Action::ShowPopup(message) => self.show_popup(message.clone(), now).map(|_| ()),
        }
    }

    /// Drive every boundary and the popup stack to `now`. Returns whether
    /// anything visible changed.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for boundary in self.boundaries_mut() {
            changed |= boundary.boundary.advance(now) > 0;
        }
        if let Some(stack) = &mut self.popups {
            changed |= stack.advance(now);
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        let timers = self.boundaries().filter_map(|b| b.boundary.next_deadline());
        let popups = self.popups.as_ref().and_then(PopupStack::next_deadline);
        timers.chain(popups).min()
    }

    pub fn boundaries(&self) -> impl Iterator<Item = &MountedBoundary> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Boundary(b) => Some(b),
            _ => None,
        })
    }

    pub fn boundaries_mut(&mut self) -> impl Iterator<Item = &mut MountedBoundary> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Boundary(b) => Some(b),
            _ => None,
        })
    }
}
