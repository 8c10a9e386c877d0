//! Pixel-space geometry for the desktop: points, sizes, the viewport, and
//! the named snap layouts with their resolvers.
//!
//! Everything here is a pure function of an explicit [`Viewport`]; nothing
//! reads ambient screen state. The registry calls into this module at the
//! moment a geometry-affecting command executes, so layouts reflect the
//! viewport as it was at that instant and never re-flow afterwards.

use std::fmt;

use crate::constants::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MENU_BAR_HEIGHT,
};

/// Top-left corner of a window in viewport pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of a window.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// The browser viewport as sampled when a command executes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Height of the area below the menu bar that layouts may occupy.
    pub fn usable_height(self) -> f64 {
        self.height - MENU_BAR_HEIGHT
    }
}

/// Placement tag carried by every window.
///
/// `Floating` means the window owns its geometry; every other tag names a
/// precomputed frame. Manual moves and resizes drop a window back to
/// `Floating` — a window is never both hand-placed and tagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layout {
    Floating,
    Maximized,
    SnapLeft,
    SnapRight,
    SnapTop,
    SnapBottom,
    SnapTopLeft,
    SnapTopRight,
    SnapBottomLeft,
    SnapBottomRight,
}

impl Layout {
    /// The eight snap layouts, in title-bar button order.
    pub const SNAPS: [Layout; 8] = [
        Layout::SnapLeft,
        Layout::SnapRight,
        Layout::SnapTop,
        Layout::SnapBottom,
        Layout::SnapTopLeft,
        Layout::SnapTopRight,
        Layout::SnapBottomLeft,
        Layout::SnapBottomRight,
    ];

    pub fn is_snap(self) -> bool {
        !matches!(self, Layout::Floating | Layout::Maximized)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Floating => "floating",
            Layout::Maximized => "maximized",
            Layout::SnapLeft => "snap-left",
            Layout::SnapRight => "snap-right",
            Layout::SnapTop => "snap-top",
            Layout::SnapBottom => "snap-bottom",
            Layout::SnapTopLeft => "snap-top-left",
            Layout::SnapTopRight => "snap-top-right",
            Layout::SnapBottomLeft => "snap-bottom-left",
            Layout::SnapBottomRight => "snap-bottom-right",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Frame occupied by a maximized window: the full viewport below the menu bar.
pub fn maximized_rect(viewport: Viewport) -> (Point, Size) {
    (
        Point::new(0.0, MENU_BAR_HEIGHT),
        Size::new(viewport.width, viewport.usable_height()),
    )
}

/// Resolve a named layout against the viewport.
///
/// Halves split the usable area vertically or horizontally; quarters combine
/// both splits. Returns `None` for `Floating`, which has no computed frame.
pub fn snap_rect(layout: Layout, viewport: Viewport) -> Option<(Point, Size)> {
    let half_width = viewport.width / 2.0;
    let usable = viewport.usable_height();
    let half_height = usable / 2.0;
    let top = MENU_BAR_HEIGHT;
    let middle = MENU_BAR_HEIGHT + half_height;

    let (position, size) = match layout {
        Layout::Floating => return None,
        Layout::Maximized => return Some(maximized_rect(viewport)),
        Layout::SnapLeft => (Point::new(0.0, top), Size::new(half_width, usable)),
        Layout::SnapRight => (Point::new(half_width, top), Size::new(half_width, usable)),
        Layout::SnapTop => (Point::new(0.0, top), Size::new(viewport.width, half_height)),
        Layout::SnapBottom => (
            Point::new(0.0, middle),
            Size::new(viewport.width, half_height),
        ),
        Layout::SnapTopLeft => (Point::new(0.0, top), Size::new(half_width, half_height)),
        Layout::SnapTopRight => (
            Point::new(half_width, top),
            Size::new(half_width, half_height),
        ),
        Layout::SnapBottomLeft => (
            Point::new(0.0, middle),
            Size::new(half_width, half_height),
        ),
        Layout::SnapBottomRight => (
            Point::new(half_width, middle),
            Size::new(half_width, half_height),
        ),
    };
    Some((position, size))
}

/// Default placement for a window opened without explicit geometry: the
/// standard size centered in the viewport, never above the menu bar and
/// never off the left edge.
pub fn default_open_rect(viewport: Viewport) -> (Point, Size) {
    let position = Point::new(
        ((viewport.width - DEFAULT_WINDOW_WIDTH) / 2.0).max(0.0),
        ((viewport.height - DEFAULT_WINDOW_HEIGHT) / 2.0).max(MENU_BAR_HEIGHT),
    );
    (
        position,
        Size::new(DEFAULT_WINDOW_WIDTH, DEFAULT_WINDOW_HEIGHT),
    )
}
