//! Pointer interaction: hit testing over the window stack and the gesture
//! state machine that turns pointer streams into registry commands.
//!
//! A gesture is a sequence of independent, individually-committed mutations;
//! releasing the pointer simply stops issuing them. There is no rollback —
//! a drag abandoned mid-flight leaves the window at its last position.

use crate::constants::{
    MENU_BAR_HEIGHT, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, RESIZE_CORNER_SIZE,
    RESIZE_EDGE_THICKNESS, SNAP_BUTTON_SIZE, TITLE_BAR_HEIGHT, TITLE_BAR_PADDING,
    WINDOW_CONTROL_GAP, WINDOW_CONTROL_INSET, WINDOW_CONTROL_SIZE,
};
use crate::desktop::Desktop;
use crate::geometry::{Layout, Point, Size, Viewport, maximized_rect};
use crate::registry::{WindowRecord, WindowRegistry};

/// Which edge or corner a resize gesture grabs. Combinations of the four
/// cardinal components drive the per-axis resize rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl ResizeDirection {
    pub fn north(self) -> bool {
        matches!(self, Self::North | Self::NorthEast | Self::NorthWest)
    }

    pub fn south(self) -> bool {
        matches!(self, Self::South | Self::SouthEast | Self::SouthWest)
    }

    pub fn east(self) -> bool {
        matches!(self, Self::East | Self::NorthEast | Self::SouthEast)
    }

    pub fn west(self) -> bool {
        matches!(self, Self::West | Self::NorthWest | Self::SouthWest)
    }
}

/// What a pointer position lands on inside a window's title bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleBarHit {
    Drag,
    Close,
    Minimize,
    MaximizeRestore,
    Snap(Layout),
}

/// What a pointer position lands on inside a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    TitleBar(TitleBarHit),
    Resize(ResizeDirection),
    Content,
}

/// The active pointer gesture. Exactly one gesture runs at a time and every
/// pointer release returns to `Idle` unconditionally.
#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Idle,
    Dragging {
        id: String,
        /// Pointer offset from the window origin captured at pointer-down.
        offset: Point,
    },
    Resizing {
        id: String,
        direction: ResizeDirection,
        start_pointer: Point,
        start_position: Point,
        start_size: Size,
    },
}

#[derive(Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl Default for Gesture {
    fn default() -> Self {
        Gesture::Idle
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_active(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Start a title-bar drag. Maximized windows cannot be dragged.
    pub fn begin_drag(&mut self, registry: &WindowRegistry, id: &str, pointer: Point) -> bool {
        let Some(record) = registry.get(id) else {
            return false;
        };
        if record.is_maximized {
            return false;
        }
        self.gesture = Gesture::Dragging {
            id: id.to_string(),
            offset: Point::new(pointer.x - record.position.x, pointer.y - record.position.y),
        };
        true
    }

    /// Start an edge/corner resize. Maximized windows cannot be resized.
    pub fn begin_resize(
        &mut self,
        registry: &WindowRegistry,
        id: &str,
        direction: ResizeDirection,
        pointer: Point,
    ) -> bool {
        let Some(record) = registry.get(id) else {
            return false;
        };
        if record.is_maximized {
            return false;
        }
        self.gesture = Gesture::Resizing {
            id: id.to_string(),
            direction,
            start_pointer: pointer,
            start_position: record.position,
            start_size: record.size,
        };
        true
    }

    /// Feed a pointer move into the active gesture. Each call commits its
    /// mutation immediately; there is no transactional boundary.
    pub fn pointer_moved(
        &mut self,
        desktop: &mut Desktop,
        pointer: Point,
        viewport: Viewport,
    ) -> bool {
        match &self.gesture {
            Gesture::Idle => false,
            Gesture::Dragging { id, offset } => {
                let id = id.clone();
                let position = drag_position(pointer, *offset);
                desktop.move_window(&id, position);
                true
            }
            Gesture::Resizing {
                id,
                direction,
                start_pointer,
                start_position,
                start_size,
            } => {
                let id = id.clone();
                let direction = *direction;
                let (position, size) = apply_resize(
                    direction,
                    *start_pointer,
                    *start_position,
                    *start_size,
                    pointer,
                    viewport,
                );
                desktop.resize_window(&id, size);
                if direction.north() || direction.west() {
                    desktop.move_window(&id, position);
                }
                true
            }
        }
    }

    /// Pointer released: the gesture ends where it is.
    pub fn pointer_released(&mut self) -> bool {
        let was_active = self.is_active();
        self.gesture = Gesture::Idle;
        was_active
    }
}

/// New window origin for a drag: pointer minus the captured offset, kept
/// on-screen to the left and below the menu bar.
pub fn drag_position(pointer: Point, offset: Point) -> Point {
    Point::new(
        (pointer.x - offset.x).max(0.0),
        (pointer.y - offset.y).max(MENU_BAR_HEIGHT),
    )
}

/// Direction-specific resize rules against the gesture's start geometry.
///
/// East/south grow freely above the minimum size. West/north shift the
/// origin along with the size so the opposite edge stays put, clamped so
/// the minimum-size margin stays inside the viewport and the window never
/// rises above the menu bar.
pub fn apply_resize(
    direction: ResizeDirection,
    start_pointer: Point,
    start_position: Point,
    start_size: Size,
    pointer: Point,
    viewport: Viewport,
) -> (Point, Size) {
    let dx = pointer.x - start_pointer.x;
    let dy = pointer.y - start_pointer.y;

    let mut width = start_size.width;
    let mut height = start_size.height;
    let mut x = start_position.x;
    let mut y = start_position.y;

    if direction.east() {
        width = (start_size.width + dx).max(MIN_WINDOW_WIDTH);
    }
    if direction.west() {
        let proposed = (start_size.width - dx).max(MIN_WINDOW_WIDTH);
        if proposed != start_size.width {
            width = proposed;
            x = (start_position.x + dx).min(viewport.width - MIN_WINDOW_WIDTH);
        }
    }
    if direction.south() {
        height = (start_size.height + dy).max(MIN_WINDOW_HEIGHT);
    }
    if direction.north() {
        let proposed = (start_size.height - dy).max(MIN_WINDOW_HEIGHT);
        if proposed != start_size.height {
            height = proposed;
            y = (start_position.y + dy)
                .max(MENU_BAR_HEIGHT)
                .min(viewport.height - MIN_WINDOW_HEIGHT);
        }
    }

    (Point::new(x, y), Size::new(width, height))
}

/// The frame a window occupies on screen: its own geometry, or the full
/// usable viewport when maximized.
pub fn window_frame(record: &WindowRecord, viewport: Viewport) -> (Point, Size) {
    if record.is_maximized {
        maximized_rect(viewport)
    } else {
        (record.position, record.size)
    }
}

/// Hit-test a single window. Resize affordances sit on top of the title
/// bar chrome (they hug the outer border); maximized windows expose no
/// resize affordances.
pub fn hit_test_window(
    record: &WindowRecord,
    viewport: Viewport,
    pointer: Point,
) -> Option<HitTarget> {
    let (origin, size) = window_frame(record, viewport);
    let local = Point::new(pointer.x - origin.x, pointer.y - origin.y);
    if local.x < 0.0 || local.y < 0.0 || local.x >= size.width || local.y >= size.height {
        return None;
    }

    if !record.is_maximized
        && let Some(direction) = resize_direction_at(local, size)
    {
        return Some(HitTarget::Resize(direction));
    }

    if local.y < TITLE_BAR_HEIGHT {
        return Some(HitTarget::TitleBar(title_bar_hit_at(local, size)));
    }

    Some(HitTarget::Content)
}

/// Hit-test the whole desktop. `stack` is the visible stack in paint order
/// (ascending z); the topmost window containing the pointer wins.
pub fn hit_test_desktop<'a>(
    stack: &[&'a WindowRecord],
    viewport: Viewport,
    pointer: Point,
) -> Option<(&'a WindowRecord, HitTarget)> {
    stack
        .iter()
        .rev()
        .find_map(|record| hit_test_window(record, viewport, pointer).map(|hit| (*record, hit)))
}

fn resize_direction_at(local: Point, size: Size) -> Option<ResizeDirection> {
    let near_left = local.x < RESIZE_CORNER_SIZE;
    let near_right = local.x >= size.width - RESIZE_CORNER_SIZE;
    let near_top = local.y < RESIZE_CORNER_SIZE;
    let near_bottom = local.y >= size.height - RESIZE_CORNER_SIZE;

    if near_top && near_left {
        return Some(ResizeDirection::NorthWest);
    }
    if near_top && near_right {
        return Some(ResizeDirection::NorthEast);
    }
    if near_bottom && near_left {
        return Some(ResizeDirection::SouthWest);
    }
    if near_bottom && near_right {
        return Some(ResizeDirection::SouthEast);
    }
    if local.y < RESIZE_EDGE_THICKNESS {
        return Some(ResizeDirection::North);
    }
    if local.y >= size.height - RESIZE_EDGE_THICKNESS {
        return Some(ResizeDirection::South);
    }
    if local.x < RESIZE_EDGE_THICKNESS {
        return Some(ResizeDirection::West);
    }
    if local.x >= size.width - RESIZE_EDGE_THICKNESS {
        return Some(ResizeDirection::East);
    }
    None
}

fn title_bar_hit_at(local: Point, size: Size) -> TitleBarHit {
    // Round window controls at the left end, in close/minimize/maximize order.
    let control_top = (TITLE_BAR_HEIGHT - WINDOW_CONTROL_SIZE) / 2.0;
    if local.y >= control_top && local.y < control_top + WINDOW_CONTROL_SIZE {
        for (slot, hit) in [
            TitleBarHit::Close,
            TitleBarHit::Minimize,
            TitleBarHit::MaximizeRestore,
        ]
        .into_iter()
        .enumerate()
        {
            let left =
                WINDOW_CONTROL_INSET + slot as f64 * (WINDOW_CONTROL_SIZE + WINDOW_CONTROL_GAP);
            if local.x >= left && local.x < left + WINDOW_CONTROL_SIZE {
                return hit;
            }
        }
    }

    // Square snap buttons at the right end, then the maximize/restore button.
    let button_top = (TITLE_BAR_HEIGHT - SNAP_BUTTON_SIZE) / 2.0;
    if local.y >= button_top && local.y < button_top + SNAP_BUTTON_SIZE {
        let buttons = Layout::SNAPS.len() + 1;
        for slot in 0..buttons {
            let left =
                size.width - TITLE_BAR_PADDING - (buttons - slot) as f64 * SNAP_BUTTON_SIZE;
            if local.x >= left && local.x < left + SNAP_BUTTON_SIZE {
                return match Layout::SNAPS.get(slot) {
                    Some(layout) => TitleBarHit::Snap(*layout),
                    None => TitleBarHit::MaximizeRestore,
                };
            }
        }
    }

    TitleBarHit::Drag
}
