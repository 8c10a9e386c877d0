//! The window registry: the authoritative map from window id to window
//! record, plus z-order and focus arbitration.
//!
//! Every operation is synchronous and commits atomically. Operations on
//! unknown ids are silent no-ops. Mutations the rest of the desktop observes
//! (open/close/focus/minimize/maximize/restore) are reported as
//! [`WindowEvent`] values returned to the caller; the registry itself never
//! talks to the dock or the event log.

use std::collections::BTreeMap;

use crate::geometry::{Layout, Point, Size, Viewport, default_open_rect, snap_rect};

/// One open window instance.
///
/// `id` is unique for the lifetime of the window and distinct from `app_id`,
/// so one application may own several windows at once.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    pub id: String,
    pub app_id: String,
    pub title: String,
    pub position: Point,
    pub size: Size,
    pub is_minimized: bool,
    pub is_maximized: bool,
    pub z_index: u64,
    pub layout: Layout,
}

/// Request payload for [`WindowRegistry::open`]. Position and size fall back
/// to the centered default when omitted.
#[derive(Debug, Clone)]
pub struct OpenWindow {
    pub id: String,
    pub app_id: String,
    pub title: String,
    pub position: Option<Point>,
    pub size: Option<Size>,
}

impl OpenWindow {
    pub fn new(
        id: impl Into<String>,
        app_id: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            app_id: app_id.into(),
            title: title.into(),
            position: None,
            size: None,
        }
    }

    pub fn at(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn sized(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }
}

/// A state transition the rest of the desktop may observe.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    Opened {
        id: String,
        app_id: String,
        title: String,
    },
    Closed {
        id: String,
        app_id: String,
    },
    Focused {
        id: String,
    },
    Minimized {
        id: String,
    },
    Maximized {
        id: String,
        maximized: bool,
    },
    Restored {
        id: String,
    },
}

#[derive(Debug)]
pub struct WindowRegistry {
    windows: BTreeMap<String, WindowRecord>,
    focused_window_id: Option<String>,
    next_z_index: u64,
}

impl Default for WindowRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self {
            windows: BTreeMap::new(),
            focused_window_id: None,
            next_z_index: 1,
        }
    }

    pub fn get(&self, id: &str) -> Option<&WindowRecord> {
        self.windows.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.windows.contains_key(id)
    }

    pub fn windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.values()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn focused_window_id(&self) -> Option<&str> {
        self.focused_window_id.as_deref()
    }

    /// Next z-index the allocator will hand out. Monotonic; never reset
    /// while the desktop session lives.
    pub fn next_z_index(&self) -> u64 {
        self.next_z_index
    }

    /// Number of windows currently owned by the given application.
    pub fn open_window_count(&self, app_id: &str) -> usize {
        self.windows
            .values()
            .filter(|window| window.app_id == app_id)
            .count()
    }

    /// The visible window stack in paint order: minimized windows are
    /// excluded, and later entries draw on top.
    pub fn stacking_order(&self) -> Vec<&WindowRecord> {
        let mut stack: Vec<&WindowRecord> = self
            .windows
            .values()
            .filter(|window| !window.is_minimized)
            .collect();
        stack.sort_by_key(|window| window.z_index);
        stack
    }

    /// Insert a new window, focused and stamped with a fresh top z-index.
    ///
    /// Callers own id uniqueness; a colliding id silently replaces the
    /// existing record.
    pub fn open(&mut self, request: OpenWindow, viewport: Viewport) -> WindowEvent {
        let OpenWindow {
            id,
            app_id,
            title,
            position,
            size,
        } = request;
        let (default_position, default_size) = default_open_rect(viewport);
        let record = WindowRecord {
            id: id.clone(),
            app_id: app_id.clone(),
            title: title.clone(),
            position: position.unwrap_or(default_position),
            size: size.unwrap_or(default_size),
            is_minimized: false,
            is_maximized: false,
            z_index: self.next_z_index,
            layout: Layout::Floating,
        };
        self.next_z_index += 1;
        tracing::debug!(window_id = %id, app_id = %app_id, z_index = record.z_index, "opened window");
        self.windows.insert(id.clone(), record);
        self.focused_window_id = Some(id.clone());
        WindowEvent::Opened { id, app_id, title }
    }

    /// Remove a window. When the focused window closes, focus falls to the
    /// remaining non-minimized window with the highest z-index, or to none.
    pub fn close(&mut self, id: &str) -> Option<WindowEvent> {
        let record = self.windows.remove(id)?;
        tracing::debug!(window_id = %id, "closing window");
        if self.focused_window_id.as_deref() == Some(id) {
            self.refocus_top_visible();
        }
        Some(WindowEvent::Closed {
            id: record.id,
            app_id: record.app_id,
        })
    }

    /// Bring a window to the front and focus it. Focusing stamps a fresh
    /// top z-index and leaves every other window's order untouched; the
    /// already-focused window is a no-op.
    pub fn focus(&mut self, id: &str) -> Option<WindowEvent> {
        if self.focused_window_id.as_deref() == Some(id) {
            return None;
        }
        let record = self.windows.get_mut(id)?;
        record.z_index = self.next_z_index;
        self.next_z_index += 1;
        self.focused_window_id = Some(record.id.clone());
        Some(WindowEvent::Focused { id: id.to_string() })
    }

    /// Overwrite a window's position. Manual placement cancels any named
    /// layout tag.
    pub fn move_to(&mut self, id: &str, position: Point) {
        let Some(record) = self.windows.get_mut(id) else {
            return;
        };
        record.position = position;
        if record.layout != Layout::Floating {
            record.layout = Layout::Floating;
        }
    }

    /// Overwrite a window's size. Manual sizing cancels any named layout tag.
    pub fn resize_to(&mut self, id: &str, size: Size) {
        let Some(record) = self.windows.get_mut(id) else {
            return;
        };
        record.size = size;
        if record.layout != Layout::Floating {
            record.layout = Layout::Floating;
        }
    }

    /// Hide a window from the visible stack. A minimized window keeps its
    /// z-index but can never hold focus; focus falls to the highest
    /// remaining visible window.
    pub fn minimize(&mut self, id: &str) -> Option<WindowEvent> {
        let record = self.windows.get_mut(id)?;
        if record.is_minimized {
            return None;
        }
        record.is_minimized = true;
        tracing::debug!(window_id = %id, "minimized window");
        if self.focused_window_id.as_deref() == Some(id) {
            self.refocus_top_visible();
        }
        Some(WindowEvent::Minimized { id: id.to_string() })
    }

    /// Toggle the maximized state. The second invocation returns the window
    /// to floating, not to any earlier snap tag. Position and size are left
    /// untouched; rendering derives the maximized frame from the layout tag.
    pub fn maximize(&mut self, id: &str) -> Option<WindowEvent> {
        let record = self.windows.get_mut(id)?;
        record.is_maximized = !record.is_maximized;
        record.layout = if record.is_maximized {
            Layout::Maximized
        } else {
            Layout::Floating
        };
        tracing::debug!(window_id = %id, maximized = record.is_maximized, "toggled maximize");
        Some(WindowEvent::Maximized {
            id: id.to_string(),
            maximized: record.is_maximized,
        })
    }

    /// Unconditionally return a window to a plain floating state, focused
    /// and freshly stamped on top.
    pub fn restore(&mut self, id: &str) -> Option<WindowEvent> {
        let record = self.windows.get_mut(id)?;
        record.is_minimized = false;
        record.is_maximized = false;
        record.layout = Layout::Floating;
        record.z_index = self.next_z_index;
        self.next_z_index += 1;
        self.focused_window_id = Some(record.id.clone());
        tracing::debug!(window_id = %id, "restored window");
        Some(WindowEvent::Restored { id: id.to_string() })
    }

    /// Apply a named snap layout: un-minimize, un-maximize, adopt the
    /// resolved frame for the viewport sampled now, tag the layout, and
    /// focus on top. Non-snap tags are rejected; `maximize` and `restore`
    /// own those transitions.
    pub fn snap(&mut self, id: &str, layout: Layout, viewport: Viewport) {
        if !layout.is_snap() {
            return;
        }
        let Some((position, size)) = snap_rect(layout, viewport) else {
            return;
        };
        let Some(record) = self.windows.get_mut(id) else {
            return;
        };
        record.is_minimized = false;
        record.is_maximized = false;
        record.position = position;
        record.size = size;
        record.layout = layout;
        record.z_index = self.next_z_index;
        self.next_z_index += 1;
        self.focused_window_id = Some(record.id.clone());
        tracing::debug!(window_id = %id, layout = %layout, "snapped window");
    }

    fn refocus_top_visible(&mut self) {
        self.focused_window_id = self
            .windows
            .values()
            .filter(|window| !window.is_minimized)
            .max_by_key(|window| window.z_index)
            .map(|window| window.id.clone());
    }
}
