//! The desktop facade: one state container owning the window registry, the
//! dock tracker, and the event log.
//!
//! The facade is the notification channel between the three: registry and
//! dock mutations return typed events, and the facade fans each one out to
//! the log (one entry per observed transition, in mutation order) and to the
//! dock's reactive bookkeeping. The flow is strictly one-way; nothing ever
//! reads the log to decide a mutation.

use uuid::Uuid;

use crate::dock::{DockApp, DockEvent, DockTracker};
use crate::event_log::EventLog;
use crate::geometry::{Layout, Point, Size, Viewport};
use crate::registry::{OpenWindow, WindowEvent, WindowRegistry};

#[derive(Debug, Default)]
pub struct Desktop {
    registry: WindowRegistry,
    dock: DockTracker,
    log: EventLog,
}

impl Desktop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn dock(&self) -> &DockTracker {
        &self.dock
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    // Window commands

    pub fn open_window(&mut self, request: OpenWindow, viewport: Viewport) {
        let event = self.registry.open(request, viewport);
        self.apply_window_event(event);
    }

    /// Launch a new window of a registered app with default placement. The
    /// window id gets a random suffix so one app can run several instances;
    /// callers that manage their own ids use [`Desktop::open_window`].
    pub fn open_app(&mut self, app_id: &str, viewport: Viewport) -> Option<String> {
        let app = self.dock.app(app_id)?.clone();
        let window_id = format!("{}-{}", app.id, Uuid::new_v4());
        self.open_window(OpenWindow::new(&window_id, &app.id, &app.name), viewport);
        Some(window_id)
    }

    pub fn close_window(&mut self, id: &str) {
        if let Some(event) = self.registry.close(id) {
            self.apply_window_event(event);
        }
    }

    pub fn focus_window(&mut self, id: &str) {
        if let Some(event) = self.registry.focus(id) {
            self.apply_window_event(event);
        }
    }

    pub fn move_window(&mut self, id: &str, position: Point) {
        self.registry.move_to(id, position);
    }

    pub fn resize_window(&mut self, id: &str, size: Size) {
        self.registry.resize_to(id, size);
    }

    pub fn minimize_window(&mut self, id: &str) {
        if let Some(event) = self.registry.minimize(id) {
            self.apply_window_event(event);
        }
    }

    pub fn maximize_window(&mut self, id: &str) {
        if let Some(event) = self.registry.maximize(id) {
            self.apply_window_event(event);
        }
    }

    pub fn restore_window(&mut self, id: &str) {
        if let Some(event) = self.registry.restore(id) {
            self.apply_window_event(event);
        }
    }

    pub fn snap_window(&mut self, id: &str, layout: Layout, viewport: Viewport) {
        self.registry.snap(id, layout, viewport);
    }

    pub fn snap_left(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapLeft, viewport);
    }

    pub fn snap_right(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapRight, viewport);
    }

    pub fn snap_top(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapTop, viewport);
    }

    pub fn snap_bottom(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapBottom, viewport);
    }

    pub fn snap_top_left(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapTopLeft, viewport);
    }

    pub fn snap_top_right(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapTopRight, viewport);
    }

    pub fn snap_bottom_left(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapBottomLeft, viewport);
    }

    pub fn snap_bottom_right(&mut self, id: &str, viewport: Viewport) {
        self.snap_window(id, Layout::SnapBottomRight, viewport);
    }

    // Dock commands

    pub fn register_app(&mut self, app: DockApp) {
        self.dock.register_app(app);
    }

    pub fn unregister_app(&mut self, app_id: &str) {
        self.dock.unregister_app(app_id);
    }

    pub fn mark_app_open(&mut self, app_id: &str) {
        if let Some(event) = self.dock.mark_open(app_id) {
            self.apply_dock_event(event);
        }
    }

    pub fn mark_app_closed(&mut self, app_id: &str) {
        if let Some(event) = self.dock.mark_closed(app_id) {
            self.apply_dock_event(event);
        }
    }

    // Log commands

    pub fn toggle_log(&mut self) {
        self.log.toggle_visibility();
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn apply_window_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Opened { id, app_id, title } => {
                self.dock.note_window_opened(&app_id);
                self.log.push(
                    format!("Window opened: {title}"),
                    Some(format!("window_id={id} app_id={app_id}")),
                );
            }
            WindowEvent::Closed { id, app_id } => {
                let remaining = self.registry.open_window_count(&app_id);
                self.dock.note_window_closed(&app_id, remaining);
                self.log.push(
                    format!("Window closed: {id}"),
                    Some(format!("app_id={app_id}")),
                );
            }
            WindowEvent::Focused { id } => {
                self.log
                    .push(format!("Window focused: {id}"), Some(format!("window_id={id}")));
            }
            WindowEvent::Minimized { id } => {
                self.log
                    .push(format!("Window minimized: {id}"), Some(format!("window_id={id}")));
            }
            WindowEvent::Maximized { id, maximized } => {
                self.log.push(
                    format!("Window maximized: {id}"),
                    Some(format!("maximized={maximized}")),
                );
            }
            WindowEvent::Restored { id } => {
                self.log
                    .push(format!("Window restored: {id}"), Some(format!("window_id={id}")));
            }
        }
    }

    fn apply_dock_event(&mut self, event: DockEvent) {
        match event {
            DockEvent::AppOpened { app_id } => {
                self.log
                    .push(format!("App opened: {app_id}"), Some(format!("app_id={app_id}")));
            }
            DockEvent::AppClosed { app_id } => {
                self.log
                    .push(format!("App closed: {app_id}"), Some(format!("app_id={app_id}")));
            }
        }
    }
}
