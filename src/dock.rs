//! The dock: registered application descriptors plus the set of apps
//! currently backed by at least one open window.
//!
//! Membership in `open_app_ids` has two write paths: the direct
//! [`DockTracker::mark_open`]/[`DockTracker::mark_closed`] toggles, and the
//! reactive bookkeeping the desktop facade drives from window lifecycle
//! events. Only the direct toggles produce [`DockEvent`]s.

use std::collections::BTreeSet;

/// A launchable application shown in the dock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockApp {
    pub id: String,
    pub name: String,
    pub icon: String,
}

impl DockApp {
    pub fn new(id: impl Into<String>, name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
        }
    }
}

/// A membership transition on the running-apps set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockEvent {
    AppOpened { app_id: String },
    AppClosed { app_id: String },
}

#[derive(Debug, Default)]
pub struct DockTracker {
    apps: Vec<DockApp>,
    open_app_ids: BTreeSet<String>,
}

impl DockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registered apps in registration order.
    pub fn apps(&self) -> &[DockApp] {
        &self.apps
    }

    pub fn app(&self, app_id: &str) -> Option<&DockApp> {
        self.apps.iter().find(|app| app.id == app_id)
    }

    pub fn is_open(&self, app_id: &str) -> bool {
        self.open_app_ids.contains(app_id)
    }

    pub fn open_app_ids(&self) -> impl Iterator<Item = &str> {
        self.open_app_ids.iter().map(String::as_str)
    }

    /// Add an app to the dock. Duplicate ids are ignored.
    pub fn register_app(&mut self, app: DockApp) {
        if self.apps.iter().any(|existing| existing.id == app.id) {
            return;
        }
        tracing::debug!(app_id = %app.id, "registered dock app");
        self.apps.push(app);
    }

    /// Remove an app from the dock and from the running set.
    pub fn unregister_app(&mut self, app_id: &str) {
        self.apps.retain(|app| app.id != app_id);
        self.open_app_ids.remove(app_id);
    }

    /// Directly mark an app as running. Reports a transition only when the
    /// set actually changed.
    pub fn mark_open(&mut self, app_id: &str) -> Option<DockEvent> {
        if !self.open_app_ids.insert(app_id.to_string()) {
            return None;
        }
        tracing::debug!(app_id = %app_id, "app marked open");
        Some(DockEvent::AppOpened {
            app_id: app_id.to_string(),
        })
    }

    /// Directly mark an app as not running.
    pub fn mark_closed(&mut self, app_id: &str) -> Option<DockEvent> {
        if !self.open_app_ids.remove(app_id) {
            return None;
        }
        tracing::debug!(app_id = %app_id, "app marked closed");
        Some(DockEvent::AppClosed {
            app_id: app_id.to_string(),
        })
    }

    /// Reactive path: a window of this app opened. Idempotent, silent.
    pub fn note_window_opened(&mut self, app_id: &str) {
        self.open_app_ids.insert(app_id.to_string());
    }

    /// Reactive path: a window of this app closed, with the registry's live
    /// count of windows the app still owns. The app stays in the running set
    /// until its last window is gone.
    pub fn note_window_closed(&mut self, app_id: &str, remaining_windows: usize) {
        if remaining_windows == 0 {
            self.open_app_ids.remove(app_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opal() -> DockApp {
        DockApp::new("opal", "Opal", "icons/opal.png")
    }

    #[test]
    fn register_is_idempotent_by_id() {
        let mut dock = DockTracker::new();
        dock.register_app(opal());
        dock.register_app(DockApp::new("opal", "Opal copy", "elsewhere.png"));
        assert_eq!(dock.apps().len(), 1);
        assert_eq!(dock.apps()[0].name, "Opal");
    }

    #[test]
    fn unregister_clears_running_state_too() {
        let mut dock = DockTracker::new();
        dock.register_app(opal());
        dock.mark_open("opal");
        dock.unregister_app("opal");
        assert!(dock.apps().is_empty());
        assert!(!dock.is_open("opal"));
    }

    #[test]
    fn direct_toggles_report_only_real_transitions() {
        let mut dock = DockTracker::new();
        assert!(dock.mark_open("opal").is_some());
        assert!(dock.mark_open("opal").is_none());
        assert!(dock.mark_closed("opal").is_some());
        assert!(dock.mark_closed("opal").is_none());
    }

    #[test]
    fn window_close_retires_app_only_at_zero_windows() {
        let mut dock = DockTracker::new();
        dock.note_window_opened("opal");
        // first of two windows closed; one remains
        dock.note_window_closed("opal", 1);
        assert!(dock.is_open("opal"));
        dock.note_window_closed("opal", 0);
        assert!(!dock.is_open("opal"));
    }

    #[test]
    fn reactive_open_is_idempotent() {
        let mut dock = DockTracker::new();
        dock.note_window_opened("opal");
        dock.note_window_opened("opal");
        assert_eq!(dock.open_app_ids().count(), 1);
    }
}
