//! cosmo-wm: the client-side core of a desktop-operating-system metaphor.
//!
//! The crate models draggable, resizable, snappable, stacked application
//! windows together with a dock tracking running apps and a bounded event
//! log observing every state transition. The core is pure state: every
//! geometry-affecting command takes the viewport as an explicit parameter,
//! and all mutations are synchronous and atomic. A terminal demo shell
//! (`src/main.rs`) maps the terminal grid onto the pixel coordinate space
//! and drives the core from mouse and keyboard events.

pub mod constants;
pub mod desktop;
pub mod dock;
pub mod event_log;
pub mod geometry;
pub mod interaction;
pub mod registry;
pub mod shell;
pub mod tracing_sub;
pub mod ui;

pub use desktop::Desktop;
pub use dock::{DockApp, DockEvent, DockTracker};
pub use event_log::{EventLog, LogEntry};
pub use geometry::{Layout, Point, Size, Viewport};
pub use interaction::{
    Gesture, HitTarget, InteractionController, ResizeDirection, TitleBarHit,
};
pub use registry::{OpenWindow, WindowEvent, WindowRecord, WindowRegistry};
