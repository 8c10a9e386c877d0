//! Shared crate-wide constants.

/// Height (in pixels) of the fixed menu bar across the top of the desktop.
///
/// Every geometry computation treats the strip above this offset as reserved:
/// windows cannot be dragged above it, snap layouts subtract it, and the
/// maximized frame starts directly below it.
pub const MENU_BAR_HEIGHT: f64 = 32.0;

/// Height (in pixels) of a window's title bar, including its control and
/// snap buttons. Pointer hits below this line fall through to window content.
pub const TITLE_BAR_HEIGHT: f64 = 40.0;

/// Default size for windows opened without an explicit size.
pub const DEFAULT_WINDOW_WIDTH: f64 = 800.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 600.0;

/// Minimum window size enforced by every resize path. Resizes below the
/// floor are clamped, never rejected.
pub const MIN_WINDOW_WIDTH: f64 = 300.0;
pub const MIN_WINDOW_HEIGHT: f64 = 200.0;

/// Diameter of the round close/minimize/maximize controls at the left end of
/// the title bar, the gap between them, and their inset from the window edge.
pub const WINDOW_CONTROL_SIZE: f64 = 12.0;
pub const WINDOW_CONTROL_GAP: f64 = 8.0;
pub const WINDOW_CONTROL_INSET: f64 = 12.0;

/// Side length of the square snap/maximize buttons at the right end of the
/// title bar, and the title bar's right-hand padding.
pub const SNAP_BUTTON_SIZE: f64 = 24.0;
pub const TITLE_BAR_PADDING: f64 = 12.0;

/// Size of the square corner resize affordances and the thickness of the
/// edge resize bands along a window's border.
pub const RESIZE_CORNER_SIZE: f64 = 12.0;
pub const RESIZE_EDGE_THICKNESS: f64 = 8.0;

/// The event log retains at most this many entries; older entries are
/// evicted from the front.
pub const MAX_LOG_ENTRIES: usize = 100;

/// Maximum delay between two title-bar clicks for them to count as a
/// double-click (which toggles maximize).
pub const DOUBLE_CLICK_MS: u64 = 500;

/// Default pixel dimensions of one terminal cell used by the demo shell to
/// map the terminal grid onto the desktop's pixel coordinate space.
pub const CELL_PIXEL_WIDTH: f64 = 8.0;
pub const CELL_PIXEL_HEIGHT: f64 = 16.0;
