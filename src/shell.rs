//! The demo shell: routes terminal input into desktop commands.
//!
//! The shell maps the terminal grid onto the desktop's pixel coordinate
//! space (one cell is `cell_width` × `cell_height` pixels), hit-tests mouse
//! events against the window stack and the dock, and feeds drag/resize
//! streams through the interaction controller.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;
use ratatui::layout::Rect;
use thiserror::Error;

use crate::constants::DOUBLE_CLICK_MS;
use crate::desktop::Desktop;
use crate::dock::DockApp;
use crate::geometry::{Point, Viewport};
use crate::interaction::{HitTarget, InteractionController, TitleBarHit, hit_test_desktop};
use crate::ui::{self, DockBar};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("terminal i/o failure: {0}")]
    Io(#[from] io::Error),
}

pub enum ControlFlow {
    Continue,
    Quit,
}

pub struct DesktopShell {
    desktop: Desktop,
    controller: InteractionController,
    dock_bar: DockBar,
    cell_width: f64,
    cell_height: f64,
    screen: Rect,
    last_title_click: Option<(String, Instant)>,
}

impl DesktopShell {
    pub fn new(cell_width: f64, cell_height: f64, log_visible: bool) -> Self {
        let mut desktop = Desktop::new();
        for app in [
            DockApp::new("opal", "Opal", "icons/opal.png"),
            DockApp::new("files", "Files", "icons/files.png"),
            DockApp::new("settings", "Settings", "icons/settings.png"),
        ] {
            desktop.register_app(app);
        }
        if !log_visible {
            desktop.toggle_log();
        }
        Self {
            desktop,
            controller: InteractionController::new(),
            dock_bar: DockBar::default(),
            cell_width,
            cell_height,
            screen: Rect::default(),
            last_title_click: None,
        }
    }

    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    /// The pixel viewport backing the last rendered screen.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            f64::from(self.screen.width) * self.cell_width,
            f64::from(self.screen.height) * self.cell_height,
        )
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.screen = frame.area();
        ui::render(
            frame,
            &self.desktop,
            &mut self.dock_bar,
            self.cell_width,
            self.cell_height,
        );
    }

    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return ControlFlow::Quit;
                }
                self.handle_key(key.code)
            }
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                ControlFlow::Continue
            }
            // The core never re-flows on viewport changes; the next
            // geometry-affecting command samples the new size.
            _ => ControlFlow::Continue,
        }
    }

    fn handle_key(&mut self, code: KeyCode) -> ControlFlow {
        let viewport = self.viewport();
        let focused = self
            .desktop
            .registry()
            .focused_window_id()
            .map(str::to_string);
        match code {
            KeyCode::Char('q') => return ControlFlow::Quit,
            KeyCode::Char('d') => self.desktop.toggle_log(),
            KeyCode::Char('c') => self.desktop.clear_log(),
            KeyCode::Char('n') => {
                if let Some(app_id) = self.desktop.dock().apps().first().map(|app| app.id.clone())
                {
                    self.desktop.open_app(&app_id, viewport);
                }
            }
            KeyCode::Char('m') => {
                if let Some(id) = focused {
                    self.desktop.minimize_window(&id);
                }
            }
            KeyCode::Char('f') => {
                if let Some(id) = focused {
                    self.desktop.maximize_window(&id);
                }
            }
            KeyCode::Char('r') => {
                if let Some(id) = focused {
                    self.desktop.restore_window(&id);
                }
            }
            KeyCode::Char('x') => {
                if let Some(id) = focused {
                    self.desktop.close_window(&id);
                }
            }
            KeyCode::Left => {
                if let Some(id) = focused {
                    self.desktop.snap_left(&id, viewport);
                }
            }
            KeyCode::Right => {
                if let Some(id) = focused {
                    self.desktop.snap_right(&id, viewport);
                }
            }
            KeyCode::Up => {
                if let Some(id) = focused {
                    self.desktop.snap_top(&id, viewport);
                }
            }
            KeyCode::Down => {
                if let Some(id) = focused {
                    self.desktop.snap_bottom(&id, viewport);
                }
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    fn handle_mouse(&mut self, mouse: &MouseEvent) {
        let viewport = self.viewport();
        let pointer = self.pixel(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(app_id) = self
                    .dock_bar
                    .hit_test(mouse.column, mouse.row)
                    .map(str::to_string)
                {
                    self.desktop.open_app(&app_id, viewport);
                    return;
                }
                self.pointer_down(pointer, viewport);
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.controller
                    .pointer_moved(&mut self.desktop, pointer, viewport);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.controller.pointer_released();
            }
            _ => {}
        }
    }

    fn pointer_down(&mut self, pointer: Point, viewport: Viewport) {
        let hit = {
            let stack = self.desktop.registry().stacking_order();
            hit_test_desktop(&stack, viewport, pointer)
                .map(|(record, hit)| (record.id.clone(), record.is_maximized, hit))
        };
        let Some((id, is_maximized, hit)) = hit else {
            return;
        };
        match hit {
            HitTarget::TitleBar(TitleBarHit::Close) => self.desktop.close_window(&id),
            HitTarget::TitleBar(TitleBarHit::Minimize) => self.desktop.minimize_window(&id),
            HitTarget::TitleBar(TitleBarHit::MaximizeRestore) => {
                if is_maximized {
                    self.desktop.restore_window(&id);
                } else {
                    self.desktop.maximize_window(&id);
                }
            }
            HitTarget::TitleBar(TitleBarHit::Snap(layout)) => {
                self.desktop.snap_window(&id, layout, viewport);
            }
            HitTarget::TitleBar(TitleBarHit::Drag) => {
                self.desktop.focus_window(&id);
                if self.take_double_click(&id) {
                    self.desktop.maximize_window(&id);
                } else {
                    self.controller
                        .begin_drag(self.desktop.registry(), &id, pointer);
                }
            }
            HitTarget::Resize(direction) => {
                self.desktop.focus_window(&id);
                self.controller
                    .begin_resize(self.desktop.registry(), &id, direction, pointer);
            }
            HitTarget::Content => self.desktop.focus_window(&id),
        }
    }

    /// Double-click detection on a window's title bar; a second click on the
    /// same window within the click window toggles maximize.
    fn take_double_click(&mut self, id: &str) -> bool {
        let now = Instant::now();
        if let Some((prev_id, prev)) = &self.last_title_click
            && prev_id == id
            && now.duration_since(*prev) <= Duration::from_millis(DOUBLE_CLICK_MS)
        {
            self.last_title_click = None;
            return true;
        }
        self.last_title_click = Some((id.to_string(), now));
        false
    }

    /// Pixel position at the centre of a terminal cell.
    fn pixel(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f64::from(column) + 0.5) * self.cell_width,
            (f64::from(row) + 0.5) * self.cell_height,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{CELL_PIXEL_HEIGHT, CELL_PIXEL_WIDTH};

    fn shell() -> DesktopShell {
        let mut shell = DesktopShell::new(CELL_PIXEL_WIDTH, CELL_PIXEL_HEIGHT, true);
        shell.screen = Rect::new(0, 0, 150, 50);
        shell
    }

    #[test]
    fn viewport_scales_cells_to_pixels() {
        let shell = shell();
        assert_eq!(shell.viewport(), Viewport::new(1200.0, 800.0));
    }

    #[test]
    fn quit_keys_end_the_session() {
        let mut shell = shell();
        assert!(matches!(
            shell.handle_key(KeyCode::Char('q')),
            ControlFlow::Quit
        ));
    }

    #[test]
    fn open_key_launches_the_first_dock_app() {
        let mut shell = shell();
        assert!(matches!(
            shell.handle_key(KeyCode::Char('n')),
            ControlFlow::Continue
        ));
        assert_eq!(shell.desktop().registry().len(), 1);
        assert!(shell.desktop().dock().is_open("opal"));
    }

    #[test]
    fn snap_keys_target_the_focused_window() {
        let mut shell = shell();
        shell.handle_key(KeyCode::Char('n'));
        shell.handle_key(KeyCode::Left);
        let record = shell.desktop().registry().windows().next().unwrap();
        assert_eq!(record.layout, crate::geometry::Layout::SnapLeft);
        assert_eq!(record.position, Point::new(0.0, 32.0));
        assert_eq!(record.size, crate::geometry::Size::new(600.0, 768.0));
    }

    #[test]
    fn title_bar_drag_moves_the_window() {
        let mut shell = shell();
        shell.handle_key(KeyCode::Char('n'));
        let (id, start) = {
            let record = shell.desktop().registry().windows().next().unwrap();
            (record.id.clone(), record.position)
        };
        // default placement at 1200x800 is (200, 100); cell (40, 7) is pixel
        // (324, 120), inside the title bar's draggable chrome
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 40,
            row: 7,
            modifiers: KeyModifiers::NONE,
        };
        shell.handle_mouse(&down);
        assert!(shell.controller.is_active());
        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column: 50,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        shell.handle_mouse(&drag);
        let moved = shell.desktop().registry().get(&id).unwrap().position;
        assert_eq!(moved.x, start.x + 80.0);
        assert_eq!(moved.y, start.y + 48.0);
        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 50,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        shell.handle_mouse(&up);
        assert!(!shell.controller.is_active());
    }

    #[test]
    fn content_click_focuses_without_starting_a_gesture() {
        let mut shell = shell();
        shell.handle_key(KeyCode::Char('n'));
        shell.handle_key(KeyCode::Char('n'));
        let bottom_id = shell
            .desktop()
            .registry()
            .stacking_order()
            .first()
            .map(|record| record.id.clone())
            .unwrap();
        // both windows share the default frame, so a content click lands on
        // the top one; minimize it first to expose the bottom window
        let top_id = shell
            .desktop()
            .registry()
            .focused_window_id()
            .unwrap()
            .to_string();
        shell.desktop.minimize_window(&top_id);
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 60,
            row: 20,
            modifiers: KeyModifiers::NONE,
        };
        shell.handle_mouse(&click);
        assert_eq!(
            shell.desktop().registry().focused_window_id(),
            Some(bottom_id.as_str())
        );
        assert!(!shell.controller.is_active());
    }
}
