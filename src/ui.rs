//! Rendering for the demo shell: menu bar, window stack, dock, and the
//! event log panel.
//!
//! The desktop core works in pixels; this module divides by the cell scale
//! to place chrome on the terminal grid. Dock items record their cell rects
//! while rendering so the shell can hit-test clicks against the same frame
//! the user saw.

use std::time::{SystemTime, UNIX_EPOCH};

use indoc::indoc;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::constants::MENU_BAR_HEIGHT;
use crate::desktop::Desktop;
use crate::geometry::{Layout, Point, Size, Viewport};
use crate::interaction::window_frame;

const LOG_PANEL_WIDTH: u16 = 44;

const EMPTY_DESKTOP_HELP: &str = indoc! {"
    No windows are open.

    n       open a window of the first dock app
    click   a dock item to launch that app
    d / c   toggle / clear the event log
    m f r   minimize, maximize, restore the focused window
    arrows  snap the focused window to a half
    x       close the focused window
    q       quit
"};

/// Frame-local record of where dock items were drawn, for click routing.
#[derive(Debug, Default)]
pub struct DockBar {
    items: Vec<(Rect, String)>,
}

impl DockBar {
    pub fn begin_frame(&mut self) {
        self.items.clear();
    }

    pub fn push_item(&mut self, rect: Rect, app_id: String) {
        self.items.push((rect, app_id));
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<&str> {
        self.items
            .iter()
            .find(|(rect, _)| rect_contains(*rect, column, row))
            .map(|(_, app_id)| app_id.as_str())
    }
}

pub fn render(
    frame: &mut Frame,
    desktop: &Desktop,
    dock_bar: &mut DockBar,
    cell_width: f64,
    cell_height: f64,
) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let viewport = Viewport::new(
        f64::from(area.width) * cell_width,
        f64::from(area.height) * cell_height,
    );

    let menu_rows = ((MENU_BAR_HEIGHT / cell_height).ceil() as u16).min(area.height);
    let menu_area = Rect::new(area.x, area.y, area.width, menu_rows);
    let desktop_area = Rect::new(
        area.x,
        area.y + menu_rows,
        area.width,
        area.height.saturating_sub(menu_rows).saturating_sub(1),
    );

    render_menu_bar(frame, desktop, menu_area);

    let stack = desktop.registry().stacking_order();
    if stack.is_empty() {
        let help = Paragraph::new(EMPTY_DESKTOP_HELP)
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        frame.render_widget(help, desktop_area);
    }
    for record in &stack {
        let (origin, size) = window_frame(record, viewport);
        let rect = cell_rect(origin, size, cell_width, cell_height, area);
        if rect.width < 2 || rect.height < 2 {
            continue;
        }
        let focused = desktop.registry().focused_window_id() == Some(record.id.as_str());
        render_window_chrome(frame, rect, &record.title, record.layout, focused);
    }

    if desktop.log().visible() {
        render_log_panel(frame, desktop, desktop_area);
    }

    let dock_area = Rect::new(area.x, area.y + area.height - 1, area.width, 1);
    render_dock(frame.buffer_mut(), desktop, dock_bar, dock_area);
}

fn render_menu_bar(frame: &mut Frame, desktop: &Desktop, area: Rect) {
    let style = Style::default().bg(Color::Black).fg(Color::White);
    let buffer = frame.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell_mut((x, y)) {
                cell.set_symbol(" ");
                cell.set_style(style);
            }
        }
    }
    if area.height == 0 {
        return;
    }
    safe_set_string(
        buffer,
        area,
        area.x + 1,
        area.y,
        "Cosmos",
        style.add_modifier(Modifier::BOLD),
    );
    let focused_title = desktop
        .registry()
        .focused_window_id()
        .and_then(|id| desktop.registry().get(id))
        .map(|record| record.title.clone());
    if let Some(title) = focused_title {
        let text = truncate_to_width(&title, area.width.saturating_sub(10) as usize);
        let x = area
            .right()
            .saturating_sub(text.chars().count() as u16 + 1);
        safe_set_string(buffer, area, x, area.y, &text, style);
    }
}

fn render_window_chrome(frame: &mut Frame, rect: Rect, title: &str, layout: Layout, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let mut block = Block::bordered()
        .border_style(border_style)
        .title(Line::from(format!(" ● ● ● {title} ")));
    if layout != Layout::Floating {
        block = block.title(Line::from(format!(" {layout} ")).right_aligned());
    }
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);
}

fn render_log_panel(frame: &mut Frame, desktop: &Desktop, area: Rect) {
    if area.width < LOG_PANEL_WIDTH / 2 || area.height < 3 {
        return;
    }
    let width = LOG_PANEL_WIDTH.min(area.width);
    let rect = Rect::new(area.right() - width, area.y, width, area.height);
    let block = Block::bordered()
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Line::from(" Events "));
    let inner = block.inner(rect);
    frame.render_widget(Clear, rect);
    frame.render_widget(block, rect);

    let capacity = inner.height as usize;
    let skip = desktop.log().len().saturating_sub(capacity);
    let lines: Vec<Line> = desktop
        .log()
        .entries()
        .skip(skip)
        .map(|entry| {
            Line::from(format!(
                "{} {}",
                format_timestamp(entry.timestamp),
                entry.message
            ))
            .style(Style::default().fg(Color::Gray))
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_dock(buffer: &mut Buffer, desktop: &Desktop, dock_bar: &mut DockBar, area: Rect) {
    dock_bar.begin_frame();
    if area.height == 0 {
        return;
    }
    let labels: Vec<(String, String)> = desktop
        .dock()
        .apps()
        .iter()
        .map(|app| {
            let marker = if desktop.dock().is_open(&app.id) {
                "●"
            } else {
                "○"
            };
            (app.id.clone(), format!(" {} {marker} ", app.name))
        })
        .collect();
    let total: u16 = labels
        .iter()
        .map(|(_, text)| text.chars().count() as u16)
        .sum();
    let mut x = area.x + area.width.saturating_sub(total) / 2;
    for (app_id, text) in labels {
        let width = text.chars().count() as u16;
        safe_set_string(
            buffer,
            area,
            x,
            area.y,
            &text,
            Style::default().bg(Color::Black).fg(Color::White),
        );
        dock_bar.push_item(Rect::new(x, area.y, width, 1), app_id);
        x = x.saturating_add(width);
    }
}

fn cell_rect(origin: Point, size: Size, cell_width: f64, cell_height: f64, bounds: Rect) -> Rect {
    let x = (origin.x / cell_width).round().max(0.0) as u16;
    let y = (origin.y / cell_height).round().max(0.0) as u16;
    let right = ((origin.x + size.width) / cell_width).round().max(0.0) as u16;
    let bottom = ((origin.y + size.height) / cell_height).round().max(0.0) as u16;
    let rect = Rect::new(
        x,
        y,
        right.saturating_sub(x).max(1),
        bottom.saturating_sub(y).max(1),
    );
    rect.intersection(bounds)
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn format_timestamp(timestamp: SystemTime) -> String {
    let secs = timestamp
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!(
        "{:02}:{:02}:{:02}",
        (secs / 3600) % 24,
        (secs / 60) % 60,
        secs % 60
    )
}

fn safe_set_string(buffer: &mut Buffer, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    if available == 0 {
        return;
    }
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}
