use cosmo_wm::interaction::{self, InteractionController, ResizeDirection};
use cosmo_wm::{Desktop, DockApp, Layout, OpenWindow, Point, Size, Viewport};

const VIEWPORT: Viewport = Viewport {
    width: 1200.0,
    height: 800.0,
};

fn desktop() -> Desktop {
    let mut desktop = Desktop::new();
    desktop.register_app(DockApp::new("opal", "Opal", "icons/opal.png"));
    desktop.register_app(DockApp::new("files", "Files", "icons/files.png"));
    desktop
}

#[test]
fn close_refocus_chain() {
    let mut desktop = desktop();
    desktop.open_window(OpenWindow::new("w1", "opal", "Opal"), VIEWPORT);
    desktop.open_window(OpenWindow::new("w2", "opal", "Opal"), VIEWPORT);
    desktop.close_window("w2");
    assert_eq!(desktop.registry().focused_window_id(), Some("w1"));
    desktop.close_window("w1");
    assert_eq!(desktop.registry().focused_window_id(), None);
}

#[test]
fn dock_follows_window_lifecycle_across_apps() {
    let mut desktop = desktop();
    let opal_window = desktop.open_app("opal", VIEWPORT).unwrap();
    let files_window = desktop.open_app("files", VIEWPORT).unwrap();
    let second_opal = desktop.open_app("opal", VIEWPORT).unwrap();
    assert!(desktop.dock().is_open("opal"));
    assert!(desktop.dock().is_open("files"));

    desktop.close_window(&opal_window);
    // another opal window is still open
    assert!(desktop.dock().is_open("opal"));
    desktop.close_window(&second_opal);
    assert!(!desktop.dock().is_open("opal"));
    desktop.close_window(&files_window);
    assert!(!desktop.dock().is_open("files"));
}

#[test]
fn log_observes_transitions_in_order_and_stays_bounded() {
    let mut desktop = desktop();
    desktop.open_window(OpenWindow::new("w1", "opal", "Opal"), VIEWPORT);
    desktop.minimize_window("w1");
    desktop.restore_window("w1");
    desktop.maximize_window("w1");
    let messages: Vec<&str> = desktop
        .log()
        .entries()
        .map(|entry| entry.message.as_str())
        .collect();
    assert_eq!(
        messages,
        vec![
            "Window opened: Opal",
            "Window minimized: w1",
            "Window restored: w1",
            "Window maximized: w1",
        ]
    );

    for i in 0..200 {
        let id = format!("w{i}");
        desktop.open_window(OpenWindow::new(&id, "opal", "Opal"), VIEWPORT);
        desktop.close_window(&id);
    }
    assert_eq!(desktop.log().len(), 100);
    // the tail is still the most recent transition
    assert_eq!(
        desktop.log().entries().last().unwrap().message,
        "Window closed: w199"
    );
}

#[test]
fn z_order_stays_unique_across_a_busy_session() {
    let mut desktop = desktop();
    for i in 0..6 {
        desktop.open_window(OpenWindow::new(format!("w{i}"), "opal", "Opal"), VIEWPORT);
    }
    desktop.focus_window("w0");
    desktop.snap_window("w3", Layout::SnapLeft, VIEWPORT);
    desktop.minimize_window("w5");
    desktop.restore_window("w5");
    desktop.maximize_window("w1");
    desktop.focus_window("w2");

    let mut z: Vec<u64> = desktop.registry().windows().map(|w| w.z_index).collect();
    let count = z.len();
    z.sort_unstable();
    z.dedup();
    assert_eq!(z.len(), count);
}

#[test]
fn snap_geometry_through_the_facade() {
    let mut desktop = desktop();
    desktop.open_window(OpenWindow::new("w1", "opal", "Opal"), VIEWPORT);
    desktop.snap_top_right("w1", VIEWPORT);
    let record = desktop.registry().get("w1").unwrap();
    assert_eq!(record.position, Point::new(600.0, 32.0));
    assert_eq!(record.size, Size::new(600.0, 384.0));
    assert_eq!(record.layout, Layout::SnapTopRight);
}

#[test]
fn maximized_frame_is_derived_not_stored() {
    let mut desktop = desktop();
    desktop.open_window(
        OpenWindow::new("w1", "opal", "Opal")
            .at(Point::new(150.0, 120.0))
            .sized(Size::new(400.0, 300.0)),
        VIEWPORT,
    );
    desktop.maximize_window("w1");
    let record = desktop.registry().get("w1").unwrap();
    // stored geometry is untouched
    assert_eq!(record.position, Point::new(150.0, 120.0));
    assert_eq!(record.size, Size::new(400.0, 300.0));
    // the rendered frame covers the usable viewport
    let (origin, size) = interaction::window_frame(record, VIEWPORT);
    assert_eq!(origin, Point::new(0.0, 32.0));
    assert_eq!(size, Size::new(1200.0, 768.0));

    desktop.restore_window("w1");
    let record = desktop.registry().get("w1").unwrap();
    let (origin, size) = interaction::window_frame(record, VIEWPORT);
    assert_eq!(origin, Point::new(150.0, 120.0));
    assert_eq!(size, Size::new(400.0, 300.0));
}

#[test]
fn drag_gesture_commits_each_intermediate_move() {
    let mut desktop = desktop();
    desktop.open_window(
        OpenWindow::new("w1", "opal", "Opal")
            .at(Point::new(100.0, 100.0))
            .sized(Size::new(400.0, 300.0)),
        VIEWPORT,
    );
    let mut controller = InteractionController::new();
    controller.begin_drag(desktop.registry(), "w1", Point::new(150.0, 110.0));
    controller.pointer_moved(&mut desktop, Point::new(200.0, 130.0), VIEWPORT);
    assert_eq!(
        desktop.registry().get("w1").unwrap().position,
        Point::new(150.0, 120.0)
    );
    controller.pointer_moved(&mut desktop, Point::new(20.0, 10.0), VIEWPORT);
    // clamped at the left edge and the menu bar
    assert_eq!(
        desktop.registry().get("w1").unwrap().position,
        Point::new(0.0, 32.0)
    );
    controller.pointer_released();
    assert_eq!(
        desktop.registry().get("w1").unwrap().position,
        Point::new(0.0, 32.0)
    );
}

#[test]
fn resize_gesture_respects_the_minimum_size_floor() {
    let mut desktop = desktop();
    desktop.open_window(
        OpenWindow::new("w1", "opal", "Opal")
            .at(Point::new(100.0, 100.0))
            .sized(Size::new(400.0, 300.0)),
        VIEWPORT,
    );
    let mut controller = InteractionController::new();
    controller.begin_resize(
        desktop.registry(),
        "w1",
        ResizeDirection::SouthEast,
        Point::new(500.0, 400.0),
    );
    controller.pointer_moved(&mut desktop, Point::new(0.0, 0.0), VIEWPORT);
    let record = desktop.registry().get("w1").unwrap();
    assert_eq!(record.size, Size::new(300.0, 200.0));
    assert_eq!(record.layout, Layout::Floating);
}

#[test]
fn snapped_window_returns_to_floating_when_dragged() {
    let mut desktop = desktop();
    desktop.open_window(OpenWindow::new("w1", "opal", "Opal"), VIEWPORT);
    desktop.snap_left("w1", VIEWPORT);
    let mut controller = InteractionController::new();
    controller.begin_drag(desktop.registry(), "w1", Point::new(100.0, 50.0));
    controller.pointer_moved(&mut desktop, Point::new(400.0, 200.0), VIEWPORT);
    let record = desktop.registry().get("w1").unwrap();
    assert_eq!(record.layout, Layout::Floating);
    assert_eq!(record.position, Point::new(300.0, 182.0));
}

#[test]
fn minimized_windows_leave_the_visible_stack_but_keep_state() {
    let mut desktop = desktop();
    desktop.open_window(OpenWindow::new("w1", "opal", "Opal"), VIEWPORT);
    desktop.open_window(OpenWindow::new("w2", "opal", "Opal"), VIEWPORT);
    desktop.minimize_window("w2");
    let stack: Vec<&str> = desktop
        .registry()
        .stacking_order()
        .iter()
        .map(|record| record.id.as_str())
        .collect();
    assert_eq!(stack, vec!["w1"]);
    assert_eq!(desktop.registry().focused_window_id(), Some("w1"));
    // the minimized window still exists and keeps its z-index
    assert!(desktop.registry().get("w2").is_some());
    assert_eq!(desktop.registry().len(), 2);
}
