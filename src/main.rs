use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::execute;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use cosmo_wm::constants::{CELL_PIXEL_HEIGHT, CELL_PIXEL_WIDTH};
use cosmo_wm::shell::{ControlFlow, DesktopShell, ShellError};

/// Terminal demo of the cosmo-wm desktop: a menu bar, a dock, and a stack
/// of draggable, resizable, snappable windows.
#[derive(Debug, Parser)]
#[command(name = "cosmo-wm", version, about)]
struct Args {
    /// Pixel width one terminal cell maps to in the desktop coordinate space.
    #[arg(long, default_value_t = CELL_PIXEL_WIDTH)]
    cell_width: f64,

    /// Pixel height one terminal cell maps to in the desktop coordinate space.
    #[arg(long, default_value_t = CELL_PIXEL_HEIGHT)]
    cell_height: f64,

    /// Start with the event log panel hidden.
    #[arg(long)]
    hide_log: bool,
}

fn main() -> Result<(), ShellError> {
    cosmo_wm::tracing_sub::init_default();
    let args = Args::parse();
    let mut shell = DesktopShell::new(args.cell_width, args.cell_height, !args.hide_log);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut shell);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    shell: &mut DesktopShell,
) -> Result<(), ShellError> {
    loop {
        terminal.draw(|frame| shell.render(frame))?;
        if event::poll(Duration::from_millis(16))? {
            // Drain the queue so high-frequency drag streams don't fall
            // behind the render loop.
            loop {
                let evt = event::read()?;
                if let ControlFlow::Quit = shell.handle_event(&evt) {
                    return Ok(());
                }
                if !event::poll(Duration::from_millis(0))? {
                    break;
                }
            }
        }
    }
}
