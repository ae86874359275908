use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Raw mode, alternate screen and (optionally) mouse capture for one session.
///
/// Everything is restored best-effort on drop.
pub struct TerminalSession {
    terminal: AppTerminal,
    mouse_capture: bool,
}

impl TerminalSession {
    /// Prepares the terminal and creates the ratatui handle.
    pub fn enter(mouse_capture: bool) -> io::Result<Self> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        let prepared = if mouse_capture {
            execute!(stdout, EnterAlternateScreen, Hide, EnableMouseCapture)
        } else {
            execute!(stdout, EnterAlternateScreen, Hide)
        };
        if let Err(error) = prepared {
            let _ = restore_terminal(mouse_capture);
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self {
                terminal,
                mouse_capture,
            }),
            Err(error) => {
                let _ = restore_terminal(mouse_capture);
                Err(error)
            }
        }
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }

    /// Current terminal size as a rectangle anchored at the origin.
    pub fn area(&self) -> io::Result<Rect> {
        let size = self.terminal.size()?;
        Ok(Rect::new(0, 0, size.width, size.height))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = restore_terminal(self.mouse_capture);
    }
}

/// Restores the terminal before the default panic report is printed.
pub fn install_panic_hook(mouse_capture: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(mouse_capture);
        default_hook(panic_info);
    }));
}

fn restore_terminal(mouse_capture: bool) -> io::Result<()> {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    if mouse_capture {
        let _ = execute!(stdout, DisableMouseCapture);
    }
    execute!(stdout, Show, LeaveAlternateScreen)
}
