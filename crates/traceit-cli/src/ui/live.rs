use std::io::{self, Write};

use crossterm::{cursor, execute, terminal};

use super::TerminalWriter;

/// Alternate-screen writer for interactive `watch`. Entering switches to
/// the alternate buffer; dropping restores the caller's screen even when
/// the watch loop bails with an error.
pub struct LiveScreen {
    active: bool,
}

impl LiveScreen {
    pub fn enter() -> io::Result<Self> {
        execute!(io::stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self { active: true })
    }

    fn leave(&mut self) {
        if self.active {
            let _ = execute!(io::stdout(), cursor::Show, terminal::LeaveAlternateScreen);
            self.active = false;
        }
    }
}

impl Drop for LiveScreen {
    fn drop(&mut self) {
        self.leave();
    }
}

impl TerminalWriter for LiveScreen {
    fn clear_screen(&mut self) {
        let _ = execute!(
            io::stdout(),
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        );
    }

    fn write_line(&mut self, line: &str) {
        // MoveToColumn keeps output aligned while the terminal is in the
        // alternate buffer.
        let _ = execute!(io::stdout(), cursor::MoveToColumn(0));
        println!("{}", line);
    }

    fn flush(&mut self) {
        let _ = io::stdout().flush();
    }
}
