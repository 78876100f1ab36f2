pub mod live;

pub use live::LiveScreen;

/// Output target for the watch views; mocked in tests.
pub trait TerminalWriter: Send {
    fn clear_screen(&mut self);
    fn write_line(&mut self, line: &str);
    fn flush(&mut self);
}

/// Plain stdout, no screen control. Used when stdout is piped.
pub struct ConsoleWriter;

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self
    }
}

impl TerminalWriter for ConsoleWriter {
    fn clear_screen(&mut self) {
        // Piped output is append-only; updates just print below.
    }

    fn write_line(&mut self, line: &str) {
        println!("{}", line);
    }

    fn flush(&mut self) {
        use std::io::{self, Write};
        let _ = io::stdout().flush();
    }
}

pub struct MockTerminal {
    pub lines: Vec<String>,
    pub clear_count: usize,
    pub flush_count: usize,
}

impl Default for MockTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTerminal {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            clear_count: 0,
            flush_count: 0,
        }
    }
}

impl TerminalWriter for MockTerminal {
    fn clear_screen(&mut self) {
        self.clear_count += 1;
        self.lines.clear();
    }

    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn flush(&mut self) {
        self.flush_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_terminal_records_writes_and_clears() {
        let mut terminal = MockTerminal::new();
        terminal.write_line("one");
        terminal.write_line("two");
        assert_eq!(terminal.lines.len(), 2);

        terminal.clear_screen();
        assert!(terminal.lines.is_empty());
        assert_eq!(terminal.clear_count, 1);

        terminal.flush();
        assert_eq!(terminal.flush_count, 1);
    }
}
