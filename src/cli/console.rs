//! Line-oriented terminal I/O used by every command.
//!
//! Generic over reader and writer so flows can be driven from a script in tests.

use std::fmt::Display;
use std::io::{self, BufRead, Stdout, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, Stdout> {
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line after printing `label`. Returns `None` at end of input.
    pub fn read(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Like [`Console::read`], but end of input reads as an empty answer.
    pub fn prompt(&mut self, label: &str) -> io::Result<String> {
        Ok(self.read(label)?.unwrap_or_default())
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.output, "{line}")
    }

    pub fn success(&mut self, title: &str, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "✓ {title}: {message}")
    }

    pub fn failure(&mut self, title: &str, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "✗ {title}: {message}")
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_strips_line_endings_only() {
        let mut console = Console::new(Cursor::new(b"  pw \r\nnext\n".to_vec()), Vec::new());
        assert_eq!(console.read("Password").unwrap().as_deref(), Some("  pw "));
        assert_eq!(console.read("Again").unwrap().as_deref(), Some("next"));
        assert_eq!(console.read("More").unwrap(), None);

        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.starts_with("Password: Again: More: "));
    }

    #[test]
    fn test_prompt_treats_eof_as_empty() {
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());
        assert_eq!(console.prompt("Username").unwrap(), "");
    }

    #[test]
    fn test_feedback_lines() {
        let mut console = Console::new(Cursor::new(Vec::new()), Vec::new());
        console.success("Success", "done").unwrap();
        console.failure("Login Failed", "Incorrect password!").unwrap();

        let out = String::from_utf8(console.into_output()).unwrap();
        assert_eq!(out, "✓ Success: done\n✗ Login Failed: Incorrect password!\n");
    }
}
