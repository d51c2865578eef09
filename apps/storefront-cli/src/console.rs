//! # Console I/O
//!
//! Line-oriented prompts over any `BufRead` / `Write` pair, so the menus run
//! the same against a terminal and against scripted input in tests.
//!
//! ```text
//!   prompt("Enter the storeID: ")
//!        │ write + flush
//!        ▼
//!   read_until '\n' ──► 0 bytes ──► AppError::end_of_input()  (Ctrl-D)
//!        │
//!        ├── not UTF-8 ──► AppError::invalid_input (line is consumed)
//!        ▼
//!   trimmed line ──► parse ──► value / AppError::invalid_input
//! ```

use std::fmt::Display;
use std::io::{BufRead, Write};

use storefront_core::Money;

use crate::error::{AppError, AppResult, ErrorCode};

pub const CHOICE_PROMPT: &str = "Please make your choice: ";
pub const INVALID_CHOICE: &str = "Your input is invalid!";

/// Prompting console.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Writes one line.
    pub fn say(&mut self, line: impl Display) -> AppResult<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// Writes without a trailing newline and flushes.
    pub fn print(&mut self, text: impl Display) -> AppResult<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Shows `label` and reads one line, without its line ending.
    pub fn prompt(&mut self, label: &str) -> AppResult<String> {
        self.print(label)?;

        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            // Keep the next output off the prompt line
            writeln!(self.output)?;
            return Err(AppError::end_of_input());
        }

        let line = String::from_utf8(bytes)
            .map_err(|_| AppError::invalid_input("input is not valid UTF-8"))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Menu choice: re-prompts until a whole number is typed.
    pub fn read_choice(&mut self) -> AppResult<i64> {
        self.read_choice_with(CHOICE_PROMPT)
    }

    pub fn read_choice_with(&mut self, label: &str) -> AppResult<i64> {
        loop {
            let choice = self.prompt(label).and_then(|line| {
                line.trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::invalid_input(INVALID_CHOICE))
            });
            match choice {
                Ok(choice) => return Ok(choice),
                Err(e) if e.code == ErrorCode::InvalidInput => self.say(INVALID_CHOICE)?,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn prompt_i64(&mut self, label: &str) -> AppResult<i64> {
        let line = self.prompt(label)?;
        line.trim()
            .parse::<i64>()
            .map_err(|_| AppError::invalid_input(format!("'{}' is not a whole number", line.trim())))
    }

    pub fn prompt_f64(&mut self, label: &str) -> AppResult<f64> {
        let line = self.prompt(label)?;
        match line.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(AppError::invalid_input(format!(
                "'{}' is not a number",
                line.trim()
            ))),
        }
    }

    /// Reads a price such as `2.49` or `$2.49`.
    pub fn prompt_money(&mut self, label: &str) -> AppResult<Money> {
        let line = self.prompt(label)?;
        Ok(Money::parse(&line)?)
    }

    /// Gives back the output sink (tests read what was printed).
    pub fn into_output(self) -> W {
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn printed(console: Console<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_read_choice_reprompts() {
        let mut c = console("abc\n\n7\n");
        assert_eq!(c.read_choice().unwrap(), 7);

        let out = printed(c);
        assert_eq!(out.matches(CHOICE_PROMPT).count(), 3);
        assert_eq!(out.matches(INVALID_CHOICE).count(), 2);
    }

    #[test]
    fn test_read_choice_skips_undecodable_lines() {
        let mut c = Console::new(Cursor::new(b"\xff\xfe\n7\n".to_vec()), Vec::new());
        assert_eq!(c.read_choice().unwrap(), 7);

        let out = printed(c);
        assert_eq!(out.matches(CHOICE_PROMPT).count(), 2);
        assert_eq!(out.matches(INVALID_CHOICE).count(), 1);
    }

    #[test]
    fn test_undecodable_answer_is_invalid_input() {
        let mut c = Console::new(Cursor::new(b"\xc3\n12\n".to_vec()), Vec::new());
        let err = c.prompt_i64("id: ").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(c.prompt_i64("id: ").unwrap(), 12);
    }

    #[test]
    fn test_end_of_input() {
        let mut c = console("");
        let err = c.read_choice().unwrap_err();
        assert!(err.is_end_of_input());
    }

    #[test]
    fn test_prompt_strips_line_ending_only() {
        let mut c = console("  Hot and Spicy Chips \r\n");
        assert_eq!(c.prompt("Name: ").unwrap(), "  Hot and Spicy Chips ");
    }

    #[test]
    fn test_numeric_prompts() {
        let mut c = console("12\nx\n45.5\n$2.49\n");
        assert_eq!(c.prompt_i64("id: ").unwrap(), 12);
        assert!(c.prompt_i64("id: ").is_err());
        assert_eq!(c.prompt_f64("lat: ").unwrap(), 45.5);
        assert_eq!(c.prompt_money("price: ").unwrap(), Money::from_cents(249));
    }

    #[test]
    fn test_nan_rejected() {
        let mut c = console("NaN\n");
        assert!(c.prompt_f64("lat: ").is_err());
    }
}
