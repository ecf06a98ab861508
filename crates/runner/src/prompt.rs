//! Line-oriented console prompter

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use gnat_ports::Prompter;

/// Prompter over any line reader and writer
pub struct ConsolePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl ConsolePrompter<StdinLock<'static>, Stdout> {
    /// Prompter over the process's stdin and stdout
    pub fn stdio() -> Self {
        let stdin: Stdin = io::stdin();
        Self::new(stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)?;
        self.output.flush()
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        self.say(question)?;
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        // Undecodable bytes reach the validator as U+FFFD and get rejected there
        let line = String::from_utf8_lossy(&line);
        let answer = line.trim_end_matches(['\r', '\n']);
        Ok(Some(answer.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_strips_line_ending() {
        let mut prompter = ConsolePrompter::new(Cursor::new("buy AAPL 10\r\nq\n"), Vec::new());
        assert_eq!(prompter.ask("Enter a command:").unwrap().as_deref(), Some("buy AAPL 10"));
        assert_eq!(prompter.ask("Enter a command:").unwrap().as_deref(), Some("q"));
        assert_eq!(prompter.ask("Enter a command:").unwrap(), None);

        let (_, output) = prompter.into_parts();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Enter a command:\nEnter a command:\nEnter a command:\n"
        );
    }

    #[test]
    fn test_invalid_utf8_line_is_still_a_line() {
        let mut input = b"buy AAPL 1\n".to_vec();
        input.extend_from_slice(&[0xff, 0xfe, b'\n']);
        input.extend_from_slice(b"buy MSFT 2\n");
        let mut prompter = ConsolePrompter::new(Cursor::new(input), Vec::new());

        assert_eq!(prompter.ask("?").unwrap().as_deref(), Some("buy AAPL 1"));
        assert_eq!(prompter.ask("?").unwrap().as_deref(), Some("\u{FFFD}\u{FFFD}"));
        assert_eq!(prompter.ask("?").unwrap().as_deref(), Some("buy MSFT 2"));
        assert_eq!(prompter.ask("?").unwrap(), None);
    }

    #[test]
    fn test_confirm() {
        let mut prompter = ConsolePrompter::new(Cursor::new("y\nn\n"), Vec::new());
        assert_eq!(prompter.confirm("?").unwrap(), Some(true));
        assert_eq!(prompter.confirm("?").unwrap(), Some(false));
        assert_eq!(prompter.confirm("?").unwrap(), None);
    }
}
