use std::io;

/// Port for console interaction
///
/// All blocking console I/O goes through this capability so it can be
/// replaced with a scripted source in tests.
pub trait Prompter {
    /// Print a message to the user
    fn say(&mut self, message: &str) -> io::Result<()>;

    /// Print `question` and read one line. Returns `None` at end of input.
    fn ask(&mut self, question: &str) -> io::Result<Option<String>>;

    /// Ask a yes/no question: `y` is yes, anything else is no.
    /// Returns `None` at end of input.
    fn confirm(&mut self, question: &str) -> io::Result<Option<bool>> {
        Ok(self.ask(question)?.map(|answer| answer.trim() == "y"))
    }
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn say(&mut self, message: &str) -> io::Result<()> {
        (**self).say(message)
    }

    fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        (**self).ask(question)
    }

    fn confirm(&mut self, question: &str) -> io::Result<Option<bool>> {
        (**self).confirm(question)
    }
}
