use std::io;
use std::io::BufRead;
use std::io::Write;
use tracing::warn;

/// Ask the user for a line of text
pub trait UserPrompt {
    /// `None` when the user cancelled the question
    fn ask(&mut self, label: &str) -> Option<String>;
}

/// Prompt reading answers line by line, printing the question on `output`
pub struct StdinPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl StdinPrompt<io::StdinLock<'static>, io::Stderr> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> StdinPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> UserPrompt for StdinPrompt<R, W> {
    fn ask(&mut self, label: &str) -> Option<String> {
        if let Err(error) = write!(self.output, "{label}: ").and_then(|_| self.output.flush()) {
            warn!("Unable to show prompt: {}", error);
        }
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line.trim().to_owned()),
            Err(error) => {
                warn!("Unable to read answer: {}", error);
                None
            }
        }
    }
}
