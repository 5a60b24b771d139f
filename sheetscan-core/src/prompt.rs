//! Yes/no confirmation before processing

use crate::error::{Result, ScanError};
use std::io::{BufRead, Write};

/// Asks the user whether to go ahead
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Fixed answer, for `--yes` and non-interactive runs
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _prompt: &str) -> Result<bool> {
        Ok(self.0)
    }
}

/// Prompt on a writer, answer read from a line of input
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<std::io::StdinLock<'static>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stdout())
    }
}

/// Accepts Spanish and English affirmatives
fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "si" | "sí" | "y" | "yes"
    )
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{} (s/n): ", prompt).map_err(ScanError::Prompt)?;
        self.output.flush().map_err(ScanError::Prompt)?;

        let mut answer = String::new();
        self.input
            .read_line(&mut answer)
            .map_err(ScanError::Prompt)?;
        Ok(is_affirmative(&answer))
    }
}
