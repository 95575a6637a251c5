use std::io::{self, BufRead, Write};

use tracing::warn;

/// Asks the user to confirm a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (`--yes`, tests).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}

/// Interactive y/N prompt on stderr/stdin. Anything but `y`/`yes` declines.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl StdinConfirm {
    fn read_answer(prompt: &str) -> io::Result<String> {
        let mut stderr = io::stderr();
        write!(stderr, "{} [y/N] ", prompt)?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(answer)
    }
}

pub(crate) fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        match Self::read_answer(prompt) {
            Ok(answer) => is_yes(&answer),
            Err(e) => {
                warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}
