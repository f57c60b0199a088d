//! Confirmation gate in front of destructive operations

use std::io::{self, BufRead, IsTerminal};

use console::Term;
use dialoguer::Input;

/// Yes/no gate asked once before a destructive batch.
///
/// Any `FnMut(&str) -> bool` is a `Confirmation`, which lets tests answer
/// without a console.
pub trait Confirmation {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

impl<F> Confirmation for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self(prompt))
    }
}

/// Only `y` or `Y` proceeds. Empty input and everything else declines.
pub fn is_affirmative(response: &str) -> bool {
    response
        .trim_end_matches(&['\r', '\n'][..])
        .eq_ignore_ascii_case("y")
}

/// Reads the answer from the console.
///
/// On an interactive terminal the prompt is rendered with dialoguer; when
/// stdin is piped the prompt is printed on stdout and one line is read.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalConfirmation;

impl Confirmation for TerminalConfirmation {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        let term = Term::stdout();

        let response = if term.is_term() && io::stdin().is_terminal() {
            Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text_on(&term)
                .map_err(io::Error::other)?
        } else {
            term.write_line(prompt)?;
            let mut line = String::new();
            // End of input reads as an empty answer.
            io::stdin().lock().read_line(&mut line)?;
            line
        };

        Ok(is_affirmative(&response))
    }
}
