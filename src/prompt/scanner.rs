// hcs-logs - Blocking prompt scanner
//
// Shows a prompt, reads one line, and repeats until the answer is accepted.
// There is no cancel path: the only way out without a value is the input
// stream closing.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use console::style;

use super::{Prompt, PromptError};

/// What a masked default is displayed as.
const MASK: &str = "******";

/// Reads answers from `input`, writes prompts and errors to `output`.
pub struct Scanner<R, W> {
    input: R,
    output: W,
    show_secret: bool,
}

impl Scanner<StdinLock<'static>, Stdout> {
    /// Scanner bound to the process terminal.
    pub fn stdio(show_secret: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout()).with_show_secret(show_secret)
    }
}

impl<R: BufRead, W: Write> Scanner<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            show_secret: false,
        }
    }

    /// Display password defaults in clear text.
    pub fn with_show_secret(mut self, show_secret: bool) -> Self {
        self.show_secret = show_secret;
        self
    }

    /// Where prompts are written; other components print through it too.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Block until the operator gives an acceptable answer.
    pub fn scan(&mut self, prompt: &Prompt) -> Result<String, PromptError> {
        writeln!(self.output, "{}", prompt.placeholder)?;

        let mut hints = Vec::with_capacity(prompt.options.len() + 1);
        if let Some(default) = prompt.default_answer() {
            let shown = if prompt.password && !self.show_secret {
                MASK
            } else {
                default
            };
            hints.push(style(shown).bold().to_string());
        }
        for (i, opt) in prompt.options.iter().enumerate() {
            writeln!(self.output, "{}  {:<20} {}", i + 1, opt.value, opt.label)?;
            if prompt.default_answer() != Some(opt.value.as_str()) {
                hints.push(opt.value.clone());
            }
        }
        let hint = hints.join("/");

        loop {
            write!(self.output, "[ {} ] : ", hint)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(PromptError::Closed);
            }
            let answer = line.trim();

            if answer.is_empty() {
                if let Some(default) = prompt.default_answer() {
                    return Ok(default.to_string());
                }
            }

            match prompt.accept(answer) {
                Ok(value) => return Ok(value),
                Err(e) => {
                    tracing::debug!(error = %e, "Prompt input rejected");
                    writeln!(self.output, "{}", e)?;
                }
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
