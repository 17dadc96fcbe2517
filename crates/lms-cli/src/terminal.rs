//! Operator input and output.
//!
//! Workflows talk to the operator only through [`Terminal`], so they can be
//! driven by a real terminal or by a scripted one in tests.

use async_trait::async_trait;
use std::io::{self, BufRead, IsTerminal, Write};

#[async_trait]
pub trait Terminal: Send {
    /// Asks a question and returns the raw answer (untrimmed).
    ///
    /// A prompt cut short by Ctrl-C fails with [`io::ErrorKind::Interrupted`].
    async fn ask(&mut self, prompt: &str) -> io::Result<String>;

    /// Shows a line of output to the operator.
    fn say(&mut self, text: &str);
}

/// Interactive terminal backed by `dialoguer`.
///
/// Prompts run on the blocking thread pool so the async side (and the
/// interrupt handler in particular) stays responsive while waiting for input.
/// When stdin is not a TTY, answers are read line by line instead, which
/// keeps the tools scriptable: `echo "a@b.co" | lms-admin`.
#[derive(Debug, Default)]
pub struct DialoguerTerminal;

impl DialoguerTerminal {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Terminal for DialoguerTerminal {
    async fn ask(&mut self, prompt: &str) -> io::Result<String> {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            if io::stdin().is_terminal() {
                dialoguer::Input::<String>::new()
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text()
                    .map_err(io::Error::from)
            } else {
                read_answer(&prompt, &mut io::stdin().lock(), &mut io::stdout())
            }
        })
        .await
        .map_err(io::Error::other)?
    }

    fn say(&mut self, text: &str) {
        println!("{}", text);
    }
}

/// Writes `prompt: ` and reads one line, without its line ending.
fn read_answer<R, W>(prompt: &str, input: &mut R, output: &mut W) -> io::Result<String>
where
    R: BufRead,
    W: Write,
{
    write!(output, "{}: ", prompt)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Terminal that replays canned answers and records everything shown.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    answers: std::collections::VecDeque<String>,
    pub prompts: Vec<String>,
    pub output: Vec<String>,
}

#[cfg(any(test, feature = "test-utils"))]
impl ScriptedTerminal {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            output: Vec::new(),
        }
    }

    /// Everything shown so far, joined with newlines.
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[async_trait]
impl Terminal for ScriptedTerminal {
    async fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, format!("no answer for '{}'", prompt))
        })
    }

    fn say(&mut self, text: &str) {
        self.output.push(text.to_string());
    }
}
