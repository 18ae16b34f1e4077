//! Console collaborator.
//!
//! `PRINT` and the download progress messages go to standard output, `READ`
//! consumes one line of standard input. Output is flushed after every call so
//! a prompt printed just before a `READ` is visible while the read blocks.

use std::io;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Line-oriented console used by the script engine.
#[async_trait]
pub trait Console: Send {
    /// Write `text` without a trailing newline.
    async fn write(&mut self, text: &str) -> io::Result<()>;

    /// Write `text` followed by a newline.
    async fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.write(&format!("{}\n", text)).await
    }

    /// Read one line with its terminator removed. `None` at end of input.
    async fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// [`Console`] over the process's standard streams.
pub struct StdConsole {
    stdout: Stdout,
    stdin: BufReader<Stdin>,
}

impl StdConsole {
    pub fn new() -> Self {
        Self {
            stdout: tokio::io::stdout(),
            stdin: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for StdConsole {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Console for StdConsole {
    async fn write(&mut self, text: &str) -> io::Result<()> {
        self.stdout.write_all(text.as_bytes()).await?;
        self.stdout.flush().await
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stdin.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }
}

/// Drop a trailing `\n` or `\r\n`, nothing else.
pub fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}
