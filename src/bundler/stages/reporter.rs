//! Completion report and operator acknowledgment.

use crate::bundler::{BuildResult, utils::fs};
use crate::cli::OutputManager;
use std::io::IsTerminal;

/// Prompt shown before waiting for the operator.
pub const ACK_PROMPT: &str = "Press any key to continue . . .";

/// Tells the operator where the executable is and holds the session open.
#[derive(Debug)]
pub struct CompletionReporter<'a> {
    output: &'a OutputManager,
    pause: bool,
}

impl<'a> CompletionReporter<'a> {
    pub fn new(output: &'a OutputManager, pause: bool) -> Self {
        Self { output, pause }
    }

    /// Report lines for `result`, without styling.
    pub fn render(result: &BuildResult) -> Vec<String> {
        vec![
            format!("Build complete: {}", result.display_name),
            format!("Executable: {}", result.artifact.display()),
            format!("Size:       {}", fs::format_size(result.size)),
            format!("SHA-256:    {}", result.sha256),
            "Find the executable in the dist folder.".to_string(),
        ]
    }

    /// Prints the report and, if configured, waits for acknowledgment.
    ///
    /// Nothing here fails the build: a broken terminal only produces warnings.
    pub async fn report(&self, result: &BuildResult) {
        let mut lines = Self::render(result).into_iter();
        if let Some(headline) = lines.next() {
            self.output.success(&headline);
        }
        for line in lines {
            self.output.indent(&line);
        }

        if self.pause {
            self.wait_for_acknowledgment().await;
        }
    }

    /// One key on an attended terminal; otherwise one line or EOF from stdin.
    async fn wait_for_acknowledgment(&self) {
        self.output.prompt(ACK_PROMPT);
        let stdout = self.output.stdout_term();
        let stderr = self.output.stderr_term();
        let source = key_source(
            std::io::stdin().is_terminal(),
            stdout.is_term(),
            stderr.is_term(),
        );
        log::debug!("Waiting for acknowledgment via {source:?}");

        let waited = tokio::task::spawn_blocking(move || match source {
            KeySource::Stdout => stdout.read_key().map(|_| ()),
            KeySource::Stderr => stderr.read_key().map(|_| ()),
            KeySource::Line => {
                let mut line = String::new();
                std::io::stdin().read_line(&mut line).map(|_| ())
            }
        })
        .await;

        match waited {
            Ok(Ok(())) => log::debug!("Operator acknowledged"),
            Ok(Err(e)) => log::warn!("Could not read acknowledgment: {e}"),
            Err(e) => log::warn!("Acknowledgment task panicked: {e}"),
        }
    }
}

/// Where the acknowledgment is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeySource {
    /// Single key through the stdout terminal.
    Stdout,
    /// Single key through the stderr terminal, stdout being redirected.
    Stderr,
    /// One line from stdin.
    Line,
}

/// An interactive stdin gets a single-key read through whichever output
/// stream is still a terminal.
fn key_source(stdin_tty: bool, stdout_tty: bool, stderr_tty: bool) -> KeySource {
    match (stdin_tty, stdout_tty, stderr_tty) {
        (true, true, _) => KeySource::Stdout,
        (true, false, true) => KeySource::Stderr,
        _ => KeySource::Line,
    }
}
