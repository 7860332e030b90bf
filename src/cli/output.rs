//! Operator-facing terminal output.
//!
//! Writes never fail a run: a closed or detached terminal is logged at debug
//! level and the pipeline carries on. Only tool and filesystem errors decide
//! whether a stage failed.

use console::{Term, style};

/// Styled output for progress, tool logs, and results.
///
/// Quiet mode keeps errors, warnings and tool stderr; verbose mode adds
/// detail lines.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
    stdout: Term,
    stderr: Term,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            stdout: Term::stdout(),
            stderr: Term::stderr(),
        }
    }

    /// Stage header.
    pub fn section(&self, title: &str) {
        if self.quiet {
            return;
        }
        emit(&self.stdout, "");
        emit(
            &self.stdout,
            &format!("{}", style(format!("==> {title}")).cyan().bold()),
        );
    }

    pub fn progress(&self, message: &str) {
        if self.quiet {
            return;
        }
        emit(&self.stdout, &format!("{} {message}", style("•").blue()));
    }

    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        emit(
            &self.stdout,
            &format!("{} {message}", style("✓").green().bold()),
        );
    }

    pub fn warn(&self, message: &str) {
        emit(
            &self.stderr,
            &format!("{} {message}", style("⚠").yellow().bold()),
        );
    }

    /// Always shown.
    pub fn error(&self, message: &str) {
        emit(&self.stderr, &format!("{} {message}", style("✗").red().bold()));
    }

    /// Indented detail, e.g. a tool's stdout.
    pub fn indent(&self, message: &str) {
        if self.quiet {
            return;
        }
        emit(&self.stdout, &format!("    {message}"));
    }

    /// Indented tool diagnostics on stderr.
    pub fn indent_err(&self, message: &str) {
        emit(&self.stderr, &format!("    {}", style(message).dim()));
    }

    pub fn verbose(&self, message: &str) {
        if !self.verbose || self.quiet {
            return;
        }
        emit(&self.stdout, &format!("{}", style(message).dim()));
    }

    /// Prompt without a trailing newline; shown even in quiet mode.
    pub fn prompt(&self, message: &str) {
        if let Err(e) = self
            .stdout
            .write_str(message)
            .and_then(|()| self.stdout.flush())
        {
            log::debug!("Could not write prompt: {e}");
        }
    }

    /// Handle on stdout.
    pub fn stdout_term(&self) -> Term {
        self.stdout.clone()
    }

    /// Handle on stderr.
    pub fn stderr_term(&self) -> Term {
        self.stderr.clone()
    }
}

fn emit(term: &Term, line: &str) {
    if let Err(e) = term.write_line(line) {
        log::debug!("Dropped output line: {e}");
    }
}
