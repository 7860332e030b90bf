//! Subprocess execution with live output streaming.
//!
//! Tools run with stdin detached so the operator's terminal stays free for
//! the final acknowledgment. Both output streams are forwarded line by line
//! while the tool runs; the tail of stderr is kept for the error message.

use crate::bundler::error::{Error, Result};
use crate::cli::OutputManager;
use std::collections::VecDeque;
use std::ffi::{OsStr, OsString};
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};

/// Number of stderr lines kept for diagnostics.
const STDERR_TAIL_LINES: usize = 20;

/// Grace period for a killed process to be reaped.
const KILL_GRACE: Duration = Duration::from_secs(10);

/// A program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    /// Command line for logs and error messages.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| {
                let part = part.to_string_lossy();
                if part.contains(' ') {
                    format!("\"{part}\"")
                } else {
                    part.into_owned()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Runs the command to completion, streaming its output.
    ///
    /// With `timeout` set, a tool that runs longer is killed and reported as
    /// [`Error::TimedOut`]. Without one this blocks until the tool exits.
    ///
    /// # Errors
    ///
    /// - [`Error::CommandFailed`] if the process cannot be spawned or awaited
    /// - [`Error::ToolExited`] on a non-zero exit
    /// - [`Error::TimedOut`] when the timeout elapses
    pub async fn run(&self, timeout: Option<Duration>, output: &OutputManager) -> Result<()> {
        let command = self.display();
        log::debug!("Running: {command}");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| Error::CommandFailed {
                command: command.clone(),
                error,
            })?;

        let (status, stderr_tail) = match timeout {
            Some(limit) => {
                let waited =
                    tokio::time::timeout(limit, stream_and_wait(&mut child, output)).await;
                match waited {
                    Ok(result) => result,
                    Err(_elapsed) => {
                        output.warn(&format!(
                            "{command} exceeded {}s, terminating...",
                            limit.as_secs()
                        ));
                        if let Err(e) = child.kill().await {
                            log::warn!("Failed to kill {command}: {e}");
                        }
                        let _ = tokio::time::timeout(KILL_GRACE, child.wait()).await;
                        return Err(Error::TimedOut {
                            command,
                            secs: limit.as_secs(),
                        });
                    }
                }
            }
            None => stream_and_wait(&mut child, output).await,
        };

        let status = status.map_err(|error| Error::CommandFailed {
            command: command.clone(),
            error,
        })?;

        if !status.success() {
            return Err(Error::ToolExited {
                command,
                code: status.code(),
                stderr_tail,
            });
        }

        log::debug!("Finished: {command}");
        Ok(())
    }

    /// Runs the command silently and returns trimmed stdout on success.
    ///
    /// Used for quick probes such as `--version`.
    pub async fn capture(&self) -> Result<String> {
        let command = self.display();
        let out = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|error| Error::CommandFailed {
                command: command.clone(),
                error,
            })?;

        if !out.status.success() {
            return Err(Error::ToolExited {
                command,
                code: out.status.code(),
                stderr_tail: String::from_utf8_lossy(&out.stderr)
                    .lines()
                    .map(str::to_string)
                    .collect(),
            });
        }

        // Python 2 printed its version on stderr.
        let text = if out.stdout.is_empty() {
            out.stderr
        } else {
            out.stdout
        };
        Ok(String::from_utf8_lossy(&text).trim().to_string())
    }
}

/// Forwards both streams until they close, then waits for exit.
async fn stream_and_wait(
    child: &mut Child,
    output: &OutputManager,
) -> (std::io::Result<ExitStatus>, Vec<String>) {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let ((), tail) = tokio::join!(
        drain_lines(stdout, |line| output.indent(&line)),
        async {
            let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
            drain_lines(stderr, |line| {
                output.indent_err(&line);
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            })
            .await;
            tail
        }
    );

    (child.wait().await, tail.into_iter().collect())
}

/// Reads `reader` to EOF, handing each line to `on_line`.
///
/// Lines are decoded lossily: tools print in the locale encoding, and the
/// pipe must stay open until the child closes it.
async fn drain_lines<R>(reader: Option<R>, mut on_line: impl FnMut(String))
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return;
    };
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                on_line(String::from_utf8_lossy(line).into_owned());
            }
            Err(e) => {
                log::debug!("Stopped reading tool output: {e}");
                break;
            }
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn quiet() -> OutputManager {
        OutputManager::new(false, true)
    }

    #[tokio::test]
    async fn successful_command() {
        ToolCommand::new("sh")
            .args(["-c", "echo hello"])
            .run(None, &quiet())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_zero_exit_keeps_code_and_stderr() {
        let err = ToolCommand::new("sh")
            .args(["-c", "echo first >&2; echo boom >&2; exit 3"])
            .run(None, &quiet())
            .await
            .unwrap_err();
        match err {
            Error::ToolExited {
                code, stderr_tail, ..
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr_tail, vec!["first", "boom"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn stderr_tail_is_bounded() {
        let err = ToolCommand::new("sh")
            .args(["-c", "i=0; while [ $i -lt 50 ]; do echo line$i >&2; i=$((i+1)); done; exit 1"])
            .run(None, &quiet())
            .await
            .unwrap_err();
        let Error::ToolExited { stderr_tail, .. } = err else {
            panic!("expected ToolExited");
        };
        assert_eq!(stderr_tail.len(), STDERR_TAIL_LINES);
        assert_eq!(stderr_tail.last().map(String::as_str), Some("line49"));
    }

    #[tokio::test]
    async fn non_utf8_output_keeps_the_pipe_open() {
        ToolCommand::new("sh")
            .args([
                "-c",
                "printf '\\303\\342\\274\\256\\n'; sleep 0.2; echo more; echo done; exit 0",
            ])
            .run(None, &quiet())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn non_utf8_stderr_is_decoded_lossily() {
        let err = ToolCommand::new("sh")
            .args(["-c", "printf 'bad \\377 byte\\r\\n' >&2; sleep 0.2; echo after >&2; exit 1"])
            .run(None, &quiet())
            .await
            .unwrap_err();
        let Error::ToolExited { code, stderr_tail, .. } = err else {
            panic!("expected ToolExited");
        };
        assert_eq!(code, Some(1));
        assert_eq!(stderr_tail, vec!["bad \u{fffd} byte", "after"]);
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let err = ToolCommand::new("definitely-not-a-real-program-xyz")
            .run(None, &quiet())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::CommandFailed { .. }));
    }

    #[tokio::test]
    async fn timeout_kills_long_running_tool() {
        let err = ToolCommand::new("sleep")
            .arg("5")
            .run(Some(Duration::from_millis(200)), &quiet())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TimedOut { .. }));
    }

    #[tokio::test]
    async fn capture_returns_trimmed_stdout() {
        let out = ToolCommand::new("sh")
            .args(["-c", "echo '  Python 3.12.1  '"])
            .capture()
            .await
            .unwrap();
        assert_eq!(out, "Python 3.12.1");
    }

    #[test]
    fn display_quotes_arguments_with_spaces() {
        let cmd = ToolCommand::new("python")
            .args(["-m", "PyInstaller", "--name", "My App"]);
        assert_eq!(cmd.display(), "python -m PyInstaller --name \"My App\"");
    }
}
