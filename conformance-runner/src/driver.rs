// Copyright (c) The route-conformance Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Drives one invocation of the planner binary.
//!
//! The driver owns everything transport-level: spawning the child, feeding it
//! the scripted transcript, accumulating its output, and enforcing the
//! wall-clock timeout. What the captured text *means* is the parser's and
//! validator's business.

use bytes::BytesMut;
use camino::Utf8Path;
use std::{io, process::Stdio, time::Duration};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader},
    process::{ChildStderr, ChildStdout, Command},
};
use tracing::debug;

/// The raw result of driving one scenario through the planner process.
#[derive(Clone, Debug)]
pub enum ExecutionOutcome {
    /// The process could not be run to completion.
    TransportFailure(TransportFailureKind),
    /// The process ran to completion; this is its combined textual output.
    ///
    /// The exit status is deliberately not recorded: the planner's exit-code
    /// contract is unspecified, so verdicts are judged from printed content
    /// only.
    RawText(String),
}

/// Why a process invocation failed before producing usable output.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransportFailureKind {
    /// The configured program path does not resolve to an invocable program.
    ExecutableMissing,
    /// The process did not exit within the wall-clock timeout and was
    /// forcibly terminated. Terminal for the scenario; there are no retries.
    Timeout,
}

/// The size of each buffered reader's buffer, and the granularity at which
/// the combined buffer grows.
const CHUNK_SIZE: usize = 4 * 1024;

/// Runs `program`, writes `transcript` to its stdin, and captures its
/// combined stdout and stderr until it exits or `timeout` elapses.
///
/// On timeout the child is killed and any partially captured output is
/// discarded. This function never returns an error: every failure mode is an
/// explicit [`ExecutionOutcome`] variant.
pub async fn drive(program: &Utf8Path, transcript: &str, timeout: Duration) -> ExecutionOutcome {
    if !program.is_file() {
        debug!(%program, "target executable not found");
        return ExecutionOutcome::TransportFailure(TransportFailureKind::ExecutableMissing);
    }

    let mut child = match Command::new(program.as_std_path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(error) => {
            debug!(%program, %error, "failed to spawn target executable");
            return ExecutionOutcome::TransportFailure(TransportFailureKind::ExecutableMissing);
        }
    };

    debug!(%program, ?timeout, "planner process spawned");

    // Write the whole transcript up front and close stdin to signal
    // end-of-input. The planner may exit before consuming every line (e.g.
    // when it rejects a location), so a broken pipe here is not an error.
    if let Some(mut stdin) = child.stdin.take() {
        let _ = stdin.write_all(transcript.as_bytes()).await;
        let _ = stdin.shutdown().await;
    }

    let stdout = child.stdout.take().expect("stdout was piped");
    let stderr = child.stderr.take().expect("stderr was piped");
    let mut acc = OutputAccumulator::new(stdout, stderr);

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            () = acc.fill_buf(), if !acc.is_done() => {}
            res = child.wait() => {
                if let Err(error) = res {
                    // Extremely rare (the child was already reaped); treat it
                    // like a vanished executable rather than invent output.
                    debug!(%error, "waiting on planner process failed");
                    return ExecutionOutcome::TransportFailure(
                        TransportFailureKind::ExecutableMissing,
                    );
                }
                break;
            }
            () = &mut deadline => {
                debug!(%program, "timeout hit, killing planner process");
                // There is a race between killing a slow process and its own
                // completion; either way the verdict is a timeout, so errors
                // here are ignored.
                let _ = child.start_kill();
                let _ = child.wait().await;
                return ExecutionOutcome::TransportFailure(TransportFailureKind::Timeout);
            }
        }
    }

    // The child has exited but the pipes may still hold buffered output.
    while !acc.is_done() {
        acc.fill_buf().await;
    }

    ExecutionOutcome::RawText(acc.into_text())
}

/// A `BufReader` over an `AsyncRead` that remembers whether it has hit
/// end-of-file, so it can be polled past completion inside a select loop.
struct FusedReader<R> {
    reader: BufReader<R>,
    done: bool,
}

impl<R: AsyncRead + Unpin> FusedReader<R> {
    fn new(reader: R) -> Self {
        Self {
            reader: BufReader::with_capacity(CHUNK_SIZE, reader),
            done: false,
        }
    }

    async fn fill_buf(&mut self, acc: &mut BytesMut) -> io::Result<()> {
        if self.done {
            return Ok(());
        }
        match self.reader.fill_buf().await {
            Ok(buf) => {
                acc.extend_from_slice(buf);
                if buf.is_empty() {
                    self.done = true;
                }
                let len = buf.len();
                self.reader.consume(len);
                Ok(())
            }
            Err(error) => {
                self.done = true;
                Err(error)
            }
        }
    }
}

/// Accumulates a child's stdout and stderr into one combined text buffer.
struct OutputAccumulator {
    stdout: FusedReader<ChildStdout>,
    stderr: FusedReader<ChildStderr>,
    stdout_buf: BytesMut,
    stderr_buf: BytesMut,
}

impl OutputAccumulator {
    fn new(stdout: ChildStdout, stderr: ChildStderr) -> Self {
        Self {
            stdout: FusedReader::new(stdout),
            stderr: FusedReader::new(stderr),
            stdout_buf: BytesMut::with_capacity(CHUNK_SIZE),
            stderr_buf: BytesMut::with_capacity(CHUNK_SIZE),
        }
    }

    /// Makes progress on whichever stream has data available. Cancel-safe,
    /// since the underlying `fill_buf` is cancel-safe.
    async fn fill_buf(&mut self) {
        let stdout_done = self.stdout.done;
        let stderr_done = self.stderr.done;
        let res = tokio::select! {
            res = self.stdout.fill_buf(&mut self.stdout_buf), if !stdout_done => res,
            res = self.stderr.fill_buf(&mut self.stderr_buf), if !stderr_done => res,
            else => Ok(()),
        };
        if let Err(error) = res {
            // A read error ends that stream; the other may still produce the
            // markers we need.
            debug!(%error, "error reading planner output");
        }
    }

    fn is_done(&self) -> bool {
        self.stdout.done && self.stderr.done
    }

    /// Freezes the accumulated bytes into the combined text: stdout first,
    /// then stderr. Invalid UTF-8 is replaced rather than rejected -- the
    /// parser is tolerant of surrounding garbage.
    fn into_text(self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout_buf).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr_buf));
        text
    }
}
