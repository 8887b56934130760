//! System clipboard with fallbacks on external tools
use std::{
    fmt,
    io::{self, Write},
    process::{Command, Stdio},
    thread::{self, sleep},
    time::{Duration, Instant},
};

use log::debug;

use crate::errors::{MirrorKitError, MirrorKitErrorKind};

/// Maximum time given to an external clipboard tool
pub const EXTERNAL_TOOL_TIMEOUT: Duration = Duration::from_secs(5);

/// Interval between two checks of an external tool
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Arguments of `wl-copy`
const WL_COPY_ARGS: &[&str] = &[];

/// Arguments of `xclip`
const XCLIP_ARGS: &[&str] = &["-selection", "clipboard"];

/// Arguments of `xsel`
const XSEL_ARGS: &[&str] = &["--clipboard", "--input"];

/// One way of setting the clipboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardStrategy {
    /// Native clipboard through arboard
    Native,

    /// Wayland `wl-copy`
    WlCopy,

    /// X11 `xclip`
    Xclip,

    /// X11 `xsel`
    Xsel,
}

/// Failure of a single clipboard attempt
#[derive(Debug)]
pub enum AttemptError {
    /// Native clipboard error
    Native(arboard::Error),

    /// The tool could not be started
    Spawn(io::Error),

    /// The text could not be written to the tool
    Stdin(io::Error),

    /// The tool could not be waited on
    Wait(io::Error),

    /// The tool exited with a failure status
    Status(Option<i32>),

    /// The tool didn't finish in time
    Timeout,
}

impl fmt::Display for AttemptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptError::Native(e) => write!(f, "{e}"),
            AttemptError::Spawn(e) => write!(f, "unable to start: {e}"),
            AttemptError::Stdin(e) => write!(f, "unable to write input: {e}"),
            AttemptError::Wait(e) => write!(f, "unable to wait: {e}"),
            AttemptError::Status(Some(code)) => write!(f, "exited with status {code}"),
            AttemptError::Status(None) => write!(f, "terminated by signal"),
            AttemptError::Timeout => write!(f, "timed out"),
        }
    }
}

impl std::error::Error for AttemptError {}

impl ClipboardStrategy {
    /// Strategies in the order they are tried
    ///
    /// On Linux an X11 selection set by arboard dies with the process, so the
    /// external tools, which keep serving it, come first.
    #[cfg(target_os = "linux")]
    pub const ORDER: [ClipboardStrategy; 4] = [
        ClipboardStrategy::WlCopy,
        ClipboardStrategy::Xclip,
        ClipboardStrategy::Xsel,
        ClipboardStrategy::Native,
    ];

    /// Strategies in the order they are tried
    #[cfg(not(target_os = "linux"))]
    pub const ORDER: [ClipboardStrategy; 4] = [
        ClipboardStrategy::Native,
        ClipboardStrategy::WlCopy,
        ClipboardStrategy::Xclip,
        ClipboardStrategy::Xsel,
    ];

    /// External program and arguments, `None` for the native clipboard
    pub fn command(&self) -> Option<(&'static str, &'static [&'static str])> {
        match self {
            ClipboardStrategy::Native => None,
            ClipboardStrategy::WlCopy => Some(("wl-copy", WL_COPY_ARGS)),
            ClipboardStrategy::Xclip => Some(("xclip", XCLIP_ARGS)),
            ClipboardStrategy::Xsel => Some(("xsel", XSEL_ARGS)),
        }
    }

    /// Try to put `text` on the clipboard with this strategy
    /// # Errors
    /// Error describing why this attempt failed
    pub fn try_copy(&self, text: &str) -> Result<(), AttemptError> {
        match self.command() {
            None => copy_native(text),
            Some((program, args)) => run_external(program, args, text, EXTERNAL_TOOL_TIMEOUT),
        }
    }
}

impl fmt::Display for ClipboardStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.command() {
            None => write!(f, "native clipboard"),
            Some((program, _)) => write!(f, "{program}"),
        }
    }
}

/// Copy with arboard
///
/// On Linux the selection is served until another client takes it over or
/// the timeout elapses.
fn copy_native(text: &str) -> Result<(), AttemptError> {
    let mut clipboard = arboard::Clipboard::new().map_err(AttemptError::Native)?;
    #[cfg(target_os = "linux")]
    {
        use arboard::SetExtLinux;
        clipboard
            .set()
            .wait_until(Instant::now() + EXTERNAL_TOOL_TIMEOUT)
            .text(text.to_owned())
            .map_err(AttemptError::Native)
    }
    #[cfg(not(target_os = "linux"))]
    {
        clipboard
            .set_text(text.to_owned())
            .map_err(AttemptError::Native)
    }
}

/// Kill `child` and reap it
fn kill(child: &mut std::process::Child) {
    let _ = child.kill();
    let _ = child.wait();
}

/// Pipe `text` to `program` and wait at most `limit` for it to succeed
///
/// Input is written from a helper thread so a tool that never reads it is
/// still bounded by `limit`.
fn run_external(
    program: &str,
    args: &[&str],
    text: &str,
    limit: Duration,
) -> Result<(), AttemptError> {
    let deadline = Instant::now() + limit;
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(AttemptError::Spawn)?;
    let writer = child.stdin.take().map(|mut stdin| {
        let data = text.as_bytes().to_vec();
        thread::spawn(move || stdin.write_all(&data))
    });
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) if Instant::now() >= deadline => {
                kill(&mut child);
                return Err(AttemptError::Timeout);
            }
            Ok(None) => sleep(POLL_INTERVAL),
            Err(e) => {
                kill(&mut child);
                return Err(AttemptError::Wait(e));
            }
        }
    };
    if let Some(writer) = writer {
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(AttemptError::Stdin(e)),
            Err(_) => return Err(AttemptError::Stdin(io::Error::other("input writer panicked"))),
        }
    }
    if status.success() {
        Ok(())
    } else {
        Err(AttemptError::Status(status.code()))
    }
}

/// Try each of `strategies` in order with `attempt` until one succeeds
/// # Errors
/// `ClipboardUnavailable` when every strategy failed
pub fn copy_with<S, F>(strategies: &[S], text: &str, mut attempt: F) -> Result<S, MirrorKitError>
where
    S: Copy + fmt::Display,
    F: FnMut(&S, &str) -> Result<(), AttemptError>,
{
    for strategy in strategies {
        match attempt(strategy, text) {
            Ok(()) => {
                debug!("Copied with {strategy}");
                return Ok(*strategy);
            }
            Err(e) => debug!("Clipboard with {strategy} failed: {e}"),
        }
    }
    Err(MirrorKitError::new(MirrorKitErrorKind::ClipboardUnavailable)
        .with_text("install wl-clipboard or xclip/xsel"))
}

/// Copy `text` to the system clipboard
/// # Errors
/// `ClipboardUnavailable` when no strategy worked
pub fn copy_to_clipboard(text: &str) -> Result<ClipboardStrategy, MirrorKitError> {
    copy_with(&ClipboardStrategy::ORDER, text, ClipboardStrategy::try_copy)
}
