// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Save location prompting and folder reveal.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, info, warn};

/// Extension given to paths entered without one
pub const MIDI_EXTENSION: &str = "mid";

/// Something that can pick where the MIDI file goes.
///
/// Only invoked once data has been collected.
pub trait SavePrompt {
    /// Ask for a save path.
    ///
    /// # Returns
    /// * `Ok(Some(path))` when a path was chosen
    /// * `Ok(None)` when the user canceled
    fn ask(&mut self) -> io::Result<Option<PathBuf>>;
}

/// A path fixed up front (e.g. from `--output`)
#[derive(Debug, Clone)]
pub struct FixedPath(pub PathBuf);

impl SavePrompt for FixedPath {
    fn ask(&mut self) -> io::Result<Option<PathBuf>> {
        Ok(Some(self.0.clone()))
    }
}

/// Line-based prompt on a terminal
pub struct TerminalPrompt<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> SavePrompt for TerminalPrompt<R, W> {
    fn ask(&mut self) -> io::Result<Option<PathBuf>> {
        write!(self.output, "Save MIDI file as (empty to cancel): ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let answer = line.trim();
        if answer.is_empty() {
            return Ok(None);
        }
        Ok(Some(with_midi_extension(PathBuf::from(answer))))
    }
}

/// Append `.mid` to paths that have no extension
pub fn with_midi_extension(path: PathBuf) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(MIDI_EXTENSION)
    }
}

/// Folder holding `file`, resolved against the working directory
fn containing_folder(file: &Path) -> io::Result<PathBuf> {
    let absolute = if file.is_absolute() {
        file.to_path_buf()
    } else {
        std::env::current_dir()?.join(file)
    };
    Ok(absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(absolute))
}

fn opener() -> &'static str {
    if cfg!(windows) {
        "explorer"
    } else if cfg!(target_os = "macos") {
        "open"
    } else {
        "xdg-open"
    }
}

/// Open the folder containing `file` in the platform file browser.
///
/// Returns once the browser has been launched; it is not waited on.
pub fn reveal_folder(file: &Path) -> io::Result<PathBuf> {
    let folder = containing_folder(file)?;
    info!(folder = %folder.display(), "opening folder");

    let mut command = Command::new(opener());
    command.arg(&folder);
    spawn_detached(command)?;
    Ok(folder)
}

/// Spawn `command` with null stdio and reap it on a background thread.
///
/// Returns the child's pid without waiting for it to exit.
fn spawn_detached(mut command: Command) -> io::Result<u32> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    let pid = child.id();
    debug!(pid, "file browser launched");

    thread::spawn(move || match child.wait() {
        Ok(status) => debug!(pid, %status, "file browser exited"),
        Err(e) => warn!(pid, error = %e, "could not wait on file browser"),
    });
    Ok(pid)
}
