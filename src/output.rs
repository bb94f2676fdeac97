//! Destination of the rendered result: standard output or a named file.

use crate::constants::STDOUT_PLACEHOLDER;
use crate::error::{Error, Result};
use log::debug;
use std::convert::Infallible;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

/// Where rendered output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl FromStr for OutputTarget {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(if s == STDOUT_PLACEHOLDER {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(s))
        })
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "<stdout>"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Writes `content` in full to `target`.
///
/// A named file is created or truncated; its parent directory must exist.
/// The handle is closed on every return path.
pub fn write_output(content: &str, target: &OutputTarget) -> Result<()> {
    debug!("Writing {} bytes to {}", content.len(), target);
    let written = match target {
        OutputTarget::Stdout => write_all(io::stdout().lock(), content),
        OutputTarget::File(path) => File::create(path).and_then(|file| write_all(file, content)),
    };
    written.map_err(|source| Error::OutputWriteError { target: target.to_string(), source })
}

fn write_all<W: Write>(mut writer: W, content: &str) -> io::Result<()> {
    writer.write_all(content.as_bytes())?;
    writer.flush()
}
