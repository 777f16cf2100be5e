//! Remote Filesystem Operations
//!
//! Idempotent directory primitives built on the executor. Each is phrased so
//! repeated application is safe.

use crate::domain::ports::RemoteError;
use crate::domain::value_objects::{quote, Script};

use super::executor::{ExecOptions, RemoteExecutor};

/// Printed by the move guard when the source is absent
pub const NOTHING_TO_MOVE_MARKER: &str = "### CUTOVER: NOTHING TO MOVE ###";

/// Result of `move_path`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Source did not exist; a normal first-deploy condition
    SourceMissing,
}

pub struct RemoteFilesystem<'a> {
    exec: &'a RemoteExecutor<'a>,
}

impl<'a> RemoteFilesystem<'a> {
    pub fn new(exec: &'a RemoteExecutor<'a>) -> Self {
        Self { exec }
    }

    /// `mkdir -p`: no error if already present
    pub fn ensure_directory(&self, path: &str) -> Result<(), RemoteError> {
        self.exec.execute(
            &Script::line(format!("mkdir -p {}", quote(path))),
            ExecOptions::default(),
        )?;
        Ok(())
    }

    /// `rm -fr`: no error if absent
    pub fn remove_directory(&self, path: &str) -> Result<(), RemoteError> {
        self.exec.execute(
            &Script::line(format!("rm -fr {}", quote(path))),
            ExecOptions::default(),
        )?;
        Ok(())
    }

    /// Rename `src` to `dst`; an absent `src` is tolerated.
    pub fn move_path(&self, src: &str, dst: &str) -> Result<MoveOutcome, RemoteError> {
        let src_q = quote(src);
        let script = Script::line(format!(
            "[ -e {src_q} ] || [ -L {src_q} ] || {{ echo {}; exit 0; }}",
            quote(NOTHING_TO_MOVE_MARKER)
        ))
        .then(format!("mv {} {}", src_q, quote(dst)));

        let result = self.exec.execute(&script, ExecOptions::default())?;
        if result.stdout.contains(NOTHING_TO_MOVE_MARKER) {
            Ok(MoveOutcome::SourceMissing)
        } else {
            Ok(MoveOutcome::Moved)
        }
    }

    /// Replace `link_path` with a symlink to `dest`.
    ///
    /// Two phases, two round trips: remove whatever is at `link_path`, then
    /// create the link. A crash between them leaves `link_path` absent, never
    /// pointing at a removed destination.
    pub fn symlink(&self, link_path: &str, dest: &str) -> Result<(), RemoteError> {
        self.exec.execute(
            &Script::line(format!("rm -f {}", quote(link_path))),
            ExecOptions::default(),
        )?;
        self.exec.execute(
            &Script::line(format!("ln -s {} {}", quote(dest), quote(link_path))),
            ExecOptions::default(),
        )?;
        Ok(())
    }
}
