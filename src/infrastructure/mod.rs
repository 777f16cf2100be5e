//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all process and terminal I/O.
//!
//! ## Structure
//!
//! - `process` - Child process supervision (timeouts, cancellation)
//! - `ssh` - RemoteShell over the system `ssh` client
//! - `rsync` - ContentTransfer over the system `rsync` client
//! - `prompt` - Interactive confirmation via dialoguer
//! - `events/` - Console and JSON event sinks

pub mod events;
pub mod process;
pub mod prompt;
pub mod rsync;
pub mod ssh;

pub use events::{ConsoleEventSink, JsonEventSink};
pub use prompt::DialoguerPrompter;
pub use rsync::RsyncTransfer;
pub use ssh::SshShell;
