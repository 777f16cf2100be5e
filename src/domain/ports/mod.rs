//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod content_transfer;
pub mod deploy_events;
pub mod prompter;
pub mod remote_shell;

pub use content_transfer::{ContentTransfer, TransferError, TransferOutput};
pub use deploy_events::{
    DeployEvent, DeployEventSink, NoopEventSink, Pipeline, ServiceAction, Step,
};
pub use prompter::{FixedAnswer, PromptError, Prompter};
pub use remote_shell::{RemoteCommandResult, RemoteError, RemoteShell};
