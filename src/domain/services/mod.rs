//! Domain Services
//!
//! Pure decision logic with no I/O.

mod outcome;

pub use outcome::{classify_service_error, ToleratedOutcome, ToleratedReason};
