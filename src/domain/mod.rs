//! Domain Layer
//!
//! Pure deployment vocabulary without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (DeploymentTarget, ReleaseLayout, Script)
//! - `services/` - Pure decision logic (service status classification)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never spawns processes or touches the terminal
//! 2. **Ports & Adapters** - All remote access goes through trait-defined ports

pub mod ports;
pub mod services;
pub mod value_objects;
