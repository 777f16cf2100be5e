//! Deploy configuration
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (CUTOVER_*)
//! 3. Deploy file (`--config`, `.deploy.yml` or `.deploy.yaml`)
//! 4. Built-in defaults (lowest priority)

mod interpolate;
mod loader;
mod resolve;
mod types;

pub use interpolate::{interpolate, InterpolateError};
pub use loader::{
    discover, load_with_warnings, parse_with_warnings, with_env_overrides, ConfigWarning,
    CONFIG_FILE_NAMES,
};
pub use resolve::{ResolveOptions, ResolvedTarget, TransportSettings, DEFAULT_VERSION};
pub use types::{DeployFile, SettingsConfig, TargetConfig};
