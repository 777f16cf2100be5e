//! Console presentation: design tokens, styled text, the per-run UI
//! context and plain output helpers.

pub mod context;
pub mod output;
pub mod text;
pub mod theme;

pub use context::UiContext;
pub use text::ColoredText;
