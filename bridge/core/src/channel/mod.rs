//! UI Channel Layer
//!
//! Abstraction over how messages reach the UI process's inbound ports:
//! - `InProcess`: tokio channels, for an embedded UI or a local harness
//!
//! Relays only ever see the [`UiChannel`] trait, so tests substitute a fake
//! that records what was pushed.

pub mod in_process;
pub mod traits;

// Re-exports for convenience
pub use in_process::InProcessUiChannel;
pub use traits::{ChannelError, UiChannel};
