//! Provider client for the `clever` lifecycle tool.
//!
//! The tool only speaks human-readable text, so every call is reduced to a
//! [`ToolOutput`] by comparing its stdout with a known sentence. The
//! [`ProviderClient`] builds the create and delete flows on top of the
//! [`LifecycleTool`] port and keeps the local link state file consistent.

mod cli;
mod client;
mod error;
mod link_state;
mod tool;

pub use cli::CleverCli;
pub use client::ProviderClient;
pub use error::ClientError;
pub use link_state::{LinkStateFile, LINK_STATE_FILE};
pub use tool::{normalize_output, outputs_match, LifecycleTool, ToolCommand, ToolOutput};
