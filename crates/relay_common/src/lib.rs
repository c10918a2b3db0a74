//! Relay Common - Shared types and LLM-output cleanup for Prompt Relay.
//!
//! Everything both the daemon and the CLI need: the wire types for the
//! HTTP API and the best-effort JSON repair applied to model output.

pub mod cleanup;
pub mod prospects;
pub mod types;

pub use prospects::{parse_prospects, Prospect, ProspectError};
pub use types::*;
