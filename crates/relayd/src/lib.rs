//! Relay daemon library - exposes modules for testing.

pub mod config;
pub mod enrichment;
pub mod llm;
pub mod prompts;
pub mod routes;
pub mod server;
