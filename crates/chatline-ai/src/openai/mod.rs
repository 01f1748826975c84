//! OpenAI-compatible completion client.
//!
//! Implements `Generator` against the completions, edits and chat
//! completions endpoints. Any server exposing the same routes works by
//! changing the base URL.

mod api;
mod client;
mod config;


pub use client::{clean_whitespace, OpenAiClient, CODE_MODEL};
pub use config::OpenAiConfig;
