//! AI features powered by Claude API

pub mod client;
pub mod insights;
pub mod status;

pub use client::ClaudeClient;
