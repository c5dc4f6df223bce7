//! Shared types for the commtrainer workspace: configuration, the common
//! error type, provider-agnostic chat messages, and structured trace events.

pub mod config;
pub mod error;
pub mod message;
pub mod trace;
