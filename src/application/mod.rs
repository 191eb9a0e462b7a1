//! Application layer containing the lifecycle orchestration.
//!
//! This module defines the `LifecycleEngine`, the single entry point for every
//! invoice and payment request transition, and the typed `Operation` set it
//! accepts. Calls are awaited one at a time; the host is expected to serialize
//! them.

pub mod engine;
pub mod operation;
