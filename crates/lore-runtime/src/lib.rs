//! # lore-runtime
//!
//! Owns one store and every engine built on it. Engine calls are blocking,
//! so each runs on tokio's blocking pool under its deadline; validation and
//! synthesis are additionally bounded by semaphores.

pub mod runtime;
pub mod tracing_setup;

pub use runtime::{LoreRuntime, PipelineReport, RuntimeOptions};
