//! HTTP contract with the external matching backend.
//!
//! `types` mirrors the wire shapes; `client` owns the reqwest plumbing.

pub mod client;
pub mod types;

pub use client::{BackendClient, DEFAULT_API_BASE_URL};
