//! # Runtime Module
//!
//! Startup for the function server: environment, logging, metrics, storage client.

pub mod initialization;

pub use initialization::*;
