//! # Function Boundary
//!
//! The externally visible side of the resolver: the invocation handler, the
//! JSON envelope, and the HTTP server that hosts them.

mod error;
pub mod handler;
mod response;
pub mod server;

pub use error::ResolveError;
pub use handler::{get_latest_artifact, invoke};
pub use response::{ApiResponse, FunctionResponse};
pub use server::{router, start_server, FunctionState};
