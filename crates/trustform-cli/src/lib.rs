//! Trustform CLI library.
//!
//! This library provides the process boundary for the trust document
//! pipeline: the JSON request/response protocol, artifact loading, and
//! the orchestration that connects the extraction engine to the
//! assembly core.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod protocol;
pub mod resources;

pub use cli::Cli;
pub use error::{CliError, Result};
pub use protocol::{ErrorBody, ProcessRequest, ProcessResponse};
