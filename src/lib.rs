//! Raysurfer code-caching client.
//!
//! The [`api`] module is usable on its own for embedding; [`command`] and
//! [`cli`] back the `raysurfer` binary.

pub mod api;
pub mod cli;
pub mod command;
pub mod error;

#[cfg(test)]
mod test_support;

pub use api::{ApiError, BlockingRaysurferClient, ClientConfig, RaysurferClient};
pub use error::CliError;
