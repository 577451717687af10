//! Atlassian HTTP adapter
//!
//! [`HttpTransport`] is the seam between the services and the network;
//! [`AtlassianHttpClient`] is its reqwest implementation.

pub mod client;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod mock;

pub use client::AtlassianHttpClient;
pub use error::{AtlassianError, Result};
pub use transport::{ApiRequest, HttpTransport, Method};
