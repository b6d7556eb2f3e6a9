//! The Kraken REST API client.
//!
//! [`RestClient`] covers the public market-data endpoints and the signed
//! private endpoints. Every call resolves to a [`ResponseEnvelope`], the
//! uniform `{error, result}` shape the exchange wraps all responses in.

mod client;
mod endpoints;
mod envelope;
pub mod private;
pub mod public;

pub use client::{RestClient, RestClientBuilder};
pub use endpoints::{EndpointConfig, KRAKEN_API_URL, KRAKEN_API_VERSION};
pub use envelope::ResponseEnvelope;
pub use private::*;
pub use public::*;
