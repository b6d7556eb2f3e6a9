//! # kraken-rest
//!
//! An async Rust client for the Kraken exchange REST API.
//!
//! ## Features
//!
//! - Public market-data endpoints and signed private endpoints
//! - Strictly increasing nonce generation, safe under concurrency
//! - HMAC-SHA512 request signing matching the documented scheme bit for bit
//! - Exchange errors surfaced as data on the response envelope
//! - Financial precision with `rust_decimal`
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use kraken_rest::rest::RestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::new()?;
//!     let time = client.server_time().await?.into_result()?;
//!     println!("Server time: {}", time.rfc1123);
//!     Ok(())
//! }
//! ```
//!
//! Private endpoints need credentials:
//!
//! ```rust,no_run
//! use kraken_rest::auth::Credentials;
//! use kraken_rest::rest::RestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RestClient::builder()
//!         .credentials(Credentials::new("api_key", "base64_api_secret"))
//!         .build()?;
//!     let balances = client.balance().await?.into_result()?;
//!     for (asset, amount) in balances {
//!         println!("{asset}: {amount}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at the crate root.
pub use error::{ClientError, ExchangeMessage, Severity};
pub use rest::{ResponseEnvelope, RestClient};
pub use types::{BuySell, OrderStatus, OrderType};

/// Result type alias using [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;
