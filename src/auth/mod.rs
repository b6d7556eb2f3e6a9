//! Authentication for private endpoints.
//!
//! This module provides:
//! - Credential handling with secure secret storage
//! - Strictly increasing nonce generation
//! - HMAC-SHA512 request signing

mod credentials;
mod nonce;
mod signature;

pub use credentials::{API_KEY_ENV, API_SECRET_ENV, Credentials};
pub use nonce::{NonceSource, RatchetNonce, SequentialNonce};
pub use signature::sign;
