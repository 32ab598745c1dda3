//! Presigned image upload Lambda

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Identity claims from the authorizer
pub mod claims;

/// Content type to file extension mapping
pub mod extension;

/// Upload request handler
pub mod handler;

/// Object key generation
pub mod object_key;

/// Presigned URL generation
pub mod presign;

/// Upload request body
pub mod request;

/// Configuration, errors and event shapes
pub mod types;
