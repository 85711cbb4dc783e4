//! Object storage backends
//!
//! Implementations of [`audiobook_core::ObjectStore`]:
//!
//! - [`LocalObjectStore`] writes blobs below a directory, for development
//!   and self-hosted setups served by any static file server.
//! - [`HttpObjectStore`] uploads with `PUT {endpoint}/{key}`, which fits
//!   storage APIs and buckets behind a signing proxy.
//! - [`S3ObjectStore`] sends SigV4-signed `PutObject` requests to S3 or an
//!   S3-compatible service such as Cloudflare R2.
//!
//! All of them return `{public_base_url}/{key}` as the public URL.

mod error;
mod http;
mod local;
mod s3;

pub use error::{ObjectStoreError, Result};
pub use http::{HttpObjectStore, HttpObjectStoreConfig};
pub use local::LocalObjectStore;
pub use s3::{S3ObjectStore, S3ObjectStoreConfig};
