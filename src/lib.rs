#![crate_name = "genconf"]

//! genconf turns the short, user-facing config of a personal content-addressed
//! storage server into the low-level config the server actually loads.
//!
//! The high-level config names an identity, a blob storage backend (local disk,
//! S3, or both), at most one index backend and optionally some published roots.
//! The low-level config is a map from URL path prefix to handler descriptor;
//! descriptors refer to each other by prefix, e.g. the root handler's
//! `blobRoot` points at `/bs/`.
//!
//! ## Topology
//!
//! With an index, writes go through `/bs-and-maybe-also-index/`, which sends
//! schema blobs to both `/bs/` and the indexer and everything else to `/bs/`
//! only. Search (`/my-search/`) and the UI (`/ui/`) only exist with an index.
//!
//! S3 is bound to `/bs/` when it is the only storage. Next to local disk it is
//! bound to `/sto-s3/` and kept in sync from `/bs/` by `/sync-to-s3/`.
//!
//! ## Guarantees
//!
//! No two rules may claim the same prefix, and every prefix a descriptor
//! refers to is defined in the same config. Either violation fails the
//! compilation; there is never partial output.
//!
//! ## Side effects
//!
//! Compiling creates the blob cache directory (mode `0700`) if it is missing.
//! The host environment is reached only through [topology::Environment].

pub mod error;

/// Typed access to the high-level config document.
pub mod options;

/// Structural decisions: index backend, local disk or S3, cache location.
pub mod topology;

/// Handler descriptors and the closed set of handler kinds.
pub mod handler;

/// The prefix to handler map.
pub mod prefix;

/// Rules that add handlers to the prefix map.
pub mod builder;

pub mod publish;

pub mod validate;

/// The compiler entry point.
pub mod compile;

/// Signing key lookup for the server identity.
pub mod sign;

pub mod blobref;

pub use compile::{
    Compiler,
    LowLevelConfig,
};
pub use error::ConfigError;
pub use options::Options;
