use std::path::PathBuf;

use thiserror::Error;

/// Everything that can make a compilation fail.
///
/// Compilation stops at the first error; there is no partial output.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", .path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config is not a JSON object: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("missing required config key {key:?} (must be a string)")]
    MissingRequiredOption { key: String },

    #[error("config key {key:?} must be {expected}, got {found}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("unknown config key(s): {}", .keys.join(", "))]
    UnknownOption { keys: Vec<String> },

    #[error("invalid indexer selection: {0}")]
    InvalidIndexerSelection(String),

    #[error("you need at least one of blobPath (for localdisk) or s3 configured for a blobserver")]
    NoStorageConfigured,

    #[error("{0} env var not set; needed to define dbname")]
    MissingEnvironment(&'static str),

    #[error("could not create blobs cache dir {}: {source}", .path.display())]
    CacheDirUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("must set both HTTPSCertFile and HTTPSKeyFile (or neither to use a self-signed cert)")]
    IncompleteTLSConfig,

    #[error("malformed {backend} config string: got {value:?}, want {expected:?}")]
    MalformedConnectionString {
        backend: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("malformed s3 config string: got {value:?}, want \"access_key_id:secret_access_key:bucket\"")]
    MalformedS3Descriptor { value: String },

    #[error("publishing requires an index")]
    PublishingRequiresIndex,

    #[error("missing key {field:?} in publish config for {root}")]
    MissingPublishField { root: String, field: &'static str },

    #[error("unexpected key {field:?} in publish config for {root}")]
    UnknownPublishField { root: String, field: String },

    #[error("prefix {0} is claimed by more than one handler")]
    DuplicatePrefix(String),

    #[error("handler at {from} refers to undefined prefix {to}")]
    DanglingPrefix { from: String, to: String },

    #[error("no key {key_id} in secret ring {secret_ring}")]
    KeyNotFound { key_id: String, secret_ring: String },

    #[error("signing key {key_id}: {source}")]
    Signing {
        key_id: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
