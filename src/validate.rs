//! Cross-cutting checks over the option set.
use crate::error::ConfigError;

const INDEXERS: &str = "mongo, mysql, postgres, sqlite, memIndex";

/// Default self-signed certificate, used when TLS is on without explicit files.
pub const DEFAULT_TLS_CERT: &str = "config/selfgen_pem.crt";
/// Default key matching [DEFAULT_TLS_CERT].
pub const DEFAULT_TLS_KEY: &str = "config/selfgen_pem.key";

pub fn indexer_count(run_index: bool, n: usize) -> Result<(), ConfigError> {
    let reason = match (run_index, n) {
        (true, 1) | (false, 0) => return Ok(()),
        (true, 0) => format!("unless runIndex is set to false, you must specify an index option ({})", INDEXERS),
        (true, _) => format!("with runIndex set true, you can only pick exactly one indexer ({})", INDEXERS),
        (false, _) => format!("with runIndex disabled, you can't specify any of {}", INDEXERS),
    };
    Err(ConfigError::InvalidIndexerSelection(reason))
}

pub fn storage(local_disk: bool, s3: bool) -> Result<(), ConfigError> {
    if !local_disk && !s3 {
        return Err(ConfigError::NoStorageConfigured);
    }
    Ok(())
}

/// Resolve the certificate and key files to emit, if TLS is on.
pub fn tls_files(https: bool, cert: &str, key: &str) -> Result<Option<(String, String)>, ConfigError> {
    if !https {
        return Ok(None);
    }
    match (cert.is_empty(), key.is_empty()) {
        (true, true) => Ok(Some((DEFAULT_TLS_CERT.to_string(), DEFAULT_TLS_KEY.to_string()))),
        (false, false) => Ok(Some((cert.to_string(), key.to_string()))),
        _ => Err(ConfigError::IncompleteTLSConfig),
    }
}

pub fn publish(has_index: bool) -> Result<(), ConfigError> {
    if !has_index {
        return Err(ConfigError::PublishingRequiresIndex);
    }
    Ok(())
}
