use sequoia_openpgp::Cert;
use sequoia_openpgp::cert::prelude::CertParser;
use sequoia_openpgp::parse::Parse;
use sequoia_openpgp::serialize::SerializeInto;

use log::debug;

use crate::sign::KeyRing;
use crate::error::ConfigError;

/// OpenPGP keyring file, typically `~/.gnupg/secring.gpg`.
pub struct SecretRing;

fn key_matches(cert: &Cert, key_id: &str) -> bool {
    let want = key_id.to_uppercase();
    cert.keys().any(|ka| {
        let key = ka.key();
        key.keyid().to_hex().ends_with(&want) || key.fingerprint().to_hex().ends_with(&want)
    })
}

fn signing_error(key_id: &str, e: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> ConfigError {
    ConfigError::Signing {
        key_id: key_id.to_string(),
        source: e.into(),
    }
}

impl KeyRing for SecretRing {
    type Entity = Cert;

    fn entity(&self, key_id: &str, secret_ring: &str) -> Result<Cert, ConfigError> {
        let parser = CertParser::from_file(secret_ring).map_err(|e| signing_error(key_id, e))?;
        for r in parser {
            let cert = r.map_err(|e| signing_error(key_id, e))?;
            if key_matches(&cert, key_id) {
                debug!("key {} found as {}", key_id, cert.fingerprint());
                return Ok(cert);
            }
        }
        Err(ConfigError::KeyNotFound {
            key_id: key_id.to_string(),
            secret_ring: secret_ring.to_string(),
        })
    }

    fn armored_public_key(&self, entity: &Cert) -> Result<String, ConfigError> {
        let key_id = entity.keyid().to_hex();
        let armored = entity.armored().to_vec().map_err(|e| signing_error(&key_id, e))?;
        String::from_utf8(armored).map_err(|e| signing_error(&key_id, e))
    }
}
