//! The `mock` key ring is provided to facilitate testing.
//!
//! Keys are registered in memory by identifier; the secret ring path is ignored.
use std::collections::HashMap;

use crate::sign::KeyRing;
use crate::error::ConfigError;

#[derive(Default)]
pub struct StaticKeyRing {
    keys: HashMap<String, String>,
}

impl StaticKeyRing {

    pub fn new() -> StaticKeyRing {
        StaticKeyRing::default()
    }

    pub fn with_key(mut self, key_id: &str, armored: &str) -> StaticKeyRing {
        self.keys.insert(key_id.to_string(), armored.to_string());
        self
    }
}

impl KeyRing for StaticKeyRing {
    type Entity = String;

    fn entity(&self, key_id: &str, secret_ring: &str) -> Result<String, ConfigError> {
        match self.keys.get(key_id) {
            Some(v) => Ok(v.clone()),
            None => Err(ConfigError::KeyNotFound {
                key_id: key_id.to_string(),
                secret_ring: secret_ring.to_string(),
            }),
        }
    }

    fn armored_public_key(&self, entity: &String) -> Result<String, ConfigError> {
        Ok(entity.clone())
    }
}
