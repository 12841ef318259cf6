//! Access to the server owner's signing key.
//!
//! The compiler only needs the armored public key of the configured identity,
//! to bind the search handler to its owner. How the entity is looked up in the
//! secret ring is up to the backend.
//!
//! The `pgp` backend reads an OpenPGP keyring file. The `mock` backend, built
//! for tests and with the `dev` feature, serves fixed keys from memory.
use crate::error::ConfigError;

#[cfg(feature = "pgp")]
pub mod pgp;

#[cfg(any(test, feature = "dev"))]
pub mod mock;

pub trait KeyRing {
    type Entity;

    /// Find the entity for `key_id` in the secret ring at `secret_ring`.
    fn entity(&self, key_id: &str, secret_ring: &str) -> Result<Self::Entity, ConfigError>;

    fn armored_public_key(&self, entity: &Self::Entity) -> Result<String, ConfigError>;
}
