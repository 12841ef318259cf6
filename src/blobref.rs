use std::str::FromStr;
use std::convert::Infallible;
use std::fmt;

use sha2::{Sha256, Digest};

/// Content address of a string, rendered as `sha256-<hex>`.
pub struct BlobRef {
    digest: Vec<u8>,
}

impl FromStr for BlobRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<BlobRef, Infallible> {
        Ok(BlobRef::digest_of(s))
    }
}

impl BlobRef {
    pub fn digest_of(s: &str) -> BlobRef {
        let mut h = Sha256::new();
        h.update(s.as_bytes());
        BlobRef {
            digest: h.finalize().to_vec(),
        }
    }
}

impl fmt::Display for BlobRef {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "sha256-{}", hex::encode(&self.digest))
    }
}
