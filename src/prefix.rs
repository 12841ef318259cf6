//! The prefix graph: URL path prefix to handler descriptor.
use std::collections::BTreeMap;

use log::debug;
use serde::ser::{
    Serialize,
    Serializer,
};

use crate::error::ConfigError;
use crate::handler::Handler;

pub const ROOT: &str = "/";
pub const SETUP: &str = "/setup/";
pub const SHARE: &str = "/share/";
pub const SIGHELPER: &str = "/sighelper/";
pub const BLOBS: &str = "/bs/";
pub const CACHE: &str = "/cache/";
pub const SYNC: &str = "/sync/";
pub const BLOBS_AND_INDEX: &str = "/bs-and-index/";
pub const BLOBS_MAYBE_INDEX: &str = "/bs-and-maybe-also-index/";
pub const SEARCH: &str = "/my-search/";
pub const S3_SECONDARY: &str = "/sto-s3/";
pub const SYNC_TO_S3: &str = "/sync-to-s3/";
pub const UI: &str = "/ui/";

#[derive(Debug, Default)]
pub struct PrefixGraph {
    prefixes: BTreeMap<String, Handler>,
}

impl PrefixGraph {

    pub fn new() -> PrefixGraph {
        PrefixGraph::default()
    }

    /// Bind a handler to a prefix that nothing has claimed yet.
    pub fn insert(&mut self, prefix: &str, handler: Handler) -> Result<(), ConfigError> {
        if self.prefixes.contains_key(prefix) {
            return Err(ConfigError::DuplicatePrefix(prefix.to_string()));
        }
        debug!("prefix {} -> {}", prefix, handler.kind());
        self.prefixes.insert(prefix.to_string(), handler);
        Ok(())
    }

    pub fn get(&self, prefix: &str) -> Option<&Handler> {
        self.prefixes.get(prefix)
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.prefixes.contains_key(prefix)
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Handler)> {
        self.prefixes.iter()
    }

    /// Fails on the first handler that refers to a prefix the graph does not define.
    pub fn check_links(&self) -> Result<(), ConfigError> {
        for (from, h) in self.prefixes.iter() {
            for to in h.links() {
                if !self.prefixes.contains_key(to) {
                    return Err(ConfigError::DanglingPrefix {
                        from: from.clone(),
                        to: to.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Serialize for PrefixGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.prefixes.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        PrefixGraph,
        BLOBS,
        SYNC,
    };
    use crate::error::ConfigError;
    use crate::handler::{
        Handler,
        HandlerKind,
    };

    #[test]
    fn test_duplicate_prefix() {
        let mut g = PrefixGraph::new();
        g.insert(BLOBS, Handler::new(HandlerKind::Filesystem).arg("path", "/data")).unwrap();
        match g.insert(BLOBS, Handler::new(HandlerKind::S3)) {
            Err(ConfigError::DuplicatePrefix(p)) => assert_eq!(p, BLOBS),
            r => panic!("unexpected {:?}", r),
        }
        assert_eq!(g.get(BLOBS).unwrap().kind(), HandlerKind::Filesystem);
    }

    #[test]
    fn test_dangling_link() {
        let mut g = PrefixGraph::new();
        g.insert(SYNC, Handler::new(HandlerKind::Sync).link("from", BLOBS).link("to", "/index-mem/")).unwrap();
        g.insert(BLOBS, Handler::new(HandlerKind::Filesystem).arg("path", "/data")).unwrap();
        match g.check_links() {
            Err(ConfigError::DanglingPrefix { from, to }) => {
                assert_eq!(from, SYNC);
                assert_eq!(to, "/index-mem/");
            },
            r => panic!("unexpected {:?}", r),
        }

        g.insert("/index-mem/", Handler::new(HandlerKind::MemoryIndexer).link("blobSource", BLOBS)).unwrap();
        g.check_links().unwrap();
        assert_eq!(g.len(), 3);
    }
}
