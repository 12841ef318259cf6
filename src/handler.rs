//! Handler descriptors, the nodes of the prefix graph.
use std::fmt;

use serde::ser::{
    Serialize,
    Serializer,
    SerializeMap,
};
use serde_json::{
    Map,
    Value,
};

/// Every handler the server runtime knows how to instantiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Root,
    Setup,
    Share,
    JsonSign,
    Filesystem,
    S3,
    Sync,
    Replica,
    Cond,
    Search,
    MysqlIndexer,
    PostgresIndexer,
    MongoIndexer,
    SqliteIndexer,
    MemoryIndexer,
    Publish,
    Ui,
}

impl HandlerKind {
    /// The handler name as the runtime spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerKind::Root => "root",
            HandlerKind::Setup => "setup",
            HandlerKind::Share => "share",
            HandlerKind::JsonSign => "jsonsign",
            HandlerKind::Filesystem => "storage-filesystem",
            HandlerKind::S3 => "storage-s3",
            HandlerKind::Sync => "sync",
            HandlerKind::Replica => "storage-replica",
            HandlerKind::Cond => "storage-cond",
            HandlerKind::Search => "search",
            HandlerKind::MysqlIndexer => "storage-mysqlindexer",
            HandlerKind::PostgresIndexer => "storage-postgresindexer",
            HandlerKind::MongoIndexer => "storage-mongodbindexer",
            HandlerKind::SqliteIndexer => "storage-sqliteindexer",
            HandlerKind::MemoryIndexer => "storage-memory-only-dev-indexer",
            HandlerKind::Publish => "publish",
            HandlerKind::Ui => "ui",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.write_str(self.as_str())
    }
}

/// One handler descriptor, built bottom-up with named setters.
///
/// Arguments that point at another prefix are set through [Handler::link],
/// [Handler::link_list] or recorded with [Handler::refer], so the graph can
/// check that every reference resolves.
#[derive(Debug, Clone)]
pub struct Handler {
    kind: HandlerKind,
    enabled: bool,
    args: Map<String, Value>,
    links: Vec<String>,
}

impl Handler {

    pub fn new(kind: HandlerKind) -> Handler {
        Handler {
            kind,
            enabled: false,
            args: Map::new(),
            links: vec!(),
        }
    }

    /// Emit an explicit `"enabled": true`.
    pub fn enabled(mut self) -> Handler {
        self.enabled = true;
        self
    }

    pub fn arg(mut self, key: &str, v: impl Into<Value>) -> Handler {
        self.args.insert(key.to_string(), v.into());
        self
    }

    pub fn link(self, key: &str, prefix: &str) -> Handler {
        self.refer(prefix).arg(key, prefix)
    }

    pub fn link_list(mut self, key: &str, prefixes: &[&str]) -> Handler {
        for p in prefixes {
            self = self.refer(p);
        }
        let v: Vec<Value> = prefixes.iter().map(|p| Value::from(*p)).collect();
        self.arg(key, v)
    }

    /// Record a reference held somewhere inside a nested argument.
    pub fn refer(mut self, prefix: &str) -> Handler {
        self.links.push(prefix.to_string());
        self
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    pub fn args(&self) -> &Map<String, Value> {
        &self.args
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.args.get(key)
    }

    /// Every prefix this handler refers to.
    pub fn links(&self) -> &[String] {
        &self.links
    }
}

impl Serialize for Handler {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut m = serializer.serialize_map(None)?;
        if self.enabled {
            m.serialize_entry("enabled", &true)?;
        }
        m.serialize_entry("handler", self.kind.as_str())?;
        if !self.args.is_empty() {
            m.serialize_entry("handlerArgs", &self.args)?;
        }
        m.end()
    }
}
