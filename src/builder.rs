//! Rules that populate the prefix graph.
//!
//! Each function claims its prefixes through [PrefixGraph::insert], so two
//! rules that would bind the same prefix fail instead of overwriting each
//! other. The compiler calls them in a fixed order.
use serde_json::json;

use crate::error::ConfigError;
use crate::handler::{
    Handler,
    HandlerKind,
};
use crate::prefix::{
    PrefixGraph,
    ROOT,
    SETUP,
    SHARE,
    SIGHELPER,
    BLOBS,
    CACHE,
    SYNC,
    BLOBS_AND_INDEX,
    BLOBS_MAYBE_INDEX,
    SEARCH,
    S3_SECONDARY,
    SYNC_TO_S3,
    UI,
};
use crate::publish::PublishedRoot;
use crate::topology::{
    Indexer,
    Topology,
};

pub fn add_root(m: &mut PrefixGraph, topo: &Topology) -> Result<(), ConfigError> {
    let mut h = Handler::new(HandlerKind::Root)
        .arg("stealth", false);
    if topo.has_index() {
        h = h.link("blobRoot", BLOBS_MAYBE_INDEX)
            .link("searchRoot", SEARCH);
    } else {
        h = h.link("blobRoot", BLOBS);
    }
    m.insert(ROOT, h)
}

pub fn add_setup(m: &mut PrefixGraph) -> Result<(), ConfigError> {
    m.insert(SETUP, Handler::new(HandlerKind::Setup))
}

pub fn add_share(m: &mut PrefixGraph) -> Result<(), ConfigError> {
    m.insert(SHARE, Handler::new(HandlerKind::Share).link("blobRoot", BLOBS))
}

pub fn add_sighelper(m: &mut PrefixGraph, topo: &Topology, secret_ring: &str, key_id: &str) -> Result<(), ConfigError> {
    let dest = match topo.has_index() {
        true => BLOBS_AND_INDEX,
        false => BLOBS,
    };
    let h = Handler::new(HandlerKind::JsonSign)
        .arg("secretRing", secret_ring)
        .arg("keyId", key_id)
        .link("publicKeyDest", dest);
    m.insert(SIGHELPER, h)
}

fn filesystem(path: &str) -> Handler {
    Handler::new(HandlerKind::Filesystem).arg("path", path)
}

pub fn add_local_storage(m: &mut PrefixGraph, topo: &Topology) -> Result<(), ConfigError> {
    m.insert(BLOBS, filesystem(&topo.blob_path))?;
    m.insert(CACHE, filesystem(&topo.cache_dir.display().to_string()))
}

/// Sync, replica, conditional storage and search around the indexer.
pub fn add_index_wiring(m: &mut PrefixGraph, indexer_prefix: &str, owner: &str) -> Result<(), ConfigError> {
    m.insert(SYNC, Handler::new(HandlerKind::Sync)
        .link("from", BLOBS)
        .link("to", indexer_prefix))?;

    m.insert(BLOBS_AND_INDEX, Handler::new(HandlerKind::Replica)
        .link_list("backends", &[BLOBS, indexer_prefix]))?;

    let write = json!({
        "if": "isSchema",
        "then": BLOBS_AND_INDEX,
        "else": BLOBS,
    });
    m.insert(BLOBS_MAYBE_INDEX, Handler::new(HandlerKind::Cond)
        .arg("write", write)
        .refer(BLOBS_AND_INDEX)
        .refer(BLOBS)
        .link("read", BLOBS))?;

    m.insert(SEARCH, Handler::new(HandlerKind::Search)
        .link("index", indexer_prefix)
        .arg("owner", owner))
}

/// Database host, user and password.
#[derive(Debug, PartialEq, Eq)]
pub struct DbInfo {
    pub host: String,
    pub user: String,
    pub password: String,
}

fn split_exact<'a>(s: &'a str, sep: char) -> Option<(&'a str, &'a str)> {
    let mut fields = s.split(sep);
    match (fields.next(), fields.next(), fields.next()) {
        (Some(a), Some(b), None) => Some((a, b)),
        _ => None,
    }
}

/// Parse `user:password@host`.
pub fn parse_mongo(dbinfo: &str) -> Result<DbInfo, ConfigError> {
    let err = || ConfigError::MalformedConnectionString {
        backend: "mongo",
        value: dbinfo.to_string(),
        expected: "user:password@host",
    };
    let (creds, host) = split_exact(dbinfo, '@').ok_or_else(err)?;
    let (user, password) = split_exact(creds, ':').ok_or_else(err)?;
    Ok(DbInfo {
        host: host.to_string(),
        user: user.to_string(),
        password: password.to_string(),
    })
}

/// Parse `user@host:password`.
pub fn parse_sql(rdbms: &'static str, dbinfo: &str) -> Result<DbInfo, ConfigError> {
    let err = || ConfigError::MalformedConnectionString {
        backend: rdbms,
        value: dbinfo.to_string(),
        expected: "user@host:password",
    };
    let (user, rest) = split_exact(dbinfo, '@').ok_or_else(err)?;
    let (host, password) = split_exact(rest, ':').ok_or_else(err)?;
    Ok(DbInfo {
        host: host.to_string(),
        user: user.to_string(),
        password: password.to_string(),
    })
}

fn database_indexer(kind: HandlerKind, db: DbInfo, dbname: &str) -> Handler {
    Handler::new(kind)
        .enabled()
        .arg("host", db.host)
        .arg("user", db.user)
        .arg("password", db.password)
        .arg("database", dbname)
        .link("blobSource", BLOBS)
}

pub fn add_indexer(m: &mut PrefixGraph, indexer: &Indexer, dbname: &str) -> Result<(), ConfigError> {
    let h = match indexer {
        Indexer::Mysql(info) => database_indexer(HandlerKind::MysqlIndexer, parse_sql("mysql", info)?, dbname),
        Indexer::Postgres(info) => database_indexer(HandlerKind::PostgresIndexer, parse_sql("postgres", info)?, dbname),
        Indexer::Mongo(info) => database_indexer(HandlerKind::MongoIndexer, parse_mongo(info)?, dbname),
        Indexer::Sqlite(file) => Handler::new(HandlerKind::SqliteIndexer)
            .link("blobSource", BLOBS)
            .arg("file", file.as_str()),
        Indexer::Memory => Handler::new(HandlerKind::MemoryIndexer)
            .link("blobSource", BLOBS),
    };
    m.insert(indexer.prefix(), h)
}

#[derive(Debug, PartialEq, Eq)]
pub struct S3Descriptor {
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
}

/// Parse `access_key_id:secret_access_key:bucket`.
pub fn parse_s3(s3: &str) -> Result<S3Descriptor, ConfigError> {
    let f: Vec<&str> = s3.split(':').collect();
    if f.len() != 3 {
        return Err(ConfigError::MalformedS3Descriptor {
            value: s3.to_string(),
        });
    }
    Ok(S3Descriptor {
        access_key: f[0].to_string(),
        secret_key: f[1].to_string(),
        bucket: f[2].to_string(),
    })
}

/// S3 is primary storage unless local disk is configured, in which case it
/// is a sync target.
pub fn add_s3(m: &mut PrefixGraph, topo: &Topology, s3: &str) -> Result<(), ConfigError> {
    let d = parse_s3(s3)?;
    let h = Handler::new(HandlerKind::S3)
        .arg("aws_access_key", d.access_key)
        .arg("aws_secret_access_key", d.secret_key)
        .arg("bucket", d.bucket);

    if topo.is_primary_s3 {
        m.insert(BLOBS, h)?;
        // TODO: cache in a second bucket instead of a temp dir, so the cache survives the host.
        return m.insert(CACHE, filesystem(&topo.cache_dir.display().to_string()));
    }
    m.insert(S3_SECONDARY, h)?;
    m.insert(SYNC_TO_S3, Handler::new(HandlerKind::Sync)
        .link("from", BLOBS)
        .link("to", S3_SECONDARY))
}

/// Bind every published root; returns their prefixes for the UI.
pub fn add_published(m: &mut PrefixGraph, roots: &[PublishedRoot]) -> Result<Vec<String>, ConfigError> {
    let mut published = vec!();
    for root in roots {
        m.insert(&root.prefix, root.handler())?;
        published.push(root.prefix.clone());
    }
    Ok(published)
}

pub fn add_ui(m: &mut PrefixGraph, published: &[String]) -> Result<(), ConfigError> {
    let mut h = Handler::new(HandlerKind::Ui)
        .link("jsonSignRoot", SIGHELPER)
        .link("cache", CACHE)
        .arg("scaledImage", "lrucache");
    if !published.is_empty() {
        for p in published {
            h = h.refer(p);
        }
        h = h.arg("publishRoots", published.to_vec());
    }
    m.insert(UI, h)
}
