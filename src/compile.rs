//! High-level to low-level config compilation.
use log::info;
use serde::Serialize;

use crate::blobref::BlobRef;
use crate::builder;
use crate::error::ConfigError;
use crate::options::Options;
use crate::prefix::PrefixGraph;
use crate::publish;
use crate::sign::KeyRing;
use crate::topology::{
    Environment,
    IndexOptions,
    StorageOptions,
    Topology,
};
use crate::validate;

/// The document the server loads to wire its handlers.
#[derive(Debug, Serialize)]
pub struct LowLevelConfig {
    #[serde(rename = "baseURL", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
    pub https: bool,
    #[serde(rename = "TLSCertFile", skip_serializing_if = "Option::is_none")]
    pub tls_cert_file: Option<String>,
    #[serde(rename = "TLSKeyFile", skip_serializing_if = "Option::is_none")]
    pub tls_key_file: Option<String>,
    pub auth: String,
    pub prefixes: PrefixGraph,
}

/// Every option the high-level config understands, read in one pass.
struct HighLevelConfig {
    base_url: String,
    listen: String,
    auth: String,
    key_id: String,
    secret_ring: String,
    https: bool,
    tls_cert: String,
    tls_key: String,
    storage: StorageOptions,
    share_handler: bool,
    index: IndexOptions,
    publish: serde_json::Map<String, serde_json::Value>,
}

impl HighLevelConfig {

    fn from_options(conf: &mut Options) -> Result<HighLevelConfig, ConfigError> {
        let c = HighLevelConfig {
            base_url: conf.optional_string("baseURL", "")?,
            listen: conf.optional_string("listen", "")?,
            auth: conf.required_string("auth")?,
            key_id: conf.required_string("identity")?,
            secret_ring: conf.required_string("identitySecretRing")?,
            https: conf.optional_bool("https", false)?,
            tls_cert: conf.optional_string("HTTPSCertFile", "")?,
            tls_key: conf.optional_string("HTTPSKeyFile", "")?,
            storage: StorageOptions {
                blob_path: conf.optional_string("blobPath", "")?,
                s3: conf.optional_string("s3", "")?,
            },
            share_handler: conf.optional_bool("shareHandler", true)?,
            index: IndexOptions {
                run_index: conf.optional_bool("runIndex", true)?,
                dbname: conf.optional_string("dbname", "")?,
                mysql: conf.optional_string("mysql", "")?,
                postgres: conf.optional_string("postgres", "")?,
                mongo: conf.optional_string("mongo", "")?,
                sqlite: conf.optional_string("sqlite", "")?,
                mem_index: conf.optional_bool("memIndex", false)?,
            },
            publish: conf.optional_object("publish")?,
        };
        // accepted for compatibility, not wired to anything
        conf.optional_list("replicateTo")?;
        Ok(c)
    }
}

/// Compiles high-level configs against a host environment and a key ring.
pub struct Compiler<'a, K: KeyRing> {
    env: &'a dyn Environment,
    keys: &'a K,
}

impl<'a, K: KeyRing> Compiler<'a, K> {

    pub fn new(env: &'a dyn Environment, keys: &'a K) -> Compiler<'a, K> {
        Compiler {
            env,
            keys,
        }
    }

    pub fn compile(&self, mut conf: Options) -> Result<LowLevelConfig, ConfigError> {
        let c = HighLevelConfig::from_options(&mut conf)?;
        conf.validate()?;

        let tls = validate::tls_files(c.https, &c.tls_cert, &c.tls_key)?;
        let topo = Topology::derive(&c.storage, &c.index, self.env)?;

        let entity = self.keys.entity(&c.key_id, &c.secret_ring)?;
        let armored = self.keys.armored_public_key(&entity)?;

        let mut m = PrefixGraph::new();
        builder::add_root(&mut m, &topo)?;
        builder::add_setup(&mut m)?;
        if c.share_handler {
            builder::add_share(&mut m)?;
        }
        builder::add_sighelper(&mut m, &topo, &c.secret_ring, &c.key_id)?;
        if topo.is_local_disk {
            builder::add_local_storage(&mut m, &topo)?;
        }
        if let Some(indexer) = &topo.indexer {
            let owner = BlobRef::digest_of(&armored).to_string();
            builder::add_index_wiring(&mut m, indexer.prefix(), &owner)?;
            builder::add_indexer(&mut m, indexer, &topo.dbname)?;
        }
        if !c.storage.s3.is_empty() {
            builder::add_s3(&mut m, &topo, &c.storage.s3)?;
        }

        let mut published = vec!();
        if !c.publish.is_empty() {
            validate::publish(topo.has_index())?;
            let roots = publish::parse_all(&c.publish)?;
            published = builder::add_published(&mut m, &roots)?;
        }
        if topo.has_index() {
            builder::add_ui(&mut m, &published)?;
        }
        m.check_links()?;

        info!("generated {} prefixes", m.len());

        let base_url = c.base_url.strip_suffix('/').unwrap_or(&c.base_url).to_string();
        let (tls_cert_file, tls_key_file) = match tls {
            Some((cert, key)) => (Some(cert), Some(key)),
            None => (None, None),
        };
        Ok(LowLevelConfig {
            base_url: non_empty(base_url),
            listen: non_empty(c.listen),
            https: c.https,
            tls_cert_file,
            tls_key_file,
            auth: c.auth,
            prefixes: m,
        })
    }
}

fn non_empty(s: String) -> Option<String> {
    match s.is_empty() {
        true => None,
        false => Some(s),
    }
}
