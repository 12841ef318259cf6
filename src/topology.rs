//! Structural decisions derived once from the resolved options.
use std::env;
use std::fs::DirBuilder;
use std::os::unix::fs::DirBuilderExt;
use std::path::{
    Path,
    PathBuf,
};

use log::{debug, info};

use crate::error::ConfigError;
use crate::validate;

const CACHE_DIR_MODE: u32 = 0o700;

/// Host state the compiler depends on.
pub trait Environment {
    fn user_name(&self) -> Option<String>;
    fn temp_dir(&self) -> PathBuf;
}

/// Reads `$USER` and the process temp directory.
pub struct HostEnvironment;

impl Environment for HostEnvironment {
    fn user_name(&self) -> Option<String> {
        match env::var("USER") {
            Ok(v) if !v.is_empty() => Some(v),
            _ => None,
        }
    }

    fn temp_dir(&self) -> PathBuf {
        env::temp_dir()
    }
}

/// The single selected index backend, with its raw connection value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indexer {
    Mysql(String),
    Postgres(String),
    Mongo(String),
    Sqlite(String),
    Memory,
}

impl Indexer {
    pub fn prefix(&self) -> &'static str {
        match self {
            Indexer::Mysql(_) => "/index-mysql/",
            Indexer::Postgres(_) => "/index-postgres/",
            Indexer::Mongo(_) => "/index-mongo/",
            Indexer::Sqlite(_) => "/index-sqlite/",
            Indexer::Memory => "/index-mem/",
        }
    }

    /// Whether the backend is a database that needs a `dbname`.
    pub fn needs_database(&self) -> bool {
        matches!(self, Indexer::Mysql(_) | Indexer::Postgres(_) | Indexer::Mongo(_))
    }
}

/// Index-related options as read from the config.
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    pub run_index: bool,
    pub dbname: String,
    pub mysql: String,
    pub postgres: String,
    pub mongo: String,
    pub sqlite: String,
    pub mem_index: bool,
}

impl IndexOptions {
    /// Applies the exactly-one (or, with `runIndex` off, exactly-zero) rule.
    pub fn select(&self) -> Result<Option<Indexer>, ConfigError> {
        let mut selected: Vec<Indexer> = vec!();
        if !self.mysql.is_empty() {
            selected.push(Indexer::Mysql(self.mysql.clone()));
        }
        if !self.postgres.is_empty() {
            selected.push(Indexer::Postgres(self.postgres.clone()));
        }
        if !self.mongo.is_empty() {
            selected.push(Indexer::Mongo(self.mongo.clone()));
        }
        if !self.sqlite.is_empty() {
            selected.push(Indexer::Sqlite(self.sqlite.clone()));
        }
        if self.mem_index {
            selected.push(Indexer::Memory);
        }
        validate::indexer_count(self.run_index, selected.len())?;
        Ok(selected.pop())
    }
}

/// Storage-related options as read from the config.
#[derive(Debug, Clone, Default)]
pub struct StorageOptions {
    pub blob_path: String,
    pub s3: String,
}

#[derive(Debug, Clone)]
pub struct Topology {
    pub indexer: Option<Indexer>,
    /// Resolved database name; empty unless the indexer needs one.
    pub dbname: String,
    pub blob_path: String,
    pub is_local_disk: bool,
    pub is_primary_s3: bool,
    pub cache_dir: PathBuf,
}

impl Topology {

    /// Decide the topology and make sure the cache directory exists.
    pub fn derive(storage: &StorageOptions, index: &IndexOptions, env: &dyn Environment) -> Result<Topology, ConfigError> {
        let indexer = index.select()?;

        let is_local_disk = !storage.blob_path.is_empty();
        validate::storage(is_local_disk, !storage.s3.is_empty())?;
        let is_primary_s3 = !is_local_disk;

        let mut dbname = String::new();
        if indexer.as_ref().map_or(false, |i| i.needs_database()) {
            dbname = resolve_dbname(&index.dbname, env)?;
        }

        let cache_dir = match is_local_disk {
            true => Path::new(&storage.blob_path).join("cache"),
            false => env.temp_dir().join("camli-cache"),
        };
        ensure_dir(&cache_dir)?;

        info!(
            "topology: index {:?}, local disk {}, primary s3 {}, cache {}",
            indexer.as_ref().map(|i| i.prefix()),
            is_local_disk,
            is_primary_s3,
            cache_dir.display(),
        );

        Ok(Topology {
            indexer,
            dbname,
            blob_path: storage.blob_path.clone(),
            is_local_disk,
            is_primary_s3,
            cache_dir,
        })
    }

    pub fn has_index(&self) -> bool {
        self.indexer.is_some()
    }

    /// Prefix of the selected indexer, empty when there is none.
    pub fn indexer_prefix(&self) -> &'static str {
        match &self.indexer {
            Some(i) => i.prefix(),
            None => "",
        }
    }
}

fn resolve_dbname(dbname: &str, env: &dyn Environment) -> Result<String, ConfigError> {
    if !dbname.is_empty() {
        return Ok(dbname.to_string());
    }
    match env.user_name() {
        Some(user) => Ok(format!("camli{}", user)),
        None => Err(ConfigError::MissingEnvironment("USER")),
    }
}

fn ensure_dir(path: &Path) -> Result<(), ConfigError> {
    debug!("creating cache dir {}", path.display());
    DirBuilder::new()
        .recursive(true)
        .mode(CACHE_DIR_MODE)
        .create(path)
        .map_err(|e| ConfigError::CacheDirUnavailable {
            path: path.to_path_buf(),
            source: e,
        })
}
