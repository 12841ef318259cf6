//! Typed, consumption-tracking access to the high-level config document.
//!
//! Every accessor marks its key as consumed, whether or not the key is
//! present. Once all options have been read, [Options::validate] rejects any
//! key that no accessor asked for.
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::{
    Map,
    Value,
};

use crate::error::ConfigError;

/// Short name for the shape of a JSON value, used in error messages.
pub fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

pub struct Options {
    obj: Map<String, Value>,
    seen: HashSet<String>,
}

impl Options {

    pub fn new(obj: Map<String, Value>) -> Options {
        Options {
            obj,
            seen: HashSet::new(),
        }
    }

    /// Parse a JSON document whose top level is an object.
    pub fn from_reader(r: impl Read) -> Result<Options, ConfigError> {
        let obj: Map<String, Value> = serde_json::from_reader(r)?;
        Ok(Options::new(obj))
    }

    pub fn from_path(path: &Path) -> Result<Options, ConfigError> {
        let f = File::open(path).map_err(|e| ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: e,
        })?;
        Options::from_reader(f)
    }

    fn lookup(&mut self, key: &str) -> Option<&Value> {
        self.seen.insert(key.to_string());
        self.obj.get(key)
    }

    pub fn required_string(&mut self, key: &str) -> Result<String, ConfigError> {
        match self.lookup(key) {
            Some(Value::String(s)) => Ok(s.clone()),
            _ => Err(ConfigError::MissingRequiredOption {
                key: key.to_string(),
            }),
        }
    }

    pub fn optional_string(&mut self, key: &str, default: &str) -> Result<String, ConfigError> {
        match self.lookup(key) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(v) => Err(wrong_type(key, "a string", v)),
        }
    }

    pub fn optional_bool(&mut self, key: &str, default: bool) -> Result<bool, ConfigError> {
        match self.lookup(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(v) => Err(wrong_type(key, "a boolean", v)),
        }
    }

    pub fn optional_list(&mut self, key: &str) -> Result<Vec<Value>, ConfigError> {
        match self.lookup(key) {
            None => Ok(vec!()),
            Some(Value::Array(l)) => Ok(l.clone()),
            Some(v) => Err(wrong_type(key, "a list", v)),
        }
    }

    pub fn optional_object(&mut self, key: &str) -> Result<Map<String, Value>, ConfigError> {
        match self.lookup(key) {
            None => Ok(Map::new()),
            Some(Value::Object(o)) => Ok(o.clone()),
            Some(v) => Err(wrong_type(key, "an object", v)),
        }
    }

    /// Fails with every key that no accessor has read, in document order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unknown: Vec<String> = self.obj.keys()
            .filter(|k| !self.seen.contains(k.as_str()))
            .cloned()
            .collect();
        if unknown.is_empty() {
            return Ok(());
        }
        Err(ConfigError::UnknownOption {
            keys: unknown,
        })
    }
}

fn wrong_type(key: &str, expected: &'static str, v: &Value) -> ConfigError {
    ConfigError::WrongType {
        key: key.to_string(),
        expected,
        found: kind_of(v),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use serde_json::json;
    use tempfile::tempdir;

    use super::Options;
    use crate::error::ConfigError;

    fn opts(v: serde_json::Value) -> Options {
        match v {
            serde_json::Value::Object(o) => Options::new(o),
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_required_string() {
        let mut o = opts(json!({"auth": "none", "identity": 42}));
        assert_eq!(o.required_string("auth").unwrap(), "none");
        match o.required_string("identity") {
            Err(ConfigError::MissingRequiredOption { key }) => assert_eq!(key, "identity"),
            r => panic!("unexpected {:?}", r),
        }
        match o.required_string("identitySecretRing") {
            Err(ConfigError::MissingRequiredOption { .. }) => {},
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_optional_defaults() {
        let mut o = opts(json!({}));
        assert_eq!(o.optional_string("listen", ":3179").unwrap(), ":3179");
        assert!(o.optional_bool("runIndex", true).unwrap());
        assert!(o.optional_list("replicateTo").unwrap().is_empty());
        assert!(o.optional_object("publish").unwrap().is_empty());
        o.validate().unwrap();
    }

    #[test]
    fn test_wrong_type() {
        let mut o = opts(json!({"https": "yes", "publish": ["/pics/"]}));
        match o.optional_bool("https", false) {
            Err(ConfigError::WrongType { key, expected, found }) => {
                assert_eq!(key, "https");
                assert_eq!(expected, "a boolean");
                assert_eq!(found, "a string");
            },
            r => panic!("unexpected {:?}", r),
        }
        match o.optional_object("publish") {
            Err(ConfigError::WrongType { found, .. }) => assert_eq!(found, "a list"),
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_idempotent_access() {
        let mut o = opts(json!({"blobPath": "/data"}));
        assert_eq!(o.optional_string("blobPath", "").unwrap(), "/data");
        assert_eq!(o.optional_string("blobPath", "").unwrap(), "/data");
        o.validate().unwrap();
    }

    #[test]
    fn test_unknown_keys() {
        let mut o = opts(json!({"blobPath": "/data", "bogus": 1, "typo": true}));
        o.optional_string("blobPath", "").unwrap();
        match o.validate() {
            Err(ConfigError::UnknownOption { keys }) => {
                assert_eq!(keys, vec!("bogus".to_string(), "typo".to_string()));
            },
            r => panic!("unexpected {:?}", r),
        }
    }

    #[test]
    fn test_from_reader() {
        let doc = br#"{"auth": "localhost"}"#;
        let mut o = Options::from_reader(&doc[..]).unwrap();
        assert_eq!(o.required_string("auth").unwrap(), "localhost");

        let doc = b"[1, 2]";
        match Options::from_reader(&doc[..]) {
            Err(ConfigError::Parse(_)) => {},
            r => panic!("unexpected {:?}", r.map(|_| ())),
        }
    }

    #[test]
    fn test_from_path() {
        let d = tempdir().unwrap();
        let fp = d.path().join("server-config.json");
        write(&fp, br#"{"auth": "localhost"}"#).unwrap();
        let mut o = Options::from_path(&fp).unwrap();
        assert_eq!(o.required_string("auth").unwrap(), "localhost");

        let missing = d.path().join("nonexistent.json");
        match Options::from_path(&missing) {
            Err(ConfigError::ReadConfig { path, .. }) => assert_eq!(path, missing),
            r => panic!("unexpected {:?}", r.map(|_| ())),
        }
    }
}
