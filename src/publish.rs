//! Published roots: permanodes served as a gallery or blog under a prefix.
use serde_json::{
    Map,
    Value,
};

use crate::error::ConfigError;
use crate::handler::{
    Handler,
    HandlerKind,
};
use crate::options::kind_of;
use crate::prefix::{
    BLOBS_MAYBE_INDEX,
    CACHE,
    SEARCH,
    SIGHELPER,
};

const GALLERY_STYLE: &str = "pics.css";
const GALLERY_SCRIPT: &str = "pics.js";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Gallery,
    Blog,
    Other(String),
}

impl From<&str> for Template {
    fn from(s: &str) -> Template {
        match s {
            "gallery" => Template::Gallery,
            "blog" => Template::Blog,
            _ => Template::Other(s.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PublishedRoot {
    pub prefix: String,
    pub root_name: String,
    pub root_permanode: String,
    pub template: Template,
    pub style: Option<String>,
}

impl PublishedRoot {

    /// Parse the publish entry bound at `prefix`.
    pub fn parse(prefix: &str, v: &Value) -> Result<PublishedRoot, ConfigError> {
        let fields = match v {
            Value::Object(o) => o,
            _ => return Err(ConfigError::WrongType {
                key: format!("publish.{}", prefix),
                expected: "an object",
                found: kind_of(v),
            }),
        };

        let mut root_permanode = String::new();
        let mut template = String::new();
        let mut style = String::new();
        for (k, fv) in fields {
            let val = match fv {
                Value::String(s) => s.clone(),
                _ => return Err(ConfigError::WrongType {
                    key: format!("publish.{}.{}", prefix, k),
                    expected: "a string",
                    found: kind_of(fv),
                }),
            };
            match k.as_str() {
                "rootPermanode" => root_permanode = val,
                "template" => template = val,
                "style" => style = val,
                _ => return Err(ConfigError::UnknownPublishField {
                    root: prefix.to_string(),
                    field: k.clone(),
                }),
            }
        }
        if root_permanode.is_empty() {
            return Err(missing(prefix, "rootPermanode"));
        }
        if template.is_empty() {
            return Err(missing(prefix, "template"));
        }

        Ok(PublishedRoot {
            prefix: prefix.to_string(),
            root_name: format!("{}Root", prefix.replace('/', "")),
            root_permanode,
            template: Template::from(template.as_str()),
            style: match style.is_empty() {
                true => None,
                false => Some(style),
            },
        })
    }

    pub fn handler(&self) -> Handler {
        let mut h = Handler::new(HandlerKind::Publish)
            .arg("rootName", self.root_name.as_str())
            .link("blobRoot", BLOBS_MAYBE_INDEX)
            .link("searchRoot", SEARCH)
            .link("cache", CACHE)
            .arg("rootPermanode", vec!(SIGHELPER, self.root_permanode.as_str()))
            .refer(SIGHELPER);
        match self.template {
            Template::Gallery => {
                let style = self.style.as_deref().unwrap_or(GALLERY_STYLE);
                h = h.arg("css", vec!(style))
                    .arg("js", vec!(GALLERY_SCRIPT))
                    .arg("scaledImage", "lrucache");
            },
            Template::Blog => {
                if let Some(style) = &self.style {
                    h = h.arg("css", vec!(style.as_str()));
                }
            },
            Template::Other(_) => {},
        }
        h
    }
}

fn missing(prefix: &str, field: &'static str) -> ConfigError {
    ConfigError::MissingPublishField {
        root: prefix.to_string(),
        field,
    }
}

/// Parse every publish entry, in document order.
pub fn parse_all(publish: &Map<String, Value>) -> Result<Vec<PublishedRoot>, ConfigError> {
    publish.iter()
        .map(|(k, v)| PublishedRoot::parse(k, v))
        .collect()
}
