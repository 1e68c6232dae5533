use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub query: QueryBody,
    #[serde(default, rename = "continue")]
    pub continuation: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryBody {
    /// Page records keyed by page id; `-1` marks a title that does not exist.
    #[serde(default)]
    pub pages: BTreeMap<String, PageRecord>,
    #[serde(default)]
    pub backlinks: Vec<LinkRecord>,
    #[serde(default)]
    pub categorymembers: Vec<LinkRecord>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageRecord {
    #[serde(default)]
    pub extract: Option<String>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
    #[serde(default)]
    pub categories: Vec<LinkRecord>,
    #[serde(default)]
    pub langlinks: Vec<LangLinkRecord>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LinkRecord {
    pub title: String,
    #[serde(default)]
    pub ns: i64,
    #[serde(default)]
    pub pageid: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LangLinkRecord {
    pub lang: String,
    #[serde(rename = "*", default)]
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
}
