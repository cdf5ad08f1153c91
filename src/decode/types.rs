//! Wire types for scroll responses
//!
//! The open call and every continuation answer with the same shape, so one
//! [`ScrollResponse`] covers both.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Body returned by the open and continuation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollResponse {
    /// Cursor id to send with the next continuation request
    #[serde(rename = "_scroll_id")]
    pub scroll_id: String,
    /// Milliseconds the engine spent on the request
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(rename = "_shards", default)]
    pub shards: ShardStats,
    #[serde(default)]
    pub hits: HitsEnvelope,
}

/// Shard counters reported with every response
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardStats {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub successful: u32,
    #[serde(default)]
    pub failed: u32,
}

/// The `hits` object of a response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub total: TotalHits,
    #[serde(default)]
    pub max_score: Option<f64>,
    /// Page of hits; absent and `null` both decode to an empty page
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hits: Vec<Hit>,
}

/// Total number of matching documents.
///
/// Older engines report a bare integer, newer ones an object with a
/// `relation` telling whether the count is exact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TotalHits {
    Count(u64),
    Object {
        value: u64,
        #[serde(default = "default_relation")]
        relation: String,
    },
}

fn default_relation() -> String {
    "eq".to_string()
}

impl Default for TotalHits {
    fn default() -> Self {
        Self::Count(0)
    }
}

impl TotalHits {
    /// The reported count
    pub fn value(&self) -> u64 {
        match self {
            Self::Count(value) | Self::Object { value, .. } => *value,
        }
    }
}

/// One matched document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_index")]
    pub index: String,
    #[serde(rename = "_type", default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "_id")]
    pub id: String,
    /// Relevance score; scan mode reports none
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    /// Stored document, untouched
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<HashMap<String, Vec<String>>>,
}

impl Hit {
    /// Decode the stored document into a typed record
    pub fn source_as<T: DeserializeOwned>(&self) -> Result<T> {
        let source = self.source.as_ref().ok_or_else(|| {
            Error::decode(format!("hit '{}' carries no _source", self.id))
        })?;
        T::deserialize(source)
            .map_err(|e| Error::decode(format!("_source of hit '{}': {e}", self.id)))
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
