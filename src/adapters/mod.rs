// src/adapters/mod.rs
//! Feed adapters: one fetch per upstream endpoint. Each knows its path,
//! parameter shape and response envelope, validates inputs, and returns
//! raw (un-normalized) articles. Fallback policies that stay inside live
//! data (watchlist → crypto, macro latest → per-category) live here;
//! mock fallback is the aggregator's job.

pub mod macro_feed;
pub mod news;
pub mod reddit;

use std::sync::Arc;

use serde::Deserialize;

use crate::error::TransportError;
use crate::normalize::RawArticle;
use crate::transport::Transport;

pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 100;
pub const DEFAULT_LIMIT: u32 = 10;

/// Clamp a requested item limit into the accepted range.
pub fn clamp_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
}

/// The common `{items: [...]}` response envelope.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ItemsEnvelope {
    pub items: Vec<RawArticle>,
}

pub(crate) fn parse_items(v: serde_json::Value) -> Result<Vec<RawArticle>, TransportError> {
    if v.is_null() {
        return Ok(Vec::new());
    }
    let env: ItemsEnvelope = serde_json::from_value(v).map_err(TransportError::Decode)?;
    Ok(env.items)
}

/// Typed access to every upstream feed, over whatever transport the
/// caller wires in.
#[derive(Clone)]
pub struct FeedClient {
    transport: Arc<dyn Transport>,
}

impl FeedClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub(crate) fn transport(&self) -> &dyn Transport {
        self.transport.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_clamped_and_defaulted() {
        assert_eq!(clamp_limit(None), 10);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(50)), 50);
        assert_eq!(clamp_limit(Some(1000)), 100);
    }

    #[test]
    fn items_envelope_tolerates_missing_key() {
        assert!(parse_items(serde_json::json!({})).unwrap().is_empty());
        assert!(parse_items(serde_json::Value::Null).unwrap().is_empty());
        let got = parse_items(serde_json::json!({ "items": [{ "id": 1 }] })).unwrap();
        assert_eq!(got.len(), 1);
    }
}
