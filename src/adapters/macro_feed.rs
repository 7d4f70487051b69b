// src/adapters/macro_feed.rs
//! Macro news, parameterized by category.
//!
//! Two-step policy: the combined `latest` endpoint returns every category
//! at once, so try it first; only when it has nothing for the requested
//! category does the per-category endpoint get called.

use std::collections::HashMap;

use serde::Deserialize;

use crate::article::MacroCategory;
use crate::error::TransportError;
use crate::normalize::RawArticle;

use super::{clamp_limit, parse_items, FeedClient};

pub const PATH_MACRO: &str = "/api/v1/news/macro";
pub const PATH_LATEST: &str = "/api/v1/news/latest";

/// `{macro: {category → Article[]}, …}` envelope of the latest endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LatestEnvelope {
    #[serde(rename = "macro")]
    macro_map: HashMap<String, Vec<RawArticle>>,
}

impl FeedClient {
    /// The whole macro map from the combined latest endpoint.
    pub async fn fetch_latest_macro(
        &self,
        limit: Option<u32>,
    ) -> Result<HashMap<String, Vec<RawArticle>>, TransportError> {
        let params = vec![("limit".to_string(), clamp_limit(limit).to_string())];
        let v = self.transport().get_json(PATH_LATEST, &params).await?;
        if v.is_null() {
            return Ok(HashMap::new());
        }
        let env: LatestEnvelope = serde_json::from_value(v).map_err(TransportError::Decode)?;
        Ok(env.macro_map)
    }

    /// One concrete macro category. Passing [`MacroCategory::All`] here is
    /// a caller bug; use [`Self::fetch_macro_all`] instead.
    pub async fn fetch_macro_category(
        &self,
        category: MacroCategory,
        limit: Option<u32>,
    ) -> Result<Vec<RawArticle>, TransportError> {
        debug_assert_ne!(category, MacroCategory::All);

        match self.fetch_latest_macro(limit).await {
            Ok(mut map) => {
                if let Some(items) = map.remove(category.as_str()) {
                    if !items.is_empty() {
                        return Ok(items);
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = ?e, feed = "macro", "latest endpoint failed, trying per-category");
            }
        }

        self.fetch_macro_endpoint(category, limit).await
    }

    /// Every concrete category at once. The latest endpoint is hit exactly
    /// once; only categories it lacks fall back to the per-category
    /// endpoint, and a failing category contributes nothing.
    pub async fn fetch_macro_all(
        &self,
        limit: Option<u32>,
    ) -> Result<Vec<RawArticle>, TransportError> {
        let mut map = match self.fetch_latest_macro(limit).await {
            Ok(map) => map,
            Err(e) => {
                tracing::warn!(error = ?e, feed = "macro", "latest endpoint failed, trying per-category");
                HashMap::new()
            }
        };

        let mut out = Vec::new();
        for category in MacroCategory::CONCRETE {
            match map.remove(category.as_str()) {
                Some(items) if !items.is_empty() => out.extend(items),
                _ => match self.fetch_macro_endpoint(category, limit).await {
                    Ok(items) => out.extend(items),
                    Err(e) => {
                        tracing::warn!(
                            error = ?e,
                            category = category.as_str(),
                            "macro category fetch failed, contributing nothing"
                        );
                    }
                },
            }
        }
        Ok(out)
    }

    async fn fetch_macro_endpoint(
        &self,
        category: MacroCategory,
        limit: Option<u32>,
    ) -> Result<Vec<RawArticle>, TransportError> {
        let params = vec![
            ("category".to_string(), category.as_str().to_string()),
            ("limit".to_string(), clamp_limit(limit).to_string()),
        ];
        let v = self.transport().get_json(PATH_MACRO, &params).await?;
        parse_items(v)
    }
}
