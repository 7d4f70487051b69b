// src/adapters/news.rs
//! Crypto-family news feeds: general crypto, bitcoin, portfolio-tagged,
//! watchlist-tagged, RWA, research provider, asset-specific.

use crate::article::Sentiment;
use crate::error::TransportError;
use crate::normalize::RawArticle;

use super::{clamp_limit, parse_items, FeedClient};

pub const PATH_CRYPTO: &str = "/api/v1/news/crypto";
pub const PATH_BITCOIN: &str = "/api/v1/news/bitcoin";
pub const PATH_PORTFOLIO: &str = "/api/v1/news/portfolio";
pub const PATH_WATCHLIST: &str = "/api/v1/news/watchlist";
pub const PATH_RWA: &str = "/api/v1/news/rwa";
pub const PATH_MESSARI: &str = "/api/v1/news/messari";
pub const PATH_ASSET: &str = "/api/v1/news/asset";

/// Parameters accepted by the general crypto feed.
#[derive(Debug, Clone, Default)]
pub struct CryptoQuery {
    pub limit: Option<u32>,
    pub query: Option<String>,
    pub sentiment: Option<Sentiment>,
}

impl FeedClient {
    pub async fn fetch_crypto(&self, q: &CryptoQuery) -> Result<Vec<RawArticle>, TransportError> {
        let mut params = vec![("limit".to_string(), clamp_limit(q.limit).to_string())];
        if let Some(query) = q.query.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("query".to_string(), query.trim().to_string()));
        }
        if let Some(s) = q.sentiment {
            params.push(("sentiment".to_string(), s.as_str().to_string()));
        }
        let v = self.transport().get_json(PATH_CRYPTO, &params).await?;
        parse_items(v)
    }

    pub async fn fetch_bitcoin(&self, limit: Option<u32>) -> Result<Vec<RawArticle>, TransportError> {
        self.fetch_simple(PATH_BITCOIN, limit).await
    }

    pub async fn fetch_portfolio(&self, limit: Option<u32>) -> Result<Vec<RawArticle>, TransportError> {
        self.fetch_simple(PATH_PORTFOLIO, limit).await
    }

    pub async fn fetch_rwa(&self, limit: Option<u32>) -> Result<Vec<RawArticle>, TransportError> {
        self.fetch_simple(PATH_RWA, limit).await
    }

    pub async fn fetch_messari(&self, limit: Option<u32>) -> Result<Vec<RawArticle>, TransportError> {
        self.fetch_simple(PATH_MESSARI, limit).await
    }

    pub async fn fetch_asset(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RawArticle>, TransportError> {
        let path = format!("{}/{}", PATH_ASSET, symbol.trim().to_ascii_uppercase());
        self.fetch_simple(&path, limit).await
    }

    /// Watchlist feed with its live fallback: when the watchlist-specific
    /// endpoint comes back empty, the general crypto feed fills in. Still
    /// real data; mock substitution happens a layer up.
    pub async fn fetch_watchlist(&self, limit: Option<u32>) -> Result<Vec<RawArticle>, TransportError> {
        let items = self.fetch_simple(PATH_WATCHLIST, limit).await?;
        if !items.is_empty() {
            return Ok(items);
        }
        tracing::debug!(feed = "watchlist", "watchlist feed empty, falling back to crypto");
        self.fetch_crypto(&CryptoQuery {
            limit,
            ..Default::default()
        })
        .await
    }

    async fn fetch_simple(
        &self,
        path: &str,
        limit: Option<u32>,
    ) -> Result<Vec<RawArticle>, TransportError> {
        let params = vec![("limit".to_string(), clamp_limit(limit).to_string())];
        let v = self.transport().get_json(path, &params).await?;
        parse_items(v)
    }
}
