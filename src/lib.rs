// src/lib.rs
// Public library surface for the dashboard frontend (and integration tests).

pub mod adapters;
pub mod aggregator;
pub mod article;
pub mod bookmarks;
pub mod config;
pub mod error;
pub mod keywords;
pub mod lexicon;
pub mod mock;
pub mod normalize;
pub mod relevance;
pub mod scheduler;
pub mod sync;
pub mod transport;

// ---- Re-exports for stable public API ----
pub use crate::aggregator::{FetchOptions, NewsAggregator, UserState, ViewArticles, ViewResult};
pub use crate::article::{Article, Holding, MacroCategory, RedditSort, Sentiment, SourceKind, ViewTab, WatchItem};
pub use crate::bookmarks::BookmarkStore;
pub use crate::config::AppConfig;
pub use crate::error::{EmptyReason, StoreError, TransportError};

use std::sync::Arc;

use anyhow::Result;

use crate::adapters::FeedClient;
use crate::lexicon::CryptoLexicon;
use crate::mock::MockCatalog;
use crate::sync::BackendSync;
use crate::transport::HttpTransport;

/// Wire the whole core from one config: HTTP transport, standard lexicon
/// and mock catalog, plus the backend sync writers.
pub fn build_core(cfg: &AppConfig) -> Result<(NewsAggregator, BackendSync)> {
    let transport: Arc<HttpTransport> = Arc::new(HttpTransport::new(cfg)?);
    let aggregator = NewsAggregator::new(
        FeedClient::new(transport.clone()),
        CryptoLexicon::standard()?,
        MockCatalog::standard(),
    );
    let sync = BackendSync::new(transport, cfg.user_id.clone());
    Ok((aggregator, sync))
}
