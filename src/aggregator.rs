// src/aggregator.rs
//! The orchestrator: maps a view tab to a set of adapter calls, runs them
//! concurrently, and turns whatever settles into one atomic view result.
//!
//! Failure policy: adapter errors never propagate. A failing adapter
//! contributes nothing; only when every adapter for a view comes back
//! empty does the mock catalog stand in. The one failure a caller sees is
//! the context sentinel (no portfolio / no watchlist).

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use metrics::{counter, gauge};

use crate::adapters::news::CryptoQuery;
use crate::adapters::reddit::DEFAULT_SUBREDDITS;
use crate::adapters::FeedClient;
use crate::article::{
    Article, Holding, MacroCategory, RedditSort, Sentiment, SourceKind, ViewTab, WatchItem,
};
use crate::error::{EmptyReason, TransportError};
use crate::keywords::{keywords_from_holdings, KeywordSet};
use crate::lexicon::CryptoLexicon;
use crate::mock::MockCatalog;
use crate::normalize::{normalize_batch, RawArticle};
use crate::relevance::filter_articles;

/// Snapshot of the user context the core reads from its collaborators.
#[derive(Debug, Clone, Default)]
pub struct UserState {
    pub holdings: Vec<Holding>,
    pub watchlist: Vec<WatchItem>,
}

/// Per-fetch options; every field has a serviceable default.
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub limit: Option<u32>,
    pub query: Option<String>,
    pub sentiment: Option<Sentiment>,
    /// Macro view only; `All` fans out over every concrete category.
    pub macro_category: MacroCategory,
    /// Reddit view only; `None` fans out over the standing subreddit list.
    pub subreddit: Option<String>,
    pub sort: RedditSort,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            limit: None,
            query: None,
            sentiment: None,
            macro_category: MacroCategory::All,
            subreddit: None,
            sort: RedditSort::Hot,
        }
    }
}

/// A populated view: articles plus the metadata the dashboard renders.
#[derive(Debug, Clone)]
pub struct ViewArticles {
    /// Tag of the view that requested this fetch; callers drop results
    /// whose tag no longer matches the active view.
    pub view: ViewTab,
    pub articles: Vec<Article>,
    pub last_updated: DateTime<Utc>,
    /// True when the articles came from the mock catalog.
    pub is_fallback: bool,
}

#[derive(Debug, Clone)]
pub enum ViewResult {
    Articles(ViewArticles),
    /// The view needs user context that is absent; no HTTP was issued.
    Empty { view: ViewTab, reason: EmptyReason },
}

impl ViewResult {
    pub fn view(&self) -> ViewTab {
        match self {
            ViewResult::Articles(v) => v.view,
            ViewResult::Empty { view, .. } => *view,
        }
    }

    pub fn articles(&self) -> &[Article] {
        match self {
            ViewResult::Articles(v) => &v.articles,
            ViewResult::Empty { .. } => &[],
        }
    }
}

type AdapterCall<'a> =
    Pin<Box<dyn Future<Output = (SourceKind, Result<Vec<RawArticle>, TransportError>)> + Send + 'a>>;

pub struct NewsAggregator {
    feeds: FeedClient,
    lexicon: CryptoLexicon,
    mocks: MockCatalog,
}

impl NewsAggregator {
    pub fn new(feeds: FeedClient, lexicon: CryptoLexicon, mocks: MockCatalog) -> Self {
        Self {
            feeds,
            lexicon,
            mocks,
        }
    }

    /// Fetch one view. All adapter calls for the view run concurrently and
    /// the result is a single atomic snapshot.
    pub async fn fetch(&self, view: ViewTab, opts: &FetchOptions, user: &UserState) -> ViewResult {
        if view == ViewTab::Holdings && user.holdings.is_empty() {
            return ViewResult::Empty {
                view,
                reason: EmptyReason::NoPortfolio,
            };
        }
        if view == ViewTab::Watchlist && user.watchlist.is_empty() {
            return ViewResult::Empty {
                view,
                reason: EmptyReason::NoWatchlist,
            };
        }

        let calls = self.calls_for_view(view, opts, user);
        let settled = join_all(calls).await;

        let mut live: Vec<Article> = Vec::new();
        let mut failed = 0usize;
        for (kind, outcome) in settled {
            match outcome {
                Ok(raws) => live.extend(self.prepare(raws, kind)),
                Err(e) => {
                    failed += 1;
                    tracing::warn!(error = ?e, feed = kind.as_str(), view = view.as_str(), "adapter error, contributing nothing");
                    counter!("news_adapter_errors_total").increment(1);
                }
            }
        }

        let is_fallback = live.is_empty();
        let mut articles = if is_fallback {
            counter!("news_mock_fallback_total").increment(1);
            self.mocks.for_view(view)
        } else {
            live
        };

        if !is_fallback {
            articles = self.apply_relevance(view, articles, user);
        }
        let mut articles = dedup_articles(articles);
        sort_by_recency(&mut articles);

        let last_updated = Utc::now();
        counter!("news_fetch_total").increment(1);
        gauge!("news_last_fetch_ts").set(last_updated.timestamp() as f64);
        tracing::debug!(
            view = view.as_str(),
            kept = articles.len(),
            failed,
            fallback = is_fallback,
            "view fetch settled"
        );

        ViewResult::Articles(ViewArticles {
            view,
            articles,
            last_updated,
            is_fallback,
        })
    }

    /// Dispatch table: which adapters a view composes.
    fn calls_for_view<'a>(
        &'a self,
        view: ViewTab,
        opts: &FetchOptions,
        user: &UserState,
    ) -> Vec<AdapterCall<'a>> {
        let limit = opts.limit;
        let mut calls: Vec<AdapterCall<'a>> = Vec::new();

        match view {
            ViewTab::Market => {
                let q = CryptoQuery {
                    limit,
                    query: opts.query.clone(),
                    sentiment: opts.sentiment,
                };
                calls.push(Box::pin(async move {
                    (SourceKind::Crypto, self.feeds.fetch_crypto(&q).await)
                }));
            }
            ViewTab::Bitcoin => calls.push(Box::pin(async move {
                (SourceKind::Bitcoin, self.feeds.fetch_bitcoin(limit).await)
            })),
            ViewTab::Rwa => calls.push(Box::pin(async move {
                (SourceKind::Rwa, self.feeds.fetch_rwa(limit).await)
            })),
            ViewTab::Messari => calls.push(Box::pin(async move {
                (SourceKind::Messari, self.feeds.fetch_messari(limit).await)
            })),
            ViewTab::Holdings => calls.push(Box::pin(async move {
                (SourceKind::Portfolio, self.feeds.fetch_portfolio(limit).await)
            })),
            ViewTab::Watchlist => calls.push(Box::pin(async move {
                (SourceKind::Watchlist, self.feeds.fetch_watchlist(limit).await)
            })),
            ViewTab::Reddit => {
                let sort = opts.sort;
                match opts.subreddit.clone() {
                    Some(sub) => calls.push(Box::pin(async move {
                        (
                            SourceKind::Reddit,
                            self.feeds.fetch_subreddit(&sub, sort, limit).await,
                        )
                    })),
                    None => {
                        for sub in DEFAULT_SUBREDDITS {
                            calls.push(Box::pin(async move {
                                (
                                    SourceKind::Reddit,
                                    self.feeds.fetch_subreddit(sub, sort, limit).await,
                                )
                            }));
                        }
                    }
                }
            }
            ViewTab::Macro => match opts.macro_category {
                MacroCategory::All => calls.push(Box::pin(async move {
                    (SourceKind::Macro, self.feeds.fetch_macro_all(limit).await)
                })),
                cat => calls.push(Box::pin(async move {
                    (
                        SourceKind::Macro,
                        self.feeds.fetch_macro_category(cat, limit).await,
                    )
                })),
            },
            ViewTab::All => {
                let q = CryptoQuery {
                    limit,
                    ..Default::default()
                };
                calls.push(Box::pin(async move {
                    (SourceKind::Crypto, self.feeds.fetch_crypto(&q).await)
                }));
                calls.push(Box::pin(async move {
                    (SourceKind::Bitcoin, self.feeds.fetch_bitcoin(limit).await)
                }));
                calls.push(Box::pin(async move {
                    (SourceKind::Rwa, self.feeds.fetch_rwa(limit).await)
                }));
                calls.push(Box::pin(async move {
                    (SourceKind::Messari, self.feeds.fetch_messari(limit).await)
                }));
                if !user.holdings.is_empty() {
                    calls.push(Box::pin(async move {
                        (SourceKind::Portfolio, self.feeds.fetch_portfolio(limit).await)
                    }));
                }
                calls.push(Box::pin(async move {
                    (SourceKind::Macro, self.feeds.fetch_macro_all(limit).await)
                }));
                for sub in DEFAULT_SUBREDDITS {
                    calls.push(Box::pin(async move {
                        (
                            SourceKind::Reddit,
                            self.feeds.fetch_subreddit(sub, RedditSort::Hot, limit).await,
                        )
                    }));
                }
            }
        }

        calls
    }

    /// Tag, normalize, and backfill mentioned symbols for one adapter's
    /// contribution.
    fn prepare(&self, raws: Vec<RawArticle>, kind: SourceKind) -> Vec<Article> {
        let mut articles = normalize_batch(raws, kind);
        for a in &mut articles {
            if a.currencies.is_empty() {
                let text = format!("{} {}", a.title, a.summary);
                a.currencies = self.lexicon.extract_symbols(&text);
            }
        }
        articles
    }

    /// Holdings-derived keyword filtering, where the view calls for it:
    /// the portfolio view and the aggregate view. Macro articles in the
    /// aggregate are market context and stay unfiltered.
    fn apply_relevance(&self, view: ViewTab, articles: Vec<Article>, user: &UserState) -> Vec<Article> {
        let keywords: KeywordSet = match view {
            ViewTab::Holdings | ViewTab::All if !user.holdings.is_empty() => {
                keywords_from_holdings(&user.holdings)
            }
            _ => return articles,
        };
        if view == ViewTab::All {
            let (macro_part, rest): (Vec<_>, Vec<_>) = articles
                .into_iter()
                .partition(|a| a.source_type == SourceKind::Macro);
            let mut kept = filter_articles(rest, &keywords);
            kept.extend(macro_part);
            kept
        } else {
            filter_articles(articles, &keywords)
        }
    }
}

/// Dedup by stringified id; for synthesized ids, the url is the secondary
/// key so the same story fanned in from two feeds collapses.
pub(crate) fn dedup_articles(articles: Vec<Article>) -> Vec<Article> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(articles.len());

    for a in articles {
        if !seen_ids.insert(a.id.clone()) {
            continue;
        }
        if a.has_synthetic_id() {
            if let Some(url) = &a.url {
                if !seen_urls.insert(url.clone()) {
                    continue;
                }
            }
        } else if let Some(url) = &a.url {
            seen_urls.insert(url.clone());
        }
        out.push(a);
    }
    out
}

fn parse_ts(a: &Article) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&a.timestamp)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Descending by timestamp; articles without a parseable timestamp sort
/// last. Stable, so ties keep adapter order.
pub(crate) fn sort_by_recency(articles: &mut [Article]) {
    articles.sort_by(|a, b| match (parse_ts(a), parse_ts(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
