// src/normalize.rs
//! Normalizer: converts any adapter output into the canonical [`Article`]
//! shape, filling defaults and coercing identifier types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::article::{Article, RedditMeta, Sentiment, SourceKind};

pub const DEFAULT_TITLE: &str = "No Title Available";
pub const DEFAULT_SUMMARY: &str = "No summary available";

const REDDIT_BASE: &str = "https://www.reddit.com";

/// Tolerant upstream article shape. Feeds disagree on key names, id types
/// and which fields they bother to send; everything is optional here and
/// resolved in [`normalize`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawArticle {
    /// Upstream ids arrive as numbers or strings.
    pub id: Option<serde_json::Value>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "publishedAt", alias = "published_at", alias = "created_at")]
    pub timestamp: Option<String>,
    pub sentiment: Option<String>,
    pub source: Option<String>,
    pub url: Option<String>,
    #[serde(alias = "relatedCoins", alias = "related_coins")]
    pub currencies: Option<Vec<String>>,

    // Reddit listing extras
    pub author: Option<String>,
    pub subreddit: Option<String>,
    pub score: Option<i64>,
    #[serde(alias = "num_comments")]
    pub comments: Option<u64>,
    pub permalink: Option<String>,
    pub thumbnail: Option<String>,
    pub selftext: Option<String>,
}

impl From<Article> for RawArticle {
    fn from(a: Article) -> Self {
        let reddit = a.reddit.unwrap_or_default();
        let is_reddit = a.source_type == SourceKind::Reddit;
        RawArticle {
            id: Some(serde_json::Value::String(a.id)),
            title: Some(a.title),
            summary: Some(a.summary),
            description: None,
            timestamp: Some(a.timestamp),
            sentiment: Some(a.sentiment.as_str().to_string()),
            source: Some(a.source),
            url: a.url,
            currencies: Some(a.currencies.into_iter().collect()),
            author: is_reddit.then_some(reddit.author),
            subreddit: is_reddit.then_some(reddit.subreddit),
            score: is_reddit.then_some(reddit.score),
            comments: is_reddit.then_some(reddit.comments),
            permalink: is_reddit.then_some(reddit.permalink),
            thumbnail: reddit.thumbnail,
            selftext: reddit.selftext,
        }
    }
}

/// Collapse whitespace and decode HTML entities; upstream summaries often
/// arrive with markup fragments baked in.
pub fn clean_text(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: once_cell::sync::OnceCell<regex::Regex> = once_cell::sync::OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").to_string();
    out.trim().to_string()
}

/// Synthesize an id for articles the upstream sent without one:
/// `<source_type>-<ms>-<random>`.
fn synthesize_id(kind: SourceKind) -> String {
    let ms = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::random();
    format!("{}-{}-{:06x}", kind.as_str(), ms, nonce & 0xFF_FFFF)
}

fn coerce_id(raw: Option<serde_json::Value>, kind: SourceKind) -> String {
    match raw {
        Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => synthesize_id(kind),
    }
}

/// Make a Reddit permalink fully qualified.
fn qualify_permalink(p: &str) -> String {
    if p.starts_with("http://") || p.starts_with("https://") {
        p.to_string()
    } else if p.starts_with('/') {
        format!("{REDDIT_BASE}{p}")
    } else {
        format!("{REDDIT_BASE}/{p}")
    }
}

/// Normalize one upstream article into the canonical shape. Idempotent:
/// running an already-normalized article through again changes nothing.
pub fn normalize(raw: RawArticle, kind: SourceKind) -> Article {
    let title = match raw.title.as_deref().map(clean_text) {
        Some(t) if !t.is_empty() => t,
        _ => DEFAULT_TITLE.to_string(),
    };
    let summary = [raw.summary.as_deref(), raw.description.as_deref()]
        .into_iter()
        .flatten()
        .map(clean_text)
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_SUMMARY.to_string());

    let timestamp = match raw.timestamp {
        Some(ts) if !ts.trim().is_empty() => ts,
        _ => chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
    };

    let currencies: BTreeSet<String> = raw
        .currencies
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .collect();

    let reddit = if kind == SourceKind::Reddit {
        Some(RedditMeta {
            author: raw.author.unwrap_or_default(),
            subreddit: raw.subreddit.unwrap_or_default(),
            score: raw.score.unwrap_or(0),
            comments: raw.comments.unwrap_or(0),
            permalink: qualify_permalink(raw.permalink.as_deref().unwrap_or("")),
            thumbnail: raw.thumbnail,
            selftext: raw.selftext,
        })
    } else {
        None
    };

    // Reddit posts without an explicit url link to their own thread.
    let url = raw
        .url
        .filter(|u| !u.trim().is_empty())
        .or_else(|| reddit.as_ref().map(|r| r.permalink.clone()));

    Article {
        id: coerce_id(raw.id, kind),
        title,
        summary,
        source: match raw.source {
            Some(s) if !s.trim().is_empty() => s,
            _ => "Unknown".to_string(),
        },
        timestamp,
        sentiment: raw
            .sentiment
            .as_deref()
            .map(Sentiment::parse_lossy)
            .unwrap_or_default(),
        url,
        currencies,
        source_type: kind,
        reddit,
    }
}

/// Normalize a whole batch, preserving order.
pub fn normalize_batch(raws: Vec<RawArticle>, kind: SourceKind) -> Vec<Article> {
    raws.into_iter().map(|r| normalize(r, kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(v: serde_json::Value) -> RawArticle {
        serde_json::from_value(v).expect("raw article json")
    }

    #[test]
    fn fills_defaults_and_coerces_id() {
        let a = normalize(
            raw(serde_json::json!({ "id": 42, "relatedCoins": ["btc", "BTC", "eth"] })),
            SourceKind::Crypto,
        );
        assert_eq!(a.id, "42");
        assert_eq!(a.title, DEFAULT_TITLE);
        assert_eq!(a.summary, DEFAULT_SUMMARY);
        assert_eq!(a.sentiment, Sentiment::Neutral);
        assert_eq!(
            a.currencies.iter().cloned().collect::<Vec<_>>(),
            vec!["BTC", "ETH"]
        );
        assert!(!a.timestamp.is_empty());
    }

    #[test]
    fn summary_falls_back_to_description() {
        let a = normalize(
            raw(serde_json::json!({ "id": "x", "description": "from description" })),
            SourceKind::Crypto,
        );
        assert_eq!(a.summary, "from description");
    }

    #[test]
    fn missing_id_is_synthesized_with_source_prefix() {
        let a = normalize(raw(serde_json::json!({ "title": "t" })), SourceKind::Rwa);
        assert!(a.id.starts_with("rwa-"), "got id {}", a.id);
        assert!(a.has_synthetic_id());
    }

    #[test]
    fn synthesized_ids_are_unique() {
        let ids: std::collections::HashSet<String> = (0..64)
            .map(|_| normalize(RawArticle::default(), SourceKind::Crypto).id)
            .collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn reddit_permalink_is_fully_qualified() {
        let a = normalize(
            raw(serde_json::json!({
                "id": "abc",
                "title": "post",
                "author": "u1",
                "subreddit": "CryptoCurrency",
                "score": 10,
                "num_comments": 3,
                "permalink": "/r/CryptoCurrency/comments/abc/post/"
            })),
            SourceKind::Reddit,
        );
        let meta = a.reddit.expect("reddit meta");
        assert_eq!(
            meta.permalink,
            "https://www.reddit.com/r/CryptoCurrency/comments/abc/post/"
        );
        assert_eq!(a.url.as_deref(), Some(meta.permalink.as_str()));
        assert_eq!(meta.comments, 3);
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize(
            raw(serde_json::json!({
                "id": 7,
                "title": "BTC &amp; ETH rally",
                "summary": "  spaced   out  ",
                "source": "CryptoNews",
                "publishedAt": "2025-03-28T14:30:00Z",
                "sentiment": "positive",
                "relatedCoins": ["BTC"]
            })),
            SourceKind::Crypto,
        );
        let twice = normalize(RawArticle::from(once.clone()), SourceKind::Crypto);
        assert_eq!(once, twice);
    }

    #[test]
    fn reddit_normalization_is_idempotent() {
        let once = normalize(
            raw(serde_json::json!({
                "id": "abc",
                "title": "post",
                "author": "u1",
                "subreddit": "Bitcoin",
                "score": -2,
                "num_comments": 0,
                "permalink": "/r/Bitcoin/comments/abc/"
            })),
            SourceKind::Reddit,
        );
        let twice = normalize(RawArticle::from(once.clone()), SourceKind::Reddit);
        assert_eq!(once, twice);
    }

    #[test]
    fn clean_text_strips_tags_and_entities() {
        assert_eq!(
            clean_text("<p>Fees &amp; rewards</p>\n  are up"),
            "Fees & rewards are up"
        );
    }
}
