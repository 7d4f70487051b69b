// src/article.rs
//! Canonical data model: the one `Article` shape every adapter output is
//! normalized into, plus the small enums the views dispatch on.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Sentiment label attached to an article. Upstream feeds send it in any
/// case; it normalizes to the uppercase wire form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Positive,
    #[default]
    Neutral,
    Negative,
}

impl Sentiment {
    /// Case-insensitive parse; anything unrecognized is `Neutral`.
    pub fn parse_lossy(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "POSITIVE" => Sentiment::Positive,
            "NEGATIVE" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Neutral => "NEUTRAL",
            Sentiment::Negative => "NEGATIVE",
        }
    }
}

/// Which adapter produced an article. Serialized as the lowercase tag the
/// dashboard uses for rendering and bookmark typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Crypto,
    Bitcoin,
    Portfolio,
    Watchlist,
    Rwa,
    Messari,
    Asset,
    Macro,
    Reddit,
    Mock,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Crypto => "crypto",
            SourceKind::Bitcoin => "bitcoin",
            SourceKind::Portfolio => "portfolio",
            SourceKind::Watchlist => "watchlist",
            SourceKind::Rwa => "rwa",
            SourceKind::Messari => "messari",
            SourceKind::Asset => "asset",
            SourceKind::Macro => "macro",
            SourceKind::Reddit => "reddit",
            SourceKind::Mock => "mock",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reddit-specific fields carried alongside the canonical article shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RedditMeta {
    pub author: String,
    pub subreddit: String,
    pub score: i64,
    pub comments: u64,
    /// Always a fully-qualified URL; normalized at the adapter boundary.
    pub permalink: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selftext: Option<String>,
}

/// The canonical unit of news surfaced to views. Every field is populated
/// after normalization; `id` equality defines article identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    /// ISO-8601 string; kept as text because upstreams disagree on
    /// precision and the views render it verbatim.
    pub timestamp: String,
    pub sentiment: Sentiment,
    pub url: Option<String>,
    pub currencies: BTreeSet<String>,
    pub source_type: SourceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reddit: Option<RedditMeta>,
}

impl Article {
    /// True when the id was synthesized locally rather than sent upstream.
    /// Synthesized ids are `<source_type>-<ms>-<nonce>`; the millisecond
    /// segment must be all digits so upstream slugs like
    /// `bitcoin-halving-2024` do not count.
    pub fn has_synthetic_id(&self) -> bool {
        let rest = match self
            .id
            .strip_prefix(self.source_type.as_str())
            .and_then(|r| r.strip_prefix('-'))
        {
            Some(r) => r,
            None => return false,
        };
        let mut parts = rest.splitn(2, '-');
        let ms = parts.next().unwrap_or("");
        let nonce = parts.next().unwrap_or("");
        !ms.is_empty() && ms.bytes().all(|b| b.is_ascii_digit()) && !nonce.is_empty()
    }
}

/// A portfolio position, owned by the portfolio collaborator and read-only
/// to this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub name: String,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchItem {
    pub symbol: String,
}

/// A named aggregation recipe: which adapters the aggregator composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewTab {
    Market,
    Bitcoin,
    Rwa,
    Messari,
    Watchlist,
    Holdings,
    Reddit,
    Macro,
    All,
}

impl ViewTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewTab::Market => "market",
            ViewTab::Bitcoin => "bitcoin",
            ViewTab::Rwa => "rwa",
            ViewTab::Messari => "messari",
            ViewTab::Watchlist => "watchlist",
            ViewTab::Holdings => "holdings",
            ViewTab::Reddit => "reddit",
            ViewTab::Macro => "macro",
            ViewTab::All => "all",
        }
    }
}

impl FromStr for ViewTab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "market" | "crypto" => Ok(ViewTab::Market),
            "bitcoin" => Ok(ViewTab::Bitcoin),
            "rwa" => Ok(ViewTab::Rwa),
            "messari" => Ok(ViewTab::Messari),
            "watchlist" => Ok(ViewTab::Watchlist),
            "holdings" | "portfolio" => Ok(ViewTab::Holdings),
            "reddit" => Ok(ViewTab::Reddit),
            "macro" => Ok(ViewTab::Macro),
            "all" => Ok(ViewTab::All),
            other => Err(format!("unknown view tab: {other}")),
        }
    }
}

impl fmt::Display for ViewTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacroCategory {
    Business,
    Technology,
    FederalReserve,
    FinancialMarkets,
    UsNews,
    Global,
    All,
}

impl MacroCategory {
    /// Every concrete category, in the order the aggregate view fans out.
    pub const CONCRETE: [MacroCategory; 6] = [
        MacroCategory::Business,
        MacroCategory::Technology,
        MacroCategory::FederalReserve,
        MacroCategory::FinancialMarkets,
        MacroCategory::UsNews,
        MacroCategory::Global,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MacroCategory::Business => "business",
            MacroCategory::Technology => "technology",
            MacroCategory::FederalReserve => "federal-reserve",
            MacroCategory::FinancialMarkets => "financial-markets",
            MacroCategory::UsNews => "us-news",
            MacroCategory::Global => "global",
            MacroCategory::All => "all",
        }
    }
}

impl FromStr for MacroCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "business" => Ok(MacroCategory::Business),
            "technology" => Ok(MacroCategory::Technology),
            "federal-reserve" => Ok(MacroCategory::FederalReserve),
            "financial-markets" => Ok(MacroCategory::FinancialMarkets),
            "us-news" => Ok(MacroCategory::UsNews),
            "global" => Ok(MacroCategory::Global),
            "all" => Ok(MacroCategory::All),
            other => Err(format!("unknown macro category: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RedditSort {
    #[default]
    Hot,
    New,
    Top,
    Rising,
}

impl RedditSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedditSort::Hot => "hot",
            RedditSort::New => "new",
            RedditSort::Top => "top",
            RedditSort::Rising => "rising",
        }
    }
}

impl FromStr for RedditSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(RedditSort::Hot),
            "new" => Ok(RedditSort::New),
            "top" => Ok(RedditSort::Top),
            "rising" => Ok(RedditSort::Rising),
            other => Err(format!("unknown reddit sort: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_parse_is_case_insensitive() {
        assert_eq!(Sentiment::parse_lossy("positive"), Sentiment::Positive);
        assert_eq!(Sentiment::parse_lossy("NEGATIVE"), Sentiment::Negative);
        assert_eq!(Sentiment::parse_lossy("Bullish"), Sentiment::Neutral);
        assert_eq!(Sentiment::parse_lossy(""), Sentiment::Neutral);
    }

    #[test]
    fn sentiment_serializes_uppercase() {
        let s = serde_json::to_string(&Sentiment::Positive).unwrap();
        assert_eq!(s, "\"POSITIVE\"");
    }

    #[test]
    fn view_tab_accepts_aliases() {
        assert_eq!("crypto".parse::<ViewTab>().unwrap(), ViewTab::Market);
        assert_eq!("portfolio".parse::<ViewTab>().unwrap(), ViewTab::Holdings);
        assert!("nope".parse::<ViewTab>().is_err());
    }

    #[test]
    fn synthetic_id_requires_millisecond_segment() {
        let mut a = Article {
            id: "bitcoin-1700000000000-abc123".into(),
            title: String::new(),
            summary: String::new(),
            source: String::new(),
            timestamp: String::new(),
            sentiment: Sentiment::Neutral,
            url: None,
            currencies: BTreeSet::new(),
            source_type: SourceKind::Bitcoin,
            reddit: None,
        };
        assert!(a.has_synthetic_id());

        // Upstream slug ids that happen to start with the feed name are
        // genuine ids, not synthesized ones.
        a.id = "bitcoin-halving-2024".into();
        assert!(!a.has_synthetic_id());

        a.id = "bitcoin-1700000000000".into();
        assert!(!a.has_synthetic_id(), "nonce segment is required");
        a.id = "etf-approval".into();
        assert!(!a.has_synthetic_id());
    }

    #[test]
    fn macro_categories_round_trip() {
        for c in MacroCategory::CONCRETE {
            assert_eq!(c.as_str().parse::<MacroCategory>().unwrap(), c);
        }
    }
}
