// src/keywords.rs
//! Read-only projections over user state (holdings, watchlist) and the
//! keyword sets derived from them for relevance filtering.
//!
//! Keyword sets are rebuilt from scratch whenever the source state
//! changes; nothing here mutates in place.

use std::collections::BTreeSet;

use crate::article::{Holding, WatchItem};

/// Generic terms always present in a holdings-derived keyword set, so the
/// portfolio feed keeps broad market coverage even for niche holdings.
pub const GENERIC_TERMS: [&str; 5] = ["crypto", "cryptocurrency", "blockchain", "token", "defi"];

/// Deduplicated set of lowercase keywords. Ordered for stable output.
pub type KeywordSet = BTreeSet<String>;

pub fn holdings_symbols(holdings: &[Holding]) -> Vec<String> {
    holdings
        .iter()
        .map(|h| h.symbol.to_ascii_uppercase())
        .collect()
}

pub fn holdings_names(holdings: &[Holding]) -> Vec<String> {
    holdings.iter().map(|h| h.name.clone()).collect()
}

pub fn watchlist_symbols(watchlist: &[WatchItem]) -> Vec<String> {
    watchlist
        .iter()
        .map(|w| w.symbol.to_ascii_uppercase())
        .collect()
}

fn push_variants(set: &mut KeywordSet, symbol: &str, name: &str, asset_id: Option<&str>) {
    let symbol = symbol.trim().to_lowercase();
    if !symbol.is_empty() {
        set.insert(symbol);
    }

    let name = name.trim().to_lowercase();
    if !name.is_empty() {
        set.insert(name.clone());
        if name.contains(' ') {
            set.insert(name.replace(' ', ""));
        }
        // "Chainlink"-style names also match without the chain suffix.
        if name.contains("chain") {
            let stripped = name.replace("chain", "").trim().to_string();
            if !stripped.is_empty() {
                set.insert(stripped);
            }
        }
    }

    if let Some(id) = asset_id {
        let id = id.trim().to_lowercase();
        if !id.is_empty() {
            set.insert(id);
        }
    }
}

/// Keywords from portfolio holdings, plus the standing generic terms.
pub fn keywords_from_holdings(holdings: &[Holding]) -> KeywordSet {
    let mut set = KeywordSet::new();
    for h in holdings {
        push_variants(&mut set, &h.symbol, &h.name, h.asset_id.as_deref());
    }
    for term in GENERIC_TERMS {
        set.insert(term.to_string());
    }
    set
}

/// Keywords from the watchlist: symbols only, no generic terms, so the
/// watchlist feed stays tight.
pub fn keywords_from_watchlist(watchlist: &[WatchItem]) -> KeywordSet {
    let mut set = KeywordSet::new();
    for w in watchlist {
        let sym = w.symbol.trim().to_lowercase();
        if !sym.is_empty() {
            set.insert(sym);
        }
    }
    set
}
