// src/lexicon.rs
//! Crypto symbol lexicon and free-text symbol extraction.
//!
//! The lexicon is plain process-wide configuration: constructors take it
//! as a parameter so tests can run with their own tables, and the
//! embedded default is loaded once.

use std::collections::{BTreeSet, HashMap};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Serialized lexicon shape (`crypto_lexicon.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Well-known multi-letter ticker symbols, matched on word boundaries.
    #[serde(default)]
    pub symbols: Vec<String>,
    /// Well-known project names mapped to symbols.
    #[serde(default)]
    pub names: HashMap<String, String>,
    /// Single-letter tickers mapped to the full project names that must
    /// appear in the text; the bare letter is never sufficient.
    #[serde(default)]
    pub single_letter: HashMap<String, Vec<String>>,
}

static DEFAULT_LEXICON: Lazy<LexiconConfig> = Lazy::new(|| {
    let raw = include_str!("../crypto_lexicon.json");
    serde_json::from_str(raw).expect("valid embedded crypto lexicon")
});

/// Compiled lexicon: one alternation regex for tickers, per-name regexes
/// for short names where substring matching would be too loose.
#[derive(Debug)]
pub struct CryptoLexicon {
    symbol_re: Option<Regex>,
    /// (lowercased name, symbol, word-boundary regex for names of <= 3 chars)
    names: Vec<(String, String, Option<Regex>)>,
    /// (symbol, lowercased full names)
    single_letter: Vec<(String, Vec<String>)>,
}

impl CryptoLexicon {
    pub fn from_config(cfg: &LexiconConfig) -> Result<Self> {
        let symbol_re = if cfg.symbols.is_empty() {
            None
        } else {
            let alts: Vec<String> = cfg.symbols.iter().map(|s| regex::escape(s)).collect();
            Some(
                Regex::new(&format!(r"(?i)\b(?:{})\b", alts.join("|")))
                    .context("compiling symbol alternation")?,
            )
        };

        let mut names = Vec::with_capacity(cfg.names.len());
        for (name, symbol) in &cfg.names {
            let lower = name.trim().to_lowercase();
            // Empty and single-letter names are skipped; those belong in
            // the single-letter table with explicit full names.
            if lower.chars().count() < 2 {
                continue;
            }
            let word_re = if lower.chars().count() <= 3 {
                Some(
                    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&lower)))
                        .with_context(|| format!("compiling name regex for `{lower}`"))?,
                )
            } else {
                None
            };
            names.push((lower, symbol.trim().to_ascii_uppercase(), word_re));
        }
        names.sort_by(|a, b| a.0.cmp(&b.0));

        let mut single_letter: Vec<(String, Vec<String>)> = cfg
            .single_letter
            .iter()
            .map(|(sym, full_names)| {
                (
                    sym.trim().to_ascii_uppercase(),
                    full_names
                        .iter()
                        .map(|n| n.trim().to_lowercase())
                        .filter(|n| !n.is_empty())
                        .collect(),
                )
            })
            .collect();
        single_letter.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(Self {
            symbol_re,
            names,
            single_letter,
        })
    }

    /// The embedded default table.
    pub fn standard() -> Result<Self> {
        Self::from_config(&DEFAULT_LEXICON)
    }

    /// Recognized crypto symbols mentioned in `text`, deduplicated and
    /// upper-cased.
    pub fn extract_symbols(&self, text: &str) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        if text.trim().is_empty() {
            return out;
        }
        let lower = text.to_lowercase();

        if let Some(re) = &self.symbol_re {
            for m in re.find_iter(text) {
                out.insert(m.as_str().to_ascii_uppercase());
            }
        }

        for (name, symbol, word_re) in &self.names {
            let hit = match word_re {
                Some(re) => re.is_match(text),
                None => lower.contains(name.as_str()),
            };
            if hit {
                out.insert(symbol.clone());
            }
        }

        for (symbol, full_names) in &self.single_letter {
            if full_names.iter().any(|n| lower.contains(n.as_str())) {
                out.insert(symbol.clone());
            }
        }

        out
    }
}
