// src/mock.rs
//! Per-view canned fallback articles, used only when every live adapter
//! for a view yields nothing. Constructor-injected so tests can run with
//! their own (or an empty) catalog.

use std::collections::HashMap;

use anyhow::{Context, Result};
use once_cell::sync::Lazy;

use crate::article::{Article, ViewTab};

static DEFAULT_CATALOG: Lazy<HashMap<String, Vec<Article>>> = Lazy::new(|| {
    let raw = include_str!("../mock_catalog.json");
    serde_json::from_str(raw).expect("valid embedded mock catalog")
});

#[derive(Debug, Clone, Default)]
pub struct MockCatalog {
    by_view: HashMap<String, Vec<Article>>,
}

impl MockCatalog {
    /// Empty catalog: fallback yields nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        Self {
            by_view: DEFAULT_CATALOG.clone(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let by_view = serde_json::from_str(raw).context("parsing mock catalog json")?;
        Ok(Self { by_view })
    }

    fn entries(&self, key: &str) -> Vec<Article> {
        self.by_view.get(key).cloned().unwrap_or_default()
    }

    /// Canned articles matching the requesting view. The aggregate view
    /// draws on the market, macro, and reddit tables.
    pub fn for_view(&self, view: ViewTab) -> Vec<Article> {
        match view {
            ViewTab::All => {
                let mut out = self.entries("market");
                out.extend(self.entries("macro"));
                out.extend(self.entries("reddit"));
                out
            }
            other => self.entries(other.as_str()),
        }
    }
}
