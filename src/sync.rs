// src/sync.rs
//! Fire-and-forget writers that push current holdings and watchlist to
//! the backend so its server-side filtered feeds stay in step. Views
//! never block on these; outcomes are logged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::article::Holding;
use crate::error::TransportError;
use crate::transport::Transport;

pub const PATH_HOLDINGS_UPDATE: &str = "/api/v1/portfolio/holdings/update";
pub const PATH_WATCHLIST_UPDATE: &str = "/api/v1/portfolio/watchlist/update";

/// Call sites pass either fully shaped holdings or bare symbol strings;
/// bare strings expand to a quantity-1 placeholder position.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AssetSpec {
    Shaped(Holding),
    Bare(String),
}

impl From<AssetSpec> for Holding {
    fn from(spec: AssetSpec) -> Self {
        match spec {
            AssetSpec::Shaped(h) => h,
            AssetSpec::Bare(s) => Holding {
                symbol: s.clone(),
                name: s,
                quantity: 1.0,
                asset_id: None,
            },
        }
    }
}

#[derive(Clone)]
pub struct BackendSync {
    transport: Arc<dyn Transport>,
    user_id: String,
}

impl BackendSync {
    pub fn new(transport: Arc<dyn Transport>, user_id: impl Into<String>) -> Self {
        Self {
            transport,
            user_id: user_id.into(),
        }
    }

    /// Push the current watchlist. Symbols are coerced to strings upstream
    /// of this call; empty entries are dropped here.
    pub async fn update_watchlist<S: AsRef<str>>(&self, symbols: &[S]) -> Result<(), TransportError> {
        let symbols: Vec<String> = symbols
            .iter()
            .map(|s| s.as_ref().trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let body = json!({
            "user_id": self.user_id,
            "action": "add",
            "symbols": symbols,
        });
        self.transport.post_json(PATH_WATCHLIST_UPDATE, body).await?;
        Ok(())
    }

    pub async fn update_holdings(&self, assets: Vec<AssetSpec>) -> Result<(), TransportError> {
        let assets: Vec<Holding> = assets.into_iter().map(Holding::from).collect();
        let body = json!({
            "user_id": self.user_id,
            "assets": assets,
        });
        self.transport.post_json(PATH_HOLDINGS_UPDATE, body).await?;
        Ok(())
    }

    /// Fire-and-forget variant: spawn, log the outcome, return immediately.
    pub fn update_watchlist_detached(&self, symbols: Vec<String>) {
        let this = self.clone();
        tokio::spawn(async move {
            match this.update_watchlist(&symbols).await {
                Ok(()) => tracing::info!(count = symbols.len(), "watchlist synced to backend"),
                Err(e) => tracing::warn!(error = ?e, "watchlist sync failed"),
            }
        });
    }

    /// Fire-and-forget variant of [`Self::update_holdings`].
    pub fn update_holdings_detached(&self, assets: Vec<AssetSpec>) {
        let this = self.clone();
        tokio::spawn(async move {
            let count = assets.len();
            match this.update_holdings(assets).await {
                Ok(()) => tracing::info!(count, "holdings synced to backend"),
                Err(e) => tracing::warn!(error = ?e, "holdings sync failed"),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_strings_expand_to_quantity_one() {
        let h: Holding = AssetSpec::Bare("SOL".into()).into();
        assert_eq!(h.symbol, "SOL");
        assert_eq!(h.name, "SOL");
        assert_eq!(h.quantity, 1.0);
        assert!(h.asset_id.is_none());
    }

    #[test]
    fn asset_spec_deserializes_both_shapes() {
        let specs: Vec<AssetSpec> =
            serde_json::from_str(r#"["BTC", {"symbol": "ETH", "name": "Ethereum", "quantity": 2.5}]"#)
                .unwrap();
        let holdings: Vec<Holding> = specs.into_iter().map(Holding::from).collect();
        assert_eq!(holdings[0].symbol, "BTC");
        assert_eq!(holdings[1].symbol, "ETH");
        assert_eq!(holdings[1].quantity, 2.5);
    }
}
