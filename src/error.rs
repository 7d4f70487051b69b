// src/error.rs
//! Error taxonomy for the news core.
//!
//! The aggregator quarantines adapter failures, so most of these never
//! reach a view; `EmptyReason` is the one signal that does.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl TransportError {
    /// HTTP status code, when the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Why a view could not be satisfied without talking to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    NoPortfolio,
    NoWatchlist,
}

impl EmptyReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmptyReason::NoPortfolio => "no_portfolio",
            EmptyReason::NoWatchlist => "no_watchlist",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("serializing bookmarks: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("writing bookmark file: {0}")]
    Io(#[from] std::io::Error),
}
