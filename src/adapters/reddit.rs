// src/adapters/reddit.rs
//! Reddit feeds: subreddit listings and search, proxied by the backend.

use crate::article::RedditSort;
use crate::error::TransportError;
use crate::normalize::RawArticle;

use super::{clamp_limit, parse_items, FeedClient};

pub const PATH_REDDIT: &str = "/api/v1/news/reddit";
pub const PATH_REDDIT_SEARCH: &str = "/api/v1/news/reddit/search";

/// Standing subreddit list the aggregate view fans out over.
pub const DEFAULT_SUBREDDITS: [&str; 4] = ["CryptoCurrency", "Bitcoin", "ethereum", "CryptoMarkets"];

fn clean_subreddit(subreddit: &str) -> String {
    subreddit
        .trim()
        .trim_start_matches("r/")
        .trim_matches('/')
        .to_string()
}

impl FeedClient {
    pub async fn fetch_subreddit(
        &self,
        subreddit: &str,
        sort: RedditSort,
        limit: Option<u32>,
    ) -> Result<Vec<RawArticle>, TransportError> {
        let sub = clean_subreddit(subreddit);
        let path = format!("{}/{}/{}", PATH_REDDIT, sub, sort.as_str());
        let params = vec![("limit".to_string(), clamp_limit(limit).to_string())];
        let v = self.transport().get_json(&path, &params).await?;
        parse_items(v)
    }

    pub async fn search_reddit(
        &self,
        query: &str,
        subreddit: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<RawArticle>, TransportError> {
        let mut params = vec![
            ("q".to_string(), query.trim().to_string()),
            ("limit".to_string(), clamp_limit(limit).to_string()),
        ];
        if let Some(sub) = subreddit {
            let sub = clean_subreddit(sub);
            if !sub.is_empty() {
                params.push(("subreddit".to_string(), sub));
            }
        }
        let v = self.transport().get_json(PATH_REDDIT_SEARCH, &params).await?;
        parse_items(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subreddit_prefix_is_stripped() {
        assert_eq!(clean_subreddit("r/CryptoCurrency"), "CryptoCurrency");
        assert_eq!(clean_subreddit("  Bitcoin/ "), "Bitcoin");
    }
}
