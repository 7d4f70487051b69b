// tests/adapter_requests.rs
// Request shapes of the asset feed and reddit search adapters.

mod common;

use std::sync::Arc;

use common::StubTransport;
use cryptofolio_news::adapters::FeedClient;

fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn asset_feed_uppercases_the_symbol_in_the_path() {
    let stub = Arc::new(StubTransport::new());
    stub.route(
        "/api/v1/news/asset/SOL",
        serde_json::json!({ "items": [{
            "id": "s-1",
            "title": "Solana throughput record",
            "publishedAt": "2025-03-28T11:00:00Z"
        }]}),
    );
    let client = FeedClient::new(stub.clone());

    let items = client.fetch_asset("  sol ", Some(5)).await.unwrap();
    assert_eq!(items.len(), 1);

    let queries = stub.get_queries();
    assert_eq!(queries.len(), 1);
    let (path, params) = &queries[0];
    assert_eq!(path, "/api/v1/news/asset/SOL");
    assert_eq!(param(params, "limit"), Some("5"));
}

#[tokio::test]
async fn reddit_search_trims_query_and_cleans_subreddit() {
    let stub = Arc::new(StubTransport::new());
    stub.route(
        "/api/v1/news/reddit/search",
        serde_json::json!({ "items": [{
            "id": "r-1",
            "title": "ETF discussion",
            "author": "u1",
            "subreddit": "CryptoCurrency",
            "score": 12,
            "num_comments": 4,
            "permalink": "/r/CryptoCurrency/comments/r1/etf/"
        }]}),
    );
    let client = FeedClient::new(stub.clone());

    let items = client
        .search_reddit("  btc etf  ", Some("r/CryptoCurrency/"), None)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);

    let queries = stub.get_queries();
    let (path, params) = &queries[0];
    assert_eq!(path, "/api/v1/news/reddit/search");
    assert_eq!(param(params, "q"), Some("btc etf"));
    assert_eq!(param(params, "limit"), Some("10"));
    assert_eq!(param(params, "subreddit"), Some("CryptoCurrency"));
}

#[tokio::test]
async fn reddit_search_drops_a_blank_subreddit() {
    let stub = Arc::new(StubTransport::new());
    let client = FeedClient::new(stub.clone());

    client.search_reddit("halving", Some("  "), None).await.unwrap();

    let queries = stub.get_queries();
    let (_, params) = &queries[0];
    assert_eq!(param(params, "q"), Some("halving"));
    assert!(
        param(params, "subreddit").is_none(),
        "blank subreddit must not be sent"
    );
}
