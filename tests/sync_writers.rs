// tests/sync_writers.rs
// Payload shapes of the backend sync writers.

mod common;

use std::sync::Arc;

use common::StubTransport;
use cryptofolio_news::sync::{AssetSpec, BackendSync};
use cryptofolio_news::Holding;

#[tokio::test]
async fn watchlist_update_posts_expected_payload() {
    let stub = Arc::new(StubTransport::new());
    let sync = BackendSync::new(stub.clone(), "user123");

    sync.update_watchlist(&["BTC", " ETH ", ""]).await.unwrap();

    let posts = stub.posts.lock().unwrap();
    assert_eq!(posts.len(), 1);
    let (path, body) = &posts[0];
    assert_eq!(path, "/api/v1/portfolio/watchlist/update");
    assert_eq!(body["user_id"], "user123");
    assert_eq!(body["action"], "add");
    assert_eq!(body["symbols"], serde_json::json!(["BTC", "ETH"]));
}

#[tokio::test]
async fn holdings_update_expands_bare_strings() {
    let stub = Arc::new(StubTransport::new());
    let sync = BackendSync::new(stub.clone(), "user123");

    sync.update_holdings(vec![
        AssetSpec::Bare("SOL".into()),
        AssetSpec::Shaped(Holding {
            symbol: "ETH".into(),
            name: "Ethereum".into(),
            quantity: 2.5,
            asset_id: Some("ethereum".into()),
        }),
    ])
    .await
    .unwrap();

    let posts = stub.posts.lock().unwrap();
    let (path, body) = &posts[0];
    assert_eq!(path, "/api/v1/portfolio/holdings/update");
    assert_eq!(body["user_id"], "user123");
    let assets = body["assets"].as_array().unwrap();
    assert_eq!(assets[0]["symbol"], "SOL");
    assert_eq!(assets[0]["quantity"], 1.0);
    assert_eq!(assets[1]["symbol"], "ETH");
    assert_eq!(assets[1]["quantity"], 2.5);
}
