// tests/refresh_scheduler.rs

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubTransport;
use cryptofolio_news::adapters::FeedClient;
use cryptofolio_news::aggregator::{FetchOptions, NewsAggregator, UserState};
use cryptofolio_news::article::ViewTab;
use cryptofolio_news::lexicon::CryptoLexicon;
use cryptofolio_news::mock::MockCatalog;
use cryptofolio_news::scheduler::spawn_view_refresh;
use tokio::sync::mpsc;

#[tokio::test]
async fn refresh_delivers_tagged_results_until_aborted() {
    let stub = Arc::new(StubTransport::new());
    stub.route(
        "/api/v1/news/crypto",
        serde_json::json!({ "items": [{ "id": "1", "title": "tick" }] }),
    );
    let agg = Arc::new(NewsAggregator::new(
        FeedClient::new(stub),
        CryptoLexicon::standard().unwrap(),
        MockCatalog::empty(),
    ));

    let (tx, mut rx) = mpsc::channel(4);
    let handle = spawn_view_refresh(
        agg,
        ViewTab::Market,
        FetchOptions::default(),
        Duration::from_millis(10),
        UserState::default,
        tx,
    );

    let first = rx.recv().await.expect("first tick");
    assert_eq!(first.view(), ViewTab::Market);
    assert_eq!(first.articles().len(), 1);

    let second = rx.recv().await.expect("second tick");
    assert_eq!(second.view(), ViewTab::Market);

    handle.abort();
}
