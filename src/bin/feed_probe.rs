// src/bin/feed_probe.rs
// Quick manual probe: fetch every view once against the configured
// backend and print what came back. Set NEWS_PROBE_FOLLOW=1 to keep
// running and print scheduled refreshes of the holdings and reddit views
// at their configured intervals.
//
// Run: `NEWS_API_BASE_URL=http://localhost:8000 cargo run --bin feed_probe`

use std::sync::Arc;

use cryptofolio_news::aggregator::FetchOptions;
use cryptofolio_news::scheduler::spawn_configured_refresh;
use cryptofolio_news::{build_core, AppConfig, Holding, UserState, ViewResult, ViewTab, WatchItem};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cfg = AppConfig::from_env();
    let (aggregator, _sync) = build_core(&cfg)?;

    let user = UserState {
        holdings: vec![Holding {
            symbol: "ETH".into(),
            name: "Ethereum".into(),
            quantity: 1.5,
            asset_id: Some("ethereum".into()),
        }],
        watchlist: vec![WatchItem { symbol: "SOL".into() }],
    };

    for view in [
        ViewTab::Market,
        ViewTab::Bitcoin,
        ViewTab::Rwa,
        ViewTab::Messari,
        ViewTab::Watchlist,
        ViewTab::Holdings,
        ViewTab::Reddit,
        ViewTab::Macro,
        ViewTab::All,
    ] {
        match aggregator.fetch(view, &FetchOptions::default(), &user).await {
            ViewResult::Articles(v) => println!(
                "{:<10} {:>3} articles{} (updated {})",
                view.as_str(),
                v.articles.len(),
                if v.is_fallback { " [mock]" } else { "" },
                v.last_updated.to_rfc3339()
            ),
            ViewResult::Empty { reason, .. } => {
                println!("{:<10} empty: {}", view.as_str(), reason.as_str())
            }
        }
    }

    if std::env::var("NEWS_PROBE_FOLLOW").is_ok() {
        let aggregator = Arc::new(aggregator);
        let (tx, mut rx) = mpsc::channel(8);
        for view in [ViewTab::Holdings, ViewTab::Reddit] {
            let user = user.clone();
            let _detached = spawn_configured_refresh(
                aggregator.clone(),
                view,
                FetchOptions::default(),
                &cfg,
                move || user.clone(),
                tx.clone(),
            );
        }
        drop(tx);
        println!("following holdings and reddit refreshes, Ctrl-C to stop");
        while let Some(result) = rx.recv().await {
            println!(
                "{:<10} {:>3} articles (refresh)",
                result.view().as_str(),
                result.articles().len()
            );
        }
    }

    Ok(())
}
