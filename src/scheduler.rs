// src/scheduler.rs
//! Recurring view refresh. The aggregate-portfolio view refetches every
//! five minutes by default; Reddit uses a longer interval to respect
//! upstream rate limits. Abort the returned handle on view teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::aggregator::{FetchOptions, NewsAggregator, UserState, ViewResult};
use crate::article::ViewTab;
use crate::config::AppConfig;

/// Configured refresh cadence for a view: Reddit polls on its own slower
/// interval, everything else on the portfolio interval.
pub fn refresh_interval(cfg: &AppConfig, view: ViewTab) -> Duration {
    match view {
        ViewTab::Reddit => cfg.reddit_refresh,
        _ => cfg.portfolio_refresh,
    }
}

/// [`spawn_view_refresh`] with the interval taken from config via
/// [`refresh_interval`].
pub fn spawn_configured_refresh<F>(
    aggregator: Arc<NewsAggregator>,
    view: ViewTab,
    opts: FetchOptions,
    cfg: &AppConfig,
    user_state: F,
    out: mpsc::Sender<ViewResult>,
) -> JoinHandle<()>
where
    F: Fn() -> UserState + Send + Sync + 'static,
{
    let interval = refresh_interval(cfg, view);
    spawn_view_refresh(aggregator, view, opts, interval, user_state, out)
}

/// Spawn a ticker that refetches `view` every `interval` and delivers
/// results on `out`. The user state is re-read each tick so keyword
/// filtering tracks portfolio changes. Stops when the receiver is
/// dropped or the handle is aborted.
pub fn spawn_view_refresh<F>(
    aggregator: Arc<NewsAggregator>,
    view: ViewTab,
    opts: FetchOptions,
    interval: Duration,
    user_state: F,
    out: mpsc::Sender<ViewResult>,
) -> JoinHandle<()>
where
    F: Fn() -> UserState + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // First tick fires immediately; views want data on mount.
        loop {
            ticker.tick().await;
            let user = user_state();
            let result = aggregator.fetch(view, &opts, &user).await;
            tracing::debug!(
                view = view.as_str(),
                articles = result.articles().len(),
                "scheduled refresh tick"
            );
            if out.send(result).await.is_err() {
                tracing::debug!(view = view.as_str(), "refresh consumer gone, stopping");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_come_from_config() {
        let cfg = AppConfig::default();
        assert_eq!(refresh_interval(&cfg, ViewTab::Reddit), cfg.reddit_refresh);
        assert_eq!(
            refresh_interval(&cfg, ViewTab::Holdings),
            cfg.portfolio_refresh
        );
        assert_eq!(refresh_interval(&cfg, ViewTab::All), cfg.portfolio_refresh);
    }
}
