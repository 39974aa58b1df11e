//! News ticker state.
//!
//! The ticker loads its items once. A source wrapped in [`WithFallback`]
//! never fails: any fetch error is logged and replaced by the built-in
//! announcements so the banner is never blank because of the network.

use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::warn;

/// Placeholder shown while the first fetch is in flight
pub const LOADING_LABEL: &str = "খবর লোড হচ্ছে...";

/// Heading rendered next to the scrolling items
pub const HEADING: &str = "সর্বশেষ খবর";

/// One announcement as the ticker needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerItem {
    /// Stable key
    pub id: i64,
    /// Text shown in the banner
    pub content: String,
}

impl TickerItem {
    fn new(id: i64, content: &str) -> Self {
        Self {
            id,
            content: content.to_string(),
        }
    }
}

/// Built-in announcements used when the feed cannot be fetched
#[must_use]
pub fn fallback_items() -> Vec<TickerItem> {
    vec![
        TickerItem::new(1, "শহীদ ওসমান হাদির হত্যাকাণ্ডের বিচার দাবিতে দেশব্যাপী আন্দোলন অব্যাহত"),
        TickerItem::new(2, "ন্যায়বিচার নিশ্চিত না হওয়া পর্যন্ত আন্দোলন চলবে"),
        TickerItem::new(3, "সকল শহীদদের স্মরণে আমরা প্রতিজ্ঞাবদ্ধ"),
    ]
}

/// Anything that can produce the active news list
pub trait NewsSource {
    /// Fetches the active items in feed order.
    fn fetch_active(&self) -> impl Future<Output = Result<Vec<TickerItem>>> + Send;
}

/// A source that substitutes [`fallback_items`] for any error
#[derive(Debug, Clone)]
pub struct WithFallback<S> {
    inner: S,
}

impl<S> WithFallback<S> {
    /// Wraps `inner`.
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: NewsSource + Sync> NewsSource for WithFallback<S> {
    async fn fetch_active(&self) -> Result<Vec<TickerItem>> {
        match self.inner.fetch_active().await {
            Ok(items) => Ok(items),
            Err(e) => {
                warn!(error = %e, "Failed to fetch news, using built-in announcements");
                Ok(fallback_items())
            }
        }
    }
}

/// Lifecycle of the ticker's data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickerState {
    /// No fetch has completed yet
    Loading,
    /// Items are known (possibly none)
    Ready(Vec<TickerItem>),
}

/// What the banner should show
#[derive(Debug, PartialEq, Eq)]
pub enum TickerView<'a> {
    /// The loading placeholder
    Loading(&'static str),
    /// Nothing at all
    Hidden,
    /// Heading plus the items laid out twice for a seamless loop
    Scrolling {
        /// Fixed heading label
        heading: &'static str,
        /// Items in display order, full list followed by itself
        items: Vec<&'a TickerItem>,
    },
}

/// News ticker bound to a data source
pub struct NewsTicker<S> {
    source: S,
    state: TickerState,
}

impl<S: NewsSource> NewsTicker<S> {
    /// A ticker in the loading state.
    pub const fn new(source: S) -> Self {
        Self {
            source,
            state: TickerState::Loading,
        }
    }

    /// Fetches once. Later calls return the stored state without fetching.
    ///
    /// If the source fails, the ticker settles on [`fallback_items`].
    pub async fn load(&mut self) -> &TickerState {
        if self.state == TickerState::Loading {
            let items = self.source.fetch_active().await.unwrap_or_else(|e| {
                warn!(error = %e, "Failed to fetch news, using built-in announcements");
                fallback_items()
            });
            self.state = TickerState::Ready(items);
        }
        &self.state
    }

    /// Current state.
    pub const fn state(&self) -> &TickerState {
        &self.state
    }

    /// The loaded items twice back to back; empty while loading.
    pub fn render_loop(&self) -> impl Iterator<Item = &TickerItem> {
        let items: &[TickerItem] = match &self.state {
            TickerState::Loading => &[],
            TickerState::Ready(items) => items,
        };
        items.iter().chain(items.iter())
    }

    /// Banner contents for the current state.
    pub fn view(&self) -> TickerView<'_> {
        match &self.state {
            TickerState::Loading => TickerView::Loading(LOADING_LABEL),
            TickerState::Ready(items) if items.is_empty() => TickerView::Hidden,
            TickerState::Ready(_) => TickerView::Scrolling {
                heading: HEADING,
                items: self.render_loop().collect(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted source that counts how often it was asked
    struct StubSource {
        items: Option<Vec<TickerItem>>,
        calls: AtomicUsize,
    }

    impl StubSource {
        fn ok(items: Vec<TickerItem>) -> Self {
            Self {
                items: Some(items),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                items: None,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl NewsSource for StubSource {
        async fn fetch_active(&self) -> Result<Vec<TickerItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.items.clone().ok_or_else(|| Error::Config {
                message: "offline".to_string(),
            })
        }
    }

    impl NewsSource for &StubSource {
        async fn fetch_active(&self) -> Result<Vec<TickerItem>> {
            (**self).fetch_active().await
        }
    }

    #[tokio::test]
    async fn test_fallback_on_error() {
        let source = WithFallback::new(StubSource::failing());
        let items = source.fetch_active().await.unwrap_or_default();
        assert_eq!(items, fallback_items());
        assert_eq!(items.len(), 3);
    }

    #[tokio::test]
    async fn test_fallback_passes_success_through() {
        let live = vec![TickerItem::new(9, "live")];
        let source = WithFallback::new(StubSource::ok(live.clone()));
        assert_eq!(source.fetch_active().await.unwrap_or_default(), live);
    }

    #[tokio::test]
    async fn test_fallback_keeps_empty_success() {
        let source = WithFallback::new(StubSource::ok(Vec::new()));
        assert!(source.fetch_active().await.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn test_load_fetches_once() {
        let stub = StubSource::ok(vec![TickerItem::new(1, "a")]);
        let mut ticker = NewsTicker::new(&stub);
        assert_eq!(ticker.view(), TickerView::Loading(LOADING_LABEL));

        ticker.load().await;
        ticker.load().await;
        assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_render_loop_duplicates_without_doubling_state() {
        let stub = StubSource::ok(vec![TickerItem::new(1, "a"), TickerItem::new(2, "b")]);
        let mut ticker = NewsTicker::new(&stub);
        ticker.load().await;

        let ids: Vec<i64> = ticker.render_loop().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 2, 1, 2]);
        assert!(matches!(ticker.state(), TickerState::Ready(items) if items.len() == 2));

        match ticker.view() {
            TickerView::Scrolling { heading, items } => {
                assert_eq!(heading, HEADING);
                assert_eq!(items.len(), 4);
            }
            other => panic!("unexpected view: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_feed_renders_nothing() {
        let stub = StubSource::ok(Vec::new());
        let mut ticker = NewsTicker::new(&stub);
        ticker.load().await;
        assert_eq!(ticker.view(), TickerView::Hidden);
        assert_eq!(ticker.render_loop().count(), 0);
    }

    #[tokio::test]
    async fn test_unwrapped_failing_source_still_shows_fallback() {
        let stub = StubSource::failing();
        let mut ticker = NewsTicker::new(&stub);
        ticker.load().await;

        assert_eq!(ticker.state(), &TickerState::Ready(fallback_items()));
        assert_ne!(ticker.view(), TickerView::Hidden);
        assert_eq!(ticker.render_loop().count(), 6);
    }

    #[tokio::test]
    async fn test_ticker_over_failing_source_shows_fallback() {
        let mut ticker = NewsTicker::new(WithFallback::new(StubSource::failing()));
        ticker.load().await;
        let contents: Vec<&str> = ticker.render_loop().map(|i| i.content.as_str()).collect();
        assert_eq!(contents.len(), 6);
        assert_eq!(contents[0], contents[3]);
    }
}
