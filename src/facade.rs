use std::path::Path;

use serde_json::Value;

use crate::backend_api::ApiError;
use crate::store::AnalyticsStore;
use crate::types::{AnalyticsSummary, Trade};

/// Stable, UI-facing handle over [`AnalyticsStore`].
///
/// Re-exposes every store field, view and action verbatim so consumers
/// depend on one import site; adds no state and no logic of its own.
#[derive(Clone)]
pub struct Analytics {
    store: AnalyticsStore,
}

impl Analytics {
    pub fn new() -> Self {
        Analytics { store: AnalyticsStore::new() }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Analytics { store: AnalyticsStore::with_base_url(base_url) }
    }

    // ── State ────────────────────────────────────────────────────────────────

    pub fn analytics(&self) -> Option<AnalyticsSummary> {
        self.store.analytics()
    }

    pub fn trades(&self) -> Vec<Trade> {
        self.store.trades()
    }

    pub fn loading(&self) -> bool {
        self.store.loading()
    }

    pub fn error(&self) -> Option<String> {
        self.store.error()
    }

    // ── Derived views ────────────────────────────────────────────────────────

    pub fn sorted_trades(&self) -> Vec<Trade> {
        self.store.sorted_trades()
    }

    pub fn winning_trades(&self) -> Vec<Trade> {
        self.store.winning_trades()
    }

    pub fn losing_trades(&self) -> Vec<Trade> {
        self.store.losing_trades()
    }

    pub fn total_profit(&self) -> f64 {
        self.store.total_profit()
    }

    pub fn win_rate(&self) -> f64 {
        self.store.win_rate()
    }

    pub fn profit_factor(&self) -> f64 {
        self.store.profit_factor()
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    pub async fn fetch_summary(&self) {
        self.store.fetch_summary().await
    }

    pub async fn fetch_trades(&self, filters: &[(String, String)]) {
        self.store.fetch_trades(filters).await
    }

    pub async fn upload_trades(&self, path: &Path) -> Result<Value, ApiError> {
        self.store.upload_trades(path).await
    }
}
