use std::path::Path;
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::backend_api::{ApiError, BackendClient};
use crate::types::{AnalyticsSummary, Trade, TradeStatus};

// Mensajes por defecto cuando el fallo no trae texto propio.
const ERR_LOAD_ANALYTICS: &str = "Error al cargar analytics";
const ERR_LOAD_TRADES: &str = "Error al cargar trades";
const ERR_UPLOAD: &str = "Error al subir archivo";

#[derive(Default)]
struct StoreState {
    analytics: Option<AnalyticsSummary>,
    trades: Vec<Trade>,
    /// Count of outstanding actions; `loading()` reports `> 0`. Stays
    /// non-zero while any action is in flight, upload's follow-up refresh
    /// included.
    in_flight: u32,
    error: Option<String>,
}

/// Single source of truth for fetched analytics data and in-flight/error
/// status. Cheap to clone; all clones share one snapshot.
///
/// Overlapping calls to the same action are not serialized or cancelled:
/// both complete and the data field reflects whichever response lands last.
/// Callers that need mutual exclusion should gate on [`loading`].
///
/// [`loading`]: AnalyticsStore::loading
#[derive(Clone)]
pub struct AnalyticsStore {
    client: BackendClient,
    state: Arc<Mutex<StoreState>>,
}

impl AnalyticsStore {
    /// Store against the configured backend (env override or local default).
    pub fn new() -> Self {
        Self::with_client(BackendClient::new())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self::with_client(BackendClient::with_base_url(base_url))
    }

    pub fn with_client(client: BackendClient) -> Self {
        AnalyticsStore {
            client,
            state: Arc::new(Mutex::new(StoreState::default())),
        }
    }

    // ── Actions ──────────────────────────────────────────────────────────────

    /// Fetch the analytics summary and replace the held snapshot.
    ///
    /// Failures are absorbed into [`error`](AnalyticsStore::error); the
    /// previous summary is left untouched.
    pub async fn fetch_summary(&self) {
        self.action_started();
        match self.client.fetch_summary().await {
            Ok(summary) => {
                log::info!("Analytics summary loaded ({} trades)", summary.total_trades);
                self.state.lock().unwrap().analytics = Some(summary);
            }
            Err(e) => {
                log::error!("fetch_summary failed: {}", e);
                self.record_error(&e, ERR_LOAD_ANALYTICS);
            }
        }
        self.action_finished();
    }

    /// Fetch the trade list matching `filters` (opaque key/value pairs,
    /// forwarded to the backend unvalidated) and replace the held list.
    ///
    /// Failures are absorbed into [`error`](AnalyticsStore::error); the
    /// previous list is left untouched.
    pub async fn fetch_trades(&self, filters: &[(String, String)]) {
        self.action_started();
        match self.client.fetch_filtered_trades(filters).await {
            Ok(resp) => {
                log::info!("Loaded {} trade(s)", resp.trades.len());
                self.state.lock().unwrap().trades = resp.trades;
            }
            Err(e) => {
                log::error!("fetch_trades failed: {}", e);
                self.record_error(&e, ERR_LOAD_TRADES);
            }
        }
        self.action_finished();
    }

    /// Upload a trades file, then refresh the full snapshot (summary first,
    /// then the unfiltered trade list).
    ///
    /// The one action whose failure the caller observes directly: on error
    /// the message is recorded in shared state AND the error is returned.
    /// On success the raw upload response is handed back unparsed.
    pub async fn upload_trades(&self, path: &Path) -> Result<Value, ApiError> {
        self.action_started();
        let result = self.client.upload_trades(path).await;
        let outcome = match result {
            Ok(response) => {
                // El backend recalcula todo tras la carga; refrescar completo.
                self.fetch_summary().await;
                self.fetch_trades(&[]).await;
                Ok(response)
            }
            Err(e) => {
                log::error!("upload_trades failed: {}", e);
                self.record_error(&e, ERR_UPLOAD);
                Err(e)
            }
        };
        self.action_finished();
        outcome
    }

    // ── State accessors ──────────────────────────────────────────────────────

    /// The last-fetched summary, or `None` before the first successful fetch.
    /// This is the only view that preserves the absent-vs-zero distinction.
    pub fn analytics(&self) -> Option<AnalyticsSummary> {
        self.state.lock().unwrap().analytics.clone()
    }

    /// The last-fetched trade list in backend order.
    pub fn trades(&self) -> Vec<Trade> {
        self.state.lock().unwrap().trades.clone()
    }

    /// True exactly while at least one action's request is outstanding.
    pub fn loading(&self) -> bool {
        self.state.lock().unwrap().in_flight > 0
    }

    /// Message of the most recent failed action, cleared when the next
    /// action starts.
    pub fn error(&self) -> Option<String> {
        self.state.lock().unwrap().error.clone()
    }

    // ── Derived views ────────────────────────────────────────────────────────

    /// All trades ordered by open time, most recent first. Ties keep the
    /// backend's order (stable sort).
    pub fn sorted_trades(&self) -> Vec<Trade> {
        let mut trades = self.trades();
        trades.sort_by(|a, b| b.open_time.cmp(&a.open_time));
        trades
    }

    /// Trades the backend classified as winners.
    pub fn winning_trades(&self) -> Vec<Trade> {
        self.trades_with_status(TradeStatus::Winner)
    }

    /// Trades the backend classified as losers. Break-even trades appear in
    /// neither this view nor [`winning_trades`](AnalyticsStore::winning_trades).
    pub fn losing_trades(&self) -> Vec<Trade> {
        self.trades_with_status(TradeStatus::Loser)
    }

    /// Summary pass-through, `0.0` until a summary has been loaded.
    pub fn total_profit(&self) -> f64 {
        self.summary_field(|s| s.total_profit)
    }

    /// Summary pass-through, `0.0` until a summary has been loaded.
    pub fn win_rate(&self) -> f64 {
        self.summary_field(|s| s.win_rate)
    }

    /// Summary pass-through, `0.0` until a summary has been loaded.
    pub fn profit_factor(&self) -> f64 {
        self.summary_field(|s| s.profit_factor)
    }

    // ── Internal ─────────────────────────────────────────────────────────────

    fn trades_with_status(&self, status: TradeStatus) -> Vec<Trade> {
        self.state
            .lock()
            .unwrap()
            .trades
            .iter()
            .filter(|t| t.status == status)
            .cloned()
            .collect()
    }

    fn summary_field(&self, field: impl Fn(&AnalyticsSummary) -> f64) -> f64 {
        self.state
            .lock()
            .unwrap()
            .analytics
            .as_ref()
            .map(field)
            .unwrap_or(0.0)
    }

    fn action_started(&self) {
        let mut st = self.state.lock().unwrap();
        st.error = None;
        st.in_flight += 1;
    }

    fn action_finished(&self) {
        let mut st = self.state.lock().unwrap();
        st.in_flight = st.in_flight.saturating_sub(1);
    }

    // El mensaje guardado es el del propio fallo (sin código de estado ni
    // prefijo de clasificación); si viene vacío se usa el texto por defecto.
    fn record_error(&self, err: &ApiError, fallback: &str) {
        let msg = err.message();
        let msg = if msg.trim().is_empty() { fallback.to_string() } else { msg.to_string() };
        self.state.lock().unwrap().error = Some(msg);
    }
}
