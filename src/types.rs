use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome classification assigned by the backend (exact zero band is
/// defined server-side).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeStatus {
    #[serde(rename = "GANADOR")]
    Winner,
    #[serde(rename = "PERDEDOR")]
    Loser,
    #[serde(rename = "BREAK_EVEN")]
    BreakEven,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "SELL")]
    Sell,
}

/// One closed position as reported by the backend. Immutable once received.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Trade {
    pub id: i64,
    pub open_time: DateTime<Utc>,
    pub close_time: DateTime<Utc>,
    pub symbol: String,
    pub order_type: OrderType,
    pub volume: f64,
    pub open_price: f64,
    pub close_price: f64,
    pub profit_usd: f64,
    pub profit_pct: f64,
    /// Segundos entre apertura y cierre.
    pub duration: f64,
    pub status: TradeStatus,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: String,
    pub profit: f64,
    pub trades: u32,
}

/// Server-computed aggregate statistics over the full trade set.
///
/// `equity_dates`, `equity_curve` and `drawdown_curve` are parallel arrays,
/// index-aligned and of equal length. Optional metrics are absent (not zero)
/// when the backend could not compute them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_trades: u32,
    pub winning_trades: u32,
    pub losing_trades: u32,
    pub break_even: u32,

    pub total_profit: f64,
    pub total_profit_pct: f64,

    pub win_rate: f64,
    pub profit_factor: f64,

    pub max_drawdown: f64,
    pub max_drawdown_pct: f64,

    pub longest_win_streak: u32,
    pub longest_loss_streak: u32,

    pub best_day_profit: f64,
    pub worst_day_profit: f64,

    pub equity_dates: Vec<String>,
    pub equity_curve: Vec<f64>,
    pub drawdown_curve: Vec<f64>,

    pub daily_stats: Vec<DailyStat>,
    pub profit_distribution: Vec<f64>,

    // Métricas avanzadas
    pub sharpe_ratio: Option<f64>,
    pub calmar_ratio: Option<f64>,
    pub recovery_factor: Option<f64>,
    pub expectancy: Option<f64>,

    /// PnL por hora del día (24 entradas cuando está presente).
    pub hourly_profit: Option<Vec<f64>>,
}

/// Body of the trade-filter endpoint. The backend omits `trades` when the
/// filter matches nothing, so it defaults to an empty list.
#[derive(Clone, Debug, Deserialize)]
pub struct TradesResponse {
    #[serde(default)]
    pub trades: Vec<Trade>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_deserializes_from_backend_json() {
        let json = r#"{
            "id": 7,
            "open_time": "2024-01-02T10:00:00Z",
            "close_time": "2024-01-02T14:30:00Z",
            "symbol": "EURUSD",
            "order_type": "BUY",
            "volume": 0.5,
            "open_price": 1.0934,
            "close_price": 1.0987,
            "profit_usd": 265.0,
            "profit_pct": 0.48,
            "duration": 16200,
            "status": "GANADOR"
        }"#;
        let trade: Trade = serde_json::from_str(json).unwrap();
        assert_eq!(trade.id, 7);
        assert_eq!(trade.order_type, OrderType::Buy);
        assert_eq!(trade.status, TradeStatus::Winner);
        assert_eq!(trade.open_time.to_rfc3339(), "2024-01-02T10:00:00+00:00");
    }

    #[test]
    fn summary_optional_metrics_absent_stay_none() {
        let json = r#"{
            "total_trades": 10, "winning_trades": 6, "losing_trades": 4, "break_even": 0,
            "total_profit": 1200.0, "total_profit_pct": 12.0,
            "win_rate": 0.6, "profit_factor": 1.8,
            "max_drawdown": 300.0, "max_drawdown_pct": 3.0,
            "longest_win_streak": 4, "longest_loss_streak": 2,
            "best_day_profit": 500.0, "worst_day_profit": -200.0,
            "equity_dates": ["2024-01-01"], "equity_curve": [10000.0], "drawdown_curve": [0.0],
            "daily_stats": [{"date": "2024-01-01", "profit": 120.0, "trades": 3}],
            "profit_distribution": [1.0, 2.0, 4.0, 2.0, 1.0]
        }"#;
        let summary: AnalyticsSummary = serde_json::from_str(json).unwrap();
        assert!(summary.sharpe_ratio.is_none());
        assert!(summary.hourly_profit.is_none());
        assert_eq!(summary.equity_dates.len(), summary.equity_curve.len());
        assert_eq!(summary.daily_stats[0].trades, 3);
    }

    #[test]
    fn trades_response_defaults_to_empty_list() {
        let resp: TradesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.trades.is_empty());
    }
}
