use std::path::PathBuf;

use trade_analytics::types::{AnalyticsSummary, Trade, TradeStatus};
use trade_analytics::Analytics;

/// Terminal dashboard: fetches the analytics snapshot and renders it.
/// Usage: `dashboard [trades_file]` — with a file argument the trades are
/// uploaded first and the backend recomputes everything before rendering.
#[tokio::main]
async fn main() {
    env_logger::init();

    let analytics = Analytics::new();

    if let Some(path) = std::env::args().nth(1).map(PathBuf::from) {
        match analytics.upload_trades(&path).await {
            // La recarga (summary + trades) ya ocurrió dentro del store
            Ok(resp) => log::info!("Upload accepted: {}", resp),
            Err(e) => {
                eprintln!("  ❌ Upload failed: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        analytics.fetch_summary().await;
        analytics.fetch_trades(&[]).await;
    }

    let summary = match analytics.analytics() {
        Some(s) => s,
        None => {
            let reason = analytics
                .error()
                .unwrap_or_else(|| "sin datos del backend".to_string());
            eprintln!("  ❌ No se pudo cargar el dashboard: {}", reason);
            std::process::exit(1);
        }
    };

    print_summary(&summary, analytics.win_rate(), analytics.profit_factor());
    print_trades(&analytics.sorted_trades(), &analytics.winning_trades(), &analytics.losing_trades());
    print_daily(&summary);

    if let Some(err) = analytics.error() {
        // Datos parciales: el summary cargó pero alguna acción posterior falló
        eprintln!("\n  ⚠  {}", err);
    }
}

fn print_summary(s: &AnalyticsSummary, win_rate: f64, profit_factor: f64) {
    println!();
    println!("  ╔══════════════════════════════════════════════════╗");
    println!("  ║            TRADING BOT — ANALYTICS               ║");
    println!("  ╠══════════════════════════════════════════════════╣");
    println!(
        "  ║  Trades         {:>6}   ({} W / {} L / {} BE)",
        s.total_trades, s.winning_trades, s.losing_trades, s.break_even
    );
    println!("  ║  Win Rate       {:>6.1}%", win_rate * 100.0);
    println!(
        "  ║  Total PnL      {:>+9.2} USD  ({:+.1}%)",
        s.total_profit, s.total_profit_pct
    );
    println!("  ║  Profit Factor  {:>9.2}", profit_factor);
    println!(
        "  ║  Max Drawdown   {:>9.2} USD  ({:.1}%)",
        s.max_drawdown, s.max_drawdown_pct
    );
    println!(
        "  ║  Rachas         {:>3} wins / {} losses",
        s.longest_win_streak, s.longest_loss_streak
    );
    println!(
        "  ║  Mejor/peor día {:>+9.2} / {:+.2} USD",
        s.best_day_profit, s.worst_day_profit
    );
    if let Some(sharpe) = s.sharpe_ratio {
        println!("  ║  Sharpe         {:>9.2}", sharpe);
    }
    if let Some(expectancy) = s.expectancy {
        println!("  ║  Expectancy     {:>+9.2} USD", expectancy);
    }
    println!("  ╚══════════════════════════════════════════════════╝");
}

fn print_trades(sorted: &[Trade], winners: &[Trade], losers: &[Trade]) {
    println!();
    println!(
        "  Últimos trades ({} total, {} W / {} L):",
        sorted.len(),
        winners.len(),
        losers.len()
    );
    for t in sorted.iter().take(10) {
        let emoji = match t.status {
            TradeStatus::Winner => "🟢",
            TradeStatus::Loser => "🔴",
            TradeStatus::BreakEven => "⚪",
        };
        println!(
            "    {} #{:<5} {:<10} {:?}  {:>+9.2} USD ({:+.2}%)  {}",
            emoji,
            t.id,
            t.symbol,
            t.order_type,
            t.profit_usd,
            t.profit_pct,
            t.open_time.format("%Y-%m-%d %H:%M")
        );
    }
}

fn print_daily(s: &AnalyticsSummary) {
    if s.daily_stats.is_empty() {
        return;
    }
    println!();
    println!("  PnL por día:");
    for d in s.daily_stats.iter().rev().take(7) {
        let emoji = if d.profit >= 0.0 { "📈" } else { "📉" };
        println!(
            "    {} {}  {:>+9.2} USD  ({} trades)",
            emoji, d.date, d.profit, d.trades
        );
    }
}
