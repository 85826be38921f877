use core_types::TradeRecord;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The flat statistics object rendered by the dashboard.
///
/// This struct is the final output of the `StatsEngine` and is serialized
/// verbatim to the presentation layer, so the field casing matches what the
/// dashboard expects (camelCase object keys, snake_case list entries).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    // I. Closed-trade statistics
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    #[serde(rename = "totalPnL")]
    pub total_pnl: Decimal,
    /// Percentage of closed trades that won, to one decimal place.
    pub win_rate: Decimal,

    // II. Streaks (closed trades, newest first)
    pub current_win_streak: usize,
    pub current_loss_streak: usize,
    pub max_win_streak: usize,
    pub max_loss_streak: usize,

    // III. Calendar slices (all trades, any status)
    #[serde(rename = "todayPnL")]
    pub today_pnl: Decimal,
    pub today_trades_count: usize,
    #[serde(rename = "weekPnL")]
    pub week_pnl: Decimal,
    pub week_trades_count: usize,
    pub week_win_rate: Decimal,

    // IV. Symbol and month breakdowns
    pub best_symbols: Vec<SymbolPerformance>,
    pub worst_symbols: Vec<SymbolPerformance>,
    pub favorite_symbols: Vec<FavoriteSymbol>,
    pub recent_trades: Vec<TradeRecord>,
    pub monthly_data: Vec<MonthlyPerformance>,
}

impl DashboardStats {
    /// Creates a new, zeroed-out DashboardStats.
    ///
    /// This is also the result for an empty trade history: all counts 0, all
    /// rates 0, all lists empty.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            winning_trades: 0,
            losing_trades: 0,
            total_pnl: Decimal::ZERO,
            win_rate: Decimal::ZERO,
            current_win_streak: 0,
            current_loss_streak: 0,
            max_win_streak: 0,
            max_loss_streak: 0,
            today_pnl: Decimal::ZERO,
            today_trades_count: 0,
            week_pnl: Decimal::ZERO,
            week_trades_count: 0,
            week_win_rate: Decimal::ZERO,
            best_symbols: Vec::new(),
            worst_symbols: Vec::new(),
            favorite_symbols: Vec::new(),
            recent_trades: Vec::new(),
            monthly_data: Vec::new(),
        }
    }
}

impl Default for DashboardStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Aggregated performance of a single symbol over closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolPerformance {
    pub symbol: String,
    pub count: usize,
    pub total_pnl: Decimal,
    pub avg_pnl: Decimal,
    pub win_rate: Decimal,
}

/// How often a symbol was traded, any status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteSymbol {
    pub symbol: String,
    pub trade_count: usize,
}

/// P&L and trade count for one `YYYY-MM` month of closed trades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPerformance {
    pub month: String,
    pub pnl: Decimal,
    pub trades: usize,
}
