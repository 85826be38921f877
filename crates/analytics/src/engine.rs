use crate::stats::{DashboardStats, FavoriteSymbol, MonthlyPerformance, SymbolPerformance};
use chrono::{Datelike, Days, NaiveDate};
use core_types::TradeRecord;
use rust_decimal::{Decimal, RoundingStrategy};
use std::collections::BTreeMap;

/// How many entries each dashboard list carries.
const RECENT_TRADES_LIMIT: usize = 5;
const BEST_SYMBOLS_LIMIT: usize = 5;
const WORST_SYMBOLS_LIMIT: usize = 5;
const FAVORITE_SYMBOLS_LIMIT: usize = 10;

/// A stateless calculator for deriving dashboard statistics from a user's
/// trade history.
#[derive(Debug, Default)]
pub struct StatsEngine {}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for computing the dashboard statistics.
    ///
    /// # Arguments
    ///
    /// * `trades` - The user's full trade history, ordered newest first
    ///   (date descending). The streak and recent-trades results are only
    ///   meaningful under that ordering; callers must supply it. The trade
    ///   store returns rows in exactly this order.
    /// * `today` - The reference date. Injected rather than read from the
    ///   system clock so the calculation is deterministic.
    ///
    /// # Returns
    ///
    /// A complete `DashboardStats`. This never fails: an empty history
    /// produces zeroed counts, zero rates, and empty lists, and a missing
    /// `profit_loss` counts as zero in every sum.
    pub fn calculate(&self, trades: &[TradeRecord], today: NaiveDate) -> DashboardStats {
        let mut stats = DashboardStats::new();

        // Only fully realized trades participate in P&L, win-rate, streak,
        // symbol-performance, and monthly statistics. The calendar slices,
        // favorite symbols, and recent trades consider every status.
        let closed: Vec<&TradeRecord> = trades
            .iter()
            .filter(|t| t.trade_status.is_closed())
            .collect();

        self.calculate_totals(&closed, &mut stats);
        self.calculate_streaks(&closed, &mut stats);
        self.calculate_today(trades, today, &mut stats);
        self.calculate_week(trades, today, &mut stats);
        self.calculate_symbol_performance(&closed, &mut stats);
        self.calculate_favorite_symbols(trades, &mut stats);
        self.calculate_monthly_performance(&closed, &mut stats);

        stats.recent_trades = trades.iter().take(RECENT_TRADES_LIMIT).cloned().collect();

        stats
    }

    /// Counts, total P&L, and overall win rate over closed trades.
    ///
    /// A trade with zero or missing P&L is breakeven: it counts toward
    /// `total_trades` but is neither a win nor a loss.
    fn calculate_totals(&self, closed: &[&TradeRecord], stats: &mut DashboardStats) {
        stats.total_trades = closed.len();

        let mut total_pnl = Decimal::ZERO;
        for trade in closed {
            let pnl = trade.realized_pnl();
            total_pnl += pnl;

            if pnl > Decimal::ZERO {
                stats.winning_trades += 1;
            } else if pnl < Decimal::ZERO {
                stats.losing_trades += 1;
            }
        }

        stats.total_pnl = round_currency(total_pnl);
        stats.win_rate = percentage(stats.winning_trades, stats.total_trades);
    }

    /// The four streak statistics over the newest-first closed sequence.
    ///
    /// Current streaks count the leading run only; max streaks scan the whole
    /// sequence, with any breakeven resetting the running counter.
    fn calculate_streaks(&self, closed: &[&TradeRecord], stats: &mut DashboardStats) {
        let is_win = |t: &TradeRecord| t.realized_pnl() > Decimal::ZERO;
        let is_loss = |t: &TradeRecord| t.realized_pnl() < Decimal::ZERO;

        stats.current_win_streak = leading_run(closed, is_win);
        stats.current_loss_streak = leading_run(closed, is_loss);
        stats.max_win_streak = longest_run(closed, is_win);
        stats.max_loss_streak = longest_run(closed, is_loss);
    }

    /// P&L and trade count for `today`, over trades of any status.
    fn calculate_today(&self, trades: &[TradeRecord], today: NaiveDate, stats: &mut DashboardStats) {
        let mut pnl = Decimal::ZERO;
        for trade in trades.iter().filter(|t| t.date == today) {
            pnl += trade.realized_pnl();
            stats.today_trades_count += 1;
        }
        stats.today_pnl = round_currency(pnl);
    }

    /// Week-to-date P&L, trade count, and win rate, over trades of any status.
    ///
    /// The week starts on the Monday of the ISO week containing `today`.
    fn calculate_week(&self, trades: &[TradeRecord], today: NaiveDate, stats: &mut DashboardStats) {
        let week_start = week_start(today);

        let mut pnl = Decimal::ZERO;
        let mut wins = 0;
        for trade in trades.iter().filter(|t| t.date >= week_start) {
            pnl += trade.realized_pnl();
            stats.week_trades_count += 1;
            if trade.realized_pnl() > Decimal::ZERO {
                wins += 1;
            }
        }

        stats.week_pnl = round_currency(pnl);
        stats.week_win_rate = percentage(wins, stats.week_trades_count);
    }

    /// Per-symbol performance over closed trades, split into best and worst.
    ///
    /// Both lists come from a single ordering by total P&L descending:
    /// `best_symbols` is its head, and `worst_symbols` is the first
    /// `WORST_SYMBOLS_LIMIT` entries whose total is negative, in the same
    /// order. The worst list therefore leads with the least-bad losers; the
    /// dashboard has always presented it that way.
    fn calculate_symbol_performance(&self, closed: &[&TradeRecord], stats: &mut DashboardStats) {
        #[derive(Default)]
        struct Acc {
            count: usize,
            total_pnl: Decimal,
            wins: usize,
        }

        let mut by_symbol: BTreeMap<String, Acc> = BTreeMap::new();
        for trade in closed {
            let acc = by_symbol.entry(trade.symbol.clone()).or_default();
            acc.count += 1;
            acc.total_pnl += trade.realized_pnl();
            if trade.realized_pnl() > Decimal::ZERO {
                acc.wins += 1;
            }
        }

        // Stable sort: ties keep the BTreeMap's symbol order, so the result
        // is deterministic regardless of input order.
        let mut ranked: Vec<(String, Acc)> = by_symbol.into_iter().collect();
        ranked.sort_by(|a, b| b.1.total_pnl.cmp(&a.1.total_pnl));

        let entry = |symbol: &String, acc: &Acc| SymbolPerformance {
            symbol: symbol.clone(),
            count: acc.count,
            total_pnl: round_currency(acc.total_pnl),
            avg_pnl: round_currency(acc.total_pnl / Decimal::from(acc.count as u64)),
            win_rate: percentage(acc.wins, acc.count),
        };

        stats.best_symbols = ranked
            .iter()
            .take(BEST_SYMBOLS_LIMIT)
            .map(|(s, a)| entry(s, a))
            .collect();

        // Negativity is judged on the exact total, before display rounding.
        stats.worst_symbols = ranked
            .iter()
            .filter(|(_, a)| a.total_pnl < Decimal::ZERO)
            .take(WORST_SYMBOLS_LIMIT)
            .map(|(s, a)| entry(s, a))
            .collect();
    }

    /// The most-traded symbols, any status, by occurrence count.
    fn calculate_favorite_symbols(&self, trades: &[TradeRecord], stats: &mut DashboardStats) {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for trade in trades {
            *counts.entry(trade.symbol.clone()).or_default() += 1;
        }

        let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        stats.favorite_symbols = ranked
            .into_iter()
            .take(FAVORITE_SYMBOLS_LIMIT)
            .map(|(symbol, trade_count)| FavoriteSymbol {
                symbol,
                trade_count,
            })
            .collect();
    }

    /// Closed-trade P&L and counts grouped by `YYYY-MM`, ascending by month.
    fn calculate_monthly_performance(&self, closed: &[&TradeRecord], stats: &mut DashboardStats) {
        let mut by_month: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        for trade in closed {
            let month = trade.date.format("%Y-%m").to_string();
            let acc = by_month.entry(month).or_default();
            acc.0 += trade.realized_pnl();
            acc.1 += 1;
        }

        // BTreeMap iteration is ascending by key, which for YYYY-MM keys is
        // chronological order.
        stats.monthly_data = by_month
            .into_iter()
            .map(|(month, (pnl, trades))| MonthlyPerformance {
                month,
                pnl: round_currency(pnl),
                trades,
            })
            .collect();
    }
}

/// The Monday beginning the ISO week that contains `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    let days_from_monday = date.weekday().num_days_from_monday();
    date - Days::new(u64::from(days_from_monday))
}

/// Length of the run of matching trades at the head of the sequence.
fn leading_run(trades: &[&TradeRecord], matches: impl Fn(&TradeRecord) -> bool) -> usize {
    trades.iter().take_while(|t| matches(t)).count()
}

/// Length of the longest run of matching trades anywhere in the sequence.
fn longest_run(trades: &[&TradeRecord], matches: impl Fn(&TradeRecord) -> bool) -> usize {
    let mut max_streak = 0;
    let mut current = 0;
    for trade in trades {
        if matches(trade) {
            current += 1;
            max_streak = max_streak.max(current);
        } else {
            current = 0;
        }
    }
    max_streak
}

/// Currency amounts surface with 2 decimal places, midpoint away from zero.
fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole` as a percentage with 1 decimal place; 0 when `whole` is 0.
fn percentage(part: usize, whole: usize) -> Decimal {
    if whole == 0 {
        return Decimal::ZERO;
    }
    let pct = Decimal::from(part as u64) / Decimal::from(whole as u64) * Decimal::ONE_HUNDRED;
    pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use core_types::{TradeStatus, TradeType};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn trade(
        date: &str,
        symbol: &str,
        pnl: Option<Decimal>,
        status: TradeStatus,
    ) -> TradeRecord {
        TradeRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            date: date.parse().expect("test date"),
            symbol: symbol.to_string(),
            trade_type: TradeType::Long,
            trade_status: status,
            entry_price: dec!(100),
            exit_price: None,
            quantity: 1,
            stop_loss: None,
            target_price: None,
            exit_reason: None,
            profit_loss: pnl,
            percentage_gain_loss: None,
            setup_type: None,
            confidence_level: None,
            emotion_notes: None,
            learning_notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn closed(date: &str, symbol: &str, pnl: Decimal) -> TradeRecord {
        trade(date, symbol, Some(pnl), TradeStatus::Closed)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 13).unwrap() // a Wednesday
    }

    #[test]
    fn empty_history_is_all_zeroes() {
        let stats = StatsEngine::new().calculate(&[], today());
        assert_eq!(stats, DashboardStats::new());
    }

    #[test]
    fn single_winning_trade_today() {
        let trades = vec![closed("2024-03-13", "AAPL", dec!(100))];
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.winning_trades, 1);
        assert_eq!(stats.losing_trades, 0);
        assert_eq!(stats.total_pnl, dec!(100));
        assert_eq!(stats.win_rate, dec!(100.0));
        assert_eq!(stats.current_win_streak, 1);
        assert_eq!(stats.max_win_streak, 1);
        assert_eq!(stats.today_pnl, dec!(100));
        assert_eq!(stats.today_trades_count, 1);
    }

    #[test]
    fn streaks_over_mixed_sequence() {
        // Newest first: [50, -20, 30, 40, -10]
        let trades = vec![
            closed("2024-03-12", "A", dec!(50)),
            closed("2024-03-11", "A", dec!(-20)),
            closed("2024-03-10", "A", dec!(30)),
            closed("2024-03-09", "A", dec!(40)),
            closed("2024-03-08", "A", dec!(-10)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.current_win_streak, 1);
        assert_eq!(stats.current_loss_streak, 0);
        assert_eq!(stats.max_win_streak, 2);
        assert_eq!(stats.max_loss_streak, 1);
    }

    #[test]
    fn breakeven_resets_max_runs_and_stops_current() {
        // Newest first: [10, breakeven, 20, 30]; the missing P&L is breakeven too.
        let trades = vec![
            closed("2024-03-12", "A", dec!(10)),
            trade("2024-03-11", "A", None, TradeStatus::Closed),
            closed("2024-03-10", "A", dec!(20)),
            closed("2024-03-09", "A", dec!(30)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.current_win_streak, 1);
        assert_eq!(stats.max_win_streak, 2);
        assert_eq!(stats.current_loss_streak, 0);
        assert_eq!(stats.max_loss_streak, 0);
        // Breakeven trades count toward the total but to neither side.
        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.winning_trades, 3);
        assert_eq!(stats.losing_trades, 0);
    }

    #[test]
    fn streak_maxima_dominate_current_streaks() {
        let trades = vec![
            closed("2024-03-12", "A", dec!(5)),
            closed("2024-03-11", "A", dec!(-1)),
            closed("2024-03-10", "A", dec!(7)),
            closed("2024-03-09", "A", dec!(9)),
            closed("2024-03-08", "A", dec!(2)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());
        assert!(stats.max_win_streak >= stats.current_win_streak);
        assert!(stats.max_loss_streak >= stats.current_loss_streak);
    }

    #[test]
    fn only_closed_trades_feed_totals() {
        let trades = vec![
            trade("2024-03-12", "AAPL", Some(dec!(40)), TradeStatus::Open),
            trade("2024-03-11", "AAPL", Some(dec!(15)), TradeStatus::Partial),
            closed("2024-03-10", "AAPL", dec!(25)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.total_pnl, dec!(25));
        // All-status views still see everything.
        assert_eq!(stats.recent_trades.len(), 3);
        assert_eq!(stats.favorite_symbols[0].trade_count, 3);
    }

    #[test]
    fn symbol_performance_average_and_win_rate() {
        let trades = vec![
            closed("2024-03-12", "AAPL", dec!(10)),
            closed("2024-03-11", "AAPL", dec!(-5)),
            closed("2024-03-10", "AAPL", dec!(20)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        let aapl = &stats.best_symbols[0];
        assert_eq!(aapl.symbol, "AAPL");
        assert_eq!(aapl.count, 3);
        assert_eq!(aapl.total_pnl, dec!(25));
        assert_eq!(aapl.avg_pnl, dec!(8.33));
        assert_eq!(aapl.win_rate, dec!(66.7));
    }

    #[test]
    fn worst_symbols_are_the_least_bad_losers() {
        let trades = vec![
            closed("2024-03-12", "AA", dec!(10)),
            closed("2024-03-11", "BB", dec!(-1)),
            closed("2024-03-10", "CC", dec!(-5)),
            closed("2024-03-09", "DD", dec!(-20)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        let best: Vec<&str> = stats.best_symbols.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(best, vec!["AA", "BB", "CC", "DD"]);

        // Same descending-by-total order, negatives only: the list leads with
        // the least negative symbol, not the most negative one.
        let worst: Vec<&str> = stats.worst_symbols.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(worst, vec!["BB", "CC", "DD"]);
    }

    #[test]
    fn worst_symbols_cap_at_five() {
        let trades: Vec<TradeRecord> = (1..=7)
            .map(|i| closed("2024-03-10", &format!("S{i}"), Decimal::from(-i)))
            .collect();
        let stats = StatsEngine::new().calculate(&trades, today());
        assert_eq!(stats.worst_symbols.len(), 5);
        assert_eq!(stats.worst_symbols[0].total_pnl, dec!(-1));
    }

    #[test]
    fn favorite_symbols_rank_by_count_across_statuses() {
        let trades = vec![
            trade("2024-03-12", "X", None, TradeStatus::Open),
            closed("2024-03-11", "X", dec!(1)),
            closed("2024-03-10", "X", dec!(1)),
            closed("2024-03-09", "Y", dec!(1)),
            closed("2024-03-08", "Y", dec!(1)),
            closed("2024-03-07", "Z", dec!(1)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        let favorites: Vec<(&str, usize)> = stats
            .favorite_symbols
            .iter()
            .map(|f| (f.symbol.as_str(), f.trade_count))
            .collect();
        assert_eq!(favorites, vec![("X", 3), ("Y", 2), ("Z", 1)]);
    }

    #[test]
    fn week_starts_on_monday() {
        // today() is Wednesday 2024-03-13, so the week started Monday 2024-03-11.
        let trades = vec![
            trade("2024-03-12", "A", Some(dec!(100)), TradeStatus::Open),
            closed("2024-03-10", "A", dec!(50)), // previous week's Sunday
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.week_pnl, dec!(100));
        assert_eq!(stats.week_trades_count, 1);
        assert_eq!(stats.week_win_rate, dec!(100.0));
    }

    #[test]
    fn sunday_belongs_to_the_week_started_six_days_earlier() {
        let sunday = NaiveDate::from_ymd_opt(2024, 3, 17).unwrap();
        let trades = vec![
            closed("2024-03-11", "A", dec!(10)), // that week's Monday
            closed("2024-03-10", "A", dec!(99)), // the Sunday before
        ];
        let stats = StatsEngine::new().calculate(&trades, sunday);

        assert_eq!(stats.week_pnl, dec!(10));
        assert_eq!(stats.week_trades_count, 1);
    }

    #[test]
    fn monthly_rollup_ascends_by_month() {
        let trades = vec![
            closed("2024-02-10", "A", dec!(30)),
            closed("2024-02-05", "A", dec!(-10)),
            closed("2024-01-20", "B", dec!(100)),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.monthly_data.len(), 2);
        assert_eq!(stats.monthly_data[0].month, "2024-01");
        assert_eq!(stats.monthly_data[0].pnl, dec!(100));
        assert_eq!(stats.monthly_data[0].trades, 1);
        assert_eq!(stats.monthly_data[1].month, "2024-02");
        assert_eq!(stats.monthly_data[1].pnl, dec!(20));
        assert_eq!(stats.monthly_data[1].trades, 2);
    }

    #[test]
    fn recent_trades_are_the_first_five() {
        let trades: Vec<TradeRecord> = (1..=7)
            .map(|i| closed(&format!("2024-03-{:02}", 13 - i), "A", Decimal::from(i)))
            .collect();
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.recent_trades.len(), 5);
        assert_eq!(stats.recent_trades[0].profit_loss, Some(dec!(1)));
        assert_eq!(stats.recent_trades[4].profit_loss, Some(dec!(5)));
    }

    #[test]
    fn currency_rounds_midpoint_away_from_zero() {
        let stats = StatsEngine::new().calculate(
            &[closed("2024-03-10", "A", dec!(12.345))],
            today(),
        );
        assert_eq!(stats.total_pnl, dec!(12.35));

        let stats = StatsEngine::new().calculate(
            &[closed("2024-03-10", "A", dec!(-12.345))],
            today(),
        );
        assert_eq!(stats.total_pnl, dec!(-12.35));
    }

    #[test]
    fn total_pnl_sums_closed_trades_only() {
        let trades = vec![
            closed("2024-03-12", "A", dec!(10.10)),
            trade("2024-03-11", "B", None, TradeStatus::Closed),
            closed("2024-03-10", "C", dec!(-3.60)),
            trade("2024-03-09", "D", Some(dec!(500)), TradeStatus::Open),
        ];
        let stats = StatsEngine::new().calculate(&trades, today());

        assert_eq!(stats.total_pnl, dec!(6.50));
        assert_eq!(stats.total_trades, 3);
        assert!(stats.winning_trades + stats.losing_trades <= stats.total_trades);
    }

    #[test]
    fn wire_format_matches_the_dashboard() {
        let trades = vec![closed("2024-03-13", "AAPL", dec!(100))];
        let stats = StatsEngine::new().calculate(&trades, today());
        let json = serde_json::to_value(&stats).unwrap();

        assert!(json.get("totalPnL").is_some());
        assert!(json.get("todayPnL").is_some());
        assert!(json.get("winRate").is_some());
        assert!(json.get("currentWinStreak").is_some());
        assert!(json.get("monthlyData").is_some());
        assert!(json["bestSymbols"][0].get("total_pnl").is_some());
    }
}
