use crate::error::AnalyticsError;
use crate::report::TradeStatistics;
use core_types::TradeRecord;
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::{debug, warn};

/// A stateless calculator for the headline statistics of a trade log.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point for calculating the trade statistics.
    ///
    /// # Arguments
    ///
    /// * `trades` - Every closed position in the combined log, in any order.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `TradeStatistics` or an `AnalyticsError`.
    /// An empty log is not an error: it produces a zeroed report with no average.
    pub fn calculate(&self, trades: &[TradeRecord]) -> Result<TradeStatistics, AnalyticsError> {
        let mut report = TradeStatistics::new();

        if trades.is_empty() {
            warn!("no trades to analyse; average trades per day is undefined");
            return Ok(report);
        }

        self.calculate_counts(trades, &mut report)?;
        self.calculate_daily_average(trades, &mut report);

        debug!(?report, "calculated trade statistics");
        Ok(report)
    }

    /// Totals, wins and losses. Zero P&L counts as a loss.
    fn calculate_counts(
        &self,
        trades: &[TradeRecord],
        report: &mut TradeStatistics,
    ) -> Result<(), AnalyticsError> {
        report.total_trades = trades.len();

        for trade in trades {
            report.total_pnl = report
                .total_pnl
                .checked_add(trade.pnl)
                .ok_or(AnalyticsError::Overflow("total_pnl"))?;

            if trade.is_profit() {
                report.profit_trades += 1;
            } else {
                report.loss_trades += 1;
            }
        }

        Ok(())
    }

    fn calculate_daily_average(&self, trades: &[TradeRecord], report: &mut TradeStatistics) {
        let days: HashSet<_> = trades.iter().map(|t| t.date).collect();
        report.unique_days = days.len();

        if report.unique_days > 0 {
            report.average_trades =
                Some(Decimal::from(report.total_trades) / Decimal::from(report.unique_days));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn trade(day: u32, hour: u32, pnl: Decimal) -> TradeRecord {
        let exit = NaiveDate::from_ymd_opt(2024, 6, day)
            .and_then(|d| d.and_hms_opt(hour, 0, 0))
            .unwrap();
        TradeRecord::new("k", exit, "BTCUSDT", dec!(100), dec!(1), pnl)
    }

    #[test]
    fn counts_wins_losses_and_days() {
        let trades = vec![
            trade(1, 9, dec!(5)),
            trade(1, 15, dec!(-2.5)),
            trade(2, 10, dec!(0)),
            trade(4, 11, dec!(3.25)),
            trade(4, 12, dec!(-1)),
        ];

        let stats = AnalyticsEngine::new().calculate(&trades).unwrap();

        assert_eq!(stats.total_trades, 5);
        assert_eq!(stats.unique_days, 3);
        assert_eq!(stats.average_trades, Some(dec!(5) / dec!(3)));
        assert_eq!(stats.total_pnl, dec!(4.75));
        assert_eq!(stats.profit_trades, 2);
        assert_eq!(stats.loss_trades, 3);
    }

    #[test]
    fn empty_log_is_guarded() {
        let stats = AnalyticsEngine::new().calculate(&[]).unwrap();

        assert_eq!(stats, TradeStatistics::new());
        assert_eq!(stats.average_trades, None);
    }

    #[test]
    fn overflow_is_reported_not_panicked() {
        let trades = vec![trade(1, 9, Decimal::MAX), trade(1, 10, Decimal::MAX)];
        let err = AnalyticsEngine::new().calculate(&trades).unwrap_err();
        assert!(matches!(err, AnalyticsError::Overflow("total_pnl")));
    }
}
