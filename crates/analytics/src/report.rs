use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Headline counters for a combined trade log.
///
/// This struct is the output of the `AnalyticsEngine` and the input to the
/// statistics report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeStatistics {
    pub total_trades: usize,
    pub unique_days: usize,
    /// Trades per distinct exit date. `None` when there are no dates to divide by.
    pub average_trades: Option<Decimal>,
    pub total_pnl: Decimal,
    pub profit_trades: usize,
    pub loss_trades: usize,
}

impl TradeStatistics {
    /// Creates a new, zeroed-out report, which is also the report of an empty log.
    pub fn new() -> Self {
        Self {
            total_trades: 0,
            unique_days: 0,
            average_trades: None,
            total_pnl: Decimal::ZERO,
            profit_trades: 0,
            loss_trades: 0,
        }
    }

    /// Label/value pairs in report order.
    pub fn entries(&self) -> [(&'static str, String); 6] {
        let average = match self.average_trades {
            Some(avg) => format!(
                "{:.2}",
                avg.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            ),
            None => "n/a".to_string(),
        };

        [
            ("Total trades", self.total_trades.to_string()),
            ("Unique days", self.unique_days.to_string()),
            ("Average trades", average),
            ("Total Pnl", self.total_pnl.to_string()),
            ("Profit Trades", self.profit_trades.to_string()),
            ("Loss Trades", self.loss_trades.to_string()),
        ]
    }
}

impl Default for TradeStatistics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn average_is_fixed_to_two_places() {
        let mut stats = TradeStatistics::new();
        stats.average_trades = Some(dec!(7) / dec!(3));
        assert_eq!(stats.entries()[2].1, "2.33");

        stats.average_trades = Some(dec!(2.5));
        assert_eq!(stats.entries()[2].1, "2.50");

        stats.average_trades = Some(dec!(0.125));
        assert_eq!(stats.entries()[2].1, "0.13");
    }

    #[test]
    fn empty_report_has_no_average() {
        let entries = TradeStatistics::default().entries();
        let labels: Vec<_> = entries.iter().map(|(label, _)| *label).collect();

        assert_eq!(
            labels,
            ["Total trades", "Unique days", "Average trades", "Total Pnl", "Profit Trades", "Loss Trades"]
        );
        assert_eq!(entries[0].1, "0");
        assert_eq!(entries[2].1, "n/a");
        assert_eq!(entries[3].1, "0");
    }
}
