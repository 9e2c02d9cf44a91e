use analytics::{RankedStreaks, Streak, TradeStatistics};

/// One `Label: value` line per statistic, in the fixed report order.
pub fn render_statistics(stats: &TradeStatistics) -> String {
    let mut out = String::new();
    for (label, value) in stats.entries() {
        out.push_str(&format!("{label}: {value}\n"));
    }
    out
}

/// The streak report: winning section, blank line, losing section.
///
/// `requested` is echoed in the headers exactly as the operator gave it, so a
/// non-positive request still produces both (empty) sections.
pub fn render_streaks(ranked: &RankedStreaks<'_>, requested: i64) -> String {
    let mut out = String::new();

    out.push_str(&format!("Top {requested} winning streaks\n"));
    write_section(&mut out, &ranked.winning, "profit");

    out.push_str(&format!("\nTop {requested} losing streaks\n"));
    write_section(&mut out, &ranked.losing, "loss");

    out
}

fn write_section(out: &mut String, streaks: &[Streak<'_>], label: &str) {
    for (i, streak) in streaks.iter().enumerate() {
        out.push_str(&format!(
            "{}) {} trades   {}   to   {}   {}: {}\n",
            i + 1,
            streak.len(),
            streak.start_date().format("%Y-%m-%d"),
            streak.end_date().format("%Y-%m-%d"),
            label,
            streak.total_pnl()
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsEngine, StreakDetector};
    use chrono::NaiveDate;
    use core_types::TradeRecord;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn trade(day: u32, pnl: Decimal) -> TradeRecord {
        let exit = NaiveDate::from_ymd_opt(2024, 2, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .unwrap();
        TradeRecord::new(day.to_string(), exit, "BTCUSDT", dec!(10), dec!(1), pnl)
    }

    #[test]
    fn statistics_are_six_labelled_lines() {
        let trades = vec![trade(1, dec!(5)), trade(1, dec!(-2)), trade(2, dec!(0.5))];
        let stats = AnalyticsEngine::new().calculate(&trades).unwrap();

        assert_eq!(
            render_statistics(&stats),
            "Total trades: 3\n\
             Unique days: 2\n\
             Average trades: 1.50\n\
             Total Pnl: 3.5\n\
             Profit Trades: 2\n\
             Loss Trades: 1\n"
        );
    }

    #[test]
    fn streak_lines_carry_rank_length_dates_and_total() {
        let mut trades = vec![
            trade(1, dec!(5)),
            trade(2, dec!(3)),
            trade(3, dec!(-2)),
            trade(4, dec!(-1)),
            trade(5, dec!(7)),
        ];
        let set = StreakDetector::new().detect(&mut trades).unwrap();

        assert_eq!(
            render_streaks(&set.rank(2), 2),
            "Top 2 winning streaks\n\
             1) 2 trades   2024-02-01   to   2024-02-02   profit: 8\n\
             2) 1 trades   2024-02-05   to   2024-02-05   profit: 7\n\
             \n\
             Top 2 losing streaks\n\
             1) 2 trades   2024-02-03   to   2024-02-04   loss: -3\n"
        );
    }

    #[test]
    fn empty_input_still_has_both_headers() {
        let stats = AnalyticsEngine::new().calculate(&[]).unwrap();
        assert!(render_statistics(&stats).starts_with("Total trades: 0\n"));

        let rendered = render_streaks(&RankedStreaks::default(), 5);
        assert_eq!(rendered, "Top 5 winning streaks\n\nTop 5 losing streaks\n");
    }
}
