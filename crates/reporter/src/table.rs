use analytics::{RankedStreaks, Streak, TradeStatistics};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

/// A terminal table with the headline statistics followed by the ranked streaks.
pub fn summary_table(stats: &TradeStatistics, ranked: &RankedStreaks<'_>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Kind", "Rank", "Trades", "From", "To", "Total Pnl"]);

    table.add_row(vec![
        Cell::new("All trades"),
        Cell::new("-"),
        Cell::new(stats.total_trades),
        Cell::new("-"),
        Cell::new("-"),
        Cell::new(stats.total_pnl),
    ]);

    add_streak_rows(&mut table, "Winning", &ranked.winning);
    add_streak_rows(&mut table, "Losing", &ranked.losing);

    table
}

fn add_streak_rows(table: &mut Table, kind: &str, streaks: &[Streak<'_>]) {
    for (i, streak) in streaks.iter().enumerate() {
        table.add_row(vec![
            Cell::new(kind),
            Cell::new(i + 1),
            Cell::new(streak.len()),
            Cell::new(streak.start_date()),
            Cell::new(streak.end_date()),
            Cell::new(streak.total_pnl()),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsEngine, StreakDetector};
    use chrono::NaiveDate;
    use core_types::TradeRecord;
    use rust_decimal_macros::dec;

    #[test]
    fn one_row_per_ranked_streak_plus_totals() {
        let exit = |day| {
            NaiveDate::from_ymd_opt(2024, 3, day)
                .and_then(|d| d.and_hms_opt(9, 0, 0))
                .unwrap()
        };
        let mut trades = vec![
            TradeRecord::new("a", exit(1), "X", dec!(1), dec!(1), dec!(4)),
            TradeRecord::new("b", exit(2), "X", dec!(1), dec!(1), dec!(-6)),
        ];
        let stats = AnalyticsEngine::new().calculate(&trades).unwrap();
        let set = StreakDetector::new().detect(&mut trades).unwrap();

        let table = summary_table(&stats, &set.rank(3));
        let rendered = table.to_string();

        assert_eq!(table.row_iter().count(), 3);
        assert!(rendered.contains("Winning"));
        assert!(rendered.contains("-6"));
        assert!(rendered.contains("2024-03-02"));
    }
}
