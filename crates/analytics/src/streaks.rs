use crate::error::AnalyticsError;
use chrono::NaiveDate;
use core_types::{PnlSign, TradeRecord};
use rust_decimal::Decimal;
use tracing::debug;

/// A maximal run of consecutive trades, in exit-time order, that share a P&L sign.
///
/// Members are borrowed as a contiguous sub-slice of the sorted collection, so a
/// streak can never skip a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Streak<'a> {
    kind: PnlSign,
    trades: &'a [TradeRecord],
    total_pnl: Decimal,
}

impl<'a> Streak<'a> {
    /// `trades` must be non-empty.
    fn new(kind: PnlSign, trades: &'a [TradeRecord]) -> Result<Self, AnalyticsError> {
        debug_assert!(!trades.is_empty());
        let total_pnl = trades
            .iter()
            .try_fold(Decimal::ZERO, |acc, t| acc.checked_add(t.pnl))
            .ok_or(AnalyticsError::Overflow("streak total_pnl"))?;

        Ok(Self {
            kind,
            trades,
            total_pnl,
        })
    }

    pub fn kind(&self) -> PnlSign {
        self.kind
    }

    pub fn is_winning(&self) -> bool {
        self.kind.is_winning()
    }

    pub fn trades(&self) -> &'a [TradeRecord] {
        self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    /// Never true for a detected streak.
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn total_pnl(&self) -> Decimal {
        self.total_pnl
    }

    pub fn start_date(&self) -> NaiveDate {
        self.trades[0].date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.trades[self.trades.len() - 1].date
    }
}

/// Scanner state while walking the sorted trades. There is always an open
/// streak once the first trade has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    BuildingWinning { start: usize },
    BuildingLosing { start: usize },
}

impl ScanState {
    fn open(sign: PnlSign, start: usize) -> Self {
        match sign {
            PnlSign::Winning => ScanState::BuildingWinning { start },
            PnlSign::Losing => ScanState::BuildingLosing { start },
        }
    }

    fn sign(&self) -> PnlSign {
        match self {
            ScanState::BuildingWinning { .. } => PnlSign::Winning,
            ScanState::BuildingLosing { .. } => PnlSign::Losing,
        }
    }

    fn start(&self) -> usize {
        match *self {
            ScanState::BuildingWinning { start } | ScanState::BuildingLosing { start } => start,
        }
    }

    /// Closes the open streak just before `end`.
    fn close<'a>(
        &self,
        trades: &'a [TradeRecord],
        end: usize,
    ) -> Result<Streak<'a>, AnalyticsError> {
        Streak::new(self.sign(), &trades[self.start()..end])
    }
}

/// Splits already-sorted trades into maximal same-sign runs.
///
/// A sign change closes the open streak and opens a new one at the current
/// trade; the final open streak is closed at the end of the slice. Fails if a
/// streak's total P&L does not fit in a `Decimal`.
pub fn segment(trades: &[TradeRecord]) -> Result<StreakSet<'_>, AnalyticsError> {
    let mut streaks = Vec::new();

    let Some(first) = trades.first() else {
        return Ok(StreakSet { streaks });
    };

    let mut state = ScanState::open(first.sign(), 0);
    for (i, trade) in trades.iter().enumerate().skip(1) {
        let sign = trade.sign();
        if sign != state.sign() {
            streaks.push(state.close(trades, i)?);
            state = ScanState::open(sign, i);
        }
    }
    streaks.push(state.close(trades, trades.len())?);

    Ok(StreakSet { streaks })
}

/// Every streak found in one pass, in detection (chronological) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreakSet<'a> {
    streaks: Vec<Streak<'a>>,
}

impl<'a> StreakSet<'a> {
    pub fn all(&self) -> &[Streak<'a>] {
        &self.streaks
    }

    pub fn winning(&self) -> impl Iterator<Item = Streak<'a>> + '_ {
        self.streaks.iter().copied().filter(|s| s.is_winning())
    }

    pub fn losing(&self) -> impl Iterator<Item = Streak<'a>> + '_ {
        self.streaks.iter().copied().filter(|s| !s.is_winning())
    }

    pub fn len(&self) -> usize {
        self.streaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streaks.is_empty()
    }

    /// The `n` most profitable winning streaks and the `n` most costly losing
    /// streaks.
    ///
    /// Winning streaks are ordered by total P&L descending, losing streaks
    /// ascending. Both sorts are stable, so equal totals keep detection order
    /// and the earlier streak ranks first. Fewer than `n` streaks are returned
    /// as-is.
    pub fn rank(&self, n: usize) -> RankedStreaks<'a> {
        let mut winning: Vec<_> = self.winning().collect();
        winning.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
        winning.truncate(n);

        let mut losing: Vec<_> = self.losing().collect();
        losing.sort_by_key(|s| s.total_pnl);
        losing.truncate(n);

        RankedStreaks { winning, losing }
    }
}

/// Top-N streaks of each kind, best first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedStreaks<'a> {
    pub winning: Vec<Streak<'a>>,
    pub losing: Vec<Streak<'a>>,
}

/// Sorts a trade collection chronologically and segments it into streaks.
#[derive(Debug, Default)]
pub struct StreakDetector {}

impl StreakDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sorts `trades` by exit time in place, then segments them.
    ///
    /// The sort is stable: trades sharing an exit time keep their load order,
    /// which decides which streak they fall into.
    pub fn detect<'a>(
        &self,
        trades: &'a mut [TradeRecord],
    ) -> Result<StreakSet<'a>, AnalyticsError> {
        trades.sort_by_key(|t| t.exit_time);
        let trades: &'a [TradeRecord] = trades;

        let set = segment(trades)?;
        debug!(
            trades = trades.len(),
            winning = set.winning().count(),
            losing = set.losing().count(),
            "segmented trades into streaks"
        );
        Ok(set)
    }
}
