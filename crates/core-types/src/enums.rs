use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of zero a trade closed on. Zero P&L counts as a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PnlSign {
    Winning,
    Losing,
}

impl PnlSign {
    /// Classifies a realized P&L value.
    pub fn of(pnl: Decimal) -> Self {
        if pnl > Decimal::ZERO {
            PnlSign::Winning
        } else {
            PnlSign::Losing
        }
    }

    pub fn is_winning(&self) -> bool {
        matches!(self, PnlSign::Winning)
    }
}
