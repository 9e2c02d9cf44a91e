use crate::enums::PnlSign;
use crate::error::ParseError;
use crate::time::parse_timestamp;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Columns every closed-position file must carry, in output order.
pub const REQUIRED_COLUMNS: [&str; 6] = ["Key", "ExitTime", "Symbol", "EntryPrice", "Quantity", "Pnl"];

/// A closed-position row exactly as it appears in the export, before validation.
///
/// Every field is kept as text so that conversion failures can be reported with
/// the column name and the offending value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTradeRow {
    pub key: String,
    pub exit_time: String,
    pub symbol: String,
    pub entry_price: String,
    pub quantity: String,
    pub pnl: String,
}

/// One closed position with validated, typed fields.
///
/// Serializes with the export's column names plus the derived `Date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct TradeRecord {
    pub key: String,
    pub exit_time: NaiveDateTime,
    pub symbol: String,
    pub entry_price: Decimal,
    pub quantity: Decimal,
    pub pnl: Decimal,
    /// Calendar date of `exit_time`.
    pub date: NaiveDate,
}

impl TradeRecord {
    pub fn new(
        key: impl Into<String>,
        exit_time: NaiveDateTime,
        symbol: impl Into<String>,
        entry_price: Decimal,
        quantity: Decimal,
        pnl: Decimal,
    ) -> Self {
        Self {
            key: key.into(),
            exit_time,
            symbol: symbol.into(),
            entry_price,
            quantity,
            pnl,
            date: exit_time.date(),
        }
    }

    pub fn sign(&self) -> PnlSign {
        PnlSign::of(self.pnl)
    }

    pub fn is_profit(&self) -> bool {
        self.sign().is_winning()
    }
}

impl TryFrom<RawTradeRow> for TradeRecord {
    type Error = ParseError;

    fn try_from(row: RawTradeRow) -> Result<Self, Self::Error> {
        let exit_time = parse_timestamp(&row.exit_time).ok_or_else(|| {
            ParseError::new("ExitTime", row.exit_time.as_str(), "not a recognised timestamp")
        })?;

        Ok(TradeRecord::new(
            row.key.trim(),
            exit_time,
            row.symbol.trim(),
            parse_decimal("EntryPrice", &row.entry_price)?,
            parse_decimal("Quantity", &row.quantity)?,
            parse_decimal("Pnl", &row.pnl)?,
        ))
    }
}

/// Accepts plain and scientific notation, since spreadsheet exports emit both.
fn parse_decimal(column: &'static str, raw: &str) -> Result<Decimal, ParseError> {
    let trimmed = raw.trim();
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| ParseError::new(column, raw, e))
}
