pub mod enums;
pub mod error;
pub mod structs;
pub mod time;

// Re-export the core types to provide a clean public API.
pub use enums::PnlSign;
pub use error::ParseError;
pub use structs::{RawTradeRow, TradeRecord, REQUIRED_COLUMNS};
pub use time::parse_timestamp;
