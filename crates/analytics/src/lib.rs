//! # Trade Log Analytics
//!
//! Turns a combined collection of closed positions into the two things the
//! report needs: headline statistics and ranked winning/losing streaks.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No file or terminal I/O lives here. Inputs are slices of
//!   `TradeRecord`, outputs are plain structs.
//! - **Stateless Calculation:** `AnalyticsEngine` and `StreakDetector` hold no
//!   state between calls, which keeps them trivial to test.
//!
//! ## Public API
//!
//! - `AnalyticsEngine` / `TradeStatistics`: the six headline counters.
//! - `StreakDetector` / `StreakSet` / `RankedStreaks`: segmentation of the
//!   chronological trade sequence into maximal same-sign runs, and top-N ranking.
//! - `AnalyticsError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod report;
pub mod streaks;

// Re-export the key components to create a clean, public-facing API.
pub use engine::AnalyticsEngine;
pub use error::AnalyticsError;
pub use report::TradeStatistics;
pub use streaks::{segment, RankedStreaks, Streak, StreakDetector, StreakSet};
