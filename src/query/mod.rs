//! Read-only views over a ledger. Nothing here mutates its input; callers
//! recompute after every change instead of caching results.

pub mod filter;
pub mod series;
pub mod sort;
pub mod summary;

pub use filter::{Period, TransactionFilter, filter_transactions};
pub use series::{DailyPoint, daily_series, daily_series_for_account};
pub use sort::{Page, SortKey, paginate, sort_transactions};
pub use summary::{Summary, group_by_category, summarize, total_balance};
