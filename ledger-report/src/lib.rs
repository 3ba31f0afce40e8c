//! ledger-report: aggregation, filtering and the dashboard view over canonical transactions.
//!
//! Everything here is a pure function of its input slice: nothing mutates the
//! source collection and nothing sorts implicitly. Ordering is requested
//! explicitly through [`order::sort_by_date`]; only [`Dashboard::build`] sorts,
//! and says so.

pub mod aggregate;
pub mod dashboard;
pub mod filter;
pub mod order;

pub use aggregate::{
    CategoryBreakdown, CategoryShare, CategorySum, DEFAULT_MONTHLY_BUDGET, Totals, budget_usage,
    by_category, percentage_of, recent_n, totals, windowed_by_month,
};
pub use dashboard::{Dashboard, RECENT_LIMIT};
pub use filter::{
    CategoryFilter, FilterCriteria, SearchScope, Summary, TypeFilter, distinct_categories, filter,
    summarize,
};
pub use order::{SortOrder, sort_by_date};
