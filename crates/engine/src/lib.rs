//! cfetch Engine — Codeforces contest-history analytics
//!
//! Self-contained crate behind the cfetch dashboard. Provides:
//! - Codeforces read-API client (profile, rating history, submissions, contests)
//! - Parallel four-dataset fetch orchestration
//! - Pure analytics aggregator: raw records → `AnalyticsViewModel`

pub mod analytics;
pub mod api;
pub mod fetcher;
pub mod types;

// Re-exports for convenience
pub use analytics::build_model;
pub use analytics::model::AnalyticsViewModel;
pub use api::{ApiError, CodeforcesClient};
pub use fetcher::load_analytics;
pub use types::*;
