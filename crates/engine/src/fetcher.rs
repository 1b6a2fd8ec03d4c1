//! Load orchestration: four parallel fetches, then the pure aggregation
//!
//! Fire-and-wait-all semantics — if any dataset fails to load, the whole
//! operation fails and no partial analytics are produced.

use chrono::{DateTime, Utc};
use tracing::info;

use crate::analytics::{build_model, model::AnalyticsViewModel};
use crate::api::{ApiError, CodeforcesClient};

/// Page size for the submission history fetch
const SUBMISSION_PAGE_SIZE: u32 = 5000;

/// Fetch all four datasets for `handle` concurrently and aggregate them.
///
/// `now` is the reference instant for trailing-window participation
/// counts; production callers pass `Utc::now()`, tests a fixed value.
pub async fn load_analytics(
    client: &CodeforcesClient,
    handle: &str,
    now: DateTime<Utc>,
) -> Result<AnalyticsViewModel, ApiError> {
    let (users, rating, submissions, contests) = tokio::try_join!(
        client.user_info(handle),
        client.user_rating(handle),
        client.user_status(handle, 1, SUBMISSION_PAGE_SIZE),
        client.contest_list(),
    )?;

    let user = users.into_iter().next().ok_or(ApiError::AccountNotFound)?;

    info!(
        handle,
        contests = rating.len(),
        submissions = submissions.len(),
        "Datasets fetched, building analytics"
    );

    Ok(build_model(&user, &rating, &submissions, &contests, now))
}
