//! Codeforces read API client — public endpoints, no authentication required
//!
//! Every endpoint wraps its payload in a `{status, comment?, result}`
//! envelope. A non-2xx transport status or a non-OK envelope status fails
//! the whole fetch; there is no retry or partial-result handling.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::types::{ContestMeta, RatingChangeEvent, Submission, UserProfile};

const BASE_URL: &str = "https://codeforces.com/api";

/// How long a fetched contest list stays fresh. The list changes a few
/// times a week, so a short window keeps repeated dashboard loads from
/// hammering the heaviest endpoint.
const CONTEST_LIST_TTL: Duration = Duration::from_secs(300);

/// Fetch-layer error taxonomy. All variants are fatal to the aggregation
/// that triggered them; nothing here is retried locally.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx transport response from the judge
    #[error("Codeforces API request failed ({0})")]
    Transport(u16),

    /// Envelope status was FAILED; carries the provider's comment verbatim
    #[error("{0}")]
    Api(String),

    /// `user.info` returned an empty result set
    #[error("Codeforces account not found")]
    AccountNotFound,

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Response envelope shared by every Codeforces endpoint
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    comment: Option<String>,
    result: Option<T>,
}

/// Codeforces public API client
pub struct CodeforcesClient {
    client: Client,
    base_url: String,
    contest_cache: Mutex<Option<(Instant, Vec<ContestMeta>)>>,
}

impl Default for CodeforcesClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeforcesClient {
    pub fn new() -> Self {
        Self::with_base_url(BASE_URL)
    }

    /// Point the client at a different host (used by tests against a stub)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .user_agent("cfetch/0.1 (+https://localhost)")
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
            contest_cache: Mutex::new(None),
        }
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        debug!("GET {}", url);

        let resp = self.client.get(url).send().await?;
        if !resp.status().is_success() {
            return Err(ApiError::Transport(resp.status().as_u16()));
        }

        let envelope: ApiEnvelope<T> = resp.json().await?;
        if envelope.status != "OK" {
            return Err(ApiError::Api(
                envelope
                    .comment
                    .unwrap_or_else(|| "Codeforces API returned FAILED".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| ApiError::Api("Codeforces API returned no result".to_string()))
    }

    /// GET user.info — profile records for the given handle
    pub async fn user_info(&self, handle: &str) -> Result<Vec<UserProfile>, ApiError> {
        let url = format!("{}/user.info?handles={}", self.base_url, handle);
        let users: Vec<UserProfile> = self.get(&url).await?;
        debug!(handle, count = users.len(), "Profiles fetched");
        Ok(users)
    }

    /// GET user.rating — full rated-contest history, unordered
    pub async fn user_rating(&self, handle: &str) -> Result<Vec<RatingChangeEvent>, ApiError> {
        let url = format!("{}/user.rating?handle={}", self.base_url, handle);
        let events: Vec<RatingChangeEvent> = self.get(&url).await?;
        debug!(handle, count = events.len(), "Rating changes fetched");
        Ok(events)
    }

    /// GET user.status — submission history page, unordered
    pub async fn user_status(
        &self,
        handle: &str,
        from: u32,
        count: u32,
    ) -> Result<Vec<Submission>, ApiError> {
        let url = format!(
            "{}/user.status?handle={}&from={}&count={}",
            self.base_url, handle, from, count
        );
        let submissions: Vec<Submission> = self.get(&url).await?;
        debug!(handle, count = submissions.len(), "Submissions fetched");
        Ok(submissions)
    }

    /// GET contest.list — non-gym contest metadata, memoised for
    /// [`CONTEST_LIST_TTL`]. The cache lives here in the fetch layer; the
    /// aggregator stays pure.
    pub async fn contest_list(&self) -> Result<Vec<ContestMeta>, ApiError> {
        {
            let cache = self.contest_cache.lock().await;
            if let Some((fetched_at, contests)) = cache.as_ref() {
                if fetched_at.elapsed() < CONTEST_LIST_TTL {
                    debug!(count = contests.len(), "Contest list served from cache");
                    return Ok(contests.clone());
                }
            }
        }

        let url = format!("{}/contest.list?gym=false", self.base_url);
        let contests: Vec<ContestMeta> = self.get(&url).await?;
        debug!(count = contests.len(), "Contest list fetched");

        let mut cache = self.contest_cache.lock().await;
        *cache = Some((Instant::now(), contests.clone()));
        Ok(contests)
    }
}
