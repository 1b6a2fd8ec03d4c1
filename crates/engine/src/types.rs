//! Wire types for the Codeforces read API

use serde::{Deserialize, Serialize};

/// Public profile of a single competitor (`user.info`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub handle: String,
    pub rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: Option<String>,
    #[serde(default)]
    pub contribution: i64,
    pub organization: Option<String>,
    pub registration_time_seconds: i64,
}

/// One rated-contest result from `user.rating`. The API does not
/// guarantee ordering; the aggregator sorts by update time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChangeEvent {
    pub contest_id: i64,
    pub contest_name: String,
    pub rank: i64,
    pub old_rating: i64,
    pub new_rating: i64,
    pub rating_update_time_seconds: i64,
}

/// Problem reference attached to a submission. Every field is optional on
/// the wire; problems without a numeric rating are excluded from
/// difficulty statistics rather than treated as rating 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRef {
    pub contest_id: Option<i64>,
    pub index: Option<String>,
    pub name: Option<String>,
    pub rating: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One entry from `user.status`. A missing verdict means the submission
/// is still in the queue or the judge withheld it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub creation_time_seconds: i64,
    pub verdict: Option<String>,
    pub programming_language: Option<String>,
    pub problem: Option<ProblemRef>,
}

/// One entry from `contest.list`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestMeta {
    pub id: i64,
    pub name: String,
    pub start_time_seconds: Option<i64>,
    pub duration_seconds: Option<i64>,
}

/// Identity of a unique problem, used to collapse repeated submissions
/// into first-accepted solves and attempt counts. Both components are
/// optional on the wire, so two submissions with the same absent fields
/// intentionally collide on the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProblemKey {
    pub contest_id: Option<i64>,
    pub index: Option<String>,
}

impl ProblemKey {
    pub fn of(problem: &ProblemRef) -> Self {
        Self {
            contest_id: problem.contest_id,
            index: problem.index.clone(),
        }
    }
}

/// The verdict string Codeforces uses for an accepted submission
pub const VERDICT_ACCEPTED: &str = "OK";

impl Submission {
    /// True iff the judge accepted this submission (exact, case-sensitive
    /// match on the canonical verdict string).
    pub fn is_accepted(&self) -> bool {
        self.verdict.as_deref() == Some(VERDICT_ACCEPTED)
    }
}
