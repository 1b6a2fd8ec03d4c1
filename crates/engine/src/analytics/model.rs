//! The analytics view-model — the single value the engine exposes
//!
//! Every numeric field is fully resolved at build time; the dashboard
//! renders this tree without further fetching. Field names serialize as
//! camelCase for the web client.

use serde::Serialize;

/// Complete analytics output for one handle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsViewModel {
    pub basic: BasicProfile,
    pub rating: RatingSection,
    pub contest: ContestParticipation,
    pub problem_volume: ProblemVolume,
    pub difficulty: DifficultySection,
    pub difficulty_progression: Vec<DifficultyProgressPoint>,
    pub upsolve: UpsolveSection,
    pub tags: TagSection,
    pub submissions: SubmissionSection,
    pub above_rated: AboveRatedSection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasicProfile {
    pub handle: String,
    pub current_rating: Option<i64>,
    pub max_rating: Option<i64>,
    pub rank: Option<String>,
    pub contribution: i64,
    pub organization: Option<String>,
    /// ISO-8601 UTC registration instant
    pub registration_date: String,
    pub rating_delta_from_max: i64,
    pub total_contests: usize,
    pub total_solved: usize,
}

/// One point on the rating trajectory chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingTrendPoint {
    pub label: String,
    pub rating: i64,
    pub delta: i64,
    /// `YYYY-MM-DD` (UTC)
    pub at: String,
}

/// One bar on the per-contest delta chart
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChangeBar {
    pub contest: String,
    pub delta: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSection {
    pub trend: Vec<RatingTrendPoint>,
    /// Most recent 50 events only
    pub changes: Vec<RatingChangeBar>,
    pub max: i64,
    pub min: i64,
    pub avg_change: f64,
    pub largest_increase: i64,
    pub largest_decrease: i64,
    /// Population standard deviation of the delta series
    pub volatility: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyContests {
    pub month: String,
    pub contests: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestParticipation {
    pub total_rated_contests: usize,
    pub contests_last_30: usize,
    pub contests_last_60: usize,
    pub contests_last_90: usize,
    pub avg_rank: f64,
    pub avg_rating_change: f64,
    pub avg_gap_days: f64,
    pub max_gap_days: f64,
    pub contests_per_month: Vec<MonthlyContests>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySolves {
    pub month: String,
    pub solved: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemVolume {
    pub solved_per_month: Vec<MonthlySolves>,
    /// Longest run of consecutive UTC days with at least one new solve
    pub solve_streak: u32,
    pub avg_solves_per_contest: f64,
    pub total_unique_solved: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBandCount {
    pub band: String,
    pub count: u32,
    /// Share of all unique solves, not just the rated ones
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultySection {
    pub distribution: Vec<DifficultyBandCount>,
    pub highest_solved_rating: i64,
    pub avg_solved_rating: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyProgressPoint {
    pub month: String,
    pub avg_rating: f64,
    pub max_rating: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContestUpsolves {
    pub contest: String,
    pub upsolves: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsolveSection {
    pub total_upsolves: u32,
    pub upsolve_ratio: f64,
    pub upsolves_per_contest: f64,
    /// Top 20 contests by upsolve count
    pub by_contest: Vec<ContestUpsolves>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagCount {
    pub tag: String,
    pub solved: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSection {
    pub unique_tags: usize,
    pub top_tags: Vec<TagCount>,
    /// Ascending by solve count — the weakest-practiced areas
    pub least_tags: Vec<TagCount>,
    pub radar_tags: Vec<TagCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerdictCount {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageUsage {
    pub language: String,
    pub submissions: u32,
    pub accepted: u32,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySuccessRate {
    pub month: String,
    pub success_rate: f64,
    pub submissions: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSection {
    pub total: usize,
    pub accepted: u32,
    pub success_rate: f64,
    pub avg_attempts_per_solved: f64,
    pub verdict_breakdown: Vec<VerdictCount>,
    pub language_usage: Vec<LanguageUsage>,
    pub monthly_success_rate: Vec<MonthlySuccessRate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AboveRatedSection {
    pub above_count: u32,
    pub below_count: u32,
    pub above_pct: f64,
    /// Mean difficulty margin over the current rating, across solves above it
    pub avg_gap: f64,
}
