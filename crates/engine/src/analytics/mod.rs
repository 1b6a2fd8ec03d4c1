//! Analytics aggregation engine
//!
//! `build_model` is the pure core: raw user/rating/submission/contest
//! records in, a fully resolved [`AnalyticsViewModel`] out. No I/O, no
//! input mutation, no clock reads — the reference instant for trailing
//! windows comes in as a parameter, so identical inputs always produce
//! identical output.

pub mod model;

mod rating;
mod solved;
mod submissions;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

use crate::types::{ContestMeta, RatingChangeEvent, Submission, UserProfile};
use model::{AboveRatedSection, AnalyticsViewModel, BasicProfile, ProblemVolume, SubmissionSection};

/// `YYYY-MM` calendar bucket in UTC
pub(crate) fn month_key(ts_seconds: i64) -> String {
    timestamp_utc(ts_seconds).format("%Y-%m").to_string()
}

/// `YYYY-MM-DD` in UTC
pub(crate) fn day_key(ts_seconds: i64) -> String {
    timestamp_utc(ts_seconds).format("%Y-%m-%d").to_string()
}

pub(crate) fn date_utc(ts_seconds: i64) -> NaiveDate {
    timestamp_utc(ts_seconds).date_naive()
}

fn timestamp_utc(ts_seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts_seconds, 0).unwrap_or_default()
}

/// Build the complete analytics view-model for one competitor.
///
/// Inputs may arrive in any order; sorted working copies are made here
/// and the originals are left untouched. The computation is total over
/// well-typed input: every ratio with a zero denominator is 0, never NaN.
pub fn build_model(
    user: &UserProfile,
    rating_events: &[RatingChangeEvent],
    submissions: &[Submission],
    contests: &[ContestMeta],
    now: DateTime<Utc>,
) -> AnalyticsViewModel {
    // Normalization: sorted copies and the contest lookup
    let mut events = rating_events.to_vec();
    events.sort_by_key(|e| e.rating_update_time_seconds);

    let mut submissions = submissions.to_vec();
    submissions.sort_by_key(|s| s.creation_time_seconds);

    let contest_by_id: BTreeMap<i64, &ContestMeta> =
        contests.iter().map(|c| (c.id, c)).collect();

    let current_rating = user.rating.unwrap_or(0);

    let rating_section = rating::rating_section(&events, user.rating);
    let contest_section =
        rating::participation_section(&events, rating_section.avg_change, now);
    let tallies = submissions::classify_submissions(&submissions);
    let solved = solved::analyze_solved(&submissions, &contest_by_id, current_rating);

    let total_contests = events.len();
    let total_submissions = submissions.len();
    let solved_count = solved.solved_count;

    let basic = BasicProfile {
        handle: user.handle.clone(),
        current_rating: user.rating,
        max_rating: user.max_rating,
        rank: user.rank.clone(),
        contribution: user.contribution,
        organization: user.organization.clone(),
        registration_date: timestamp_utc(user.registration_time_seconds)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        rating_delta_from_max: user.max_rating.unwrap_or(0) - current_rating,
        total_contests,
        total_solved: solved_count,
    };

    let problem_volume = ProblemVolume {
        solved_per_month: solved.solved_per_month,
        solve_streak: solved.solve_streak,
        avg_solves_per_contest: ratio(solved_count as f64, total_contests as f64),
        total_unique_solved: solved_count,
    };

    let submission_section = SubmissionSection {
        total: total_submissions,
        accepted: tallies.accepted,
        success_rate: ratio(tallies.accepted as f64, total_submissions as f64) * 100.0,
        avg_attempts_per_solved: solved.avg_attempts_per_solved,
        verdict_breakdown: tallies.verdict_breakdown,
        language_usage: tallies.language_usage,
        monthly_success_rate: tallies.monthly_success_rate,
    };

    let above_rated = AboveRatedSection {
        above_count: solved.above_rated_count,
        below_count: solved_count as u32 - solved.above_rated_count,
        above_pct: ratio(solved.above_rated_count as f64, solved_count as f64) * 100.0,
        avg_gap: ratio(
            solved.above_rated_gap_sum as f64,
            solved.above_rated_count as f64,
        ),
    };

    AnalyticsViewModel {
        basic,
        rating: rating_section,
        contest: contest_section,
        problem_volume,
        difficulty: model::DifficultySection {
            distribution: solved.distribution,
            highest_solved_rating: solved.highest_solved_rating,
            avg_solved_rating: solved.avg_solved_rating,
        },
        difficulty_progression: solved.difficulty_progression,
        upsolve: model::UpsolveSection {
            total_upsolves: solved.total_upsolves,
            upsolve_ratio: ratio(solved.total_upsolves as f64, solved_count as f64),
            upsolves_per_contest: ratio(solved.total_upsolves as f64, total_contests as f64),
            by_contest: solved.upsolve_by_contest,
        },
        tags: model::TagSection {
            unique_tags: solved.unique_tags,
            top_tags: solved.top_tags,
            least_tags: solved.least_tags,
            radar_tags: solved.radar_tags,
        },
        submissions: submission_section,
        above_rated,
    }
}

/// Zero-denominator-yields-zero division, used for every derived ratio
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}
