//! First-accepted-solve deduplication and all problem-level analytics:
//! tags, difficulty bands, upsolves, streaks, attempts-per-solve.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::model::{
    ContestUpsolves, DifficultyBandCount, DifficultyProgressPoint, MonthlySolves, TagCount,
};
use super::{date_utc, month_key};
use crate::types::{ContestMeta, ProblemKey, Submission};

/// Fixed half-open difficulty bands (boundaries 1100/1400/1700/2000)
const BAND_LABELS: [&str; 5] = ["<1100", "1100-1399", "1400-1699", "1700-1999", "2000+"];

const TOP_TAG_LIMIT: usize = 10;
const LEAST_TAG_LIMIT: usize = 10;
const RADAR_TAG_LIMIT: usize = 6;
const UPSOLVE_CONTEST_LIMIT: usize = 20;

fn band_index(rating: i64) -> usize {
    if rating < 1100 {
        0
    } else if rating < 1400 {
        1
    } else if rating < 1700 {
        2
    } else if rating < 2000 {
        3
    } else {
        4
    }
}

/// Everything derived from the deduplicated solve set
pub(super) struct SolvedAnalysis {
    pub solved_count: usize,
    pub solved_per_month: Vec<MonthlySolves>,
    pub solve_streak: u32,
    pub distribution: Vec<DifficultyBandCount>,
    pub highest_solved_rating: i64,
    pub avg_solved_rating: f64,
    pub difficulty_progression: Vec<DifficultyProgressPoint>,
    pub total_upsolves: u32,
    pub upsolve_by_contest: Vec<ContestUpsolves>,
    pub unique_tags: usize,
    pub top_tags: Vec<TagCount>,
    pub least_tags: Vec<TagCount>,
    pub radar_tags: Vec<TagCount>,
    pub avg_attempts_per_solved: f64,
    pub above_rated_count: u32,
    pub above_rated_gap_sum: i64,
}

#[derive(Default)]
struct MonthlyRating {
    sum: i64,
    count: u32,
    max: i64,
}

/// Analyze the solve set. `submissions` must already be sorted ascending
/// by creation time so that the first accepted submission per problem key
/// wins the dedup. `current_rating` is the profile rating (0 when unrated)
/// used for the above-rated tally.
pub(super) fn analyze_solved(
    submissions: &[Submission],
    contest_by_id: &BTreeMap<i64, &ContestMeta>,
    current_rating: i64,
) -> SolvedAnalysis {
    // Pass 1: dedup into first-accepted solves, counting every keyed
    // submission as an attempt on its problem.
    let mut solved: BTreeMap<ProblemKey, &Submission> = BTreeMap::new();
    let mut attempts: BTreeMap<ProblemKey, u32> = BTreeMap::new();

    for sub in submissions {
        let Some(problem) = &sub.problem else {
            continue;
        };
        let key = ProblemKey::of(problem);
        *attempts.entry(key.clone()).or_default() += 1;
        if sub.is_accepted() {
            solved.entry(key).or_insert(sub);
        }
    }

    let solved_count = solved.len();

    // Pass 2: one walk over the solve set accumulating every
    // problem-level statistic.
    let mut per_month: BTreeMap<String, u32> = BTreeMap::new();
    let mut solved_days: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut tag_frequency: BTreeMap<String, u32> = BTreeMap::new();
    let mut upsolves_per_contest: BTreeMap<String, u32> = BTreeMap::new();
    let mut rating_by_month: BTreeMap<String, MonthlyRating> = BTreeMap::new();
    let mut bands = [0u32; 5];

    let mut solved_with_rating = 0u32;
    let mut solved_rating_sum = 0i64;
    let mut highest_solved_rating = 0i64;
    let mut total_upsolves = 0u32;
    let mut above_rated_count = 0u32;
    let mut above_rated_gap_sum = 0i64;

    for sub in solved.values() {
        let Some(problem) = &sub.problem else {
            continue;
        };
        let ts = sub.creation_time_seconds;

        *per_month.entry(month_key(ts)).or_default() += 1;
        solved_days.insert(date_utc(ts));

        for tag in &problem.tags {
            *tag_frequency.entry(tag.clone()).or_default() += 1;
        }

        // Upsolve: contest must be known and carry both start and
        // duration, and the solve must land strictly after the window.
        if let Some(contest_id) = problem.contest_id {
            if let Some(contest) = contest_by_id.get(&contest_id) {
                if let (Some(start), Some(duration)) =
                    (contest.start_time_seconds, contest.duration_seconds)
                {
                    if ts > start + duration {
                        total_upsolves += 1;
                        *upsolves_per_contest.entry(contest.name.clone()).or_default() += 1;
                    }
                }
            }
        }

        // Unrated problems are excluded from every difficulty statistic
        if let Some(rating) = problem.rating {
            solved_with_rating += 1;
            solved_rating_sum += rating;
            highest_solved_rating = highest_solved_rating.max(rating);
            bands[band_index(rating)] += 1;

            let monthly = rating_by_month.entry(month_key(ts)).or_default();
            monthly.sum += rating;
            monthly.count += 1;
            monthly.max = monthly.max.max(rating);

            if rating > current_rating {
                above_rated_count += 1;
                above_rated_gap_sum += rating - current_rating;
            }
        }
    }

    let solved_per_month: Vec<MonthlySolves> = per_month
        .into_iter()
        .map(|(month, count)| MonthlySolves {
            month,
            solved: count,
        })
        .collect();

    let distribution: Vec<DifficultyBandCount> = BAND_LABELS
        .iter()
        .zip(bands.iter())
        .map(|(band, &count)| DifficultyBandCount {
            band: band.to_string(),
            count,
            percentage: if solved_count > 0 {
                count as f64 / solved_count as f64 * 100.0
            } else {
                0.0
            },
        })
        .collect();

    let difficulty_progression: Vec<DifficultyProgressPoint> = rating_by_month
        .into_iter()
        .map(|(month, monthly)| DifficultyProgressPoint {
            month,
            avg_rating: if monthly.count > 0 {
                monthly.sum as f64 / monthly.count as f64
            } else {
                0.0
            },
            max_rating: monthly.max,
        })
        .collect();

    let mut upsolve_by_contest: Vec<ContestUpsolves> = upsolves_per_contest
        .into_iter()
        .map(|(contest, upsolves)| ContestUpsolves { contest, upsolves })
        .collect();
    upsolve_by_contest.sort_by(|a, b| {
        b.upsolves
            .cmp(&a.upsolves)
            .then_with(|| a.contest.cmp(&b.contest))
    });
    upsolve_by_contest.truncate(UPSOLVE_CONTEST_LIMIT);

    let unique_tags = tag_frequency.len();
    let tag_counts: Vec<TagCount> = tag_frequency
        .into_iter()
        .map(|(tag, count)| TagCount { tag, solved: count })
        .collect();

    let mut top_tags = tag_counts.clone();
    top_tags.sort_by(|a, b| b.solved.cmp(&a.solved).then_with(|| a.tag.cmp(&b.tag)));
    let mut radar_tags = top_tags.clone();
    radar_tags.truncate(RADAR_TAG_LIMIT);
    top_tags.truncate(TOP_TAG_LIMIT);

    let mut least_tags = tag_counts;
    least_tags.sort_by(|a, b| a.solved.cmp(&b.solved).then_with(|| a.tag.cmp(&b.tag)));
    least_tags.truncate(LEAST_TAG_LIMIT);

    let total_attempts_on_solved: u32 = solved
        .keys()
        .map(|key| attempts.get(key).copied().unwrap_or(0))
        .sum();
    let avg_attempts_per_solved = if solved_count > 0 {
        total_attempts_on_solved as f64 / solved_count as f64
    } else {
        0.0
    };

    SolvedAnalysis {
        solved_count,
        solved_per_month,
        solve_streak: best_streak(&solved_days),
        distribution,
        highest_solved_rating,
        avg_solved_rating: if solved_with_rating > 0 {
            solved_rating_sum as f64 / solved_with_rating as f64
        } else {
            0.0
        },
        difficulty_progression,
        total_upsolves,
        upsolve_by_contest,
        unique_tags,
        top_tags,
        least_tags,
        radar_tags,
        avg_attempts_per_solved,
        above_rated_count,
        above_rated_gap_sum,
    }
}

/// Longest run of consecutive UTC days with at least one solve. A single
/// solved day is a streak of 1; an empty set is 0.
fn best_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut best = 0u32;
    let mut current = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &day in days {
        current = match prev {
            Some(p) if (day - p).num_days() == 1 => current + 1,
            _ => 1,
        };
        best = best.max(current);
        prev = Some(day);
    }

    best
}
