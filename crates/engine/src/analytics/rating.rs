//! Rating-trajectory and contest-cadence statistics
//!
//! Operates on the timestamp-sorted rating-change list produced by the
//! normalization step in `build_model`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::model::{
    ContestParticipation, MonthlyContests, RatingChangeBar, RatingSection, RatingTrendPoint,
};
use super::{day_key, month_key};
use crate::types::RatingChangeEvent;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Number of recent events shown on the per-contest delta chart
const CHANGE_BAR_LIMIT: usize = 50;

/// Population standard deviation; 0 for an empty series
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Derive the rating section from sorted events. With no events the
/// extremes fall back to the profile's current rating (a defined edge
/// case, not an error).
pub(super) fn rating_section(
    events: &[RatingChangeEvent],
    profile_rating: Option<i64>,
) -> RatingSection {
    let deltas: Vec<i64> = events.iter().map(|e| e.new_rating - e.old_rating).collect();

    let trend: Vec<RatingTrendPoint> = events
        .iter()
        .map(|e| RatingTrendPoint {
            label: e.contest_name.clone(),
            rating: e.new_rating,
            delta: e.new_rating - e.old_rating,
            at: day_key(e.rating_update_time_seconds),
        })
        .collect();

    let changes: Vec<RatingChangeBar> = events
        .iter()
        .rev()
        .take(CHANGE_BAR_LIMIT)
        .rev()
        .map(|e| RatingChangeBar {
            contest: e.contest_name.clone(),
            delta: e.new_rating - e.old_rating,
        })
        .collect();

    let fallback = profile_rating.unwrap_or(0);
    let max = events.iter().map(|e| e.new_rating).max().unwrap_or(fallback);
    let min = events.iter().map(|e| e.new_rating).min().unwrap_or(fallback);

    let avg_change = if deltas.is_empty() {
        0.0
    } else {
        deltas.iter().sum::<i64>() as f64 / deltas.len() as f64
    };

    let delta_f: Vec<f64> = deltas.iter().map(|&d| d as f64).collect();

    RatingSection {
        trend,
        changes,
        max,
        min,
        avg_change,
        largest_increase: deltas.iter().copied().max().unwrap_or(0),
        largest_decrease: deltas.iter().copied().min().unwrap_or(0),
        volatility: std_dev(&delta_f),
    }
}

/// Derive contest-participation cadence from sorted events. `now` is the
/// explicit reference instant for the trailing 30/60/90-day windows.
pub(super) fn participation_section(
    events: &[RatingChangeEvent],
    avg_rating_change: f64,
    now: DateTime<Utc>,
) -> ContestParticipation {
    let now_seconds = now.timestamp();
    let contests_in_last = |days: i64| {
        let threshold = now_seconds - days * 86_400;
        events
            .iter()
            .filter(|e| e.rating_update_time_seconds >= threshold)
            .count()
    };

    let avg_rank = if events.is_empty() {
        0.0
    } else {
        events.iter().map(|e| e.rank).sum::<i64>() as f64 / events.len() as f64
    };

    let mut per_month: BTreeMap<String, u32> = BTreeMap::new();
    for event in events {
        *per_month
            .entry(month_key(event.rating_update_time_seconds))
            .or_default() += 1;
    }
    let contests_per_month: Vec<MonthlyContests> = per_month
        .into_iter()
        .map(|(month, contests)| MonthlyContests { month, contests })
        .collect();

    let gaps_days: Vec<f64> = events
        .windows(2)
        .map(|pair| {
            (pair[1].rating_update_time_seconds - pair[0].rating_update_time_seconds) as f64
                / SECONDS_PER_DAY
        })
        .collect();
    let avg_gap_days = if gaps_days.is_empty() {
        0.0
    } else {
        gaps_days.iter().sum::<f64>() / gaps_days.len() as f64
    };
    let max_gap_days = gaps_days.iter().copied().fold(0.0, f64::max);

    ContestParticipation {
        total_rated_contests: events.len(),
        contests_last_30: contests_in_last(30),
        contests_last_60: contests_in_last(60),
        contests_last_90: contests_in_last(90),
        avg_rank,
        avg_rating_change,
        avg_gap_days,
        max_gap_days,
        contests_per_month,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_event(old: i64, new: i64, ts: i64) -> RatingChangeEvent {
        RatingChangeEvent {
            contest_id: 1,
            contest_name: format!("Round at {}", ts),
            rank: 100,
            old_rating: old,
            new_rating: new,
            rating_update_time_seconds: ts,
        }
    }

    #[test]
    fn test_trend_deltas_and_extremes() {
        let events = vec![make_event(1400, 1450, 100), make_event(1450, 1420, 200)];
        let section = rating_section(&events, Some(1420));

        let deltas: Vec<i64> = section.trend.iter().map(|p| p.delta).collect();
        assert_eq!(deltas, vec![50, -30]);
        assert_eq!(section.largest_increase, 50);
        assert_eq!(section.largest_decrease, -30);
        assert_eq!(section.max, 1450);
        assert_eq!(section.min, 1420);
    }

    #[test]
    fn test_empty_events_fall_back_to_profile_rating() {
        let section = rating_section(&[], Some(1523));
        assert_eq!(section.max, 1523);
        assert_eq!(section.min, 1523);
        assert_eq!(section.avg_change, 0.0);
        assert_eq!(section.volatility, 0.0);
        assert!(section.trend.is_empty());
    }

    #[test]
    fn test_volatility_is_population_std_dev() {
        // Deltas [10, -10]: mean 0, variance 100, std dev 10
        let events = vec![make_event(1500, 1510, 100), make_event(1510, 1500, 200)];
        let section = rating_section(&events, None);
        assert!((section.volatility - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_trailing_windows() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let day = 86_400;
        let events = vec![
            make_event(1400, 1410, now.timestamp() - 10 * day),
            make_event(1410, 1420, now.timestamp() - 45 * day),
            make_event(1420, 1430, now.timestamp() - 80 * day),
            make_event(1430, 1440, now.timestamp() - 200 * day),
        ];
        let mut sorted = events.clone();
        sorted.sort_by_key(|e| e.rating_update_time_seconds);

        let section = participation_section(&sorted, 0.0, now);
        assert_eq!(section.total_rated_contests, 4);
        assert_eq!(section.contests_last_30, 1);
        assert_eq!(section.contests_last_60, 2);
        assert_eq!(section.contests_last_90, 3);
    }

    #[test]
    fn test_gap_stats() {
        let day = 86_400;
        let events = vec![
            make_event(1400, 1410, 0),
            make_event(1410, 1420, 2 * day),
            make_event(1420, 1430, 6 * day),
        ];
        let section = participation_section(&events, 0.0, Utc.timestamp_opt(10 * day, 0).unwrap());
        assert!((section.avg_gap_days - 3.0).abs() < 1e-9);
        assert!((section.max_gap_days - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_gap_stats_single_event() {
        let events = vec![make_event(1400, 1410, 0)];
        let section = participation_section(&events, 0.0, Utc.timestamp_opt(86_400, 0).unwrap());
        assert_eq!(section.avg_gap_days, 0.0);
        assert_eq!(section.max_gap_days, 0.0);
    }

    #[test]
    fn test_monthly_cadence_groups_by_utc_month() {
        // 2024-03-02 and 2024-03-30 share a bucket, 2024-04-01 does not
        let events = vec![
            make_event(1400, 1410, 1_709_337_600),
            make_event(1410, 1420, 1_711_756_800),
            make_event(1420, 1430, 1_711_929_600),
        ];
        let section =
            participation_section(&events, 0.0, Utc.timestamp_opt(1_712_000_000, 0).unwrap());
        let months: Vec<(String, u32)> = section
            .contests_per_month
            .iter()
            .map(|m| (m.month.clone(), m.contests))
            .collect();
        assert_eq!(
            months,
            vec![("2024-03".to_string(), 2), ("2024-04".to_string(), 1)]
        );
    }
}
