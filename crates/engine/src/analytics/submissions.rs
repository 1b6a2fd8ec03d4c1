//! Verdict, language, and monthly-cadence tallies over the submission log

use std::collections::BTreeMap;

use super::model::{LanguageUsage, MonthlySuccessRate, VerdictCount};
use super::month_key;
use crate::types::Submission;

/// Bucket for submissions whose verdict is missing (pending or withheld)
const UNKNOWN_VERDICT: &str = "UNKNOWN";

/// Bucket for submissions with a missing or blank language field
const UNKNOWN_LANGUAGE: &str = "Unknown";

/// Only the most-used languages are reported
const LANGUAGE_LIMIT: usize = 12;

pub(super) struct SubmissionTallies {
    pub verdict_breakdown: Vec<VerdictCount>,
    pub language_usage: Vec<LanguageUsage>,
    pub monthly_success_rate: Vec<MonthlySuccessRate>,
    pub accepted: u32,
}

#[derive(Default)]
struct Tally {
    total: u32,
    accepted: u32,
}

/// Single pass over the sorted submission log producing the three
/// parallel histograms. Count-ordered outputs tie-break on name so the
/// result is deterministic.
pub(super) fn classify_submissions(submissions: &[Submission]) -> SubmissionTallies {
    let mut verdicts: BTreeMap<String, u32> = BTreeMap::new();
    let mut languages: BTreeMap<String, Tally> = BTreeMap::new();
    let mut monthly: BTreeMap<String, Tally> = BTreeMap::new();

    for sub in submissions {
        let accepted = sub.is_accepted();

        let verdict = sub.verdict.as_deref().unwrap_or(UNKNOWN_VERDICT);
        *verdicts.entry(verdict.to_string()).or_default() += 1;

        let language = match sub.programming_language.as_deref().map(str::trim) {
            Some(lang) if !lang.is_empty() => lang,
            _ => UNKNOWN_LANGUAGE,
        };
        let lang_entry = languages.entry(language.to_string()).or_default();
        lang_entry.total += 1;
        if accepted {
            lang_entry.accepted += 1;
        }

        let month_entry = monthly
            .entry(month_key(sub.creation_time_seconds))
            .or_default();
        month_entry.total += 1;
        if accepted {
            month_entry.accepted += 1;
        }
    }

    let accepted = verdicts
        .get(crate::types::VERDICT_ACCEPTED)
        .copied()
        .unwrap_or(0);

    let mut verdict_breakdown: Vec<VerdictCount> = verdicts
        .into_iter()
        .map(|(name, value)| VerdictCount { name, value })
        .collect();
    verdict_breakdown.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));

    let mut language_usage: Vec<LanguageUsage> = languages
        .into_iter()
        .map(|(language, tally)| LanguageUsage {
            language,
            submissions: tally.total,
            accepted: tally.accepted,
            success_rate: success_rate(tally.accepted, tally.total),
        })
        .collect();
    language_usage.sort_by(|a, b| {
        b.submissions
            .cmp(&a.submissions)
            .then_with(|| a.language.cmp(&b.language))
    });
    language_usage.truncate(LANGUAGE_LIMIT);

    // BTreeMap keys are YYYY-MM, so iteration order is chronological
    let monthly_success_rate: Vec<MonthlySuccessRate> = monthly
        .into_iter()
        .map(|(month, tally)| MonthlySuccessRate {
            month,
            success_rate: success_rate(tally.accepted, tally.total),
            submissions: tally.total,
        })
        .collect();

    SubmissionTallies {
        verdict_breakdown,
        language_usage,
        monthly_success_rate,
        accepted,
    }
}

fn success_rate(accepted: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        accepted as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_submission(ts: i64, verdict: Option<&str>, language: Option<&str>) -> Submission {
        Submission {
            creation_time_seconds: ts,
            verdict: verdict.map(String::from),
            programming_language: language.map(String::from),
            problem: None,
        }
    }

    #[test]
    fn test_verdict_histogram_mass_conservation() {
        let submissions = vec![
            make_submission(100, Some("OK"), Some("Rust")),
            make_submission(200, Some("WRONG_ANSWER"), Some("Rust")),
            make_submission(300, Some("OK"), Some("GNU C++17")),
            make_submission(400, None, Some("Rust")),
            make_submission(500, Some("TIME_LIMIT_EXCEEDED"), None),
        ];
        let tallies = classify_submissions(&submissions);

        let total: u32 = tallies.verdict_breakdown.iter().map(|v| v.value).sum();
        assert_eq!(total as usize, submissions.len());
        assert_eq!(tallies.accepted, 2);
        assert!(tallies
            .verdict_breakdown
            .iter()
            .any(|v| v.name == "UNKNOWN" && v.value == 1));
    }

    #[test]
    fn test_verdicts_sorted_descending_by_count() {
        let submissions = vec![
            make_submission(1, Some("WRONG_ANSWER"), None),
            make_submission(2, Some("WRONG_ANSWER"), None),
            make_submission(3, Some("OK"), None),
        ];
        let tallies = classify_submissions(&submissions);
        assert_eq!(tallies.verdict_breakdown[0].name, "WRONG_ANSWER");
        assert_eq!(tallies.verdict_breakdown[0].value, 2);
    }

    #[test]
    fn test_language_usage_rates_and_unknown_bucket() {
        let submissions = vec![
            make_submission(1, Some("OK"), Some("Rust")),
            make_submission(2, Some("WRONG_ANSWER"), Some("Rust")),
            make_submission(3, Some("OK"), Some("  ")),
        ];
        let tallies = classify_submissions(&submissions);

        let rust = tallies
            .language_usage
            .iter()
            .find(|l| l.language == "Rust")
            .unwrap();
        assert_eq!(rust.submissions, 2);
        assert_eq!(rust.accepted, 1);
        assert!((rust.success_rate - 50.0).abs() < 1e-9);

        let unknown = tallies
            .language_usage
            .iter()
            .find(|l| l.language == "Unknown")
            .unwrap();
        assert_eq!(unknown.submissions, 1);
    }

    #[test]
    fn test_language_list_truncated_to_top_12() {
        let mut submissions = Vec::new();
        for i in 0..20 {
            // Language i appears i+1 times
            for _ in 0..=i {
                submissions.push(make_submission(i, Some("OK"), Some(&format!("Lang{:02}", i))));
            }
        }
        let tallies = classify_submissions(&submissions);
        assert_eq!(tallies.language_usage.len(), 12);
        assert_eq!(tallies.language_usage[0].language, "Lang19");
    }

    #[test]
    fn test_monthly_grouping_shares_utc_month_key() {
        // 2024-03-05 12:00 and 2024-03-28 23:00 both land in 2024-03
        let submissions = vec![
            make_submission(1_709_640_000, Some("OK"), None),
            make_submission(1_711_666_800, Some("WRONG_ANSWER"), None),
        ];
        let tallies = classify_submissions(&submissions);
        assert_eq!(tallies.monthly_success_rate.len(), 1);
        let month = &tallies.monthly_success_rate[0];
        assert_eq!(month.month, "2024-03");
        assert_eq!(month.submissions, 2);
        assert!((month.success_rate - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_log_yields_empty_tallies() {
        let tallies = classify_submissions(&[]);
        assert!(tallies.verdict_breakdown.is_empty());
        assert!(tallies.language_usage.is_empty());
        assert!(tallies.monthly_success_rate.is_empty());
        assert_eq!(tallies.accepted, 0);
    }
}
