//! Relevance scoring for full-text search.
//!
//! Scoring is a pure function of the record, the lowercased query, and the
//! current time. All contributions are additive with no normalization, so the
//! result is always >= 0. Callers must never pass an empty query here; an
//! empty query routes to listing mode before scoring is reached.

use chrono::{DateTime, Utc};

use crate::features::files::models::FileRecord;

const TITLE_EXACT: f64 = 20.0;
const TITLE_CONTAINS: f64 = 10.0;
const DESCRIPTION_CONTAINS: f64 = 5.0;
const TAG_EXACT: f64 = 15.0;
const TAG_CONTAINS: f64 = 7.0;
const KEYWORD_CONTAINS: f64 = 3.0;
const RECENCY_WINDOW_DAYS: f64 = 30.0;
const RECENCY_WEIGHT: f64 = 0.1;

/// Score one candidate against a lowercased, trimmed query.
///
/// Title and tag matches are mutually exclusive within their field: an exact
/// match wins over a substring match, never both. Ties between equal scores
/// are broken by the caller preserving store order (stable sort).
pub fn score(record: &FileRecord, query_lower: &str, now: DateTime<Utc>) -> f64 {
    let mut total = 0.0;

    let title = record.title.trim().to_lowercase();
    if title == query_lower {
        total += TITLE_EXACT;
    } else if title.contains(query_lower) {
        total += TITLE_CONTAINS;
    }

    if let Some(description) = &record.description {
        if description.to_lowercase().contains(query_lower) {
            total += DESCRIPTION_CONTAINS;
        }
    }

    if record.tags.iter().any(|tag| tag == query_lower) {
        total += TAG_EXACT;
    } else if record.tags.iter().any(|tag| tag.contains(query_lower)) {
        total += TAG_CONTAINS;
    }

    if record
        .search_keywords
        .iter()
        .any(|keyword| keyword.contains(query_lower))
    {
        total += KEYWORD_CONTAINS;
    }

    total += ((record.view_count + 1) as f64).ln();

    let age_days = (now - record.created_at).num_seconds() as f64 / 86_400.0;
    if age_days < RECENCY_WINDOW_DAYS {
        total += (RECENCY_WINDOW_DAYS - age_days) * RECENCY_WEIGHT;
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn record(title: &str, tags: &[&str], views: i64, age_days: i64) -> FileRecord {
        let now = Utc::now();
        FileRecord {
            id: Uuid::new_v4(),
            seq: 1,
            title: title.to_string(),
            description: None,
            original_name: "file.bin".to_string(),
            storage_key: "raw/x/file.bin".to_string(),
            resource_type: "raw".to_string(),
            url: String::new(),
            secure_url: String::new(),
            file_type: "document".to_string(),
            mime_type: "application/octet-stream".to_string(),
            size: 1,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category: "other".to_string(),
            is_public: false,
            view_count: views,
            download_count: 0,
            owner_id: Uuid::new_v4(),
            width: None,
            height: None,
            duration: None,
            bitrate: None,
            format: None,
            search_keywords: Vec::new(),
            created_at: now - Duration::days(age_days),
            updated_at: now,
        }
    }

    #[test]
    fn title_containing_query_scores_at_least_ten() {
        // old record with no views, so only the title term contributes
        let r = record("Vacation Photo", &["beach"], 0, 400);
        let s = score(&r, "vacation", Utc::now());
        assert!(s >= 10.0 && s < 20.0, "got {s}");
    }

    #[test]
    fn exact_title_beats_substring_title() {
        let exact = record("vacation", &[], 0, 400);
        let partial = record("Vacation Photo", &[], 0, 400);
        let now = Utc::now();
        assert!(score(&exact, "vacation", now) > score(&partial, "vacation", now));
        assert_eq!(score(&exact, "vacation", now), 20.0);
    }

    #[test]
    fn exact_tag_and_substring_tag_are_mutually_exclusive() {
        let now = Utc::now();
        let exact = record("x", &["beach"], 0, 400);
        assert_eq!(score(&exact, "beach", now), 15.0);

        let partial = record("x", &["beaches"], 0, 400);
        assert_eq!(score(&partial, "beach", now), 7.0);
    }

    #[test]
    fn views_and_recency_contribute() {
        let now = Utc::now();
        let popular = record("x", &[], 99, 400);
        // ln(100) ~ 4.605
        let s = score(&popular, "zzz", now);
        assert!((s - 100.0f64.ln()).abs() < 1e-9);

        let fresh = record("x", &[], 0, 0);
        let s = score(&fresh, "zzz", now);
        assert!(s > 2.9 && s <= 3.0, "got {s}");

        let stale = record("x", &[], 0, 31);
        assert_eq!(score(&stale, "zzz", now), 0.0);
    }

    #[test]
    fn score_is_never_negative() {
        let now = Utc::now();
        for age in [0, 1, 29, 30, 31, 1000] {
            for views in [0, 1, 1000] {
                let r = record("unrelated", &["other"], views, age);
                assert!(score(&r, "nomatch", now) >= 0.0);
            }
        }
    }

    #[test]
    fn equal_text_scores_stay_in_store_order_under_stable_sort() {
        // Same text match, same views, both outside the recency window but
        // with different creation times: sort must preserve input order.
        let now = Utc::now();
        let older = record("Vacation Photo", &[], 0, 200);
        let newer = record("Vacation Photo", &[], 0, 40);

        let mut scored: Vec<(usize, f64)> = [&older, &newer]
            .iter()
            .enumerate()
            .map(|(i, r)| (i, score(r, "vacation", now)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        assert_eq!(scored[0].0, 0, "store order must win ties, not recency");
        assert_eq!(scored[1].0, 1);
    }
}
