//! Pure ranking and threshold filtering over aggregated video records.

use crate::records::VideoRecord;

/// Sort descending by viral score.
///
/// The sort is stable: records with equal scores keep their relative
/// (search-relevance) order, so output is deterministic for a given input.
pub fn rank(mut records: Vec<VideoRecord>) -> Vec<VideoRecord> {
    records.sort_by(|a, b| b.viral_score.total_cmp(&a.viral_score));
    records
}

/// Retain records scoring at least `threshold`, preserving input order.
///
/// The threshold is applied literally with no clamping. Callers re-run this
/// against the full ranked list whenever the threshold changes; filtering an
/// already-filtered subset would silently drop records that should reappear
/// when the threshold is lowered.
pub fn filter_by_min_score(records: &[VideoRecord], threshold: f64) -> Vec<VideoRecord> {
    records
        .iter()
        .filter(|record| record.viral_score >= threshold)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, score: f64) -> VideoRecord {
        VideoRecord {
            id: id.to_string(),
            title: format!("video {}", id),
            thumbnail_url: String::new(),
            channel_title: "channel".to_string(),
            channel_id: "UC0".to_string(),
            published_at: Utc::now(),
            view_count: 0,
            like_count: 0,
            comment_count: 0,
            subscriber_count: 0,
            viral_score: score,
        }
    }

    fn ids(records: &[VideoRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_rank_sorts_descending() {
        let ranked = rank(vec![record("a", 0.2), record("b", 3.0), record("c", 1.1)]);
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_rank_is_stable_on_ties() {
        let ranked = rank(vec![
            record("first", 1.0),
            record("second", 1.0),
            record("third", 2.0),
            record("fourth", 1.0),
        ]);
        assert_eq!(ids(&ranked), vec!["third", "first", "second", "fourth"]);
    }

    #[test]
    fn test_filter_keeps_exactly_the_scores_at_or_above_threshold() {
        let records = vec![
            record("a", 0.2),
            record("b", 0.9),
            record("c", 1.8),
            record("d", 3.0),
        ];
        let filtered = filter_by_min_score(&records, 1.5);
        assert_eq!(ids(&filtered), vec!["c", "d"]);

        // Boundary is inclusive
        let filtered = filter_by_min_score(&records, 0.9);
        assert_eq!(ids(&filtered), vec!["b", "c", "d"]);
    }

    #[test]
    fn test_filter_is_idempotent_at_same_threshold() {
        let records = vec![record("a", 0.5), record("b", 2.5), record("c", 4.0)];
        let once = filter_by_min_score(&records, 1.0);
        let twice = filter_by_min_score(&once, 1.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_applies_out_of_range_thresholds_literally() {
        let records = vec![record("a", 0.5), record("b", 6.0)];
        assert_eq!(ids(&filter_by_min_score(&records, -1.0)), vec!["a", "b"]);
        assert_eq!(ids(&filter_by_min_score(&records, 5.5)), vec!["b"]);
    }

    #[test]
    fn test_rank_and_filter_on_empty_input() {
        assert!(rank(Vec::new()).is_empty());
        assert!(filter_by_min_score(&[], 0.0).is_empty());
    }
}
