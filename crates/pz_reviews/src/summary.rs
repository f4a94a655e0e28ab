use pz_core::{ReviewRecord, ReviewSummary};

/// Keeps the `limit` newest reviews and averages their ratings.
///
/// Sorting is stable, so reviews sharing a date keep their page order.
/// Undated reviews go after every dated one. Only ratings inside the kept
/// window count towards the average.
pub fn rank_and_summarize(mut records: Vec<ReviewRecord>, limit: usize) -> ReviewSummary {
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records.truncate(limit);

    let ratings: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
    ReviewSummary {
        average_rating: avg(&ratings),
        reviews: records,
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn avg(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn review(date: Option<(i32, u32, u32)>, rating: Option<f64>, content: &str) -> ReviewRecord {
        ReviewRecord::new(
            date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            rating,
            content.to_string(),
            None,
        )
    }

    fn contents(summary: &ReviewSummary) -> Vec<&str> {
        summary.reviews.iter().map(|r| r.content.as_str()).collect()
    }

    #[test]
    fn test_avg() {
        assert_eq!(avg(&[2.0, 4.0, 6.0]), Some(4.0));
        assert_eq!(avg(&[3.5]), Some(3.5));
        assert_eq!(avg(&[]), None);
    }

    #[test]
    fn test_sorts_newest_first() {
        let records = vec![
            review(Some((2017, 4, 1)), Some(3.0), "april"),
            review(Some((2017, 6, 1)), Some(5.0), "june"),
            review(Some((2017, 5, 1)), Some(4.0), "may"),
        ];
        let summary = rank_and_summarize(records, 10);
        assert_eq!(contents(&summary), vec!["june", "may", "april"]);
        assert_eq!(summary.average_rating, Some(4.0));
    }

    #[test]
    fn test_equal_dates_keep_page_order() {
        let records = vec![
            review(Some((2017, 5, 1)), None, "first"),
            review(Some((2017, 6, 1)), None, "newest"),
            review(Some((2017, 5, 1)), None, "second"),
            review(Some((2017, 5, 1)), None, "third"),
        ];
        let summary = rank_and_summarize(records, 4);
        assert_eq!(contents(&summary), vec!["newest", "first", "second", "third"]);
    }

    #[test]
    fn test_undated_reviews_go_last() {
        let records = vec![
            review(None, Some(1.0), "undated a"),
            review(Some((2017, 1, 1)), Some(5.0), "dated"),
            review(None, Some(2.0), "undated b"),
        ];
        let summary = rank_and_summarize(records, 3);
        assert_eq!(contents(&summary), vec!["dated", "undated a", "undated b"]);
    }

    #[test]
    fn test_average_only_counts_selected_window() {
        let records = vec![
            review(Some((2017, 6, 3)), Some(5.0), "a"),
            review(Some((2017, 6, 2)), Some(3.0), "b"),
            review(Some((2017, 6, 1)), Some(1.0), "c"),
        ];
        let summary = rank_and_summarize(records, 2);
        assert_eq!(summary.reviews.len(), 2);
        assert_eq!(summary.average_rating, Some(4.0));
    }

    #[test]
    fn test_average_skips_missing_ratings() {
        let records = vec![
            review(Some((2017, 6, 3)), Some(5.0), "a"),
            review(Some((2017, 6, 2)), None, "b"),
            review(Some((2017, 6, 1)), Some(2.0), "c"),
        ];
        let summary = rank_and_summarize(records, 3);
        assert_eq!(summary.average_rating, Some(3.5));
    }

    #[test]
    fn test_length_is_min_of_limit_and_records() {
        let make = || {
            (1..=4)
                .map(|d| review(Some((2017, 3, d)), Some(4.0), "x"))
                .collect::<Vec<_>>()
        };
        for limit in 0..8 {
            assert_eq!(rank_and_summarize(make(), limit).reviews.len(), limit.min(4));
        }
    }

    #[test]
    fn test_empty_selection_has_no_average() {
        let records = vec![review(Some((2017, 6, 3)), Some(5.0), "a")];
        let summary = rank_and_summarize(records, 0);
        assert!(summary.reviews.is_empty());
        assert_eq!(summary.average_rating, None);

        let summary = rank_and_summarize(vec![review(None, None, "unrated")], 5);
        assert_eq!(summary.reviews.len(), 1);
        assert_eq!(summary.average_rating, None);
    }
}
