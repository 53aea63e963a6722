use crate::core::{RawRecord, Record};
use crate::utils::error::{LeaderboardError, Result};
use std::collections::HashMap;

/// Decodes a persisted row. A score that is not a signed integer fails the
/// whole ranking; there is no per-row skip.
pub fn decode(raw: &RawRecord) -> Result<Record> {
    let score = raw
        .score
        .parse::<i64>()
        .map_err(|source| LeaderboardError::InvalidScoreError {
            name: raw.name.clone(),
            value: raw.score.clone(),
            source,
        })?;
    Ok(Record::new(raw.name.clone(), score))
}

/// Collapses records by name, keeping the best score per name.
///
/// Entries come out in the order each name was first seen, which makes tie
/// order after the stable sort in [`rank`] deterministic.
pub fn best_by_name(records: Vec<Record>) -> Vec<Record> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut best: Vec<Record> = Vec::new();

    for record in records {
        match index.get(&record.name) {
            Some(&i) => {
                // 只有嚴格較高的分數才覆蓋
                if record.score > best[i].score {
                    best[i].score = record.score;
                }
            }
            None => {
                index.insert(record.name.clone(), best.len());
                best.push(record);
            }
        }
    }

    best
}

/// Computes the leaderboard from the raw log: decode, dedup by name, sort by
/// score descending and keep the first `limit` entries.
///
/// Equal scores keep first-appearance order. Names are compared exactly
/// (case-sensitive, no normalization).
pub fn rank(raw: &[RawRecord], limit: usize) -> Result<Vec<Record>> {
    let decoded = raw.iter().map(decode).collect::<Result<Vec<_>>>()?;

    let mut entries = best_by_name(decoded);
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(limit);

    tracing::debug!(
        "Ranked {} raw records into {} leaderboard entries",
        raw.len(),
        entries.len()
    );
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::DEFAULT_LEADERBOARD_SIZE;

    fn raw(pairs: &[(&str, &str)]) -> Vec<RawRecord> {
        pairs.iter().map(|(n, s)| RawRecord::new(*n, *s)).collect()
    }

    fn scores(records: &[Record]) -> Vec<i64> {
        records.iter().map(|r| r.score).collect()
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_rank_dedups_and_sorts() {
        let input = raw(&[("a", "5"), ("b", "9"), ("a", "7"), ("c", "9"), ("d", "1")]);
        let result = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(scores(&result), vec![9, 9, 7, 1]);
        // b 先出現，所以排在 c 前面
        assert_eq!(names(&result), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let input: Vec<RawRecord> = (1..=15)
            .rev()
            .map(|i| RawRecord::new(format!("player{}", i), i.to_string()))
            .collect();
        let result = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();

        assert_eq!(result.len(), 10);
        assert_eq!(scores(&result), (6..=15).rev().collect::<Vec<i64>>());
        assert_eq!(result[0].name, "player15");
        assert_eq!(result[9].name, "player6");
    }

    #[test]
    fn test_rank_unsorted_input_over_limit() {
        let input: Vec<RawRecord> = [3, 14, 1, 15, 7, 9, 2, 12, 5, 11, 4, 13, 6, 10, 8]
            .iter()
            .map(|i| RawRecord::new(format!("p{}", i), i.to_string()))
            .collect();
        let result = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();

        assert_eq!(scores(&result), vec![15, 14, 13, 12, 11, 10, 9, 8, 7, 6]);
    }

    #[test]
    fn test_rank_empty_input() {
        let result = rank(&[], DEFAULT_LEADERBOARD_SIZE).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_rank_single_record() {
        let result = rank(&raw(&[("solo", "42")]), DEFAULT_LEADERBOARD_SIZE).unwrap();
        assert_eq!(result, vec![Record::new("solo", 42)]);
    }

    #[test]
    fn test_rank_same_name_keeps_max() {
        let input = raw(&[("x", "3"), ("x", "-2"), ("x", "11"), ("x", "11"), ("x", "0")]);
        let result = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();
        assert_eq!(result, vec![Record::new("x", 11)]);
    }

    #[test]
    fn test_rank_names_are_case_sensitive() {
        let input = raw(&[("Alice", "1"), ("alice", "2"), ("ALICE", "3")]);
        let result = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();
        assert_eq!(names(&result), vec!["ALICE", "alice", "Alice"]);
    }

    #[test]
    fn test_rank_negative_and_signed_scores() {
        let input = raw(&[("a", "-5"), ("b", "+3"), ("c", "-1")]);
        let result = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();
        assert_eq!(scores(&result), vec![3, -1, -5]);
    }

    #[test]
    fn test_rank_invalid_score_fails_whole_ranking() {
        let input = raw(&[("a", "5"), ("x", "notanumber"), ("b", "9")]);
        let err = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap_err();

        assert!(err.is_parse_error());
        match err {
            LeaderboardError::InvalidScoreError { name, value, .. } => {
                assert_eq!(name, "x");
                assert_eq!(value, "notanumber");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rank_rejects_whitespace_and_empty_scores() {
        assert!(rank(&raw(&[("a", " 5")]), 10).is_err());
        assert!(rank(&raw(&[("a", "")]), 10).is_err());
        assert!(rank(&raw(&[("a", "1.5")]), 10).is_err());
    }

    #[test]
    fn test_rank_is_idempotent() {
        let input = raw(&[
            ("a", "5"),
            ("b", "9"),
            ("a", "7"),
            ("c", "9"),
            ("d", "1"),
            ("e", "9"),
        ]);
        let first = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();
        let reencoded: Vec<RawRecord> = first.iter().map(RawRecord::from).collect();
        let second = rank(&reencoded, DEFAULT_LEADERBOARD_SIZE).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_rank_invariants_on_mixed_input() {
        let input: Vec<RawRecord> = (0..200)
            .map(|i| RawRecord::new(format!("n{}", i % 37), ((i * 7919) % 101 - 50).to_string()))
            .collect();
        let result = rank(&input, DEFAULT_LEADERBOARD_SIZE).unwrap();

        assert!(result.len() <= DEFAULT_LEADERBOARD_SIZE);
        assert!(result.windows(2).all(|w| w[0].score >= w[1].score));

        let mut seen = std::collections::HashSet::new();
        for entry in &result {
            assert!(seen.insert(entry.name.clone()), "duplicate {}", entry.name);
            let expected_max = input
                .iter()
                .filter(|r| r.name == entry.name)
                .map(|r| r.score.parse::<i64>().unwrap())
                .max()
                .unwrap();
            assert_eq!(entry.score, expected_max);
        }
    }

    #[test]
    fn test_rank_respects_custom_limit() {
        let input = raw(&[("a", "1"), ("b", "2"), ("c", "3")]);
        let result = rank(&input, 2).unwrap();
        assert_eq!(names(&result), vec!["c", "b"]);
    }

    #[test]
    fn test_best_by_name_first_seen_order() {
        let records = vec![
            Record::new("b", 1),
            Record::new("a", 2),
            Record::new("b", 5),
            Record::new("c", 0),
        ];
        let result = best_by_name(records);
        assert_eq!(
            result,
            vec![Record::new("b", 5), Record::new("a", 2), Record::new("c", 0)]
        );
    }
}
