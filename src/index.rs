// index.rs

use crate::history::HistoryList;

/// Positions in a [`HistoryList`] matching a query, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet(Vec<usize>);

impl MatchSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, n: usize) -> Option<usize> {
        self.0.get(n).copied()
    }
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Scans `history` from newest to oldest and keeps every entry containing
/// `query`, ignoring case. An empty query matches everything.
pub fn recompute(history: &HistoryList, query: &str) -> MatchSet {
    let needle = query.to_lowercase();
    let matches = history
        .iter()
        .enumerate()
        .rev()
        .filter(|(_, entry)| needle.is_empty() || entry.to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect();
    MatchSet(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn history(entries: &[&str]) -> HistoryList {
        entries.iter().copied().collect()
    }

    #[test]
    fn finds_duplicates_newest_first() {
        let h = history(&["ls -la", "git status", "ls -la", "git commit -m fix"]);
        assert_eq!(recompute(&h, "ls").as_slice(), [2, 0]);
        assert_eq!(recompute(&h, "git").as_slice(), [3, 1]);
    }

    #[test]
    fn ignores_case() {
        let h = history(&["Cargo BUILD", "make"]);
        assert_eq!(recompute(&h, "build").as_slice(), [0]);
        assert_eq!(recompute(&h, "MAKE").as_slice(), [1]);
    }

    #[test]
    fn empty_query_matches_all_in_reverse() {
        let h = history(&["a", "b", "c"]);
        assert_eq!(recompute(&h, "").as_slice(), [2, 1, 0]);
    }

    #[test]
    fn no_match_or_no_history_is_empty() {
        let h = history(&["ls -la"]);
        assert!(recompute(&h, "zzz").is_empty());
        assert!(recompute(&HistoryList::new(), "").is_empty());
    }

    proptest! {
        #[test]
        fn matches_exactly_the_containing_entries(
            entries in prop::collection::vec("[a-cA-C ]{1,8}", 0..20),
            query in "[a-cA-C]{0,3}",
        ) {
            let h: HistoryList = entries.iter().cloned().collect();
            let set = recompute(&h, &query);
            let q = query.to_lowercase();
            let expected: Vec<usize> = (0..h.len())
                .rev()
                .filter(|&i| h.get(i).unwrap().to_lowercase().contains(&q))
                .collect();
            prop_assert_eq!(set.as_slice(), expected.as_slice());
        }

        #[test]
        fn order_is_strictly_decreasing(
            entries in prop::collection::vec("[ab]{1,4}", 0..20),
            query in "[ab]{1,2}",
        ) {
            let h: HistoryList = entries.iter().cloned().collect();
            let set = recompute(&h, &query);
            prop_assert!(set.as_slice().windows(2).all(|w| w[0] > w[1]));
        }
    }
}
