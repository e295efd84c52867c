//! Array diff: head/tail trimming, LCS alignment of the middles, optional
//! move detection.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use super::Differ;
use crate::delta::{ArrayDelta, Delta};
use crate::lcs;

impl Differ<'_> {
    pub(super) fn diff_array(&self, left: &[Value], right: &[Value]) -> Option<Delta> {
        if left == right {
            return None;
        }

        let left_len = left.len();
        let right_len = right.len();
        let mut delta = ArrayDelta::default();

        // Common head: aligned pairs are diffed in place. In the prefix the
        // new index equals the old index.
        let mut common_head = 0;
        while common_head < left_len
            && common_head < right_len
            && self.matches(left, right, common_head, common_head)
        {
            if let Some(child) = self.diff(&left[common_head], &right[common_head]) {
                delta.updated.insert(common_head, child);
            }
            common_head += 1;
        }

        // Common tail: aligned pairs off the end, recorded at their new index.
        let mut common_tail = 0;
        while common_tail + common_head < left_len
            && common_tail + common_head < right_len
            && self.matches(
                left,
                right,
                left_len - 1 - common_tail,
                right_len - 1 - common_tail,
            )
        {
            let left_index = left_len - 1 - common_tail;
            let right_index = right_len - 1 - common_tail;
            if let Some(child) = self.diff(&left[left_index], &right[right_index]) {
                delta.updated.insert(right_index, child);
            }
            common_tail += 1;
        }

        if common_head + common_tail == left_len {
            // Trimming consumed the whole left side: the middle of the right
            // side is a pure block insertion.
            for index in common_head..right_len - common_tail {
                delta.updated.insert(index, Delta::Added(right[index].clone()));
            }
        } else if common_head + common_tail == right_len {
            // The middle of the left side is a pure block removal.
            for index in common_head..left_len - common_tail {
                delta.removed.insert(index, Delta::Deleted(left[index].clone()));
            }
        } else {
            // General case: align the middles by LCS.
            let left_mid = &left[common_head..left_len - common_tail];
            let right_mid = &right[common_head..right_len - common_tail];
            let lcs = lcs::compute(left_mid, right_mid, |a, ia, b, ib| {
                self.matcher.match_element(a, ia, b, ib)
            });
            let matched_left: BTreeSet<usize> = lcs.indices_left.iter().copied().collect();
            let matched_right: BTreeMap<usize, usize> = lcs
                .indices_right
                .iter()
                .copied()
                .zip(lcs.indices_left.iter().copied())
                .collect();

            for (offset, value) in left_mid.iter().enumerate() {
                if !matched_left.contains(&offset) {
                    delta
                        .removed
                        .insert(common_head + offset, Delta::Deleted(value.clone()));
                }
            }
            for (offset, value) in right_mid.iter().enumerate() {
                match matched_right.get(&offset) {
                    None => {
                        delta
                            .updated
                            .insert(common_head + offset, Delta::Added(value.clone()));
                    }
                    Some(&left_offset) => {
                        if let Some(child) = self.diff(&left_mid[left_offset], value) {
                            delta.updated.insert(common_head + offset, child);
                        }
                    }
                }
            }

            if self.options.detect_move {
                self.detect_moves(&mut delta);
            }
        }

        if delta.is_empty() {
            None
        } else {
            Some(Delta::Array(delta))
        }
    }

    fn matches(&self, left: &[Value], right: &[Value], left_index: usize, right_index: usize) -> bool {
        self.matcher
            .match_element(&left[left_index], left_index, &right[right_index], right_index)
    }

    /// Collapse deletion/addition pairs of the same element into moves.
    ///
    /// A pair qualifies only when the two values also diff to nothing;
    /// a bare move cannot carry a content change, so pairs with one stay
    /// delete + add.
    fn detect_moves(&self, delta: &mut ArrayDelta) {
        let old_indices: Vec<usize> = delta.removed.keys().copied().collect();
        for old_index in old_indices {
            let value = match delta.removed.get(&old_index) {
                Some(Delta::Deleted(value)) => value.clone(),
                _ => continue,
            };
            let target = delta.updated.iter().find_map(|(&new_index, entry)| {
                matches!(
                    entry,
                    Delta::Added(added)
                        if self.matcher.match_value(&value, added)
                            && self.diff(&value, added).is_none()
                )
                .then_some(new_index)
            });
            if let Some(to) = target {
                delta.updated.remove(&to);
                let carried = self.options.include_value_on_move.then_some(value);
                delta.removed.insert(old_index, Delta::Moved { value: carried, to });
            }
        }
    }
}
