//! Longest common subsequence over two value slices.

use serde_json::Value;

/// Matched index pairs, ascending. `indices_left[k]` pairs with
/// `indices_right[k]`; the matched subsequence itself is implied.
#[derive(Debug, Default)]
pub(crate) struct LcsResult {
    pub indices_left: Vec<usize>,
    pub indices_right: Vec<usize>,
}

/// Classical O(m·n) dynamic-programming LCS.
///
/// `matches` is the identity oracle and receives the elements with their
/// local indices; the same oracle drives matrix construction and
/// backtracking. On a backtracking tie the up-move (consume left) wins.
pub(crate) fn compute<F>(left: &[Value], right: &[Value], matches: F) -> LcsResult
where
    F: Fn(&Value, usize, &Value, usize) -> bool,
{
    let rows = left.len();
    let cols = right.len();
    if rows == 0 || cols == 0 {
        return LcsResult::default();
    }

    let mut matrix = vec![vec![0u32; cols + 1]; rows + 1];
    for i in 1..=rows {
        for j in 1..=cols {
            matrix[i][j] = if matches(&left[i - 1], i - 1, &right[j - 1], j - 1) {
                matrix[i - 1][j - 1] + 1
            } else {
                matrix[i - 1][j].max(matrix[i][j - 1])
            };
        }
    }

    let mut result = LcsResult::default();
    let mut i = rows;
    let mut j = cols;
    while i > 0 && j > 0 {
        if matches(&left[i - 1], i - 1, &right[j - 1], j - 1) {
            result.indices_left.push(i - 1);
            result.indices_right.push(j - 1);
            i -= 1;
            j -= 1;
        } else if matrix[i][j - 1] > matrix[i - 1][j] {
            j -= 1;
        } else {
            i -= 1;
        }
    }
    result.indices_left.reverse();
    result.indices_right.reverse();
    result
}
