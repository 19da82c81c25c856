/// Minimum cost perfect matching of rows to columns of a square cost matrix
/// (the Hungarian algorithm with potentials, O(n^3)).
///
/// Returns the total cost and for each row the index of its assigned column.
pub(crate) fn min_cost_assignment(costs: &[Vec<i64>]) -> (i64, Vec<usize>) {
    let n = costs.len();
    debug_assert!(costs.iter().all(|row| row.len() == n), "Cost matrix must be square");

    // everything is 1-based, row/column 0 is a sentinel
    let inf = i64::max_value();
    let mut row_potential = vec![0; n + 1];
    let mut col_potential = vec![0; n + 1];
    let mut col_owner = vec![0usize; n + 1]; // row matched to each column, 0 = free
    let mut way = vec![0usize; n + 1];

    for row in 1..=n {
        col_owner[0] = row;
        let mut cur_col = 0;
        let mut min_slack = vec![inf; n + 1];
        let mut used = vec![false; n + 1];

        // grow an alternating tree until it reaches a free column
        loop {
            used[cur_col] = true;
            let cur_row = col_owner[cur_col];
            let mut delta = inf;
            let mut next_col = 0;
            for col in 1..=n {
                if used[col] {
                    continue;
                }
                let slack = costs[cur_row - 1][col - 1] - row_potential[cur_row] - col_potential[col];
                if slack < min_slack[col] {
                    min_slack[col] = slack;
                    way[col] = cur_col;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    next_col = col;
                }
            }
            for col in 0..=n {
                if used[col] {
                    row_potential[col_owner[col]] += delta;
                    col_potential[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }
            cur_col = next_col;
            if col_owner[cur_col] == 0 {
                break;
            }
        }

        // flip the augmenting path
        while cur_col != 0 {
            let prev_col = way[cur_col];
            col_owner[cur_col] = col_owner[prev_col];
            cur_col = prev_col;
        }
    }

    let mut assignment = vec![0; n];
    for col in 1..=n {
        assignment[col_owner[col] - 1] = col - 1;
    }
    let total = assignment
        .iter()
        .enumerate()
        .map(|(row, &col)| costs[row][col])
        .sum();
    (total, assignment)
}
