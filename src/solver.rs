//! Route solver: greedy nearest-neighbor over a distance matrix.
//!
//! The depot is index 0 and always comes first. The produced order is an open
//! path; no return leg is appended.

use crate::error::InvalidMatrixError;
use crate::matrix::DistanceMatrix;

#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Maximum 2-opt passes after the greedy construction. Zero keeps the
    /// plain nearest-neighbor order.
    pub local_search_iterations: usize,
}

/// Nearest-neighbor order starting at the depot.
///
/// From the last placed index, the unvisited index with the strictly smallest
/// cost is appended. Ties go to the lowest index.
pub fn solve(matrix: &DistanceMatrix) -> Vec<usize> {
    let n = matrix.size();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    visited[0] = true;
    order.push(0);

    let mut last = 0;
    while order.len() < n {
        let mut best: Option<(usize, f64)> = None;
        for candidate in 0..n {
            if visited[candidate] {
                continue;
            }
            let cost = matrix.get(last, candidate);
            match best {
                Some((_, best_cost)) if cost >= best_cost => {}
                _ => best = Some((candidate, cost)),
            }
        }

        // order.len() < n guarantees an unvisited index
        let Some((next, _)) = best else { break };
        visited[next] = true;
        order.push(next);
        last = next;
    }

    order
}

/// Validates raw rows and solves them.
pub fn solve_rows(rows: Vec<Vec<f64>>) -> Result<Vec<usize>, InvalidMatrixError> {
    let matrix = DistanceMatrix::new(rows)?;
    Ok(solve(&matrix))
}

/// Greedy construction followed by optional local search.
pub fn solve_with(matrix: &DistanceMatrix, options: &SolveOptions) -> Vec<usize> {
    let mut order = solve(matrix);
    local_search(&mut order, matrix, options.local_search_iterations);
    order
}

/// 2-opt: reverse a segment of the open path, depot pinned at position 0.
/// Returns true if an improvement was made.
///
/// Costs are recomputed over the whole candidate path since reversing a
/// segment of an asymmetric matrix changes its inner legs too.
fn two_opt_improve(order: &mut [usize], matrix: &DistanceMatrix) -> bool {
    let n = order.len();
    if n < 3 {
        return false;
    }

    let current_cost = matrix.path_cost(order);
    let mut candidate = order.to_vec();

    for i in 1..n - 1 {
        for j in i + 1..n {
            candidate[i..=j].reverse();
            if matrix.path_cost(&candidate) < current_cost {
                order.copy_from_slice(&candidate);
                return true;
            }
            candidate[i..=j].reverse();
        }
    }

    false
}

fn local_search(order: &mut [usize], matrix: &DistanceMatrix, iterations: usize) {
    for _ in 0..iterations {
        if !two_opt_improve(order, matrix) {
            break;
        }
    }
}
