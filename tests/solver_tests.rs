//! Solver tests: golden orders, tie-breaking and permutation properties.

mod fixtures;

use proptest::prelude::*;

use route_planner::error::InvalidMatrixError;
use route_planner::matrix::DistanceMatrix;
use route_planner::solver::{SolveOptions, solve, solve_rows, solve_with};

use fixtures::golden_matrix;

// ============================================================================
// Golden Outputs
// ============================================================================

#[test]
fn golden_scenario_order_and_cost() {
    let matrix = DistanceMatrix::new(golden_matrix()).unwrap();
    let order = solve(&matrix);
    assert_eq!(order, vec![0, 1, 3, 2]);
    assert_eq!(matrix.path_cost(&order), 18.0);
}

#[test]
fn depot_row_tie_picks_lower_index() {
    let matrix = DistanceMatrix::new(vec![
        vec![0.0, 5.0, 5.0, 9.0],
        vec![4.0, 0.0, 7.0, 3.0],
        vec![4.0, 7.0, 0.0, 3.0],
        vec![9.0, 3.0, 3.0, 0.0],
    ])
    .unwrap();
    let order = solve(&matrix);
    assert_eq!(order[1], 1);
    assert_eq!(order, vec![0, 1, 3, 2]);
}

#[test]
fn all_equal_costs_visit_in_index_order() {
    let n = 6;
    let rows = (0..n)
        .map(|i| (0..n).map(|j| if i == j { 0.0 } else { 1.0 }).collect())
        .collect();
    assert_eq!(solve_rows(rows).unwrap(), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn asymmetric_costs_follow_row_direction() {
    // Cheap to leave the depot towards 2, expensive to come back.
    let matrix = DistanceMatrix::new(vec![
        vec![0.0, 8.0, 1.0],
        vec![1.0, 0.0, 9.0],
        vec![50.0, 2.0, 0.0],
    ])
    .unwrap();
    assert_eq!(solve(&matrix), vec![0, 2, 1]);
}

#[test]
fn single_depot_matrix() {
    assert_eq!(solve_rows(vec![vec![0.0]]).unwrap(), vec![0]);
}

#[test]
fn empty_matrix_is_invalid() {
    assert_eq!(solve_rows(vec![]), Err(InvalidMatrixError::Empty));
}

#[test]
fn non_square_matrix_is_invalid() {
    let err = solve_rows(vec![vec![0.0, 1.0, 2.0], vec![1.0, 0.0, 2.0]]).unwrap_err();
    assert!(matches!(err, InvalidMatrixError::NotSquare { .. }));
}

// ============================================================================
// Properties
// ============================================================================

fn arb_matrix() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..12).prop_flat_map(|n| {
        proptest::collection::vec(proptest::collection::vec(0u32..50, n), n).prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, row)| {
                    row.into_iter()
                        .enumerate()
                        .map(|(j, value)| if i == j { 0.0 } else { f64::from(value) })
                        .collect()
                })
                .collect()
        })
    })
}

fn assert_permutation_from_depot(order: &[usize], n: usize) {
    assert_eq!(order.len(), n);
    assert_eq!(order[0], 0);
    let mut sorted = order.to_vec();
    sorted.sort_unstable();
    assert_eq!(sorted, (0..n).collect::<Vec<_>>());
}

proptest! {
    #[test]
    fn order_is_permutation_starting_at_depot(rows in arb_matrix()) {
        let n = rows.len();
        let matrix = DistanceMatrix::new(rows).unwrap();
        assert_permutation_from_depot(&solve(&matrix), n);
    }

    #[test]
    fn solve_is_deterministic(rows in arb_matrix()) {
        let matrix = DistanceMatrix::new(rows.clone()).unwrap();
        let again = DistanceMatrix::new(rows).unwrap();
        prop_assert_eq!(solve(&matrix), solve(&again));
    }

    #[test]
    fn each_step_takes_a_cheapest_unvisited(rows in arb_matrix()) {
        let matrix = DistanceMatrix::new(rows).unwrap();
        let order = solve(&matrix);
        for (step, pair) in order.windows(2).enumerate() {
            let (from, chosen) = (pair[0], pair[1]);
            for &other in &order[step + 2..] {
                let (chosen_cost, other_cost) = (matrix.get(from, chosen), matrix.get(from, other));
                prop_assert!(chosen_cost < other_cost || (chosen_cost == other_cost && chosen < other));
            }
        }
    }

    #[test]
    fn local_search_never_worsens_greedy(rows in arb_matrix()) {
        let n = rows.len();
        let matrix = DistanceMatrix::new(rows).unwrap();
        let greedy = solve(&matrix);
        let improved = solve_with(&matrix, &SolveOptions { local_search_iterations: 25 });
        assert_permutation_from_depot(&improved, n);
        prop_assert!(matrix.path_cost(&improved) <= matrix.path_cost(&greedy));
    }
}
