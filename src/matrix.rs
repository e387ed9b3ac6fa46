//! Validated travel-cost matrix.

use crate::error::InvalidMatrixError;

/// A dense n×n cost matrix stored in row-major order.
///
/// Index 0 is the depot. Entries are finite and non-negative and the diagonal
/// is zero; the matrix need not be symmetric.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Validates `rows` and flattens them into a matrix.
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self, InvalidMatrixError> {
        let size = rows.len();
        if size == 0 {
            return Err(InvalidMatrixError::Empty);
        }

        let mut data = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(InvalidMatrixError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, value) in values.into_iter().enumerate() {
                if !value.is_finite() {
                    return Err(InvalidMatrixError::NonFiniteCost { row, col });
                }
                if value < 0.0 {
                    return Err(InvalidMatrixError::NegativeCost { row, col, value });
                }
                if row == col && value != 0.0 {
                    return Err(InvalidMatrixError::NonZeroDiagonal { index: row, value });
                }
                data.push(value);
            }
        }

        Ok(Self { data, size })
    }

    /// Cost from `from` to `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.data[from * self.size + to]
    }

    /// Number of locations, depot included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Sum of consecutive legs along `order`.
    pub fn path_cost(&self, order: &[usize]) -> f64 {
        order
            .windows(2)
            .map(|pair| self.get(pair[0], pair[1]))
            .sum()
    }
}

impl TryFrom<Vec<Vec<f64>>> for DistanceMatrix {
    type Error = InvalidMatrixError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}
