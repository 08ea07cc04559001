//! # HeightMap
//!
//! Row-major grid of physical heights in millimeters.
//!
//! Row 0 is the far edge of the print and column 0 the near-left edge; the
//! surface builders flip rows so the far edge lands at maximum Y.

use crate::error::MeshError;
use config::constants::MIN_GRID_DIMENSION;

/// Validated, immutable grid of non-negative heights.
///
/// # Example
///
/// ```rust
/// use lithophane_mesh::HeightMap;
///
/// let map = HeightMap::from_rows(vec![
///     vec![1.0, 2.0, 1.0],
///     vec![0.5, 0.5, 0.5],
/// ]).unwrap();
/// assert_eq!(map.rows(), 2);
/// assert_eq!(map.cols(), 3);
/// assert_eq!(map.get(0, 1), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    rows: usize,
    cols: usize,
    /// Heights, `rows * cols` values in row-major order
    heights: Vec<f64>,
}

impl HeightMap {
    /// Creates a heightmap from a row-major buffer.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is below 2, if `heights.len()` is not
    /// `rows * cols`, or if any height is negative or non-finite.
    pub fn new(rows: usize, cols: usize, heights: Vec<f64>) -> Result<Self, MeshError> {
        if rows < MIN_GRID_DIMENSION || cols < MIN_GRID_DIMENSION {
            return Err(MeshError::invalid_shape(rows, cols));
        }
        if heights.len() != rows * cols {
            return Err(MeshError::SizeMismatch {
                rows,
                cols,
                len: heights.len(),
            });
        }
        if let Some((index, &value)) = heights
            .iter()
            .enumerate()
            .find(|(_, h)| !(h.is_finite() && **h >= 0.0))
        {
            return Err(MeshError::invalid_height(index / cols, index % cols, value));
        }

        Ok(Self {
            rows,
            cols,
            heights,
        })
    }

    /// Creates a heightmap from a vector of equally long rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, MeshError> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);

        let mut heights = Vec::with_capacity(row_count * cols);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != cols {
                return Err(MeshError::RaggedRows {
                    row,
                    expected: cols,
                    found: values.len(),
                });
            }
            heights.extend(values);
        }

        Self::new(row_count, cols, heights)
    }

    /// Creates a heightmap with every cell at `height`.
    pub fn filled(rows: usize, cols: usize, height: f64) -> Result<Self, MeshError> {
        Self::new(rows, cols, vec![height; rows * cols])
    }

    /// Creates a heightmap by sampling `f(row, col)` for every cell.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lithophane_mesh::HeightMap;
    ///
    /// let ramp = HeightMap::from_fn(4, 4, |_, col| 0.5 + col as f64 * 0.25).unwrap();
    /// assert_eq!(ramp.max_height(), 1.25);
    /// ```
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, MeshError> {
        let mut heights = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                heights.push(f(row, col));
            }
        }
        Self::new(rows, cols, heights)
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Height at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the index is outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "({row}, {col}) outside heightmap");
        self.heights[row * self.cols + col]
    }

    /// Heights in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.heights
    }

    /// Tallest sample.
    pub fn max_height(&self) -> f64 {
        self.heights.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }

    /// Shortest sample.
    pub fn min_height(&self) -> f64 {
        self.heights.iter().copied().fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_single_row() {
        assert_eq!(
            HeightMap::filled(1, 10, 1.0),
            Err(MeshError::InvalidShape { rows: 1, cols: 10 })
        );
    }

    #[test]
    fn test_rejects_single_column() {
        assert!(HeightMap::filled(10, 1, 1.0).is_err());
    }

    #[test]
    fn test_rejects_empty_rows() {
        assert_eq!(
            HeightMap::from_rows(Vec::new()),
            Err(MeshError::InvalidShape { rows: 0, cols: 0 })
        );
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = HeightMap::from_rows(vec![vec![1.0, 1.0], vec![1.0]]);
        assert_eq!(
            result,
            Err(MeshError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
    }

    #[test]
    fn test_rejects_wrong_buffer_length() {
        let result = HeightMap::new(2, 3, vec![0.0; 5]);
        assert!(matches!(result, Err(MeshError::SizeMismatch { len: 5, .. })));
    }

    #[test]
    fn test_rejects_negative_height_with_position() {
        let result = HeightMap::from_fn(3, 3, |r, c| if (r, c) == (2, 1) { -0.1 } else { 1.0 });
        assert_eq!(result, Err(MeshError::invalid_height(2, 1, -0.1)));
    }

    #[test]
    fn test_rejects_nan_height() {
        assert!(HeightMap::filled(2, 2, f64::NAN).is_err());
    }

    #[test]
    fn test_row_major_layout() {
        let map = HeightMap::from_fn(2, 3, |r, c| (r * 10 + c) as f64).unwrap();
        assert_eq!(map.as_slice(), &[0.0, 1.0, 2.0, 10.0, 11.0, 12.0]);
        assert_eq!(map.get(1, 2), 12.0);
    }

    #[test]
    fn test_height_range() {
        let map = HeightMap::from_rows(vec![vec![0.4, 2.0], vec![1.0, 0.8]]).unwrap();
        assert_eq!(map.min_height(), 0.4);
        assert_eq!(map.max_height(), 2.0);
    }
}
