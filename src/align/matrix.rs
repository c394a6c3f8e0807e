use super::error::AlignError;

/// Dense `rows × cols` similarity table, one row per segment and one column
/// per page, stored row-major in a single buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ScoreMatrix {
    /// Build a matrix from nested rows, rejecting empty, ragged, negative or
    /// non-finite input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AlignError> {
        if rows.is_empty() {
            return Err(AlignError::invalid_input("score matrix has no segments (N == 0)"));
        }
        let cols = rows[0].len();
        if cols == 0 {
            return Err(AlignError::invalid_input("score matrix has no pages (M == 0)"));
        }

        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(AlignError::invalid_input(format!(
                    "row {i} has {} entries, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Self::from_flat(rows.len(), cols, data)
    }

    /// Build a matrix from an already flattened row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, AlignError> {
        if rows == 0 || cols == 0 {
            return Err(AlignError::invalid_input(format!(
                "score matrix must be at least 1x1, got {rows}x{cols}"
            )));
        }
        if data.len() != rows * cols {
            return Err(AlignError::invalid_input(format!(
                "buffer holds {} values, expected {rows}x{cols}",
                data.len()
            )));
        }
        for (idx, &value) in data.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(AlignError::invalid_input(format!(
                    "score at row {}, column {} is {value}; scores must be finite and non-negative",
                    idx / cols,
                    idx % cols
                )));
            }
        }
        Ok(Self { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    pub(crate) fn row_mut(&mut self, row: usize) -> &mut [f64] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub(crate) fn values_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Copy back out into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }
}

/// Index of the largest value, lowest index on ties.
pub(crate) fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}
