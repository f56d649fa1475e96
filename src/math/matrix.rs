use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Serialize, Deserialize};
use std::ops::{Add, Sub, Mul};

use crate::error::{NetworkError, Result};

/// Dense row-major matrix of `f64`.
///
/// Rows are samples wherever a matrix carries a batch, so a bias is a
/// `1 × n` row vector that broadcasts over every row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// Samples every entry from N(0, 1) scaled by `std_dev`, in row-major order.
    ///
    /// The draw order is part of the contract: the same RNG state always yields
    /// the same matrix.
    pub fn normal<R: Rng>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let data = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| rng.sample::<f64, _>(StandardNormal) * std_dev)
                    .collect()
            })
            .collect();
        Matrix { rows, cols, data }
    }

    /// Builds a matrix from rows, rejecting ragged input.
    ///
    /// An empty `Vec` yields a `0 × 0` matrix.
    pub fn from_rows(data: Vec<Vec<f64>>) -> Result<Matrix> {
        let cols = data.first().map_or(0, Vec::len);
        if let Some(bad) = data.iter().find(|row| row.len() != cols) {
            return Err(NetworkError::ShapeMismatch {
                what: "row length",
                got: bad.len(),
                expected: cols,
            });
        }
        Ok(Matrix { rows: data.len(), cols, data })
    }

    /// Builds a `rows × cols` matrix from a flat row-major buffer.
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f64>) -> Result<Matrix> {
        if values.len() != rows * cols {
            return Err(NetworkError::ShapeMismatch {
                what: "flat buffer length",
                got: values.len(),
                expected: rows * cols,
            });
        }
        let data = if cols == 0 {
            vec![Vec::new(); rows]
        } else {
            values.chunks(cols).map(<[f64]>::to_vec).collect()
        };
        Ok(Matrix { rows, cols, data })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Checks that `data` really holds `rows` rows of `cols` values each.
    ///
    /// The fields are public, so a hand-built matrix can disagree with its
    /// own dimensions.
    pub fn check_layout(&self) -> Result<()> {
        if self.data.len() != self.rows {
            return Err(NetworkError::ShapeMismatch {
                what: "row count",
                got: self.data.len(),
                expected: self.rows,
            });
        }
        if let Some(bad) = self.data.iter().find(|row| row.len() != self.cols) {
            return Err(NetworkError::ShapeMismatch {
                what: "row length",
                got: bad.len(),
                expected: self.cols,
            });
        }
        Ok(())
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i][j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.data[i][j] = value;
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// Applies `functor` to each row as a whole; used for row-wise softmax.
    pub fn map_rows<F>(&self, functor: F) -> Matrix
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let data: Vec<Vec<f64>> = self.data.iter().map(|row| functor(row)).collect();
        debug_assert!(data.iter().all(|row| row.len() == self.cols));
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|x| x * factor)
    }

    /// Element-wise (Hadamard) product of two same-shape matrices.
    pub fn hadamard(&self, rhs: &Matrix) -> Matrix {
        assert_eq!(self.shape(), rhs.shape(), "hadamard operands differ in shape");
        let data = self.data.iter().zip(rhs.data.iter())
            .map(|(row_a, row_b)| {
                row_a.iter().zip(row_b.iter()).map(|(x, y)| x * y).collect()
            })
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Adds a `1 × cols` row vector to every row.
    pub fn add_row(&self, row: &Matrix) -> Matrix {
        assert_eq!(row.rows, 1, "broadcast operand must be a row vector");
        assert_eq!(row.cols, self.cols, "broadcast operand width differs");
        let bias = &row.data[0];
        let data = self.data.iter()
            .map(|r| r.iter().zip(bias.iter()).map(|(x, b)| x + b).collect())
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Sums every column, producing a `1 × cols` row vector.
    pub fn column_sums(&self) -> Matrix {
        let mut sums = vec![0.0; self.cols];
        for row in &self.data {
            for (s, x) in sums.iter_mut().zip(row.iter()) {
                *s += x;
            }
        }
        Matrix { rows: 1, cols: self.cols, data: vec![sums] }
    }

    /// In-place `self -= factor * rhs`.
    pub fn scaled_sub_assign(&mut self, factor: f64, rhs: &Matrix) {
        assert_eq!(self.shape(), rhs.shape(), "update operands differ in shape");
        for (row, grad) in self.data.iter_mut().zip(rhs.data.iter()) {
            for (w, g) in row.iter_mut().zip(grad.iter()) {
                *w -= factor * g;
            }
        }
    }

    /// Column index of each row's maximum. The first maximum wins ties.
    pub fn argmax_rows(&self) -> Vec<usize> {
        self.data.iter().map(|row| argmax(row)).collect()
    }
}

/// Index of the maximum element in a slice (first one on ties, 0 when empty).
pub fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &x)| match best {
            Some((_, b)) if x <= b || x.is_nan() => best,
            _ => Some((i, x)),
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}

impl Add for &Matrix {
    type Output = Matrix;

    fn add(self, rhs: Self) -> Matrix {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] + rhs.data[i][j];
            }
        }

        res
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Matrix {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}

impl Mul for &Matrix {
    type Output = Matrix;

    /// Matrix product. Accumulates in a fixed `i-k-j` order so results are
    /// reproducible bit for bit.
    fn mul(self, rhs: Self) -> Matrix {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..self.rows {
            let out = &mut res.data[i];
            for k in 0..self.cols {
                let a = self.data[i][k];
                for (o, b) in out.iter_mut().zip(rhs.data[k].iter()) {
                    *o += a * b;
                }
            }
        }

        res
    }
}
