use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;

/// Training/scoring targets: either class indices or a one-hot matrix.
///
/// Borrowed so callers can pass `&Vec<usize>`, `&[usize]` or `&Matrix`
/// directly to `fit`/`score`.
#[derive(Debug, Clone, Copy)]
pub enum Labels<'a> {
    Indices(&'a [usize]),
    OneHot(&'a Matrix),
}

impl<'a> Labels<'a> {
    /// Number of labelled samples.
    pub fn len(&self) -> usize {
        match self {
            Labels::Indices(idx) => idx.len(),
            Labels::OneHot(m) => m.rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks the labels against `classes` output units without allocating.
    ///
    /// An index `>= classes` is a shape mismatch on the output width.
    pub fn validate(&self, classes: usize) -> Result<()> {
        match self {
            Labels::Indices(idx) => match idx.iter().find(|&&k| k >= classes) {
                Some(&index) => Err(NetworkError::ShapeMismatch {
                    what: "label index",
                    got: index,
                    expected: classes,
                }),
                None => Ok(()),
            },
            Labels::OneHot(m) if m.cols != classes => Err(NetworkError::ShapeMismatch {
                what: "one-hot label width",
                got: m.cols,
                expected: classes,
            }),
            Labels::OneHot(m) => m.check_layout(),
        }
    }

    /// One-hot matrix of width `classes`.
    pub fn to_one_hot(&self, classes: usize) -> Result<Matrix> {
        self.validate(classes)?;
        match self {
            Labels::Indices(idx) => {
                let mut one_hot = Matrix::zeros(idx.len(), classes);
                for (row, &k) in idx.iter().enumerate() {
                    one_hot.set(row, k, 1.0);
                }
                Ok(one_hot)
            }
            Labels::OneHot(m) => Ok((*m).clone()),
        }
    }

    /// True class per sample; the row arg-max for one-hot labels.
    pub fn class_indices(&self) -> Vec<usize> {
        match self {
            Labels::Indices(idx) => idx.to_vec(),
            Labels::OneHot(m) => m.argmax_rows(),
        }
    }
}

impl<'a> From<&'a [usize]> for Labels<'a> {
    fn from(idx: &'a [usize]) -> Self {
        Labels::Indices(idx)
    }
}

impl<'a> From<&'a Vec<usize>> for Labels<'a> {
    fn from(idx: &'a Vec<usize>) -> Self {
        Labels::Indices(idx.as_slice())
    }
}

impl<'a, const N: usize> From<&'a [usize; N]> for Labels<'a> {
    fn from(idx: &'a [usize; N]) -> Self {
        Labels::Indices(idx.as_slice())
    }
}

impl<'a> From<&'a Matrix> for Labels<'a> {
    fn from(m: &'a Matrix) -> Self {
        Labels::OneHot(m)
    }
}
