//! Points and samples.
//!
//! A [`Point`] is a real vector; a [`Sample`] is an ordered collection of rows
//! that all share one dimension, stored row-major in one contiguous buffer so
//! that batch evaluators can hand disjoint row ranges to worker threads.
//!
//! ```
//! use uqkit::sample::{Point, Sample};
//!
//! let s = Sample::from_rows(2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
//! assert_eq!(s.size(), 3);
//! assert_eq!(s.row(1), &[3.0, 4.0]);
//! assert_eq!(s[(2, 0)], 5.0);
//!
//! let p = Point::from(vec![0.5, 1.5]);
//! assert_eq!(p.dimension(), 2);
//! ```

#[cfg(test)]
mod tests;

use core::fmt;
use core::ops::{Deref, DerefMut, Index, IndexMut};

use crate::error::{Error, Result};

/// A real vector of fixed dimension.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point(Vec<f64>);

impl Point {
    /// Point of `dimension` zeros.
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.0; dimension])
    }

    /// Number of components.
    pub fn dimension(&self) -> usize {
        self.0.len()
    }

    /// Components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consume into the underlying vector.
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }
}

impl From<Vec<f64>> for Point {
    fn from(v: Vec<f64>) -> Self {
        Self(v)
    }
}

impl From<&[f64]> for Point {
    fn from(v: &[f64]) -> Self {
        Self(v.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(v: [f64; N]) -> Self {
        Self(v.to_vec())
    }
}

impl Deref for Point {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl DerefMut for Point {
    fn deref_mut(&mut self) -> &mut [f64] {
        &mut self.0
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// Ordered rows of a common dimension, row-major.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    data: Vec<f64>,
    size: usize,
    dimension: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl Sample {
    /// `size` rows of `dimension` zeros.
    pub fn zeros(size: usize, dimension: usize) -> Self {
        Self {
            data: vec![0.0; size * dimension],
            size,
            dimension,
        }
    }

    /// Empty sample of the given dimension, to be filled with [`push`](Self::push).
    pub fn with_dimension(dimension: usize) -> Self {
        Self::zeros(0, dimension)
    }

    /// Wrap a row-major buffer.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `dimension` is zero or does not divide the
    /// buffer length.
    pub fn from_rows(dimension: usize, data: Vec<f64>) -> Result<Self> {
        if dimension == 0 {
            return Err(Error::InvalidArgument("sample dimension must be positive".into()));
        }
        if data.len() % dimension != 0 {
            return Err(Error::InvalidArgument(format!(
                "buffer of length {} is not a whole number of rows of dimension {dimension}",
                data.len()
            )));
        }
        Ok(Self {
            size: data.len() / dimension,
            data,
            dimension,
        })
    }

    /// Stack points into a sample.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` naming the first point whose dimension differs
    /// from the first point's; `InvalidArgument` for an empty slice.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        let Some(first) = points.first() else {
            return Err(Error::InvalidArgument("cannot infer the dimension of an empty point list".into()));
        };
        let mut s = Self::with_dimension(first.dimension());
        s.data.reserve(points.len() * first.dimension());
        for p in points {
            s.push(p)?;
        }
        Ok(s)
    }

    /// Append a row.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the row length differs from the sample dimension.
    pub fn push(&mut self, row: &[f64]) -> Result<()> {
        if row.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                got: row.len(),
            });
        }
        self.data.extend_from_slice(row);
        self.size += 1;
        Ok(())
    }

    /// Append every row of `other`.
    pub fn extend(&mut self, other: &Sample) -> Result<()> {
        if other.dimension != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                got: other.dimension,
            });
        }
        self.data.extend_from_slice(&other.data);
        self.size += other.size;
        Ok(())
    }
}

// ── Accessors ───────────────────────────────────────────────────────

impl Sample {
    /// Number of rows.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Common row dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// True if there are no rows.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Row `i`. Panics if out of range, like slice indexing.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Mutable row `i`.
    pub fn row_mut(&mut self, i: usize) -> &mut [f64] {
        &mut self.data[i * self.dimension..(i + 1) * self.dimension]
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[f64]> + '_ {
        (0..self.size).map(move |i| self.row(i))
    }

    /// Row `i` as an owned point.
    pub fn point(&self, i: usize) -> Point {
        Point::from(self.row(i))
    }

    /// Keep only the last `n` rows.
    pub fn truncate_front(&mut self, n: usize) {
        if self.size > n {
            let drop = self.size - n;
            self.data.drain(..drop * self.dimension);
            self.size = n;
        }
    }

    /// The row-major buffer.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// The row-major buffer, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Consume into the row-major buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}

impl Index<(usize, usize)> for Sample {
    type Output = f64;

    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        assert!(j < self.dimension, "column {j} out of range for dimension {}", self.dimension);
        &self.data[i * self.dimension + j]
    }
}

impl IndexMut<(usize, usize)> for Sample {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        assert!(j < self.dimension, "column {j} out of range for dimension {}", self.dimension);
        &mut self.data[i * self.dimension + j]
    }
}
