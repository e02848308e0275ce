//! Fixed-size row-major 2D arrays with elementwise helpers.
//!
//! Every constructor and every mapping reserves its storage with
//! `try_reserve_exact`, so an oversized grid surfaces as
//! [`OceanError::AllocationFailure`] instead of aborting, whether it happens
//! at construction or during a per-tick evaluation.

use std::ops::{Index, IndexMut};

use crate::error::{OceanError, Result};

/// Row-major `rows × cols` array. Dimensions are fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

/// Reserve storage for a `rows × cols` grid without aborting on failure.
fn reserve<T>(rows: usize, cols: usize, what: &'static str) -> Result<Vec<T>> {
    let cells = rows
        .checked_mul(cols)
        .ok_or(OceanError::AllocationFailure {
            what,
            cells: usize::MAX,
        })?;

    let mut data = Vec::new();
    data.try_reserve_exact(cells)
        .map_err(|_| OceanError::AllocationFailure { what, cells })?;
    Ok(data)
}

impl<T: Clone> Grid<T> {
    /// Allocate a grid filled with `value`.
    pub fn try_new(rows: usize, cols: usize, value: T, what: &'static str) -> Result<Self> {
        let mut data = reserve(rows, cols, what)?;
        data.resize(rows * cols, value);
        Ok(Self { rows, cols, data })
    }
}

impl<T> Grid<T> {
    /// Build a grid by evaluating `f(row, col)` for every cell.
    pub fn try_from_fn(
        rows: usize,
        cols: usize,
        what: &'static str,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self> {
        let mut data = reserve(rows, cols, what)?;
        for row in 0..rows {
            for col in 0..cols {
                data.push(f(row, col));
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

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Apply `f` to every cell, producing a grid of the same shape.
    pub fn try_map<U>(&self, what: &'static str, f: impl Fn(&T) -> U) -> Result<Grid<U>> {
        let mut data = reserve(self.rows, self.cols, what)?;
        data.extend(self.data.iter().map(f));
        Ok(Grid {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    /// Like [`Grid::try_map`] but also passes the cell coordinates.
    pub fn try_map_indexed<U>(
        &self,
        what: &'static str,
        f: impl Fn(usize, usize, &T) -> U,
    ) -> Result<Grid<U>> {
        let cols = self.cols;
        let mut data = reserve(self.rows, cols, what)?;
        data.extend(
            self.data
                .iter()
                .enumerate()
                .map(|(idx, v)| f(idx / cols, idx % cols, v)),
        );
        Ok(Grid {
            rows: self.rows,
            cols,
            data,
        })
    }

    /// Combine two grids cell by cell. Shapes must match.
    pub fn zip_map<U, V>(
        &self,
        other: &Grid<U>,
        what: &'static str,
        f: impl Fn(&T, &U) -> V,
    ) -> Result<Grid<V>> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(OceanError::invalid(
                "grid",
                format!(
                    "shape mismatch: {}x{} vs {}x{}",
                    self.rows, self.cols, other.rows, other.cols
                ),
            ));
        }

        let mut data = reserve(self.rows, self.cols, what)?;
        data.extend(self.data.iter().zip(other.data.iter()).map(|(a, b)| f(a, b)));
        Ok(Grid {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T> Index<(usize, usize)> for Grid<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        debug_assert!(row < self.rows && col < self.cols);
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Grid<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        debug_assert!(row < self.rows && col < self.cols);
        &mut self.data[row * self.cols + col]
    }
}
