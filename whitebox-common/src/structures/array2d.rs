use super::RowReader;
use std::io::{Error, ErrorKind};
use std::ops::Index;

/// A dense, row-major two-dimensional grid. Reads outside of the grid return `nodata`.
#[derive(Clone, Debug)]
pub struct Array2D<T: Copy> {
    pub columns: isize,
    pub rows: isize,
    data: Vec<T>,
    pub nodata: T,
}

fn cell_count(rows: isize, columns: isize) -> Result<usize, Error> {
    rows.checked_mul(columns).map(|n| n as usize).ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("A {} x {} grid is too large.", rows, columns),
        )
    })
}

impl<T: Copy> Array2D<T> {
    pub fn new(rows: isize, columns: isize, initial_value: T, nodata: T) -> Result<Array2D<T>, Error> {
        if rows < 0 || columns < 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Only non-negative rows and columns values accepted.",
            ));
        }
        let num_cells = cell_count(rows, columns)?;
        Ok(Array2D {
            columns,
            rows,
            data: vec![initial_value; num_cells],
            nodata,
        })
    }

    /// Wraps existing row-major cell values.
    pub fn from_data(rows: isize, columns: isize, data: Vec<T>, nodata: T) -> Result<Array2D<T>, Error> {
        if rows < 0 || columns < 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Only non-negative rows and columns values accepted.",
            ));
        }
        let num_cells = cell_count(rows, columns)?;
        if data.len() != num_cells {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "Expected {} values for a {} x {} grid, found {}.",
                    num_cells,
                    rows,
                    columns,
                    data.len()
                ),
            ));
        }
        Ok(Array2D {
            columns,
            rows,
            data,
            nodata,
        })
    }

    #[inline]
    fn in_bounds(&self, row: isize, column: isize) -> bool {
        row >= 0 && column >= 0 && row < self.rows && column < self.columns
    }

    pub fn get_value(&self, row: isize, column: isize) -> T {
        if self.in_bounds(row, column) {
            self.data[(row * self.columns + column) as usize]
        } else {
            self.nodata
        }
    }

    pub fn set_value(&mut self, row: isize, column: isize, value: T) {
        if self.in_bounds(row, column) {
            self.data[(row * self.columns + column) as usize] = value;
        }
    }

    /// Returns a copy of one row, or `None` when `row` is outside the grid.
    pub fn get_row_data(&self, row: isize) -> Option<Vec<T>> {
        if row < 0 || row >= self.rows {
            return None;
        }
        let start = (row * self.columns) as usize;
        Some(self.data[start..start + self.columns as usize].to_vec())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }
}

impl<T: Copy> Index<(isize, isize)> for Array2D<T> {
    type Output = T;

    fn index(&self, index: (isize, isize)) -> &T {
        let (row, column) = index;
        if self.in_bounds(row, column) {
            &self.data[(row * self.columns + column) as usize]
        } else {
            &self.nodata
        }
    }
}

impl RowReader for Array2D<f64> {
    fn rows(&self) -> isize {
        self.rows
    }

    fn columns(&self) -> isize {
        self.columns
    }

    fn nodata(&self) -> f64 {
        self.nodata
    }

    fn read_row(&self, row: isize) -> Result<Vec<f64>, Error> {
        self.get_row_data(row).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("Row {} is outside of the grid (0..{}).", row, self.rows),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_reads_nodata() {
        let mut grid: Array2D<f64> = Array2D::new(2, 3, 1.0, -32768.0).unwrap();
        grid.set_value(1, 2, 5.0);
        grid.set_value(7, 7, 9.0);
        assert_eq!(grid.get_value(1, 2), 5.0);
        assert_eq!(grid[(1, 2)], 5.0);
        assert_eq!(grid.get_value(-1, 0), -32768.0);
        assert_eq!(grid[(2, 0)], -32768.0);
    }

    #[test]
    fn test_from_data_length_mismatch() {
        let err = Array2D::from_data(2, 2, vec![1.0f64; 3], 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_oversized_grid_rejected() {
        let err = Array2D::new(isize::MAX, 2, 0u8, 0u8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        let err = Array2D::<f64>::from_data(isize::MAX, 3, vec![], 0.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_read_row() {
        let grid = Array2D::from_data(2, 2, vec![1.0, 2.0, 3.0, 4.0], -1.0).unwrap();
        assert_eq!(grid.read_row(1).unwrap(), vec![3.0, 4.0]);
        assert_eq!(
            grid.read_row(2).unwrap_err().kind(),
            ErrorKind::InvalidInput
        );
    }
}
