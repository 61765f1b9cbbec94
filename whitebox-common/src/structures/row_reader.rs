use std::io::Error;

/// A source of raster rows. Reading a row is assumed to be the expensive operation.
pub trait RowReader {
    fn rows(&self) -> isize;

    fn columns(&self) -> isize;

    /// The value marking cells without data. Sources without one return NaN.
    fn nodata(&self) -> f64 {
        f64::NAN
    }

    /// Returns the `columns()` cell values of `row`, or an error when the row
    /// is out of bounds or cannot be read.
    fn read_row(&self, row: isize) -> Result<Vec<f64>, Error>;
}
