/// A cell position in a raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub col: isize,
    pub row: isize,
}

impl GridCell {
    pub fn new(col: isize, row: isize) -> GridCell {
        GridCell { col, row }
    }

    /// Euclidean distance, in cells, to `(col, row)`.
    pub fn distance_to(&self, col: isize, row: isize) -> f64 {
        ((self.col - col) as f64).hypot((self.row - row) as f64)
    }
}
