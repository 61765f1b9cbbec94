mod array2d;
mod candidate_set;
mod grid_cell;
mod row_reader;

pub use self::array2d::Array2D;
pub use self::candidate_set::CandidateSet;
pub use self::grid_cell::GridCell;
pub use self::row_reader::RowReader;
