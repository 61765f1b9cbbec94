use super::GridCell;
use crate::algorithms::find_nearest_point;

/// Stream pixels found by one window scan, in discovery order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CandidateSet {
    cells: Vec<GridCell>,
}

impl CandidateSet {
    pub fn new() -> CandidateSet {
        CandidateSet { cells: vec![] }
    }

    pub fn push(&mut self, col: isize, row: isize) {
        self.cells.push(GridCell::new(col, row));
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridCell> {
        self.cells.iter()
    }

    pub fn as_slice(&self) -> &[GridCell] {
        &self.cells
    }

    /// The candidate closest to `(col, row)`; the earliest one wins ties.
    pub fn nearest_to(&self, col: isize, row: isize) -> Option<GridCell> {
        find_nearest_point(&self.cells, col, row)
    }

    /// One `col<sep>row` line per candidate.
    pub fn to_string_with_separator(&self, sep: &str) -> String {
        let mut s = String::new();
        for cell in &self.cells {
            s.push_str(&format!("{}{}{}\n", cell.col, sep, cell.row));
        }
        s
    }
}
