use crate::structures::GridCell;

/// Returns the cell in `points` closest to `(col, row)`, or `None` when `points` is empty.
///
/// Points are scanned in order and a later point only replaces the current
/// nearest one when it is strictly closer, so the first of several equidistant
/// points is returned.
pub fn find_nearest_point(points: &[GridCell], col: isize, row: isize) -> Option<GridCell> {
    let mut nearest: Option<GridCell> = None;
    let mut min_distance = f64::INFINITY;
    for point in points {
        let distance = point.distance_to(col, row);
        if distance < min_distance {
            min_distance = distance;
            nearest = Some(*point);
        }
    }
    nearest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_candidates() {
        assert_eq!(find_nearest_point(&[], 10, 10), None);
    }

    #[test]
    fn test_single_candidate_regardless_of_distance() {
        let points = [GridCell::new(500, -300)];
        assert_eq!(find_nearest_point(&points, 10, 10), Some(GridCell::new(500, -300)));
    }

    #[test]
    fn test_tie_keeps_first_encountered() {
        // (9, 10) and (11, 10) are both one cell away from (10, 10).
        let points = [
            GridCell::new(14, 8),
            GridCell::new(9, 10),
            GridCell::new(11, 10),
        ];
        assert_eq!(find_nearest_point(&points, 10, 10), Some(GridCell::new(9, 10)));
    }

    #[test]
    fn test_strictly_closer_later_point_wins() {
        let points = [
            GridCell::new(12, 12),
            GridCell::new(10, 13),
            GridCell::new(11, 11),
        ];
        assert_eq!(find_nearest_point(&points, 10, 10), Some(GridCell::new(11, 11)));
    }
}
