use crate::errors::StreamSearchError;

/// Search distance, in map units, used to size the window when none is given.
pub const THRESHOLD_DISTANCE: f64 = 100.0;

pub fn validate_window_size(window_size: isize) -> Result<(), StreamSearchError> {
    if window_size < 3 || window_size % 2 == 0 {
        return Err(StreamSearchError::InvalidWindowSize(window_size));
    }
    Ok(())
}

pub fn validate_threshold(threshold: f64) -> Result<(), StreamSearchError> {
    if !threshold.is_finite() || threshold <= 0.0 {
        return Err(StreamSearchError::InvalidThreshold(threshold));
    }
    Ok(())
}

/// Window size covering `THRESHOLD_DISTANCE` at the mean cell resolution,
/// rounded up to an odd number. Coarse rasters can yield a size below 3, which
/// `validate_window_size` rejects.
pub fn infer_window_size(resolution_x: f64, resolution_y: f64) -> isize {
    let cell_res = (resolution_x + resolution_y) / 2.0;
    let mut window_size = (THRESHOLD_DISTANCE / cell_res) as isize;
    if window_size % 2 == 0 {
        window_size += 1;
    }
    window_size
}

/// Log-difference threshold derived from the accumulation range: one order of
/// magnitude less than the full range. Non-positive minima are taken as 1.
pub fn infer_threshold(minimum: f64, maximum: f64) -> f64 {
    let minimum = if minimum <= 0.0 { 1.0 } else { minimum };
    (maximum.log10() - minimum.log10()) - 1.0
}
