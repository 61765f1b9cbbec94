use super::{validate_threshold, validate_window_size};
use crate::errors::StreamSearchError;
use crate::structures::{CandidateSet, RowReader};

/// Finds the stream pixels within a square window centred on `(center_row, center_col)`.
///
/// A cell is a stream pixel when `log10(value) - log10(center value) > threshold`.
/// The window is clipped to the raster without error. Rows are scanned in
/// ascending order, columns ascending within each row, and each row of the
/// clipped window is read from `reader` exactly once.
///
/// The center cell must hold a positive value, otherwise the search fails. A
/// neighbouring cell that is NoData, zero, negative or non-finite is simply not
/// a stream pixel. An empty `CandidateSet` means nothing in the window
/// qualified.
pub fn find_stream_pixels_in_window<R: RowReader + ?Sized>(
    reader: &R,
    center_row: isize,
    center_col: isize,
    window_size: isize,
    threshold: f64,
) -> Result<CandidateSet, StreamSearchError> {
    validate_window_size(window_size)?;
    validate_threshold(threshold)?;

    let rows_less_one = reader.rows() - 1;
    let columns_less_one = reader.columns() - 1;
    if center_row < 0
        || center_row > rows_less_one
        || center_col < 0
        || center_col > columns_less_one
    {
        return Err(StreamSearchError::CenterOutOfBounds {
            row: center_row,
            col: center_col,
        });
    }
    let nodata = reader.nodata();

    let center_row_data = read_row(reader, center_row)?;
    let center_value = center_row_data[center_col as usize];
    if center_value == nodata {
        return Err(StreamSearchError::NoDataCenterValue {
            row: center_row,
            col: center_col,
        });
    }
    if !(center_value.is_finite() && center_value > 0f64) {
        return Err(StreamSearchError::NonPositiveCenterValue {
            row: center_row,
            col: center_col,
            value: center_value,
        });
    }
    let log_center_value = center_value.log10();

    let offset = (window_size - 1) / 2;
    let min_row = (center_row - offset).max(0);
    let max_row = (center_row + offset).min(rows_less_one);
    let min_col = (center_col - offset).max(0);
    let max_col = (center_col + offset).min(columns_less_one);

    let mut stream_pixels = CandidateSet::new();
    let mut row_data: Vec<f64>;
    for row in min_row..=max_row {
        let values = if row == center_row {
            &center_row_data
        } else {
            row_data = read_row(reader, row)?;
            &row_data
        };
        for col in min_col..=max_col {
            let value = values[col as usize];
            if value == nodata || !(value.is_finite() && value > 0f64) {
                continue;
            }
            if value.log10() - log_center_value > threshold {
                stream_pixels.push(col, row);
            }
        }
    }

    Ok(stream_pixels)
}

fn read_row<R: RowReader + ?Sized>(reader: &R, row: isize) -> Result<Vec<f64>, StreamSearchError> {
    let data = reader
        .read_row(row)
        .map_err(|source| StreamSearchError::RowRead { row, source })?;
    if data.len() as isize != reader.columns() {
        return Err(StreamSearchError::RowRead {
            row,
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "expected {} values, found {}",
                    reader.columns(),
                    data.len()
                ),
            ),
        });
    }
    Ok(data)
}
