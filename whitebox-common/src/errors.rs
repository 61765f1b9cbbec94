use std::fmt;
use std::io::{Error, ErrorKind};

/// Failures of a stream pixel search. An empty search result is not an error.
#[derive(Debug)]
pub enum StreamSearchError {
    /// The window size is even or smaller than 3.
    InvalidWindowSize(isize),
    /// The log-difference threshold is not a positive finite number.
    InvalidThreshold(f64),
    /// The query cell lies outside of the raster.
    CenterOutOfBounds { row: isize, col: isize },
    /// The query cell holds the raster's NoData value.
    NoDataCenterValue { row: isize, col: isize },
    /// The query cell's value has no finite logarithm.
    NonPositiveCenterValue { row: isize, col: isize, value: f64 },
    /// The row source could not deliver a row.
    RowRead { row: isize, source: Error },
}

impl fmt::Display for StreamSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamSearchError::InvalidWindowSize(size) => write!(
                f,
                "Invalid window size {}. Window size must be an odd integer >= 3.",
                size
            ),
            StreamSearchError::InvalidThreshold(threshold) => write!(
                f,
                "Invalid threshold {}. Threshold must be a positive number.",
                threshold
            ),
            StreamSearchError::CenterOutOfBounds { row, col } => write!(
                f,
                "The query cell (row {}, column {}) lies outside of the raster.",
                row, col
            ),
            StreamSearchError::NoDataCenterValue { row, col } => write!(
                f,
                "The query cell (row {}, column {}) contains NoData.",
                row, col
            ),
            StreamSearchError::NonPositiveCenterValue { row, col, value } => write!(
                f,
                "The accumulation value ({}) at the query cell (row {}, column {}) is not a positive number; its logarithm is undefined.",
                value, row, col
            ),
            StreamSearchError::RowRead { row, source } => {
                write!(f, "Unable to read raster row {}: {}", row, source)
            }
        }
    }
}

impl std::error::Error for StreamSearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StreamSearchError::RowRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StreamSearchError> for Error {
    fn from(error: StreamSearchError) -> Self {
        let kind = match &error {
            StreamSearchError::RowRead { source, .. } => source.kind(),
            _ => ErrorKind::InvalidInput,
        };
        Error::new(kind, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_read_keeps_io_kind() {
        let err = StreamSearchError::RowRead {
            row: 4,
            source: Error::new(ErrorKind::UnexpectedEof, "truncated"),
        };
        assert!(std::error::Error::source(&err).is_some());
        let io_err: Error = err.into();
        assert_eq!(io_err.kind(), ErrorKind::UnexpectedEof);
        assert!(io_err.to_string().contains("row 4"));
    }

    #[test]
    fn test_center_errors_are_invalid_input() {
        let io_err: Error = StreamSearchError::NonPositiveCenterValue {
            row: 1,
            col: 2,
            value: 0.0,
        }
        .into();
        assert_eq!(io_err.kind(), ErrorKind::InvalidInput);
    }
}
