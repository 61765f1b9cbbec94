mod find_nearest_point;
mod find_stream_pixels;
mod stream_search_parameters;

pub use self::find_nearest_point::find_nearest_point;
pub use self::find_stream_pixels::find_stream_pixels_in_window;
pub use self::stream_search_parameters::{
    infer_threshold, infer_window_size, validate_threshold, validate_window_size,
    THRESHOLD_DISTANCE,
};
