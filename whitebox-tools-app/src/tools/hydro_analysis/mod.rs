// private sub-module defined in other files
mod find_nearest_stream_pixel;

// exports identifiers from private sub-modules in the current module namespace
pub use self::find_nearest_stream_pixel::FindNearestStreamPixel;
