/*
Raster input for the WhiteboxTools workspace.
*/

mod arcascii_raster;

use std::io::{Error, ErrorKind};
use std::ops::Index;
use std::path::Path;
use whitebox_common::structures::{Array2D, RowReader};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterType {
    ArcAscii,
}

impl RasterType {
    pub fn from_file_name(file_name: &str) -> Option<RasterType> {
        let extension = Path::new(file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "asc" | "txt" | "grd" => Some(RasterType::ArcAscii),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct RasterConfigs {
    pub rows: usize,
    pub columns: usize,
    pub nodata: f64,
    pub north: f64,
    pub west: f64,
    pub resolution_x: f64,
    pub resolution_y: f64,
    pub minimum: f64,
    pub maximum: f64,
}

impl Default for RasterConfigs {
    fn default() -> RasterConfigs {
        RasterConfigs {
            rows: 0,
            columns: 0,
            nodata: -32768.0,
            north: f64::NEG_INFINITY,
            west: f64::INFINITY,
            resolution_x: f64::NEG_INFINITY,
            resolution_y: f64::NEG_INFINITY,
            minimum: f64::INFINITY,
            maximum: f64::NEG_INFINITY,
        }
    }
}

/// A single-band, north-up raster held in memory.
pub struct Raster {
    pub file_name: String,
    pub raster_type: RasterType,
    pub configs: RasterConfigs,
    data: Array2D<f64>,
}

impl Raster {
    /// Opens `file_name`. Only read mode (`"r"`) is supported.
    pub fn new<'a>(file_name: &'a str, file_mode: &'a str) -> Result<Raster, Error> {
        if !file_mode.to_lowercase().contains('r') {
            return Err(Error::new(
                ErrorKind::Unsupported,
                format!("Unsupported raster file mode '{}'.", file_mode),
            ));
        }
        let raster_type = RasterType::from_file_name(file_name).ok_or_else(|| {
            Error::new(
                ErrorKind::Unsupported,
                format!("Unrecognized raster file type: {}", file_name),
            )
        })?;
        let (configs, data) = match raster_type {
            RasterType::ArcAscii => arcascii_raster::read_arcascii(file_name)?,
        };
        let mut raster = Raster {
            file_name: file_name.to_string(),
            raster_type,
            configs,
            data,
        };
        raster.update_min_max();
        Ok(raster)
    }

    pub fn get_value(&self, row: isize, column: isize) -> f64 {
        self.data.get_value(row, column)
    }

    fn update_min_max(&mut self) {
        let nodata = self.configs.nodata;
        self.configs.minimum = f64::INFINITY;
        self.configs.maximum = f64::NEG_INFINITY;
        for &value in self.data.iter() {
            if value != nodata && !value.is_nan() {
                self.configs.minimum = self.configs.minimum.min(value);
                self.configs.maximum = self.configs.maximum.max(value);
            }
        }
    }

    /// Row containing map coordinate `y`. May fall outside of `0..rows`.
    pub fn get_row_from_y(&self, y: f64) -> isize {
        ((self.configs.north - y) / self.configs.resolution_y).floor() as isize
    }

    /// Column containing map coordinate `x`. May fall outside of `0..columns`.
    pub fn get_column_from_x(&self, x: f64) -> isize {
        ((x - self.configs.west) / self.configs.resolution_x).floor() as isize
    }

    /// X coordinate of the centre of cells in `column`.
    pub fn get_x_from_column(&self, column: isize) -> f64 {
        self.configs.west + self.configs.resolution_x / 2f64
            + column as f64 * self.configs.resolution_x
    }

    /// Y coordinate of the centre of cells in `row`.
    pub fn get_y_from_row(&self, row: isize) -> f64 {
        self.configs.north
            - self.configs.resolution_y / 2f64
            - row as f64 * self.configs.resolution_y
    }

    pub fn is_in_bounds(&self, row: isize, column: isize) -> bool {
        row >= 0
            && column >= 0
            && row < self.configs.rows as isize
            && column < self.configs.columns as isize
    }
}

impl Index<(isize, isize)> for Raster {
    type Output = f64;

    fn index(&self, index: (isize, isize)) -> &f64 {
        &self.data[index]
    }
}

impl RowReader for Raster {
    fn rows(&self) -> isize {
        self.configs.rows as isize
    }

    fn columns(&self) -> isize {
        self.configs.columns as isize
    }

    fn nodata(&self) -> f64 {
        self.configs.nodata
    }

    fn read_row(&self, row: isize) -> Result<Vec<f64>, Error> {
        self.data.get_row_data(row).ok_or_else(|| {
            Error::new(
                ErrorKind::InvalidInput,
                format!("Unable to read raster row {} of {}", row, self.file_name),
            )
        })
    }
}
