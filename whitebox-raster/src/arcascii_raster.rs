use super::RasterConfigs;
use std::fs::File;
use std::io::{BufRead, BufReader, Error, ErrorKind};
use whitebox_common::structures::Array2D;

fn invalid_data(file_name: &str, msg: String) -> Error {
    Error::new(
        ErrorKind::InvalidData,
        format!("Error reading ArcAscii file {}: {}", file_name, msg),
    )
}

fn parse_f64(file_name: &str, key: &str, value: &str) -> Result<f64, Error> {
    value
        .parse::<f64>()
        .map_err(|_| invalid_data(file_name, format!("invalid {} value '{}'", key, value)))
}

/// Reads an Esri ASCII grid into its configs and row-major cell values.
pub fn read_arcascii(file_name: &str) -> Result<(RasterConfigs, Array2D<f64>), Error> {
    let f = File::open(file_name)?;
    let reader = BufReader::new(f);

    let mut configs = RasterConfigs::default();
    let mut xllcenter = f64::NEG_INFINITY;
    let mut yllcenter = f64::NEG_INFINITY;
    let mut xllcorner = f64::NEG_INFINITY;
    let mut yllcorner = f64::NEG_INFINITY;
    let mut data: Vec<f64> = vec![];
    let mut in_header = true;

    for line in reader.lines() {
        let line = line?;
        let vec: Vec<&str> = line.split_whitespace().collect();
        if vec.is_empty() {
            continue;
        }
        if in_header && vec[0].parse::<f64>().is_err() {
            if vec.len() < 2 {
                return Err(invalid_data(file_name, format!("malformed header line '{}'", line)));
            }
            let key = vec[0].to_lowercase();
            let value = vec[1];
            match key.as_str() {
                "ncols" => configs.columns = parse_f64(file_name, &key, value)? as usize,
                "nrows" => configs.rows = parse_f64(file_name, &key, value)? as usize,
                "xllcorner" => xllcorner = parse_f64(file_name, &key, value)?,
                "yllcorner" => yllcorner = parse_f64(file_name, &key, value)?,
                "xllcenter" => xllcenter = parse_f64(file_name, &key, value)?,
                "yllcenter" => yllcenter = parse_f64(file_name, &key, value)?,
                "cellsize" => {
                    configs.resolution_x = parse_f64(file_name, &key, value)?;
                    configs.resolution_y = configs.resolution_x;
                }
                "dx" => configs.resolution_x = parse_f64(file_name, &key, value)?,
                "dy" => configs.resolution_y = parse_f64(file_name, &key, value)?,
                "nodata_value" => configs.nodata = parse_f64(file_name, &key, value)?,
                _ => {
                    return Err(invalid_data(file_name, format!("unrecognized header key '{}'", vec[0])));
                }
            }
            continue;
        }
        in_header = false;
        for token in vec {
            data.push(parse_f64(file_name, "cell", token)?);
        }
    }

    if configs.rows == 0 || configs.columns == 0 {
        return Err(invalid_data(file_name, "missing ncols or nrows".to_string()));
    }
    if !(configs.resolution_x > 0f64 && configs.resolution_y > 0f64) {
        return Err(invalid_data(file_name, "missing or non-positive cell size".to_string()));
    }
    configs.west = if xllcorner.is_finite() {
        xllcorner
    } else if xllcenter.is_finite() {
        xllcenter - configs.resolution_x / 2f64
    } else {
        return Err(invalid_data(file_name, "missing xllcorner or xllcenter".to_string()));
    };
    let south = if yllcorner.is_finite() {
        yllcorner
    } else if yllcenter.is_finite() {
        yllcenter - configs.resolution_y / 2f64
    } else {
        return Err(invalid_data(file_name, "missing yllcorner or yllcenter".to_string()));
    };
    configs.north = south + configs.rows as f64 * configs.resolution_y;

    let expected = configs.rows.checked_mul(configs.columns).ok_or_else(|| {
        invalid_data(
            file_name,
            format!("grid dimensions {} x {} are too large", configs.rows, configs.columns),
        )
    })?;
    if data.len() != expected {
        return Err(invalid_data(
            file_name,
            format!("expected {} cell values, found {}", expected, data.len()),
        ));
    }
    let grid = Array2D::from_data(
        configs.rows as isize,
        configs.columns as isize,
        data,
        configs.nodata,
    )?;
    Ok((configs, grid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_test_file(name: &str, contents: &str) -> String {
        let dir = std::env::temp_dir().join(format!("whitebox_arcascii_tests_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join(name);
        fs::write(&file, contents).unwrap();
        file.to_string_lossy().to_string()
    }

    #[test]
    fn test_cell_centre_header() {
        let file = write_test_file(
            "centre.asc",
            "NCOLS 2\nNROWS 2\nXLLCENTER 5\nYLLCENTER 5\nDX 10\nDY 10\n1 2\n3 4\n",
        );
        let (configs, grid) = read_arcascii(&file).unwrap();
        assert_eq!(configs.west, 0.0);
        assert_eq!(configs.north, 20.0);
        assert_eq!(configs.nodata, -32768.0);
        assert_eq!(grid.get_value(1, 0), 3.0);
    }

    #[test]
    fn test_truncated_data() {
        let file = write_test_file(
            "short.asc",
            "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\n1 2\n3\n",
        );
        let err = read_arcascii(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
    }

    #[test]
    fn test_oversized_dimensions() {
        let file = write_test_file(
            "huge.asc",
            "ncols 4294967296\nnrows 4294967296\nxllcorner 0\nyllcorner 0\ncellsize 1\n1 2\n",
        );
        let err = read_arcascii(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidData);
        assert!(err.to_string().contains("too large"));
    }

    #[test]
    fn test_missing_origin() {
        let file = write_test_file("origin.asc", "ncols 1\nnrows 1\ncellsize 1\n7\n");
        let err = read_arcascii(&file).unwrap_err();
        assert!(err.to_string().contains("xllcorner"));
    }
}
