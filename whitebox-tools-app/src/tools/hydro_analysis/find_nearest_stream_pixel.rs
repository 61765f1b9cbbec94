/*
This tool is part of the WhiteboxTools geospatial analysis library.
Authors: WhiteboxTools contributors
Created: 18/10/2026
License: MIT
*/

use crate::tools::*;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value as GeoValue};
use serde_json::{json, Map as JsonMap, Value as JsonValue};
use std::env;
use std::fs::File;
use std::io::{Error, ErrorKind, Write};
use std::path;
use std::time::Instant;
use whitebox_common::algorithms::{
    find_stream_pixels_in_window, infer_threshold, infer_window_size, validate_threshold,
    validate_window_size,
};
use whitebox_common::utils::get_formatted_elapsed_time;
use whitebox_raster::*;

/// This tool finds the stream pixel nearest to an input coordinate, e.g. to snap a
/// gauge location onto the channel network before delineating its watershed.
/// Streams are identified locally from an upstream accumulation area raster
/// (`--flow_accum`): within a square window of `--window` cells centred on the
/// input coordinate, a cell is a stream pixel when the base-10 logarithm of its
/// accumulation exceeds that of the centre cell by more than `--threshold`.
///
/// When `--window` is not specified, the window is sized to span roughly 100 map
/// units at the raster's resolution. When `--threshold` is not specified, it is one
/// less than the log-range of the raster's values. The centre cell must contain a
/// positive accumulation value.
///
/// The tool prints the easting and northing of the centre of the nearest stream
/// pixel, separated by `--sep` (a single space by default). Nothing is printed
/// when no stream pixel lies within the window. Optionally, the location is also
/// written to a GeoJSON point file (`--output`). Verbose messages are also
/// printed to standard output; run without `-v` when the coordinate line is to
/// be captured by another program.
pub struct FindNearestStreamPixel {
    name: String,
    description: String,
    toolbox: String,
    parameters: Vec<ToolParameter>,
    example_usage: String,
}

impl FindNearestStreamPixel {
    pub fn new() -> FindNearestStreamPixel {
        let name = "FindNearestStreamPixel".to_string();
        let toolbox = "Hydrological Analysis".to_string();
        let description =
            "Finds the stream pixel nearest an input coordinate using an upstream accumulation area raster."
                .to_string();

        let mut parameters = vec![];
        parameters.push(ToolParameter {
            name: "Input Flow Accumulation File".to_owned(),
            flags: vec!["-i".to_owned(), "--flow_accum".to_owned()],
            description: "Input upstream accumulation area raster file.".to_owned(),
            parameter_type: ParameterType::ExistingFile(ParameterFileType::Raster),
            default_value: None,
            optional: false,
        });

        parameters.push(ToolParameter {
            name: "Easting".to_owned(),
            flags: vec!["-x".to_owned(), "--easting".to_owned()],
            description: "Map x (east) coordinate of the query point.".to_owned(),
            parameter_type: ParameterType::Float,
            default_value: None,
            optional: false,
        });

        parameters.push(ToolParameter {
            name: "Northing".to_owned(),
            flags: vec!["-y".to_owned(), "--northing".to_owned()],
            description: "Map y (north) coordinate of the query point.".to_owned(),
            parameter_type: ParameterType::Float,
            default_value: None,
            optional: false,
        });

        parameters.push(ToolParameter {
            name: "Search Window Size".to_owned(),
            flags: vec!["--window".to_owned()],
            description: "Size of the search window, in cells. Must be an odd integer >= 3. Inferred from the raster resolution if not specified.".to_owned(),
            parameter_type: ParameterType::Integer,
            default_value: None,
            optional: true,
        });

        parameters.push(ToolParameter {
            name: "Log-Difference Threshold".to_owned(),
            flags: vec!["--threshold".to_owned()],
            description: "Threshold separating the log(accumulation) values of stream and non-stream pixels. Inferred from the raster's value range if not specified.".to_owned(),
            parameter_type: ParameterType::Float,
            default_value: None,
            optional: true,
        });

        parameters.push(ToolParameter {
            name: "Coordinate Separator".to_owned(),
            flags: vec!["--sep".to_owned()],
            description: "Character printed between the output easting and northing; 'space', 'comma', 'tab' and 'pipe' are also accepted.".to_owned(),
            parameter_type: ParameterType::String,
            default_value: Some(" ".to_owned()),
            optional: true,
        });

        parameters.push(ToolParameter {
            name: "Output Stream Point GeoJSON File".to_owned(),
            flags: vec!["-o".to_owned(), "--output".to_owned()],
            description: "Optional output GeoJSON file containing the nearest stream pixel.".to_owned(),
            parameter_type: ParameterType::NewFile(ParameterFileType::Vector(
                VectorGeometryType::Point,
            )),
            default_value: None,
            optional: true,
        });

        let sep: String = path::MAIN_SEPARATOR.to_string();
        let exe = env::current_exe().unwrap_or_default();
        let e = format!("{}", exe.display());
        let mut parent = exe;
        parent.pop();
        let p = format!("{}", parent.display());
        let mut short_exe = e
            .replace(&p, "")
            .replace(".exe", "")
            .replace(".", "")
            .replace(&sep, "");
        if e.contains(".exe") {
            short_exe += ".exe";
        }
        let usage = format!(
            ">>.*{0} -r={1} -v --wd=\"*path*to*data*\" --flow_accum='accum.asc' --easting=412350.0 --northing=4321070.0
>>.*{0} -r={1} -v --wd=\"*path*to*data*\" --flow_accum='accum.asc' --easting=412350.0 --northing=4321070.0 --window=11 --threshold=2 --sep=comma --output='stream_point.geojson'",
            short_exe, name
        )
        .replace("*", &sep);

        FindNearestStreamPixel {
            name,
            description,
            toolbox,
            parameters,
            example_usage: usage,
        }
    }
}

fn parse_separator(value: &str) -> Result<String, Error> {
    let sep = match value.to_lowercase().as_str() {
        "space" => " ".to_string(),
        "comma" => ",".to_string(),
        "tab" => "\t".to_string(),
        "pipe" => "|".to_string(),
        _ => value.to_string(),
    };
    if sep.chars().count() != 1 {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            format!(
                "Invalid coordinate separator '{}'. The separator must be 1 character in length.",
                value
            ),
        ));
    }
    Ok(sep)
}

/// The result line: easting and northing with six decimals.
fn format_location(x: f64, y: f64, sep: &str) -> String {
    format!("{:.6}{}{:.6}", x, sep, y)
}

fn parse_number<T: std::str::FromStr>(value: &str, what: &str) -> Result<T, Error> {
    value.trim().parse::<T>().map_err(|_| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("Illegal {} <{}>.", what, value),
        )
    })
}

impl WhiteboxTool for FindNearestStreamPixel {
    fn get_source_file(&self) -> String {
        String::from(file!())
    }

    fn get_tool_name(&self) -> String {
        self.name.clone()
    }

    fn get_tool_description(&self) -> String {
        self.description.clone()
    }

    fn get_tool_parameters(&self) -> String {
        match serde_json::to_string(&self.parameters) {
            Ok(json_str) => format!("{{\"parameters\":{}}}", json_str),
            Err(err) => format!("{:?}", err),
        }
    }

    fn get_example_usage(&self) -> String {
        self.example_usage.clone()
    }

    fn get_toolbox(&self) -> String {
        self.toolbox.clone()
    }

    fn run<'a>(
        &self,
        args: Vec<String>,
        working_directory: &'a str,
        verbose: bool,
    ) -> Result<(), Error> {
        let mut accum_file = String::new();
        let mut output_file = String::new();
        let mut easting: Option<f64> = None;
        let mut northing: Option<f64> = None;
        let mut window_size: Option<isize> = None;
        let mut threshold: Option<f64> = None;
        let mut coord_sep = " ".to_string();

        if args.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Tool run with no parameters.",
            ));
        }
        for i in 0..args.len() {
            let mut arg = args[i].replace('\"', "");
            arg = arg.replace("\'", "");
            let cmd = arg.split('=');
            let vec = cmd.collect::<Vec<&str>>();
            let keyval = vec.len() > 1;
            let flag = vec[0].to_lowercase().replace("--", "-");
            let value = if keyval {
                vec[1..].join("=")
            } else {
                args.get(i + 1).cloned().unwrap_or_default()
            };
            if flag == "-i" || flag == "-flow_accum" || flag == "-input" {
                accum_file = value;
            } else if flag == "-x" || flag == "-easting" {
                easting = Some(parse_number(&value, "east coordinate")?);
            } else if flag == "-y" || flag == "-northing" {
                northing = Some(parse_number(&value, "north coordinate")?);
            } else if flag == "-window" {
                window_size = Some(parse_number(&value, "window size")?);
            } else if flag == "-threshold" {
                threshold = Some(parse_number(&value, "threshold")?);
            } else if flag == "-sep" || flag == "-separator" {
                coord_sep = parse_separator(&value)?;
            } else if flag == "-o" || flag == "-output" {
                output_file = value;
            }
        }

        if accum_file.is_empty() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "Input flow accumulation raster (--flow_accum) not specified.",
            ));
        }
        let easting = easting.ok_or_else(|| {
            Error::new(ErrorKind::InvalidInput, "Easting (--easting) not specified.")
        })?;
        let northing = northing.ok_or_else(|| {
            Error::new(ErrorKind::InvalidInput, "Northing (--northing) not specified.")
        })?;

        if verbose {
            let tool_name = self.get_tool_name();
            let welcome_len = format!("* Welcome to {} *", tool_name).len().max(28);
            println!("{}", "*".repeat(welcome_len));
            println!(
                "* Welcome to {} {}*",
                tool_name,
                " ".repeat(welcome_len - 15 - tool_name.len())
            );
            println!(
                "* Powered by WhiteboxTools {}*",
                " ".repeat(welcome_len - 28)
            );
            println!("* www.whiteboxgeo.com {}*", " ".repeat(welcome_len - 23));
            println!("{}", "*".repeat(welcome_len));
        }

        let sep: String = path::MAIN_SEPARATOR.to_string();
        if !accum_file.contains(&sep) && !accum_file.contains('/') {
            accum_file = format!("{}{}", working_directory, accum_file);
        }
        if !output_file.is_empty() && !output_file.contains(&sep) && !output_file.contains('/') {
            output_file = format!("{}{}", working_directory, output_file);
        }

        if verbose {
            println!("Reading accumulation data...");
        }
        let accum = Raster::new(&accum_file, "r")?;
        let start = Instant::now();

        let window_size = window_size.unwrap_or_else(|| {
            infer_window_size(accum.configs.resolution_x, accum.configs.resolution_y)
        });
        validate_window_size(window_size)?;
        if verbose {
            println!("Stream search window size {}", window_size);
        }

        let threshold = match threshold {
            Some(t) => t,
            None => {
                if !(accum.configs.maximum > 0f64) {
                    return Err(Error::new(
                        ErrorKind::InvalidInput,
                        "Unable to infer a threshold; the accumulation raster contains no positive values.",
                    ));
                }
                infer_threshold(accum.configs.minimum, accum.configs.maximum)
            }
        };
        validate_threshold(threshold)?;
        if verbose {
            println!("Stream log-difference threshold {}", threshold);
            println!("Input coordinates, easting {}, northing {}", easting, northing);
        }

        let row = accum.get_row_from_y(northing);
        let col = accum.get_column_from_x(easting);
        if !accum.is_in_bounds(row, col) {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!(
                    "The input coordinate ({}, {}) lies outside of the accumulation raster.",
                    easting, northing
                ),
            ));
        }

        let stream_pixels = find_stream_pixels_in_window(&accum, row, col, window_size, threshold)?;
        if verbose {
            println!("Stream pixels ({}):", stream_pixels.len());
            print!("{}", stream_pixels.to_string_with_separator(" "));
        }

        let nearest = stream_pixels.nearest_to(col, row);
        let nearest_location = nearest.map(|cell| {
            (
                cell,
                accum.get_x_from_column(cell.col),
                accum.get_y_from_row(cell.row),
            )
        });
        match nearest_location {
            Some((_, x, y)) => println!("{}", format_location(x, y, &coord_sep)),
            None => {
                if verbose {
                    println!("No stream pixel found within the search window.");
                }
            }
        }

        if !output_file.is_empty() {
            let mut features = vec![];
            if let Some((cell, x, y)) = nearest_location {
                let mut properties: JsonMap<String, JsonValue> = JsonMap::new();
                properties.insert("Id".to_string(), json!(0));
                properties.insert("row".to_string(), json!(cell.row));
                properties.insert("column".to_string(), json!(cell.col));
                properties.insert("easting".to_string(), json!(x));
                properties.insert("northing".to_string(), json!(y));
                properties.insert("window_size".to_string(), json!(window_size));
                properties.insert("threshold".to_string(), json!(threshold));
                properties.insert("candidate_count".to_string(), json!(stream_pixels.len()));
                features.push(Feature {
                    bbox: None,
                    geometry: Some(Geometry::new(GeoValue::Point(vec![x, y]))),
                    id: None,
                    properties: Some(properties),
                    foreign_members: None,
                });
            }
            let feature_collection = FeatureCollection {
                bbox: None,
                features,
                foreign_members: None,
            };
            if verbose {
                println!("Writing stream point GeoJSON to {}", output_file);
            }
            let geojson = GeoJson::FeatureCollection(feature_collection).to_string();
            let mut file = File::create(&output_file)?;
            file.write_all(geojson.as_bytes())?;
            file.sync_all()?;
        }

        let elapsed_time = get_formatted_elapsed_time(start);
        if verbose {
            println!("Elapsed Time (excluding I/O): {}", elapsed_time);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    /// Writes a `rows` x `columns` ArcAscii grid (origin 0,0) filled with `fill`
    /// except for the given `(row, col, value)` cells, and returns its directory.
    fn write_accum(
        test_name: &str,
        rows: usize,
        columns: usize,
        cellsize: f64,
        fill: f64,
        cells: &[(usize, usize, f64)],
    ) -> PathBuf {
        let dir = env::temp_dir().join(format!(
            "find_nearest_stream_pixel_{}_{}",
            test_name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        let mut s = format!(
            "ncols {}\nnrows {}\nxllcorner 0.0\nyllcorner 0.0\ncellsize {}\nNODATA_value -9999\n",
            columns, rows, cellsize
        );
        for row in 0..rows {
            let line: Vec<String> = (0..columns)
                .map(|col| {
                    let v = cells
                        .iter()
                        .find(|c| c.0 == row && c.1 == col)
                        .map(|c| c.2)
                        .unwrap_or(fill);
                    format!("{}", v)
                })
                .collect();
            s.push_str(&line.join(" "));
            s.push('\n');
        }
        fs::write(dir.join("accum.asc"), s).unwrap();
        dir
    }

    fn working_directory(dir: &PathBuf) -> String {
        format!("{}{}", dir.display(), path::MAIN_SEPARATOR)
    }

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn read_geojson(dir: &PathBuf) -> JsonValue {
        let contents = fs::read_to_string(dir.join("point.geojson")).unwrap();
        serde_json::from_str(&contents).unwrap()
    }

    #[test]
    fn test_finds_nearest_stream_pixel() {
        // 10 m cells on a 200 m grid; query cell (col 10, row 10) is centred at (105, 95).
        let dir = write_accum(
            "nearest",
            20,
            20,
            10.0,
            10.0,
            &[(11, 12, 2000.0), (9, 8, 50.0), (14, 14, 5000.0)],
        );
        let tool = FindNearestStreamPixel::new();
        tool.run(
            args(&[
                "--flow_accum=accum.asc",
                "--easting=104.0",
                "--northing=96.0",
                "--window=5",
                "--threshold=2",
                "-o=point.geojson",
            ]),
            &working_directory(&dir),
            false,
        )
        .unwrap();

        let v = read_geojson(&dir);
        let feature = &v["features"][0];
        assert_eq!(feature["properties"]["row"], 11);
        assert_eq!(feature["properties"]["column"], 12);
        assert_eq!(feature["properties"]["candidate_count"], 1);
        let x = feature["geometry"]["coordinates"][0].as_f64().unwrap();
        let y = feature["geometry"]["coordinates"][1].as_f64().unwrap();
        assert!((x - 125.0).abs() < 1e-10, "Expected 125.0, got {}", x);
        assert!((y - 85.0).abs() < 1e-10, "Expected 85.0, got {}", y);
    }

    #[test]
    fn test_no_stream_pixel_found() {
        let dir = write_accum("none", 9, 9, 10.0, 10.0, &[(4, 5, 500.0)]);
        let tool = FindNearestStreamPixel::new();
        tool.run(
            args(&[
                "-i",
                "accum.asc",
                "-x",
                "45",
                "-y",
                "45",
                "--window",
                "3",
                "--threshold",
                "2",
                "--output",
                "point.geojson",
            ]),
            &working_directory(&dir),
            false,
        )
        .unwrap();
        let v = read_geojson(&dir);
        assert!(v["features"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_inferred_window_and_threshold() {
        // 20 m cells give a 5 cell window; values 10..1e6 give a threshold of 4.
        let dir = write_accum(
            "inferred",
            15,
            15,
            20.0,
            10.0,
            &[(5, 5, 1.0e6), (7, 9, 1.0e6), (7, 10, 1.0e6)],
        );
        let tool = FindNearestStreamPixel::new();
        tool.run(
            args(&[
                "--flow_accum=accum.asc",
                "--easting=150",
                "--northing=150",
                "--sep=comma",
                "--output=point.geojson",
            ]),
            &working_directory(&dir),
            true,
        )
        .unwrap();
        let v = read_geojson(&dir);
        let props = &v["features"][0]["properties"];
        assert_eq!(props["window_size"], 5);
        assert_eq!(props["candidate_count"], 2);
        assert_eq!(props["column"], 9);
        assert_eq!(props["row"], 7);
        let t = props["threshold"].as_f64().unwrap();
        assert!((t - 4.0).abs() < 1e-10, "Expected 4.0, got {}", t);
    }

    #[test]
    fn test_zero_center_value_fails() {
        let dir = write_accum("zero_center", 9, 9, 10.0, 10.0, &[(4, 4, 0.0), (4, 5, 1.0e5)]);
        let tool = FindNearestStreamPixel::new();
        let err = tool
            .run(
                args(&["--flow_accum=accum.asc", "--easting=45", "--northing=45", "--window=3", "--threshold=1"]),
                &working_directory(&dir),
                false,
            )
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().contains("not a positive number"));
    }

    #[test]
    fn test_invalid_arguments() {
        let dir = write_accum("invalid", 9, 9, 10.0, 10.0, &[]);
        let wd = working_directory(&dir);
        let tool = FindNearestStreamPixel::new();
        let cases: Vec<Vec<String>> = vec![
            args(&["--flow_accum=accum.asc", "--easting=45", "--northing=45", "--window=4"]),
            args(&["--flow_accum=accum.asc", "--easting=45", "--northing=45", "--window=1"]),
            args(&["--flow_accum=accum.asc", "--easting=45", "--northing=45", "--threshold=0"]),
            args(&["--flow_accum=accum.asc", "--easting=45", "--northing=45", "--sep=ab"]),
            args(&["--flow_accum=accum.asc", "--easting=east", "--northing=45"]),
            args(&["--flow_accum=accum.asc", "--easting=45"]),
            args(&["--easting=45", "--northing=45"]),
            args(&["--flow_accum=accum.asc", "--easting=450", "--northing=45", "--window=3", "--threshold=1"]),
        ];
        for case in cases {
            let err = tool.run(case.clone(), &wd, false).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput, "case {:?}", case);
        }
        assert!(tool.run(vec![], &wd, false).is_err());
    }

    #[test]
    fn test_format_location() {
        assert_eq!(format_location(125.0, 85.0, " "), "125.000000 85.000000");
        assert_eq!(format_location(125.0, 85.0, ","), "125.000000,85.000000");
        assert_eq!(
            format_location(412355.25, 4321065.125, "\t"),
            "412355.250000\t4321065.125000"
        );
        let sep = parse_separator("pipe").unwrap();
        assert_eq!(format_location(-5.0, 0.0000004, &sep), "-5.000000|0.000000");
    }

    #[test]
    fn test_separator_names() {
        assert_eq!(parse_separator("comma").unwrap(), ",");
        assert_eq!(parse_separator("TAB").unwrap(), "\t");
        assert_eq!(parse_separator(";").unwrap(), ";");
        assert!(parse_separator("").is_err());
    }
}
