/*
This code is part of the WhiteboxTools geospatial analysis library.
License: MIT
*/

pub mod tools;

use crate::tools::ToolManager;
use std::env;
use std::io::{Error, ErrorKind};
use std::path;
use whitebox_common::configs::get_configs;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    match run() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<(), Error> {
    let sep: &str = &path::MAIN_SEPARATOR.to_string();
    let configs = get_configs()?;
    let mut working_dir = configs.working_directory.clone();
    let mut verbose = configs.verbose_mode;
    let mut tool_name = String::new();
    let mut run_tool = false;
    let mut tool_help = false;
    let mut tool_parameters = false;
    let mut toolbox = false;
    let mut list_tools = false;
    let mut tool_args_vec: Vec<String> = vec![];

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        help();
        return Ok(());
    }

    for arg in args {
        let flag_val = arg.to_lowercase().replace("--", "-");
        if flag_val == "-h" || flag_val == "-help" {
            help();
            return Ok(());
        } else if flag_val == "-version" {
            version();
            return Ok(());
        } else if flag_val.starts_with("-r=") || flag_val.starts_with("-run=") {
            tool_name = value_of(&arg);
            run_tool = true;
        } else if flag_val.starts_with("-wd=") || flag_val.starts_with("-cd=") {
            working_dir = value_of(&arg);
        } else if flag_val == "-listtools" || flag_val == "-list_tools" {
            list_tools = true;
        } else if flag_val.starts_with("-toolhelp") {
            tool_name = value_of(&arg);
            tool_help = true;
        } else if flag_val.starts_with("-toolparameters") {
            tool_name = value_of(&arg);
            tool_parameters = true;
        } else if flag_val.starts_with("-toolbox") {
            tool_name = value_of(&arg);
            toolbox = true;
        } else if flag_val == "-v" || flag_val.starts_with("-v=") || flag_val.starts_with("-verbose") {
            verbose = !(flag_val.contains('=') && flag_val.contains("false"));
        } else {
            tool_args_vec.push(arg);
        }
    }

    if !working_dir.is_empty() && !working_dir.ends_with(sep) && !working_dir.ends_with('/') {
        working_dir.push_str(sep);
    }

    let tm = ToolManager::new(&working_dir, &verbose)?;
    if run_tool {
        if tool_name.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "No tool name specified."));
        }
        tm.run_tool(tool_name, tool_args_vec)
    } else if tool_help {
        tm.tool_help(tool_name)
    } else if tool_parameters {
        tm.tool_parameters(tool_name)
    } else if toolbox {
        tm.toolbox(tool_name)
    } else if list_tools {
        tm.list_tools();
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidInput,
            "Unrecognized command. Use --help for usage.",
        ))
    }
}

fn value_of(arg: &str) -> String {
    match arg.split_once('=') {
        Some((_, v)) => v.replace('"', "").replace('\'', ""),
        None => String::new(),
    }
}

fn help() {
    let mut ext = "";
    if cfg!(target_os = "windows") {
        ext = ".exe";
    }
    let exe_name = &format!("whitebox_tools{}", ext);
    let s = format!(
        "whitebox_tools Help

The following commands are recognized:
--cd, --wd          Changes the working directory; used in conjunction with --run flag.
-h, --help          Prints help information.
--listtools         Lists all available tools.
-r, --run           Runs a tool; used in conjunction with --wd flag; -r=\"FindNearestStreamPixel\".
--toolbox           Prints the toolbox associated with a tool; --toolbox=FindNearestStreamPixel.
--toolhelp          Prints the help associated with a tool; --toolhelp=\"FindNearestStreamPixel\".
--toolparameters    Prints the parameters (in json form) for a specific tool.
-v                  Verbose mode. Without this flag, tool outputs will not be printed.
--version           Prints the version information.

Example Usage:
>> ./{0} -r=FindNearestStreamPixel -v --wd=\"/path/to/data/\" --flow_accum=accum.asc --easting=412350.0 --northing=4321070.0
",
        exe_name
    );
    println!("{}", s);
}

fn version() {
    println!("whitebox_tools v{}", VERSION);
}
