pub mod hydro_analysis;

use serde_derive::Serialize;
use std::io::{Error, ErrorKind};

pub struct ToolManager {
    pub working_dir: String,
    pub verbose: bool,
    tool_names: Vec<String>,
}

impl ToolManager {
    pub fn new<'a>(working_directory: &'a str, verbose_mode: &'a bool) -> Result<ToolManager, Error> {
        let tool_names = vec!["FindNearestStreamPixel".to_string()];
        Ok(ToolManager {
            working_dir: working_directory.to_string(),
            verbose: *verbose_mode,
            tool_names,
        })
    }

    fn get_tool(&self, tool_name: &str) -> Option<Box<dyn WhiteboxTool + 'static>> {
        match tool_name.to_lowercase().replace("_", "").as_ref() {
            "findneareststreampixel" => Some(Box::new(
                hydro_analysis::FindNearestStreamPixel::new(),
            )),
            _ => None,
        }
    }

    fn unrecognized(tool_name: &str) -> Error {
        Error::new(
            ErrorKind::NotFound,
            format!("Unrecognized tool name {}.", tool_name),
        )
    }

    pub fn run_tool(&self, tool_name: String, args: Vec<String>) -> Result<(), Error> {
        match self.get_tool(tool_name.as_ref()) {
            Some(tool) => tool.run(args, &self.working_dir, self.verbose),
            None => Err(Self::unrecognized(&tool_name)),
        }
    }

    pub fn tool_help(&self, tool_name: String) -> Result<(), Error> {
        if tool_name.is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput, "No tool name specified."));
        }
        match self.get_tool(tool_name.as_ref()) {
            Some(tool) => {
                println!("{}", get_help(tool));
                Ok(())
            }
            None => Err(Self::unrecognized(&tool_name)),
        }
    }

    pub fn tool_parameters(&self, tool_name: String) -> Result<(), Error> {
        match self.get_tool(tool_name.as_ref()) {
            Some(tool) => {
                println!("{}", tool.get_tool_parameters());
                Ok(())
            }
            None => Err(Self::unrecognized(&tool_name)),
        }
    }

    pub fn toolbox(&self, tool_name: String) -> Result<(), Error> {
        match self.get_tool(tool_name.as_ref()) {
            Some(tool) => {
                println!("{}", tool.get_toolbox());
                Ok(())
            }
            None => Err(Self::unrecognized(&tool_name)),
        }
    }

    pub fn list_tools(&self) {
        let mut tool_details: Vec<(String, String)> = Vec::new();
        for name in &self.tool_names {
            if let Some(tool) = self.get_tool(name) {
                tool_details.push((tool.get_tool_name(), tool.get_tool_description()));
            }
        }
        tool_details.sort();
        println!("All {} Available Tools:", tool_details.len());
        for (name, description) in tool_details {
            println!("{}: {}", name, description);
        }
    }
}

pub trait WhiteboxTool {
    fn get_tool_name(&self) -> String;
    fn get_tool_description(&self) -> String;
    fn get_tool_parameters(&self) -> String;
    fn get_example_usage(&self) -> String;
    fn get_toolbox(&self) -> String;
    fn run<'a>(
        &self,
        args: Vec<String>,
        working_directory: &'a str,
        verbose: bool,
    ) -> Result<(), Error>;
    fn get_source_file(&self) -> String;
}

fn get_help<'a>(wt: Box<dyn WhiteboxTool + 'a>) -> String {
    let tool_name = wt.get_tool_name();
    let description = wt.get_tool_description();
    let parameters = wt.get_tool_parameters();
    let toolbox = wt.get_toolbox();
    let o: serde_json::Value = match serde_json::from_str(&parameters) {
        Ok(v) => v,
        Err(e) => return format!("Unable to read tool parameters: {}", e),
    };
    let mut p = String::new();
    p.push_str("Flag               Description\n");
    p.push_str("-----------------  -----------\n");
    if let Some(params) = o["parameters"].as_array() {
        for param in params {
            let flags: Vec<&str> = param["flags"]
                .as_array()
                .map(|a| a.iter().filter_map(|f| f.as_str()).collect())
                .unwrap_or_default();
            let desc = param["description"].as_str().unwrap_or("");
            p.push_str(&format!("{:<19}{}\n", flags.join(", "), desc));
        }
    }
    let example = wt.get_example_usage();
    let mut s = format!(
        "{}
Description:\n{}
Toolbox: {}
Parameters:\n
{}
",
        tool_name, description, toolbox, p
    );
    if !example.is_empty() {
        s.push_str(&format!("\nExample usage:\n{}", example));
    }
    s
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ToolParameter {
    pub name: String,
    pub flags: Vec<String>,
    pub description: String,
    pub parameter_type: ParameterType,
    pub default_value: Option<String>,
    pub optional: bool,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum ParameterType {
    String,
    Integer,
    Float,
    ExistingFile(ParameterFileType),
    NewFile(ParameterFileType),
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum ParameterFileType {
    Raster,
    Vector(VectorGeometryType),
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub enum VectorGeometryType {
    Point,
}
