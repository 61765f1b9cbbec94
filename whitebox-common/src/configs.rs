use serde_derive::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{Error, ErrorKind};
use std::path::Path;

/// Runtime settings, read from `settings.json` beside the executable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configs {
    pub verbose_mode: bool,
    pub working_directory: String,
}

impl Configs {
    pub fn from_file<P: AsRef<Path>>(file_name: P) -> Result<Configs, Error> {
        let contents = fs::read_to_string(file_name)?;
        Configs::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Configs, Error> {
        serde_json::from_str(contents).map_err(|e| Error::new(ErrorKind::InvalidData, e))
    }
}

/// Returns the settings stored next to the running executable, or the defaults
/// when no `settings.json` exists there.
pub fn get_configs() -> Result<Configs, Error> {
    let mut settings_file = env::current_exe()?;
    settings_file.pop();
    settings_file.push("settings.json");
    if !settings_file.exists() {
        return Ok(Configs::default());
    }
    Configs::from_file(&settings_file)
}
