//! CLI command implementations

pub mod compare;
pub mod sample_size;
pub mod what_changed;

use crate::error::CliResult;
use serde::de::DeserializeOwned;

/// Read a JSON or YAML input file, chosen by extension
pub fn read_input<T: DeserializeOwned>(file: &str) -> CliResult<T> {
    let contents = std::fs::read_to_string(file)?;
    if file.ends_with(".yaml") || file.ends_with(".yml") {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}
