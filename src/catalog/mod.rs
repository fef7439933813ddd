//! The tool data file and the JSON reports written next to it

pub mod data_file;
pub mod reports;

pub use data_file::{ToolDataFile, locate_tool_data};
pub use reports::{load_json, save_json};
