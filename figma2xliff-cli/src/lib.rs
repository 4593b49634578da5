//! CLI library for testing purposes

pub mod convert;

pub use convert::{ConvertArgs, resolve_input_path, run_convert_command};
