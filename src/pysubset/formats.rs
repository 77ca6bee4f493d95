//! Output formats
//!
//!     Ways to render a parsed [Module]. Every format implements [Format] and is looked up by
//!     name through [format_by_name], which is what the command line `--emit` option uses.
//!
//!     - `dump`: the reference interpreter's `ast.dump` notation. See [dump].
//!     - `source`: source text with the fewest parentheses that keep the tree. See [source].
//!     - `json` and `yaml`: the serde view of the tree. See [serde_formats].

pub mod dump;
pub mod serde_formats;
pub mod source;

use thiserror::Error;

use crate::pysubset::ast::Module;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("unknown format '{0}'")]
    Unknown(String),
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub trait Format {
    fn name(&self) -> &str;

    fn serialize(&self, module: &Module) -> Result<String, FormatError>;
}

/// Every format, in the order they are listed to users.
pub fn all_formats() -> Vec<Box<dyn Format>> {
    vec![
        Box::new(dump::DumpFormat),
        Box::new(source::SourceFormat),
        Box::new(serde_formats::JsonFormat),
        Box::new(serde_formats::YamlFormat),
    ]
}

pub fn format_by_name(name: &str) -> Result<Box<dyn Format>, FormatError> {
    all_formats()
        .into_iter()
        .find(|format| format.name() == name)
        .ok_or_else(|| FormatError::Unknown(name.to_string()))
}
