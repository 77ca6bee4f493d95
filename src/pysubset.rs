//! Main module for pysubset library functionality

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod harness;
pub mod level;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod testing;
pub mod token;
pub mod validation;

pub use ast::{Module, NodeKind};
pub use error::ParseError;
pub use level::Level;
pub use parsing::parse_module;
pub use pipeline::{Pipeline, PipelineOptions};
