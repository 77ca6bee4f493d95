//! Processing pipeline
//!
//!     source text -> scanner -> block filter -> parser(level) -> Module
//!
//!     A [Pipeline] is configured once through [PipelineOptions] and then applied to any number
//!     of sources. Each call builds its own scanner and block filter, so nothing is shared
//!     between parses: independent files get independent token streams and indent stacks.
//!
//!     Verbosity is part of the options rather than process-wide state. A verbose pipeline logs
//!     every token stream and tree it produces at `debug` level.

use log::debug;
use std::fs;
use std::path::Path;

use crate::pysubset::ast::Module;
use crate::pysubset::error::{CheckError, ParseError};
use crate::pysubset::formats::dump::dump;
use crate::pysubset::harness::{ExecutionReport, Harness};
use crate::pysubset::level::Level;
use crate::pysubset::lexing;
use crate::pysubset::parsing::ModuleParser;
use crate::pysubset::token::TokenLocation;
use crate::pysubset::validation::validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipelineOptions {
    pub level: Level,
    pub verbose: bool,
}

impl PipelineOptions {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            verbose: false,
        }
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Everything a successful file check produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub module: Module,
    pub execution: Option<ExecutionReport>,
}

pub struct Pipeline {
    options: PipelineOptions,
    parser: ModuleParser,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            parser: ModuleParser::new(options.level),
        }
    }

    pub fn level(&self) -> Level {
        self.parser.level()
    }

    /// The block-filtered token stream.
    pub fn tokens(&self, source: &str) -> Result<Vec<TokenLocation>, ParseError> {
        let tokens = lexing::lex_all(source)?;
        if self.options.verbose {
            let kinds: Vec<String> = tokens.iter().map(|(token, _)| token.describe()).collect();
            debug!("tokens: {}", kinds.join(" "));
        }
        Ok(tokens)
    }

    pub fn parse(&self, source: &str) -> Result<Module, ParseError> {
        let module = self.parser.parse(source)?;
        if self.options.verbose {
            debug!("{}", dump(&module));
        }
        Ok(module)
    }

    /// Parse, then confirm the tree stays inside the pipeline's level.
    pub fn check(&self, source: &str) -> Result<Module, CheckError> {
        let module = self.parse(source)?;
        validate(self.options.level, &module)?;
        Ok(module)
    }

    /// Check a file and, given a harness, run it.
    pub fn check_file(
        &self,
        path: &Path,
        harness: Option<&Harness>,
    ) -> Result<FileReport, CheckError> {
        let source = fs::read_to_string(path).map_err(|source| CheckError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("checking {} at {}", path.display(), self.options.level);

        let module = self.check(&source)?;
        let execution = match harness {
            Some(harness) => Some(harness.run(path, &source)?),
            None => None,
        };
        Ok(FileReport { module, execution })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineOptions::default())
    }
}
