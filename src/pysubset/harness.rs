//! Execution harness
//!
//!     Cross-checks a program against the reference interpreter. A program passes when the
//!     interpreter exits with status 0 and writes nothing to stderr.
//!
//!     Interactive input is answered from a companion fixture: the file with the program's
//!     basename and the configured extension (`prog.py` reads `prog.in`). Before running, each
//!     `input()` call in the program is rewritten according to the fixture line it will consume,
//!     `(input() == "True")` for `True`/`False` answers and `int(input())` for everything else,
//!     so programs written for the subset get typed values. The fixture is then fed to the
//!     interpreter as stdin.
//!
//!     The rewritten program goes to a temporary file that is removed when the run ends.

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::pysubset::config::ExecutionConfig;
use crate::pysubset::error::ExecutionFailure;

static INPUT_CALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\binput\s*\(\s*\)").expect("input call pattern is valid"));

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionReport {
    pub stdout: String,
    pub input_calls: usize,
}

#[derive(Debug, Clone)]
pub struct Harness {
    config: ExecutionConfig,
}

impl Harness {
    pub fn new(config: ExecutionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }

    /// Companion fixture of `program`, whether or not it exists.
    pub fn fixture_path(&self, program: &Path) -> PathBuf {
        program.with_extension(&self.config.input_extension)
    }

    /// Fixture lines with trailing whitespace removed, or `None` without a fixture.
    pub fn load_fixture(&self, program: &Path) -> io::Result<Option<Vec<String>>> {
        let path = self.fixture_path(program);
        if !path.is_file() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path)?;
        Ok(Some(
            text.lines().map(|line| line.trim_end().to_string()).collect(),
        ))
    }

    /// Run `source`, the contents of `program`, under the interpreter.
    pub fn run(&self, program: &Path, source: &str) -> Result<ExecutionReport, ExecutionFailure> {
        let answers = self.load_fixture(program)?.unwrap_or_default();
        let input_calls = count_input_calls(source);
        let rewritten = rewrite_input_calls(source, &answers)?;

        let mut script = tempfile::Builder::new()
            .prefix("pysubset-")
            .suffix(".py")
            .tempfile()?;
        script.write_all(rewritten.as_bytes())?;
        script.flush()?;

        let stdin = match self.fixture_path(program) {
            fixture if fixture.is_file() => Stdio::from(File::open(fixture)?),
            _ => Stdio::null(),
        };

        debug!(
            "running {} {} for {}",
            self.config.interpreter,
            script.path().display(),
            program.display()
        );
        let output = Command::new(&self.config.interpreter)
            .arg(script.path())
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| ExecutionFailure::Spawn {
                interpreter: self.config.interpreter.clone(),
                source,
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(ExecutionFailure::ExitStatus {
                code: output.status.code(),
                stderr,
            });
        }
        if !stderr.trim().is_empty() {
            return Err(ExecutionFailure::Diagnostics(stderr));
        }

        info!("{} ran cleanly", program.display());
        Ok(ExecutionReport {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            input_calls,
        })
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(ExecutionConfig::default())
    }
}

pub fn count_input_calls(source: &str) -> usize {
    INPUT_CALL.find_iter(source).count()
}

/// Rewrite each `input()` call for the answer it will read, in order.
pub fn rewrite_input_calls(source: &str, answers: &[String]) -> Result<String, ExecutionFailure> {
    let needed = count_input_calls(source);
    if answers.len() < needed {
        return Err(ExecutionFailure::MissingInput {
            needed,
            available: answers.len(),
        });
    }

    let mut answers = answers.iter();
    let rewritten = INPUT_CALL.replace_all(source, |_: &regex::Captures| {
        match answers.next().map(String::as_str) {
            Some("True") | Some("False") => "(input() == \"True\")",
            _ => "int(input())",
        }
    });
    Ok(rewritten.into_owned())
}
