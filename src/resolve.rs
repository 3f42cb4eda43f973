//! Resolving paths and names from flags, falling back to prompts

use crate::error::{Error, Result};
use crate::naming::default_output_path;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// A single-file rewrite request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    pub input: PathBuf,
    pub output: PathBuf,
    pub old_name: String,
    pub new_name: String,
}

/// A whole-folder rewrite request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BulkJob {
    pub folder: PathBuf,
    pub old_name: String,
    pub new_name: String,
}

/// Source of the values a job needs
pub trait Resolver {
    /// Resolve a single-file job
    fn resolve_job(&mut self) -> Result<Job>;

    /// Resolve a bulk job for `folder`
    fn resolve_bulk(&mut self, folder: PathBuf) -> Result<BulkJob>;
}

/// Interactive question/answer channel
pub trait Prompt {
    /// Ask a question and return the trimmed answer
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Show an informational message
    fn notify(&mut self, message: &str) -> io::Result<()>;
}

/// A [`Prompt`] over a reader and writer, typically stdin and stdout
pub struct StdioPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> StdioPrompt<R, W> {
    /// Create a new prompt
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Prompt for StdioPrompt<R, W> {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no answer for '{}'", question),
            ));
        }
        Ok(line.trim().to_string())
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }
}

/// Values supplied up front, e.g. from command-line flags
#[derive(Clone, Debug, Default)]
pub struct Supplied {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub old_name: Option<String>,
    pub new_name: Option<String>,
}

/// Uses supplied values, asking the prompt for anything missing.
///
/// Without a prompt, a missing value is an error.
pub struct ArgsResolver<P> {
    supplied: Supplied,
    prompt: Option<P>,
}

impl<P: Prompt> ArgsResolver<P> {
    /// Create a resolver that prompts for missing values
    pub fn new(supplied: Supplied, prompt: P) -> Self {
        Self {
            supplied,
            prompt: Some(prompt),
        }
    }

    /// Create a resolver that never prompts
    pub fn non_interactive(supplied: Supplied) -> Self {
        Self {
            supplied,
            prompt: None,
        }
    }

    fn value(&mut self, given: Option<String>, field: &'static str, question: &str) -> Result<String> {
        if let Some(value) = given {
            return Ok(value);
        }
        let prompt = self.prompt.as_mut().ok_or(Error::MissingValue(field))?;
        log::debug!("prompting for {}", field);
        Ok(prompt.ask(question)?)
    }

    fn required(&mut self, given: Option<String>, field: &'static str, question: &str) -> Result<String> {
        let value = self.value(given, field, question)?;
        if value.is_empty() {
            return Err(Error::MissingValue(field));
        }
        Ok(value)
    }

    fn names(&mut self) -> Result<(String, String)> {
        let old_name = self.supplied.old_name.take();
        let old_name = self.required(old_name, "old name", "Enter author name to find")?;
        let new_name = self.supplied.new_name.take();
        let new_name = self.value(new_name, "new name", "Enter replacement name")?;
        Ok((old_name, new_name))
    }
}

impl<P: Prompt> Resolver for ArgsResolver<P> {
    fn resolve_job(&mut self) -> Result<Job> {
        let input = match self.supplied.input.take() {
            Some(input) if !input.as_os_str().is_empty() => input,
            Some(_) => return Err(Error::MissingValue("input")),
            None => PathBuf::from(self.required(None, "input", "Enter path to input .docx")?),
        };

        let output = match self.supplied.output.take() {
            Some(output) if !output.as_os_str().is_empty() => output,
            _ => {
                let output = default_output_path(&input);
                let message = format!("Output file not specified. Defaulting to: {}", output.display());
                log::info!("{}", message);
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.notify(&message)?;
                }
                output
            }
        };

        let (old_name, new_name) = self.names()?;
        Ok(Job {
            input,
            output,
            old_name,
            new_name,
        })
    }

    fn resolve_bulk(&mut self, folder: PathBuf) -> Result<BulkJob> {
        let (old_name, new_name) = self.names()?;
        Ok(BulkJob {
            folder,
            old_name,
            new_name,
        })
    }
}
