//! Command-line interface for docx-anonymize.
//!
//! `run` parses arguments, resolves anything missing through prompts and
//! drives either a single rewrite or a bulk run, reporting per file.

use crate::bulk::{BulkDriver, Progress};
use crate::error::{Error, RewriteError};
use crate::resolve::{ArgsResolver, Job, Resolver, StdioPrompt, Supplied};
use crate::rewrite::{AllowList, RewriteSpec, Rewriter};
use clap::Parser;
use std::ffi::OsString;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Anonymize the author name in .docx files.
///
/// Missing values are asked for on standard input. For bulk processing,
/// provide --folder to anonymize every .docx file in that folder.
#[derive(Parser, Debug)]
#[command(name = "docx-anonymize", version)]
pub struct Cli {
    /// Path to the input .docx file
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Path to the output file (defaults to "<input> - Anonymized.docx")
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Original author name to find
    #[arg(long)]
    pub old_name: Option<String>,
    /// Replacement name
    #[arg(long)]
    pub new_name: Option<String>,
    /// Folder of .docx files to anonymize in bulk (overrides --input/--output)
    #[arg(long)]
    pub folder: Option<PathBuf>,
    /// Also rewrite word/headerN.xml and word/footerN.xml beyond the first two
    #[arg(long)]
    pub all_headers_footers: bool,
    /// Fail instead of prompting for missing values
    #[arg(long)]
    pub no_prompt: bool,
}

impl Cli {
    fn supplied(&self) -> Supplied {
        Supplied {
            input: self.input.clone(),
            output: self.output.clone(),
            old_name: self.old_name.clone(),
            new_name: self.new_name.clone(),
        }
    }

    fn rewriter(&self) -> Rewriter {
        Rewriter::new(AllowList::word().include_numbered_headers_footers(self.all_headers_footers))
    }
}

/// Run the CLI with explicit streams and return the process exit code.
pub fn run<I, T, R, W, E>(args: I, stdin: R, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    R: BufRead,
    W: Write,
    E: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = if err.use_stderr() {
                write!(stderr, "{}", err.render())
            } else {
                write!(stdout, "{}", err.render())
            };
            return ExitCode::from(u8::try_from(err.exit_code()).unwrap_or(2));
        }
    };

    let result = match &cli.folder {
        Some(folder) if cli.input.is_some() || cli.output.is_some() => {
            log::warn!("--folder given, ignoring --input/--output");
            run_bulk(&cli, folder.clone(), stdin, stdout, stderr)
        }
        Some(folder) => run_bulk(&cli, folder.clone(), stdin, stdout, stderr),
        None => run_single(&cli, stdin, stdout, stderr),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("{}", err);
            let _ = writeln!(stderr, "Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn resolver<'a, R: BufRead, W: Write>(
    cli: &Cli,
    stdin: R,
    stdout: &'a mut W,
) -> ArgsResolver<StdioPrompt<R, &'a mut W>> {
    if cli.no_prompt {
        ArgsResolver::non_interactive(cli.supplied())
    } else {
        ArgsResolver::new(cli.supplied(), StdioPrompt::new(stdin, stdout))
    }
}

fn run_single<R, W, E>(cli: &Cli, stdin: R, stdout: &mut W, stderr: &mut E) -> Result<bool, Error>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let Job {
        input,
        output,
        old_name,
        new_name,
    } = resolver(cli, stdin, stdout).resolve_job()?;
    let spec = RewriteSpec::new(old_name, new_name)?;

    match cli.rewriter().rewrite(&input, &output, &spec) {
        Ok(report) => {
            log::info!(
                "{}: {} replacements in {} parts",
                input.display(),
                report.replacements(),
                report.parts.len()
            );
            writeln!(stdout, "Anonymized file saved to: {}", output.display())?;
            Ok(true)
        }
        Err(err) => {
            report_failure(stderr, &input, &err)?;
            Ok(false)
        }
    }
}

fn run_bulk<R, W, E>(
    cli: &Cli,
    folder: PathBuf,
    stdin: R,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<bool, Error>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let job = resolver(cli, stdin, stdout).resolve_bulk(folder)?;
    let spec = RewriteSpec::new(job.old_name, job.new_name)?;

    let packages = BulkDriver::find_packages(&job.folder)?;
    writeln!(
        stdout,
        "Processing {} .docx files in: {}",
        packages.len(),
        job.folder.display()
    )?;

    let driver = BulkDriver::new(cli.rewriter());
    let mut write_error = None;
    let report = driver.run_packages(packages, &spec, |progress| {
        let written = match progress {
            Progress::Started(source) => {
                writeln!(stdout, "Anonymizing '{}'...", display_name(source))
            }
            Progress::Finished(outcome) => match &outcome.result {
                Ok(_) => writeln!(
                    stdout,
                    "Anonymized file saved to: {}",
                    outcome.destination.display()
                ),
                Err(err) => report_failure(stderr, &outcome.source, err),
            },
        };
        if let Err(e) = written {
            write_error.get_or_insert(e);
        }
    });

    if let Some(e) = write_error {
        return Err(e.into());
    }
    Ok(report.all_succeeded())
}

fn report_failure<E: Write>(stderr: &mut E, source: &Path, err: &RewriteError) -> std::io::Result<()> {
    writeln!(stderr, "Failed to anonymize '{}': {}", display_name(source), err)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}
