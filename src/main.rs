//! CLI entrypoint for docx-anonymize.

use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    docx_anonymize::cli::run(std::env::args_os(), stdin, &mut stdout, &mut stderr)
}
