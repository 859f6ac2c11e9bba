//! `wp completions`: shell completion scripts.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use clap_complete::{Shell, generate};

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `args.shell` to stdout.
///
/// # Errors
///
/// Returns an error if flushing stdout fails.
pub fn run_completions(args: &CompletionsArgs, command: &mut clap::Command) -> Result<()> {
    let mut out = io::stdout().lock();
    write_completions(args.shell, command, &mut out);
    out.flush()?;
    Ok(())
}

fn write_completions(shell: Shell, command: &mut clap::Command, out: &mut dyn Write) {
    let bin_name = command.get_name().to_string();
    generate(shell, command, bin_name, out);
}
