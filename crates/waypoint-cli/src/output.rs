//! Shared output layer for pretty/text/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: pretty output for humans, compact text for scripts, or stable
//! JSON.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format` flag, then the hidden `--json` alias
//! 2. `FORMAT` env var → `"pretty"` | `"text"` | `"json"`
//! 3. `output` in the user config
//! 4. Default: [`OutputMode::Pretty`] if stdout is a TTY; [`OutputMode::Text`] if piped.
//!
//! Steps 2 to 4 are resolved by `waypoint_core::config::resolve_config`; this
//! module only layers the flags on top.

use clap::ValueEnum;
use serde::Serialize;
use std::io::{self, Write};
use waypoint_core::{CatalogError, ErrorCode};

/// Shared width for human pretty separators.
pub const PRETTY_RULE_WIDTH: usize = 72;

/// Write a horizontal separator used by pretty human output.
pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{:-<width$}", "", width = PRETTY_RULE_WIDTH)
}

/// Write a section heading followed by a separator.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// The three output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-optimized output (sections, indentation, visual framing).
    Pretty,
    /// Plain tab-separated text for scripts and pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    /// Parse a normalized mode name as produced by config resolution.
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "pretty" => Some(Self::Pretty),
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Layer the CLI flags over the mode resolved from env and config.
///
/// `format_flag` is the explicit `--format` value, `json_flag` the hidden
/// `--json` alias, `configured` the mode name from config resolution.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    configured: &str,
) -> OutputMode {
    if let Some(mode) = format_flag {
        return mode;
    }

    if json_flag {
        return OutputMode::Json;
    }

    OutputMode::from_name(configured).unwrap_or(OutputMode::Text)
}

/// Render a serializable value with explicit pretty/text renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Text => text_fn(value, &mut out)?,
        OutputMode::Pretty => pretty_fn(value, &mut out)?,
    }
    Ok(())
}

/// Render a serializable value to stdout in the requested format.
///
/// In JSON mode, the value is serialized with `serde_json`. In pretty/text mode,
/// the provided `human_fn` closure is called to produce text output.
/// For distinct text/pretty rendering, use [`render_mode`].
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            human_fn(value, &mut out)?;
        }
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Errors
// ────────────────────────────────────────────────────────────────────────────

/// A structured error with a stable code and an optional hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliError {
    /// Human-readable error message.
    pub message: String,
    /// Stable `E####` code.
    pub code: &'static str,
    /// Suggestion for how to fix the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl CliError {
    /// An error carrying `code`'s stable id and hint with a custom message.
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.code(),
            hint: code.hint(),
        }
    }
}

impl From<&CatalogError> for CliError {
    fn from(err: &CatalogError) -> Self {
        Self::with_code(err.code(), err.to_string())
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    let mut out = io::stderr().lock();
    write_error(mode, error, &mut out)?;
    Ok(())
}

fn write_error(mode: OutputMode, error: &CliError, out: &mut dyn Write) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let wrapper = serde_json::json!({
                "error": error,
            });
            serde_json::to_writer_pretty(&mut *out, &wrapper)?;
            writeln!(out)?;
        }
        OutputMode::Pretty | OutputMode::Text => {
            writeln!(out, "error[{}]: {}", error.code, error.message)?;
            if let Some(hint) = error.hint {
                writeln!(out, "  hint: {hint}")?;
            }
        }
    }
    Ok(())
}
