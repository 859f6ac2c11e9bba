#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use output::{OutputMode, resolve_output_mode};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use waypoint_core::config::resolve_config;

#[derive(Parser, Debug)]
#[command(
    name = "wp",
    author,
    version,
    about = "waypoint: filter and navigate a project catalog",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog file or directory (overrides `[catalog] path`).
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Alias for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Reject unknown statuses on load; make `diagnose` fail on any issue.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Navigate",
        about = "List visible projects",
        long_about = "Filter the catalog by search text, status, category and focus branch, keeping ancestors (and subtrees of title matches) for context.",
        after_help = "EXAMPLES:\n    # Everything, sorted\n    wp filter\n\n    # Search, keeping the path to each hit\n    wp filter cli\n\n    # Only active projects in one branch\n    wp filter --status active --focus \"Tools\"\n\n    # Emit machine-readable output\n    wp filter cli --format json"
    )]
    Filter(cmd::FilterArgs),

    #[command(
        next_help_heading = "Navigate",
        about = "Show visible projects as a tree",
        long_about = "Filter like `wp filter`, then nest the visible projects by parent. Projects whose parent is filtered out become roots.",
        after_help = "EXAMPLES:\n    # Whole catalog\n    wp tree\n\n    # Tree of one category\n    wp tree --category contributing\n\n    # Nested JSON\n    wp tree --format json"
    )]
    Tree(cmd::FilterArgs),

    #[command(
        next_help_heading = "Navigate",
        about = "Show one project",
        long_about = "Show a project with its parent path, children and related projects.",
        after_help = "EXAMPLES:\n    # Show by exact title\n    wp show \"Navigator\""
    )]
    Show(cmd::show::ShowArgs),

    #[command(
        next_help_heading = "Navigate",
        about = "List project titles",
        long_about = "List every title, sorted case-insensitively. These are the valid --focus values."
    )]
    Titles,

    #[command(
        next_help_heading = "Maintenance",
        about = "Report catalog problems",
        long_about = "Report duplicate titles, unresolved parents and links, parent cycles and unknown statuses.",
        after_help = "EXAMPLES:\n    # Human report\n    wp diagnose\n\n    # Fail CI on any problem\n    wp diagnose --strict"
    )]
    Diagnose,

    #[command(
        next_help_heading = "Maintenance",
        about = "Generate shell completion scripts",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    wp completions bash\n\n    # Generate zsh completions\n    wp completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("WAYPOINT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "waypoint=debug,info"
        } else {
            "waypoint=info,warn"
        })
    });

    let format = env::var("WAYPOINT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project_root = env::current_dir()?;
    let config = resolve_config(&project_root, cli.json)?;
    let output = resolve_output_mode(cli.format, cli.json, &config.resolved_output);
    debug!(?output, root = %project_root.display(), "session resolved");

    let session = cmd::Session {
        project_root,
        config,
        output,
        catalog_override: cli.catalog,
        strict: cli.strict,
    };

    match cli.command {
        Commands::Filter(ref args) => cmd::filter::run_filter(args, &session),
        Commands::Tree(ref args) => cmd::tree::run_tree(args, &session),
        Commands::Show(ref args) => cmd::show::run_show(args, &session),
        Commands::Titles => cmd::titles::run_titles(&session),
        Commands::Diagnose => cmd::diagnose::run_diagnose(&session),
        Commands::Completions(ref args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }
    }
}
