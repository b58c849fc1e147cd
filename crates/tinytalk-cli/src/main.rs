// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! tinytalk command-line interface.
//!
//! This is the main entry point for the `tinytalk` command.

use camino::Utf8PathBuf;
use clap::{ArgAction, Args, Parser, Subcommand};
use miette::Result;
use tinytalk_core::source_analysis::{DEFAULT_MAX_NESTING_DEPTH, ParseOptions};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod diagnostic;

use commands::parse::OutputFormat;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "TINYTALK_LOG";

/// tinytalk: tokenize and parse Smalltalk-style source
#[derive(Debug, Parser)]
#[command(name = "tinytalk")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

/// Front-end settings shared by every subcommand.
#[derive(Debug, Args)]
struct GlobalOptions {
    /// Treat the first lexical error as fatal
    #[arg(long, global = true)]
    strict: bool,

    /// Maximum nesting of blocks, parentheses and brace literals
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,
}

impl GlobalOptions {
    fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            strict_lexing: self.strict,
            max_nesting_depth: self.max_depth,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print one token per line with its line and column
    Tokens {
        /// Source file, or `-` for standard input
        #[arg(default_value = "-")]
        path: Utf8PathBuf,
    },

    /// Print the syntax tree
    Parse {
        /// Source file, or `-` for standard input
        #[arg(default_value = "-")]
        path: Utf8PathBuf,

        /// Tree rendering: `debug` or `compact`
        #[arg(long, default_value = "debug")]
        format: OutputFormat,
    },

    /// Report diagnostics without printing anything else
    Check {
        /// Source file, or `-` for standard input
        #[arg(default_value = "-")]
        path: Utf8PathBuf,
    },
}

fn main() -> Result<()> {
    // Install miette's fancy error handler
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let options = cli.options.parse_options();
    let result = match cli.command {
        Command::Tokens { path } => commands::tokens::run(&path, &options),
        Command::Parse { path, format } => commands::parse::run(&path, &options, format),
        Command::Check { path } => commands::check::run(&path, &options),
    };

    // Exit with appropriate code
    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("{e:?}");
            std::process::exit(1);
        }
    }
}

/// Installs a stderr subscriber filtered by `TINYTALK_LOG`, falling back to
/// the verbosity flag.
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(verbose)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Targets are module paths, so both crates are named explicitly.
    match v {
        0 => "warn",
        1 => "tinytalk=debug,tinytalk_core=debug",
        _ => "tinytalk=trace,tinytalk_core=trace",
    }
}
