/*
 * main.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! pane-check - validate configuration files and try out predicates

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::check::{CheckArgs, ColorChoice};

#[derive(Parser)]
#[command(name = "pane-check")]
#[command(version)]
#[command(about = "Validate pane configuration files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a configuration file and report the first error
    Check {
        /// Configuration file to check
        file: String,

        /// Print the diagnostic as JSON on stdout
        #[arg(long)]
        json: bool,

        /// When to color diagnostics
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,

        /// Print the parsed document back in normalized form
        #[arg(long)]
        print: bool,

        /// Render diagnostics as labelled reports
        #[arg(long)]
        rich: bool,

        /// Read this setting (SECTION.KEY, or KEY at the root); may be repeated
        #[arg(short = 'r', long = "require", value_name = "PATH")]
        required: Vec<String>,

        /// Warn about settings that were never read
        #[arg(long)]
        unused: bool,
    },

    /// Compile a predicate and evaluate it against a set of flags
    Eval {
        /// Expression such as 'debug && !(linux || mac)'
        expression: String,

        /// Flag that is set; may be repeated
        #[arg(short = 's', long = "set", value_name = "FLAG")]
        flags: Vec<String>,

        /// Print the compiled program before the result
        #[arg(long)]
        program: bool,
    },

    /// Describe an error code
    Explain {
        /// Error code such as P-2-1
        code: String,
    },
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so they never mix with --json or --print output
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pane=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            file,
            json,
            color,
            print,
            rich,
            required,
            unused,
        } => commands::check::execute(CheckArgs {
            file,
            json,
            color,
            print,
            rich,
            required,
            unused,
        }),
        Commands::Eval {
            expression,
            flags,
            program,
        } => commands::eval::execute(&expression, flags, program),
        Commands::Explain { code } => commands::explain::execute(&code),
    }
}
