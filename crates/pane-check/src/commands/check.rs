/*
 * check.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `pane-check check`: parse a configuration file and report problems.

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::ValueEnum;
use tracing::debug;

use pane_config::{
    ConfigResult, Document, SectionRef, parse_document, unused_diagnostic, write_document,
};
use pane_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, RenderOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub file: String,
    pub json: bool,
    pub color: ColorChoice,
    pub print: bool,
    pub rich: bool,
    /// Dotted setting paths to read before looking for unused settings
    pub required: Vec<String>,
    pub unused: bool,
}

impl CheckArgs {
    fn colorize(&self) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        }
    }

    /// Print a diagnostic in the requested output form.
    fn report(&self, diagnostic: &DiagnosticMessage, source: &str) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&diagnostic.to_json())?);
            return Ok(());
        }
        let rich = self
            .rich
            .then(|| diagnostic.to_report(&self.file, source))
            .flatten();
        match rich {
            Some(report) => eprint!("{report}"),
            None => {
                let options = RenderOptions::colored(self.colorize());
                eprint!("{}", diagnostic.render(Some(source), &options));
            }
        }
        Ok(())
    }
}

/// Execute the check command
pub fn execute(args: CheckArgs) -> Result<ExitCode> {
    let source = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file))?;

    let document = match parse_document(&source) {
        Ok(document) => document,
        Err(err) => {
            args.report(&err.to_diagnostic(&source), &source)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    for path in &args.required {
        let diagnostic = match read_setting(&document, path) {
            Ok(Some(value)) => {
                debug!(path = %path, value = %value, "read setting");
                continue;
            }
            Ok(None) => DiagnosticMessageBuilder::error(format!("no section holds '{path}'"))
                .problem("every section named in the path must be defined")
                .build(),
            Err(err) => err.to_diagnostic(&source),
        };
        args.report(&diagnostic, &source)?;
        return Ok(ExitCode::FAILURE);
    }

    if args.print {
        print!("{}", write_document(document.tree()));
    }

    if args.unused {
        if let Some(diagnostic) = unused_diagnostic(&document) {
            args.report(&diagnostic, &source)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Split `section.sub.key` into its section names and the key.
fn split_path(path: &str) -> (Vec<&str>, &str) {
    match path.rsplit_once('.') {
        Some((sections, key)) => (sections.split('.').collect(), key),
        None => (Vec::new(), path),
    }
}

/// Read the value at `path`, marking it used.
///
/// Returns `Ok(None)` when one of the sections along the path is missing.
fn read_setting(document: &Document, path: &str) -> ConfigResult<Option<String>> {
    let (sections, key) = split_path(path);
    let mut section: SectionRef<'_> = document.root();
    for name in sections {
        match section.subsection(name) {
            Some(next) => section = next,
            None => return Ok(None),
        }
    }
    let entry = section.require(key)?;
    Ok(Some(entry.value().to_string()))
}
