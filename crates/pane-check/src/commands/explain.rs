/*
 * explain.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! `pane-check explain`: look up an error code in the catalog.

use std::process::ExitCode;

use anyhow::Result;

use pane_error_reporting::get_error_info;

/// Execute the explain command
pub fn execute(code: &str) -> Result<ExitCode> {
    let code = code.trim().to_ascii_uppercase();
    let Some(info) = get_error_info(&code) else {
        anyhow::bail!("Unknown error code: {code}");
    };
    println!("{code}: {}", info.title);
    println!("subsystem: {} (since {})", info.subsystem, info.since_version);
    println!();
    println!("{}", info.message_template);
    Ok(ExitCode::SUCCESS)
}
