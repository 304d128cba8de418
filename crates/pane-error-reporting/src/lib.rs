/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error reporting and diagnostic messages for pane.
//!
//! This crate turns structured failures into text a person can act on. It is
//! deliberately independent of the configuration format: callers describe a
//! failure as a [`DiagnosticMessage`] (title, problem, located details, hints)
//! and this crate renders it.
//!
//! # Renderings
//!
//! - [`DiagnosticMessage::render`]: compact text with `line N | ...` snippets
//!   cropped to a fixed width and underlined with carets
//! - [`DiagnosticMessage::to_report`]: rich multi-label output through ariadne
//! - [`DiagnosticMessage::to_json`]: machine-readable output for tooling
//!
//! # Example
//!
//! ```
//! use pane_error_reporting::{DiagnosticMessageBuilder, RenderOptions};
//! use pane_source_map::Span;
//!
//! let source = "width = wide\n";
//! let msg = DiagnosticMessageBuilder::error("invalid value for 'width'")
//!     .with_code("P-3-1")
//!     .with_location(Span::new(8, 4))
//!     .add_hint("expected an unsigned 32-bit integer")
//!     .build();
//!
//! let text = msg.render(Some(source), &RenderOptions::default());
//! assert!(text.starts_with("error[P-3-1]: invalid value for 'width'\n"));
//! assert!(text.contains("line 1 | width = wide\n"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;
pub mod snippet;

// Re-export main types for convenience
pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_error_info, get_subsystem};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
pub use snippet::{RenderOptions, render_snippet};
