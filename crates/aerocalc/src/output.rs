//! Output helpers for the `aerocalc` CLI: JSON and aligned report sections.

use std::io::{self, Write};

use aerocalc_core::report::ReportLine;
use aerocalc_ui::styles::{label_width, render_heading, render_line};
use serde::Serialize;

/// Print a value as pretty JSON on stdout.
pub fn output_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            // Ignore broken pipe errors (e.g., piped to `head`)
            let _ = writeln!(handle, "{}", json);
        }
        Err(e) => {
            eprintln!("Error: failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a titled section of report lines with aligned values.
pub fn print_section(title: &str, lines: &[ReportLine]) {
    let width = label_width(lines);
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    let _ = writeln!(handle, "{}", render_heading(title));
    for line in lines {
        let _ = writeln!(handle, "{}", render_line(line, width));
    }
}
