//! Ayu color theme and rendering of report output.
//!
//! Values are accented, units muted, section headings bold. Everything
//! degrades to plain text when color is not supported, so piped output is
//! stable.

use aerocalc_core::report::ReportLine;
use owo_colors::OwoColorize;

use crate::terminal::{rule_width, supports_color};

// Ayu Dark palette
const PASS: (u8, u8, u8) = (0xc2, 0xd9, 0x4c); // #c2d94c - bright green
const FAIL: (u8, u8, u8) = (0xf0, 0x71, 0x78); // #f07178 - bright red
const MUTED: (u8, u8, u8) = (0x6c, 0x76, 0x80); // #6c7680 - muted gray
const ACCENT: (u8, u8, u8) = (0x59, 0xc2, 0xff); // #59c2ff - bright blue

/// Light horizontal rule character.
pub const RULE_CHAR: char = '\u{2500}';

fn color_str(s: &str, rgb: (u8, u8, u8)) -> String {
    if supports_color() {
        s.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        s.to_string()
    }
}

/// Renders text with pass (green) styling.
pub fn render_pass(s: &str) -> String {
    color_str(s, PASS)
}

/// Renders text with fail (red) styling.
pub fn render_fail(s: &str) -> String {
    color_str(s, FAIL)
}

/// Renders text with muted (gray) styling.
pub fn render_muted(s: &str) -> String {
    color_str(s, MUTED)
}

/// Renders text with accent (blue) styling.
pub fn render_accent(s: &str) -> String {
    color_str(s, ACCENT)
}

/// Renders text in bold.
pub fn render_bold(s: &str) -> String {
    if supports_color() {
        s.bold().to_string()
    } else {
        s.to_string()
    }
}

/// A section heading followed by a rule sized to the terminal.
pub fn render_heading(title: &str) -> String {
    let rule: String = std::iter::repeat_n(RULE_CHAR, rule_width()).collect();
    format!("{}\n{}", render_bold(title), render_muted(&rule))
}

/// Render one report line with its label padded to `label_width`.
pub fn render_line(line: &ReportLine, label_width: usize) -> String {
    let value = format!("{:.*}", line.precision, line.value);
    let label = format!("{:<width$}", line.label, width = label_width);
    if line.unit.is_empty() {
        format!("{}  {}", label, render_accent(&value))
    } else {
        format!(
            "{}  {} {}",
            label,
            render_accent(&value),
            render_muted(line.unit)
        )
    }
}

/// Width of the longest label, for column alignment.
pub fn label_width(lines: &[ReportLine]) -> usize {
    lines
        .iter()
        .map(|l| l.label.chars().count())
        .max()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn line(label: &'static str, value: f64, unit: &'static str, precision: usize) -> ReportLine {
        ReportLine {
            key: "k",
            label,
            value,
            unit,
            precision,
        }
    }

    #[test]
    fn label_width_is_longest_label() {
        let lines = vec![line("ab", 1.0, "", 0), line("abcd", 1.0, "", 0)];
        assert_eq!(label_width(&lines), 4);
        assert_eq!(label_width(&[]), 0);
    }

    #[test]
    fn render_line_contains_value_and_unit() {
        let rendered = render_line(&line("Air", 548.0, "m3/h", 0), 5);
        assert!(rendered.starts_with("Air  "));
        assert!(rendered.contains("548"));
        assert!(rendered.contains("m3/h"));
    }
}
