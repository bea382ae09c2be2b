//! Terminal capabilities that shape report output: color and rule width.

use std::env;

/// Widest rule drawn under a section heading, in columns.
pub const MAX_RULE_WIDTH: usize = 72;

/// Width assumed when the terminal size cannot be queried (pipes, CI).
const FALLBACK_WIDTH: usize = 80;

/// Returns `true` if stdout is connected to a terminal.
pub fn stdout_is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Columns for a heading rule: the terminal width, capped at [`MAX_RULE_WIDTH`].
pub fn rule_width() -> usize {
    crossterm::terminal::size()
        .ok()
        .filter(|&(cols, _rows)| cols > 0)
        .map_or(FALLBACK_WIDTH, |(cols, _rows)| usize::from(cols))
        .min(MAX_RULE_WIDTH)
}

/// Whether report values should be colored on stdout.
///
/// Honors `NO_COLOR`, `CLICOLOR=0`, `TERM=dumb` and `CLICOLOR_FORCE`,
/// falling back to TTY detection.
pub fn supports_color() -> bool {
    let lookup = |name: &str| env::var_os(name).map(|v| v.to_string_lossy().into_owned());
    color_enabled(lookup, stdout_is_tty())
}

/// Color decision from an environment lookup and the TTY state.
fn color_enabled(var: impl Fn(&str) -> Option<String>, tty: bool) -> bool {
    if var("NO_COLOR").is_some() {
        return false;
    }
    if var("CLICOLOR").as_deref() == Some("0") || var("TERM").as_deref() == Some("dumb") {
        return false;
    }
    var("CLICOLOR_FORCE").is_some() || tty
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn decide(vars: &[(&str, &str)], tty: bool) -> bool {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        color_enabled(|name| vars.get(name).cloned(), tty)
    }

    #[test]
    fn tty_decides_without_overrides() {
        assert!(decide(&[], true));
        assert!(!decide(&[], false));
    }

    #[test]
    fn no_color_beats_force() {
        assert!(!decide(&[("NO_COLOR", ""), ("CLICOLOR_FORCE", "1")], true));
    }

    #[test]
    fn dumb_terminal_and_clicolor_zero_disable() {
        assert!(!decide(&[("TERM", "dumb")], true));
        assert!(!decide(&[("CLICOLOR", "0")], true));
        assert!(decide(&[("CLICOLOR", "1")], true));
    }

    #[test]
    fn force_colors_piped_output() {
        assert!(decide(&[("CLICOLOR_FORCE", "1")], false));
    }

    #[test]
    fn rule_width_is_bounded() {
        let width = rule_width();
        assert!(width > 0 && width <= MAX_RULE_WIDTH);
    }
}
