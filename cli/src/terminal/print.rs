//! Line-oriented terminal output.
//!
//! Every line goes out on the `netdiag::print` tracing target, so it shares the
//! indicatif writer with any running spinner instead of tearing through it.

use std::fmt::Display;

use crate::terminal::{colors, logging::PRINT_TARGET};
use colored::*;
use console::measure_text_width;
use tracing::info;

pub const WIDTH: usize = 64;

#[macro_export]
macro_rules! mprint {
    () => {{
        $crate::terminal::print::print("");
    }};
    ($msg:expr) => {{
        $crate::terminal::print::print($msg);
    }};
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(no_banner: bool, quiet: u8) {
    if no_banner || quiet > 0 {
        return;
    }
    let title: String = format!("⟦ NETDIAG v{} ⟧", env!("CARGO_PKG_VERSION"));
    print(&rule("═", Some(title.bright_green().bold())));
}

pub fn header(title: &str, quiet: u8) {
    if quiet > 0 {
        return;
    }
    let title: String = format!("⟦ {} ⟧", title.to_uppercase());
    print(&rule("─", Some(title.bright_green())));
}

/// Full-width double rule closing a command's output.
pub fn closing_rule(quiet: u8) {
    if quiet > 0 {
        return;
    }
    print(&rule("═", None));
}

pub fn status(msg: impl AsRef<str>) {
    print(&format!("{} {}", ">".color(colors::SEPARATOR), msg.as_ref()));
}

pub fn centered(msg: &str) {
    let pad: usize = WIDTH.saturating_sub(measure_text_width(msg)) / 2;
    print(&format!("{}{msg}", " ".repeat(pad)));
}

pub fn no_results(msg: &str, quiet: u8) {
    if quiet > 0 {
        print(&msg.red().to_string());
        return;
    }
    header(msg, quiet);
    centered(&"nothing to show".red().bold().to_string());
}

/// A block of `key....: value` lines whose leaders line up on the longest key.
pub struct Fields {
    key_width: usize,
}

impl Fields {
    pub fn new(keys: &[&str]) -> Self {
        Self {
            key_width: keys.iter().map(|k| k.len()).max().unwrap_or(0),
        }
    }

    pub fn line(&self, key: &str, value: impl Display) {
        status(format!(
            "{}{} {}",
            key.color(colors::PRIMARY),
            leader(key, self.key_width + 1),
            value
        ));
    }
}

/// `[idx] name` followed by one level of `├─ key...: value` branches.
pub fn tree(idx: usize, name: &str, rows: &[(String, ColoredString)]) {
    print(&format!(
        "{}{}{} {}",
        "[".color(colors::SEPARATOR),
        idx.to_string().color(colors::ACCENT),
        "]".color(colors::SEPARATOR),
        name.color(colors::PRIMARY)
    ));

    let key_width: usize = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (i, (key, value)) in rows.iter().enumerate() {
        let branch: &str = if i + 1 == rows.len() { "└─" } else { "├─" };
        print(&format!(
            " {} {}{} {}",
            branch.bright_black(),
            key.color(colors::TEXT_DEFAULT),
            leader(key, key_width),
            value
        ));
    }
}

fn leader(key: &str, width: usize) -> String {
    let dots: String = ".".repeat(width.saturating_sub(key.len()));
    format!("{dots}:").color(colors::SEPARATOR).to_string()
}

fn rule(fill: &str, title: Option<ColoredString>) -> String {
    let title: String = title.map(|t| t.to_string()).unwrap_or_default();
    let remaining: usize = WIDTH.saturating_sub(measure_text_width(&title));
    let left: usize = remaining / 2;
    format!(
        "{}{}{}",
        fill.repeat(left).bright_black(),
        title,
        fill.repeat(remaining - left).bright_black()
    )
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_span_the_full_width() {
        assert_eq!(measure_text_width(&rule("═", None)), WIDTH);
        assert_eq!(measure_text_width(&rule("─", Some("⟦ PING ⟧".normal()))), WIDTH);
        assert_eq!(measure_text_width(&rule("─", Some("⟦ ROUTE ⟧".normal()))), WIDTH);
    }

    #[test]
    fn leaders_align_keys() {
        let short: usize = measure_text_width(&format!("Up{}", leader("Up", 8)));
        let long: usize = measure_text_width(&format!("Received{}", leader("Received", 8)));
        assert_eq!(short, long);
        assert_eq!(measure_text_width(&leader("Overlong", 3)), 1);
    }
}
