use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        let text = format!("=== {} ===", title);
        if self.prefs.plain_mode {
            text
        } else {
            text.bold().to_string()
        }
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        message.to_string()
    }

    pub fn pointer(&self) -> &'static str {
        if self.prefs.plain_mode {
            ">"
        } else {
            "▸"
        }
    }

    pub fn navigation_hint(&self) -> String {
        "(Use arrow keys to navigate, Enter to select, ESC to cancel)".to_string()
    }

    pub fn format_two_column_row(&self, label: &str, description: &str, width: usize) -> String {
        if description.is_empty() {
            return format!("  {}", label);
        }
        format!("  {:<width$}  {}", label, description, width = width + 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_column_rows_align_descriptions() {
        let formatter = Formatter {
            prefs: OutputPreferences { plain_mode: true },
        };
        assert_eq!(
            formatter.format_two_column_row("Next", "Go on", 6),
            "  Next      Go on"
        );
        assert_eq!(formatter.format_two_column_row("Next", "", 6), "  Next");
        assert_eq!(formatter.header_text("Review"), "=== Review ===");
    }
}
