//! # Terminal Output
//!
//! Colour and emoji handling for the CLI. Everything the commands print to
//! stdout goes through an [`OutputConfig`], which decides once whether the
//! terminal gets decorated output or plain ASCII markers.
//!
//! The decision honours, in order:
//! - `--color=always|never|auto`
//! - `NO_COLOR` (any value, https://no-color.org/)
//! - `CLICOLOR=0` and `CLICOLOR_FORCE=1`
//! - `TERM=dumb`
//! - whether stdout is a terminal, as reported by `console`

use std::env;

use console::Style;

use crate::resolve::Class;

/// Semantic colouring of a piece of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Failure,
    Muted,
}

/// Whether output is decorated.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub use_color: bool,
}

impl OutputConfig {
    /// Resolve the `--color` flag against the environment.
    ///
    /// `always` overrides `NO_COLOR`; anything other than `always` or `never`
    /// is treated as `auto`.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_ascii_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };
        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }
        console::Term::stdout().features().colors_supported()
    }

    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// `emoji` on a decorated terminal, `plain` otherwise.
    pub fn icon<'a>(&self, emoji: &'a str, plain: &'a str) -> &'a str {
        if self.use_color {
            emoji
        } else {
            plain
        }
    }

    /// Colour `text` according to `tone`. Plain terminals get the text as is.
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let style = match tone {
            Tone::Success => Style::new().green(),
            Tone::Warning => Style::new().yellow(),
            Tone::Failure => Style::new().red().bold(),
            Tone::Muted => Style::new().dim(),
        };
        style.force_styling(true).apply_to(text).to_string()
    }

    /// Label of a definition class, coloured by kind.
    pub fn class_label(&self, class: Class) -> String {
        let tone = match class {
            Class::Selector => Tone::Success,
            Class::Orchestrator => Tone::Muted,
            Class::Mixed => Tone::Warning,
        };
        self.paint(&class.to_string(), tone)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}
