mod prompt;
mod table;
pub use prompt::pause;
pub use table::{show_differences, show_downstream_only};

use anyhow::Result;
use console::{style, Term};
use std::sync::atomic::{AtomicBool, Ordering};

// Width of the prefix column, e.g. "   INFO "
const PREFIX_LEN: usize = 10;

static VERBOSE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// Right-align a prefix into the fixed prefix column
pub fn gen_prefix(prefix: &str) -> String {
    let len = console::measure_text_width(prefix);
    if len >= PREFIX_LEN {
        format!("{prefix} ")
    } else {
        format!("{}{} ", " ".repeat(PREFIX_LEN - len), prefix)
    }
}

/// Diagnostic output. Messages go to stderr so tables on stdout stay pipeable.
pub struct Writer {
    term: Term,
}

impl Writer {
    pub fn new() -> Self {
        Writer {
            term: Term::stderr(),
        }
    }

    pub fn writeln(&self, prefix: &str, msg: &str) -> Result<()> {
        let mut first = true;
        for line in msg.lines() {
            let prefix = if first { gen_prefix(prefix) } else { gen_prefix("") };
            first = false;
            self.term.write_line(&format!("{prefix}{line}"))?;
        }
        // msg.lines() yields nothing for an empty message
        if first {
            self.term.write_line(&gen_prefix(prefix))?;
        }
        Ok(())
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

pub fn info_prefix() -> String {
    style("INFO").blue().bold().to_string()
}

pub fn warn_prefix() -> String {
    style("WARNING").yellow().bold().to_string()
}

pub fn error_prefix() -> String {
    style("ERROR").red().bold().to_string()
}

pub fn success_prefix() -> String {
    style("SUCCESS").green().bold().to_string()
}

pub fn debug_prefix() -> String {
    style("DEBUG").dim().to_string()
}

#[macro_export]
macro_rules! msg {
    ($prefix:expr, $($arg:tt)+) => {
        $crate::WRITER.writeln($prefix, &format!($($arg)+)).ok();
    };
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => {
        $crate::msg!(&$crate::cli::info_prefix(), $($arg)+);
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => {
        $crate::msg!(&$crate::cli::warn_prefix(), $($arg)+);
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => {
        $crate::msg!(&$crate::cli::error_prefix(), $($arg)+);
    };
}

#[macro_export]
macro_rules! success {
    ($($arg:tt)+) => {
        $crate::msg!(&$crate::cli::success_prefix(), $($arg)+);
    };
}

#[macro_export]
macro_rules! due_to {
    ($($arg:tt)+) => {
        $crate::msg!(&console::style("DUE TO").yellow().bold().to_string(), $($arg)+);
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => {
        if $crate::cli::verbose() {
            $crate::msg!(&$crate::cli::debug_prefix(), $($arg)+);
        }
    };
}

#[cfg(test)]
mod test {
    use super::gen_prefix;

    #[test]
    fn prefix_alignment() {
        assert_eq!(gen_prefix(""), " ".repeat(11));
        assert_eq!(gen_prefix("INFO"), "      INFO ");
        assert_eq!(gen_prefix("VERY-LONG-PREFIX"), "VERY-LONG-PREFIX ");
        // ANSI escapes don't count towards the width
        let styled = console::style("INFO").blue().force_styling(true).to_string();
        assert_eq!(console::measure_text_width(&gen_prefix(&styled)), 11);
    }
}
