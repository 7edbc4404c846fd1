//! Output formatting module for Stackforge
//!
//! Provides colored, verbosity-aware terminal output. Machine-readable
//! modes suppress the human chatter so stdout stays parseable.

use colored::Colorize;

/// Output formatter for different output modes
pub struct OutputFormatter {
    /// Use colored output
    use_color: bool,
    /// Machine-readable output mode (JSON/YAML)
    machine_mode: bool,
    /// Verbosity level
    verbosity: u8,
}

impl OutputFormatter {
    /// Create a new output formatter
    pub fn new(use_color: bool, machine_mode: bool, verbosity: u8) -> Self {
        // Respect NO_COLOR and STACKFORGE_NO_COLOR
        let use_color = use_color && !crate::cli::env::no_color();

        Self {
            use_color,
            machine_mode,
            verbosity,
        }
    }

    /// Print a banner/header
    pub fn banner(&self, title: &str) {
        if self.machine_mode {
            return;
        }

        let line = "=".repeat(title.len() + 4);
        if self.use_color {
            println!("\n{}", line.bright_blue());
            println!("{}", format!("  {}  ", title).bright_blue().bold());
            println!("{}\n", line.bright_blue());
        } else {
            println!("\n{}", line);
            println!("  {}  ", title);
            println!("{}\n", line);
        }
    }

    /// Print a section divider
    pub fn section(&self, title: &str) {
        if self.machine_mode {
            return;
        }

        if self.use_color {
            println!("\n{}", title.bright_white().bold());
        } else {
            println!("\n{}", title);
        }
    }

    /// Print an informational message
    pub fn info(&self, message: &str) {
        if self.machine_mode {
            return;
        }
        println!("{}", message);
    }

    /// Print a key/value line, aligned for scanning
    pub fn key_value(&self, key: &str, value: &str) {
        if self.machine_mode {
            return;
        }

        if self.use_color {
            println!("  {:<16} {}", key.cyan(), value);
        } else {
            println!("  {:<16} {}", key, value);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.machine_mode {
            return;
        }

        if self.use_color {
            eprintln!("{}: {}", "warning".yellow().bold(), message);
        } else {
            eprintln!("warning: {}", message);
        }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        if self.use_color {
            eprintln!("{}: {}", "error".red().bold(), message);
        } else {
            eprintln!("error: {}", message);
        }
    }

    /// Print a debug message (verbosity >= 2)
    pub fn debug(&self, message: &str) {
        if self.machine_mode || self.verbosity < 2 {
            return;
        }

        if self.use_color {
            println!("{}: {}", "debug".bright_black(), message);
        } else {
            println!("debug: {}", message);
        }
    }
}
