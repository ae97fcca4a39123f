//! Terminal output formatting.
//!
//! Status messages go to stderr so stdout carries nothing but command
//! results, which are usually piped into a bundler config.

pub mod colors;
pub mod errors;

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    colors: colors::ColorSupport,
}

impl OutputHandler {
    pub fn new() -> Self {
        Self {
            colors: colors::ColorSupport::detect(),
        }
    }

    /// Handler that never emits escape codes
    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            colors: colors::ColorSupport::disabled(),
        }
    }

    /// Print a command result to stdout
    pub fn result(&self, content: &str) {
        println!("{}", content);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.colors.dim(message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.colors.green("✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.colors.yellow("⚠"), message);
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new()
    }
}
