//! Error message formatting with actionable suggestions.

use rnx_core::RnxError;
use std::error::Error;

use super::colors::ColorSupport;

/// Renders an error, its help text and its cause chain
pub struct ErrorFormatter {
    colors: ColorSupport,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            colors: ColorSupport::detect(),
        }
    }

    #[cfg(test)]
    fn plain() -> Self {
        Self {
            colors: ColorSupport::disabled(),
        }
    }

    /// Format a pipeline error with its suggestion and causes
    pub fn format_error(&self, error: &RnxError) -> String {
        let mut output = self.headline(&error.to_string());

        if let Some(suggestion) = error.suggestion() {
            output.push('\n');
            output.push_str(&self.colors.dim("help"));
            output.push_str(": ");
            output.push_str(suggestion);
            output.push('\n');
        }

        self.push_causes(&mut output, error.source());
        output
    }

    /// Format any other error through its cause chain
    pub fn format_chain(&self, error: &anyhow::Error) -> String {
        let mut output = self.headline(&error.to_string());
        self.push_causes(&mut output, error.source());
        output
    }

    fn headline(&self, message: &str) -> String {
        format!("{}: {}\n", self.colors.red("error"), message)
    }

    fn push_causes(&self, output: &mut String, mut source: Option<&(dyn Error + 'static)>) {
        while let Some(err) = source {
            output.push_str(&self.colors.dim("caused by"));
            output.push_str(": ");
            output.push_str(&err.to_string());
            output.push('\n');
            source = err.source();
        }
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}
