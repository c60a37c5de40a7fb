//! Extraction options.

use super::tables::TableConfig;

/// How per-page failures are handled during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort on the first page that fails to extract.
    #[default]
    Strict,
    /// Record the failure on the page and continue with the rest.
    Lenient,
}

/// Options for page extraction.
#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    /// Failure handling mode
    pub error_mode: ErrorMode,
    /// Process pages in parallel
    pub parallel: bool,
    /// Table detection configuration
    pub tables: TableConfig,
}

impl ExtractOptions {
    /// Create options with defaults (strict errors, sequential).
    pub fn new() -> Self {
        Self::default()
    }

    /// Isolate per-page failures instead of aborting.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Process pages in parallel.
    pub fn parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// Use a custom table detection configuration.
    pub fn with_tables(mut self, tables: TableConfig) -> Self {
        self.tables = tables;
        self
    }
}
