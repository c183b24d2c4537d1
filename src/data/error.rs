/// Errors raised while reading the input table
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Input file missing or unreadable
    #[error("failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed delimited data (unequal row lengths, bad quoting, invalid UTF-8)
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Parsed, but not shaped like a table
    #[error("invalid table format: {0}")]
    InvalidFormat(String),

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// Errors raised by the cleaning pass
#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    /// The title column is absent, or was pruned for being too sparse
    #[error("required column '{0}' is missing after cleaning")]
    MissingRequiredColumn(String),
}

/// Errors raised while writing the filtered subset
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write file: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),
}

/// Load followed by clean
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Clean(#[from] CleanError),
}
