use thiserror::Error;

/// Errors raised by the flow controller while driving a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    /// The current or target step number has no matching step in the catalog.
    /// Fatal to the session: the caller renders a fallback message.
    #[error("Step {0} was not found in the form catalog")]
    StepNotFound(u32),

    /// An operation was invoked in a state that forbids it.
    #[error("Cannot {operation}: {reason}")]
    InvalidTransition {
        operation: &'static str,
        reason: String,
    },
}

/// Errors that can occur while fetching steps or plans from a data source.
/// These are recoverable: the caller may simply retry the fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataFetchError {
    #[error("Could not read '{origin}': {message}")]
    Io { origin: String, message: String },

    #[error("Failed to parse '{origin}': {message}")]
    Parse { origin: String, message: String },

    #[error("Data source unavailable: {0}")]
    Unavailable(String),
}

/// Errors that reject a fetched step catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Step '{title}' has step number 0; step numbers must be positive")]
    InvalidStepNumber { title: String },

    #[error("Step number {0} is used by more than one step")]
    DuplicateStep(u32),
}

/// Errors that can occur while building a session from a data source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] DataFetchError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}
