//! Uniform error type for the transformation workflow.
//!
//! Lower layers return their own typed errors ([`DatasetError`](crate::dataset::DatasetError),
//! [`PreprocessingError`](crate::preprocessing::PreprocessingError),
//! [`PersistenceError`](crate::serialization::PersistenceError)). At the point
//! where the orchestrator observes a failure it attaches a message through
//! [`Context`], which also records the source location of that call. Callers
//! then see a single [`ProcessingError`] whose [`source`](std::error::Error::source)
//! is the original cause.
//!
//! ```ignore
//! use scoreprep::error::Context;
//!
//! let table = Table::from_csv_path(path).context("reading training data")?;
//! ```

use std::error::Error as StdError;
use std::panic::Location;
use thiserror::Error;

/// Boxed cause carried by a [`ProcessingError`].
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure of a transformation run, annotated where it was observed.
#[derive(Debug, Error)]
#[error("{message} (at {location})")]
pub struct ProcessingError {
    message: String,
    location: &'static Location<'static>,
    #[source]
    source: Option<BoxError>,
}

impl ProcessingError {
    /// An error with no underlying cause, located at the caller.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
            source: None,
        }
    }

    /// An error wrapping `source`, located at the caller.
    #[track_caller]
    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self {
            message: message.into(),
            location: Location::caller(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Source file, line and column where the error was annotated.
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// The first cause in the chain of type `E`, if any.
    pub fn find_cause<E: StdError + 'static>(&self) -> Option<&E> {
        let mut cause = self.source();
        while let Some(err) = cause {
            if let Some(found) = err.downcast_ref::<E>() {
                return Some(found);
            }
            cause = err.source();
        }
        None
    }
}

/// Attach a message and the caller's location to a fallible result.
pub trait Context<T> {
    /// Wrap the error with a fixed message.
    fn context(self, message: impl Into<String>) -> Result<T, ProcessingError>;

    /// Wrap the error with a lazily built message.
    fn with_context<M, F>(self, f: F) -> Result<T, ProcessingError>
    where
        M: Into<String>,
        F: FnOnce() -> M;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    // `match` rather than `map_err`: a closure would report its own location.
    #[track_caller]
    fn context(self, message: impl Into<String>) -> Result<T, ProcessingError> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(ProcessingError::with_source(message, err)),
        }
    }

    #[track_caller]
    fn with_context<M, F>(self, f: F) -> Result<T, ProcessingError>
    where
        M: Into<String>,
        F: FnOnce() -> M,
    {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(ProcessingError::with_source(f(), err)),
        }
    }
}
