//! Persistence of fitted transformer parameters.
//!
//! Fitted transformers never serialize themselves directly. They expose a
//! plain-data `Params` representation (see
//! [`FittedTransformer::extract_params`](crate::preprocessing::FittedTransformer::extract_params)),
//! and this module turns such values into bytes and files.
//!
//! The on-disk format is `bincode` 1.x. `f64` values are stored bit-exactly,
//! so a transformer loaded from disk reproduces the numeric output of the one
//! that was saved.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error as StdError;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A trait for parameter representations that can be serialized to and from bytes.
///
/// Implementors should contain only plain data (numbers, strings, vectors).
pub trait SerializableParams: Sized {
    /// The error type returned during (de)serialization.
    type Error: StdError + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize the parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: Serialize + DeserializeOwned,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

/// Errors raised while writing or reading a persisted object.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode object: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

/// Serialize `obj` and write it to `path`, creating parent directories first.
///
/// An existing file at `path` is overwritten.
pub fn save_object<T, P>(path: P, obj: &T) -> Result<(), PersistenceError>
where
    T: SerializableParams<Error = bincode::Error>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let bytes = obj.to_bytes().map_err(PersistenceError::Encode)?;
    fs::write(path, bytes).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "object persisted");
    Ok(())
}

/// Read and deserialize an object previously written by [`save_object`].
pub fn load_object<T, P>(path: P) -> Result<T, PersistenceError>
where
    T: SerializableParams<Error = bincode::Error>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    T::from_bytes(&bytes).map_err(|source| PersistenceError::Decode {
        path: path.to_path_buf(),
        source,
    })
}
