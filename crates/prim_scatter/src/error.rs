//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! malformed requests, variant ids that do not resolve to a source prim, failures reported
//! by the host while executing a command, and generic errors.
use thiserror::Error;

use crate::scene::host::CommandError;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("item {index}: variant id {variant_id} is out of range for {len} source prims")]
    IndexOutOfRange {
        index: usize,
        variant_id: usize,
        len: usize,
    },

    #[error("host command '{command}' failed{}: {source}", item_suffix(.index))]
    ExternalCommand {
        command: &'static str,
        index: Option<usize>,
        #[source]
        source: CommandError,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Index of the scattered item the error belongs to, if any.
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Error::IndexOutOfRange { index, .. } => Some(*index),
            Error::ExternalCommand { index, .. } => *index,
            _ => None,
        }
    }
}

fn item_suffix(index: &Option<usize>) -> String {
    match index {
        Some(i) => format!(" at item {i}"),
        None => String::new(),
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}
