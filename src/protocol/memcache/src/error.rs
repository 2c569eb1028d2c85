// Copyright 2023 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Operation, ResponseType};
use std::io::ErrorKind;
use thiserror::Error;

pub type Result<T = ()> = std::result::Result<T, MemcacheError>;

/// Failures of the storage command codec. Cache-level outcomes such as a key
/// already existing are not errors, see `MemcacheStatus`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemcacheError {
    #[error("invalid operation: {0}")]
    InvalidOperation(Operation),
    #[error("invalid key")]
    InvalidKey,
    #[error("key length {len} exceeds maximum of {max}")]
    KeyTooLong { len: usize, max: usize },
    #[error("value size {len} exceeds maximum of {max}")]
    ValueTooLarge { len: usize, max: usize },
    #[error("scratch buffer too small for header: need {needed} bytes, have {available}")]
    ScratchOverflow { needed: usize, available: usize },
    #[error("unexpected response: {0}")]
    UnexpectedResponse(ResponseType),
}

impl MemcacheError {
    /// An unexpected response means the response stream can no longer be
    /// trusted and the connection must be discarded.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::UnexpectedResponse(_))
    }
}

impl From<MemcacheError> for std::io::Error {
    fn from(value: MemcacheError) -> Self {
        let kind = match value {
            MemcacheError::UnexpectedResponse(_) => ErrorKind::InvalidData,
            MemcacheError::ScratchOverflow { .. } => ErrorKind::OutOfMemory,
            _ => ErrorKind::InvalidInput,
        };
        std::io::Error::new(kind, value)
    }
}
