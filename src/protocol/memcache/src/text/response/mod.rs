// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;

/// Maps the reply to a storage command onto its outcome.
///
/// `NOT_FOUND` for `append` and `prepend` is reported as `ItemNotStored`,
/// since those commands never create an item. Any reply which is not a
/// storage outcome is an error.
pub fn interpret(operation: Operation, response: &ResponseType) -> Result<MemcacheStatus> {
    let status = match response {
        ResponseType::Stored => MemcacheStatus::Ok,
        ResponseType::NotStored => MemcacheStatus::ItemNotStored,
        ResponseType::Exists => MemcacheStatus::KeyExists,
        ResponseType::NotFound => match operation {
            Operation::Append | Operation::Prepend => MemcacheStatus::ItemNotStored,
            _ => MemcacheStatus::KeyNotFound,
        },
        _ => {
            warn!("unexpected response to {}: {}", operation, response);

            #[cfg(feature = "metrics")]
            crate::metrics::exception(operation).increment();

            return Err(MemcacheError::UnexpectedResponse(response.clone()));
        }
    };

    #[cfg(feature = "metrics")]
    if let Some(counter) = crate::metrics::outcome(operation, status) {
        counter.increment();
    }

    Ok(status)
}
