// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::*;
use metriken::{metric, Counter};

/*
 * SET
 */

#[metric(name = "set")]
pub static SET: Counter = Counter::new();

#[metric(name = "set_ex")]
pub static SET_EX: Counter = Counter::new();

#[metric(name = "set_stored")]
pub static SET_STORED: Counter = Counter::new();

#[metric(name = "set_not_stored")]
pub static SET_NOT_STORED: Counter = Counter::new();

/*
 * ADD
 */

#[metric(name = "add")]
pub static ADD: Counter = Counter::new();

#[metric(name = "add_ex")]
pub static ADD_EX: Counter = Counter::new();

#[metric(name = "add_stored")]
pub static ADD_STORED: Counter = Counter::new();

#[metric(name = "add_not_stored")]
pub static ADD_NOT_STORED: Counter = Counter::new();

/*
 * REPLACE
 */

#[metric(name = "replace")]
pub static REPLACE: Counter = Counter::new();

#[metric(name = "replace_ex")]
pub static REPLACE_EX: Counter = Counter::new();

#[metric(name = "replace_stored")]
pub static REPLACE_STORED: Counter = Counter::new();

#[metric(name = "replace_not_stored")]
pub static REPLACE_NOT_STORED: Counter = Counter::new();

/*
 * APPEND
 */

#[metric(name = "append")]
pub static APPEND: Counter = Counter::new();

#[metric(name = "append_ex")]
pub static APPEND_EX: Counter = Counter::new();

#[metric(name = "append_stored")]
pub static APPEND_STORED: Counter = Counter::new();

#[metric(name = "append_not_stored")]
pub static APPEND_NOT_STORED: Counter = Counter::new();

/*
 * PREPEND
 */

#[metric(name = "prepend")]
pub static PREPEND: Counter = Counter::new();

#[metric(name = "prepend_ex")]
pub static PREPEND_EX: Counter = Counter::new();

#[metric(name = "prepend_stored")]
pub static PREPEND_STORED: Counter = Counter::new();

#[metric(name = "prepend_not_stored")]
pub static PREPEND_NOT_STORED: Counter = Counter::new();

/*
 * CAS
 */

#[metric(name = "cas")]
pub static CAS: Counter = Counter::new();

#[metric(name = "cas_ex")]
pub static CAS_EX: Counter = Counter::new();

#[metric(name = "cas_stored")]
pub static CAS_STORED: Counter = Counter::new();

#[metric(name = "cas_exists")]
pub static CAS_EXISTS: Counter = Counter::new();

#[metric(name = "cas_not_found")]
pub static CAS_NOT_FOUND: Counter = Counter::new();

/*
 * COMPOSE
 */

#[metric(
    name = "compose_fast_path",
    description = "requests encoded entirely into the scratch buffer"
)]
pub static COMPOSE_FAST_PATH: Counter = Counter::new();

#[metric(
    name = "compose_slow_path",
    description = "requests whose value was copied into a separately allocated buffer"
)]
pub static COMPOSE_SLOW_PATH: Counter = Counter::new();

/// Counter for requests composed with this operation.
pub(crate) fn request(operation: Operation) -> &'static Counter {
    match operation {
        Operation::Set => &SET,
        Operation::Add => &ADD,
        Operation::Replace => &REPLACE,
        Operation::Append => &APPEND,
        Operation::Prepend => &PREPEND,
        Operation::Cas => &CAS,
    }
}

/// Counter for requests which failed to encode or got an unexpected reply.
pub(crate) fn exception(operation: Operation) -> &'static Counter {
    match operation {
        Operation::Set => &SET_EX,
        Operation::Add => &ADD_EX,
        Operation::Replace => &REPLACE_EX,
        Operation::Append => &APPEND_EX,
        Operation::Prepend => &PREPEND_EX,
        Operation::Cas => &CAS_EX,
    }
}

/// Counter for a completed request, if the outcome is tracked for the operation.
pub(crate) fn outcome(operation: Operation, status: MemcacheStatus) -> Option<&'static Counter> {
    let counter = match (operation, status) {
        (Operation::Set, MemcacheStatus::Ok) => &SET_STORED,
        (Operation::Set, MemcacheStatus::ItemNotStored) => &SET_NOT_STORED,
        (Operation::Add, MemcacheStatus::Ok) => &ADD_STORED,
        (Operation::Add, MemcacheStatus::ItemNotStored) => &ADD_NOT_STORED,
        (Operation::Replace, MemcacheStatus::Ok) => &REPLACE_STORED,
        (Operation::Replace, MemcacheStatus::ItemNotStored) => &REPLACE_NOT_STORED,
        (Operation::Append, MemcacheStatus::Ok) => &APPEND_STORED,
        (Operation::Append, MemcacheStatus::ItemNotStored) => &APPEND_NOT_STORED,
        (Operation::Prepend, MemcacheStatus::Ok) => &PREPEND_STORED,
        (Operation::Prepend, MemcacheStatus::ItemNotStored) => &PREPEND_NOT_STORED,
        (Operation::Cas, MemcacheStatus::Ok) => &CAS_STORED,
        (Operation::Cas, MemcacheStatus::KeyExists) => &CAS_EXISTS,
        (Operation::Cas, MemcacheStatus::KeyNotFound) => &CAS_NOT_FOUND,
        _ => return None,
    };
    Some(counter)
}
