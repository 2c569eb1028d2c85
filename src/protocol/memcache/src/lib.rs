// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Client side of the memcache text protocol storage commands: `set`, `add`,
//! `replace`, `append`, `prepend` and `cas`.
//!
//! A `Mutation` is encoded by `TextProtocol` into a `Frame` for the transport.
//! The server's reply line is tokenized into a `ResponseType` and interpreted
//! into a `MemcacheStatus`, which is a successful completion even when the
//! item was not stored.

#[macro_use]
extern crate logger;

pub mod text;

mod error;
mod request;
mod response;
mod util;

#[cfg(feature = "metrics")]
mod metrics;

pub(crate) use util::*;

pub use error::*;
pub use request::*;
pub use response::*;
pub use text::response::interpret;
pub use text::TextProtocol;

#[cfg(feature = "metrics")]
pub use metrics::*;

pub use common::expiry::TimeType;
pub use protocol_common::{Allocator, Frame, Heap, Parse, ParseOk, Protocol};

const CRLF: &[u8] = b"\r\n";

#[cfg(feature = "metrics")]
common::metrics::test_no_duplicates!();
