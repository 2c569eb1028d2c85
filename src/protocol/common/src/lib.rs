// Copyright 2021 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Traits and buffer types shared by the client protocol implementations, so
//! that a transport can drive any of them the same way.

pub use bytes::{Buf, BufMut, Bytes, BytesMut};

mod frame;
pub mod parsing;

pub use frame::*;

#[derive(Debug, PartialEq)]
pub struct ParseOk<T> {
    message: T,
    consumed: usize,
}

impl<T> ParseOk<T> {
    pub fn new(message: T, consumed: usize) -> Self {
        Self { message, consumed }
    }

    pub fn into_inner(self) -> T {
        self.message
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

pub trait Parse<T> {
    fn parse(&self, buffer: &[u8]) -> Result<ParseOk<T>, std::io::Error>;
}

/// Source of buffers for output which does not fit in the caller's scratch
/// buffer. The returned buffer is owned by the resulting `Frame` and freed
/// when the transport drops it.
pub trait Allocator {
    fn allocate(&self, capacity: usize) -> BytesMut;
}

/// Allocates from the global heap.
#[derive(Debug, Default, Clone, Copy)]
pub struct Heap;

impl Allocator for Heap {
    fn allocate(&self, capacity: usize) -> BytesMut {
        BytesMut::with_capacity(capacity)
    }
}

/// The client half of a protocol: turn requests into bytes for the transport
/// and turn the bytes which come back into responses.
pub trait Protocol<Request, Response> {
    /// Encodes `request` using `scratch` as the primary output buffer. The
    /// spare capacity of `scratch` is a hard bound and is never grown; output
    /// that does not fit is placed in a buffer obtained from `alloc`.
    fn compose_request(
        &self,
        request: &Request,
        scratch: &mut BytesMut,
        alloc: &dyn Allocator,
    ) -> Result<Frame, std::io::Error>;

    /// Parses a single response to `request`. Returns an error with kind
    /// `WouldBlock` if the buffer does not yet hold a complete response.
    fn parse_response(
        &self,
        request: &Request,
        buffer: &[u8],
    ) -> Result<ParseOk<Response>, std::io::Error>;
}
