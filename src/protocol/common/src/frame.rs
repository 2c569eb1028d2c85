// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use bytes::{Buf, Bytes};
use std::io::IoSlice;

/// An encoded request, ready to be written to the transport.
///
/// Small requests are finalized from the scratch buffer as a single
/// contiguous region. When the payload does not fit, the header stays in the
/// scratch region and the payload is carried in a separately allocated body,
/// so the two parts are written back to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Contiguous(Bytes),
    Split { header: Bytes, body: Bytes },
}

impl Frame {
    pub fn len(&self) -> usize {
        self.remaining()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_contiguous(&self) -> bool {
        matches!(self, Self::Contiguous(_))
    }

    /// The non-empty regions of the frame, in transmission order.
    pub fn chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let regions: [&[u8]; 2] = match self {
            Self::Contiguous(bytes) => [&bytes[..], &[]],
            Self::Split { header, body } => [&header[..], &body[..]],
        };
        regions.into_iter().filter(|region| !region.is_empty())
    }

    /// Copies the frame into a single buffer.
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buffer = Vec::with_capacity(self.len());
        for chunk in self.chunks() {
            buffer.extend_from_slice(chunk);
        }
        buffer
    }
}

impl Buf for Frame {
    fn remaining(&self) -> usize {
        match self {
            Self::Contiguous(bytes) => bytes.remaining(),
            Self::Split { header, body } => header.remaining() + body.remaining(),
        }
    }

    fn chunk(&self) -> &[u8] {
        match self {
            Self::Contiguous(bytes) => bytes.chunk(),
            Self::Split { header, body } => {
                if header.has_remaining() {
                    header.chunk()
                } else {
                    body.chunk()
                }
            }
        }
    }

    fn chunks_vectored<'a>(&'a self, dst: &mut [IoSlice<'a>]) -> usize {
        let mut filled = 0;
        for (slot, chunk) in dst.iter_mut().zip(self.chunks()) {
            *slot = IoSlice::new(chunk);
            filled += 1;
        }
        filled
    }

    fn advance(&mut self, cnt: usize) {
        match self {
            Self::Contiguous(bytes) => bytes.advance(cnt),
            Self::Split { header, body } => {
                let from_header = cnt.min(header.remaining());
                header.advance(from_header);
                body.advance(cnt - from_header);
            }
        }
    }
}
